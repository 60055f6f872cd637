//! Book domain model

use crate::error::{CoreError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a book
///
/// Other records refer to a book through this handle instead of holding the
/// book itself. The `Library` owns the only copy of each `Book`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    /// Creates a new random BookId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a BookId from a UUID string
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|source| CoreError::InvalidBookId {
                value: s.to_string(),
                source,
            })
    }

    /// Returns the BookId as a string
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A book held by the library
///
/// Descriptive fields are public and never validated: blank titles and
/// negative page counts are accepted as given. Loan state is private and
/// changes only through [`Book::set_on_loan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub pages: i32,
    pub category: String,
    on_loan: bool,
    loan_date: Option<NaiveDate>,
}

impl Book {
    /// Creates a book that is not on loan
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
        pages: i32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            author: author.into(),
            publication_year,
            pages,
            category: category.into(),
            on_loan: false,
            loan_date: None,
        }
    }

    /// Returns true while the book is checked out
    pub fn is_on_loan(&self) -> bool {
        self.on_loan
    }

    /// Date the current loan started, if any
    pub fn loan_date(&self) -> Option<NaiveDate> {
        self.loan_date
    }

    /// Overwrites the loan state
    ///
    /// The library's loan and return operations go through here. It is also
    /// public so a loan can be backdated, which is how overdue scenarios are
    /// staged.
    pub fn set_on_loan(&mut self, on_loan: bool, loan_date: Option<NaiveDate>) {
        self.on_loan = on_loan;
        self.loan_date = loan_date;
    }

    /// Whole days between the loan date and `today`
    ///
    /// `None` when the book is not on loan. A loan flagged without a date
    /// counts as zero days.
    pub fn days_on_loan(&self, today: NaiveDate) -> Option<i64> {
        if !self.on_loan {
            return None;
        }
        Some(
            self.loan_date
                .map(|date| (today - date).num_days())
                .unwrap_or(0),
        )
    }
}
