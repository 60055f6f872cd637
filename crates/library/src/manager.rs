use crate::error::{LibraryError, LibraryResult};
use crate::policy::LoanPolicy;
use bookshelf_config::LoanConfig;
use bookshelf_core::{Book, BookId, Clock, SystemClock, User};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

/// An in-memory book collection with loan bookkeeping
///
/// Books are kept in insertion order and titles are not required to be
/// unique. Lookups by title always act on the first matching book. All dates
/// come from the injected [`Clock`].
#[derive(Debug)]
pub struct Library<C: Clock = SystemClock> {
    books: Vec<Book>,
    clock: C,
    policy: LoanPolicy,
}

impl Library<SystemClock> {
    /// Creates an empty library on the system clock with the default policy
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Library<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Library<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            books: Vec::new(),
            clock,
            policy: LoanPolicy::default(),
        }
    }

    /// Creates an empty library whose late fees follow the `[loans]` config
    pub fn from_config(config: &LoanConfig, clock: C) -> LibraryResult<Self> {
        let policy = LoanPolicy::from_config(config)?;
        Ok(Self::with_clock(clock).with_policy(policy))
    }

    pub fn with_policy(mut self, policy: LoanPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn get_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    /// First book with exactly this title
    pub fn find_book_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.title == title)
    }

    /// Appends a book. Duplicate titles are allowed.
    pub fn add_book(&mut self, book: Book) {
        debug!("Adding book '{}' ({})", book.title, book.id);
        self.books.push(book);
    }

    /// Removes every book with exactly this title
    pub fn remove_book(&mut self, title: &str) {
        self.remove_book_counted(title);
    }

    /// Removes every book with exactly this title, returning how many went
    pub fn remove_book_counted(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|book| book.title != title);
        let removed = before - self.books.len();
        if removed > 0 {
            debug!("Removed {} book(s) titled '{}'", removed, title);
        }
        removed
    }

    pub fn find_books_by_year(&self, year: i32) -> Vec<&Book> {
        self.filter(|book| book.publication_year == year)
    }

    pub fn find_books_by_author(&self, author: &str) -> Vec<&Book> {
        self.filter(|book| book.author == author)
    }

    pub fn find_books_by_category(&self, category: &str) -> Vec<&Book> {
        self.filter(|book| book.category == category)
    }

    /// Book with the highest page count; the earliest added wins a tie
    pub fn find_book_with_most_pages(&self) -> Option<&Book> {
        self.books
            .iter()
            .reduce(|best, book| if book.pages > best.pages { book } else { best })
    }

    /// Books with strictly more than `n` pages
    pub fn find_books_with_more_than_n_pages(&self, n: i32) -> Vec<&Book> {
        self.filter(|book| book.pages > n)
    }

    /// Every title in ascending UTF-16 code unit order, duplicates kept
    pub fn get_all_book_titles_sorted(&self) -> Vec<String> {
        let mut titles: Vec<String> = self.books.iter().map(|book| book.title.clone()).collect();
        titles.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
        titles
    }

    /// Loans the first available copy of `title`
    ///
    /// Returns false when no book has the title or every copy is already out.
    pub fn loan_book(&mut self, title: &str) -> bool {
        self.try_loan_book(title).is_ok()
    }

    /// Loans the first available copy of `title`, reporting why it failed
    pub fn try_loan_book(&mut self, title: &str) -> LibraryResult<BookId> {
        let today = self.clock.today();
        let mut found = false;

        for book in self.books.iter_mut().filter(|book| book.title == title) {
            if !book.is_on_loan() {
                book.set_on_loan(true, Some(today));
                info!("Loaned '{}' ({}) on {}", title, book.id, today);
                return Ok(book.id);
            }
            found = true;
        }

        debug!("Cannot loan '{}': found={}", title, found);
        if found {
            Err(LibraryError::NoCopyAvailable(title.to_string()))
        } else {
            Err(LibraryError::BookNotFound(title.to_string()))
        }
    }

    /// Returns the first on-loan copy of `title`
    ///
    /// Returns false when no book has the title or no copy is out.
    pub fn return_book(&mut self, title: &str) -> bool {
        self.try_return_book(title).is_ok()
    }

    /// Returns the first on-loan copy of `title`, reporting why it failed
    pub fn try_return_book(&mut self, title: &str) -> LibraryResult<BookId> {
        let mut found = false;

        for book in self.books.iter_mut().filter(|book| book.title == title) {
            if book.is_on_loan() {
                book.set_on_loan(false, None);
                info!("Returned '{}' ({})", title, book.id);
                return Ok(book.id);
            }
            found = true;
        }

        debug!("Cannot return '{}': found={}", title, found);
        if found {
            Err(LibraryError::NotOnLoan(title.to_string()))
        } else {
            Err(LibraryError::BookNotFound(title.to_string()))
        }
    }

    /// Late fee owed on `book` as of today
    ///
    /// Zero unless the book is on loan past the grace period. The book does
    /// not have to belong to this library.
    pub fn calculate_late_fees(&self, book: &Book) -> f64 {
        book.days_on_loan(self.clock.today())
            .map(|days| self.policy.fee_for_days(days))
            .unwrap_or(0.0)
    }

    pub fn books_on_loan(&self) -> Vec<&Book> {
        self.filter(|book| book.is_on_loan())
    }

    /// Books on loan that currently owe a fee
    pub fn overdue_books(&self) -> Vec<&Book> {
        self.filter(|book| self.calculate_late_fees(book) > 0.0)
    }

    /// Sum of the late fees owed across the whole collection
    pub fn total_late_fees(&self) -> f64 {
        self.books
            .iter()
            .map(|book| self.calculate_late_fees(book))
            .sum()
    }

    /// Resolves the handles a user holds against this library
    ///
    /// Handles for books no longer in the collection are skipped. The user's
    /// list is not compared against loan flags.
    pub fn borrowed_books(&self, user: &User) -> Vec<&Book> {
        user.borrowed_books()
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    pub fn stats(&self) -> LibraryStats {
        let unique_authors = self
            .books
            .iter()
            .map(|book| book.author.as_str())
            .collect::<HashSet<_>>()
            .len();
        let unique_categories = self
            .books
            .iter()
            .map(|book| book.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        LibraryStats {
            total_books: self.books.len(),
            on_loan: self.books.iter().filter(|book| book.is_on_loan()).count(),
            unique_authors,
            unique_categories,
            total_pages: self.books.iter().map(|book| i64::from(book.pages)).sum(),
        }
    }

    fn filter<P>(&self, predicate: P) -> Vec<&Book>
    where
        P: Fn(&Book) -> bool,
    {
        self.books.iter().filter(|&book| predicate(book)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub on_loan: usize,
    pub unique_authors: usize,
    pub unique_categories: usize,
    pub total_pages: i64,
}
