//! Library patrons

use crate::types::BookId;
use serde::{Deserialize, Serialize};

/// A library patron
///
/// `borrowed_books` is the patron's own record of what they hold. It is not
/// kept in step with [`Book::is_on_loan`](crate::Book::is_on_loan): a loan
/// made through the library does not add a handle here, and borrowing here
/// does not flag the book. Callers that want both views to agree must update
/// both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub library_card_number: u32,
    borrowed_books: Vec<BookId>,
}

impl User {
    pub fn new(name: impl Into<String>, library_card_number: u32) -> Self {
        Self {
            name: name.into(),
            library_card_number,
            borrowed_books: Vec::new(),
        }
    }

    /// Handles of the books this user holds, in borrow order
    pub fn borrowed_books(&self) -> &[BookId] {
        &self.borrowed_books
    }

    /// Records a borrowed book. Duplicates are kept.
    pub fn borrow_book(&mut self, book: BookId) {
        self.borrowed_books.push(book);
    }

    /// Removes the first occurrence of `book`
    ///
    /// Returns false when the user never borrowed it.
    pub fn return_book(&mut self, book: BookId) -> bool {
        match self.borrowed_books.iter().position(|id| *id == book) {
            Some(index) => {
                self.borrowed_books.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_borrowed(&self, book: BookId) -> bool {
        self.borrowed_books.contains(&book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("Ada", 42);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.library_card_number, 42);
        assert!(user.borrowed_books().is_empty());
    }

    #[test]
    fn test_borrow_preserves_order() {
        let mut user = User::new("Ada", 42);
        let first = BookId::new();
        let second = BookId::new();

        user.borrow_book(first);
        user.borrow_book(second);

        assert_eq!(user.borrowed_books(), &[first, second]);
        assert!(user.has_borrowed(first));
    }

    #[test]
    fn test_return_removes_first_occurrence_only() {
        let mut user = User::new("Ada", 42);
        let id = BookId::new();
        let other = BookId::new();

        user.borrow_book(id);
        user.borrow_book(other);
        user.borrow_book(id);

        assert!(user.return_book(id));
        assert_eq!(user.borrowed_books(), &[other, id]);
    }

    #[test]
    fn test_return_unknown_book() {
        let mut user = User::new("Ada", 42);
        assert!(!user.return_book(BookId::new()));
    }
}
