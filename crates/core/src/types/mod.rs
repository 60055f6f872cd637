//! Domain types for Bookshelf
//!
//! - `book`: Book records and their identifiers
//! - `user`: Library patrons and the books they hold

mod book;
mod user;

pub use book::{Book, BookId};
pub use user::User;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let book = Book::new("Dune", "Frank Herbert", 1965, 412, "Science Fiction");
        let mut user = User::new("Ada", 1001);
        user.borrow_book(book.id);
        assert_eq!(user.borrowed_books(), &[book.id]);
    }
}
