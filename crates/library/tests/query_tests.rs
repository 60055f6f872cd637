//! Integration tests for catalog queries

use bookshelf_core::{Book, FixedClock, NaiveDate};
use bookshelf_library::Library;

fn setup_library() -> Library<FixedClock> {
    let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    let mut library = Library::with_clock(FixedClock::new(today));
    library.add_book(Book::new("Dune", "Frank Herbert", 1965, 412, "Science Fiction"));
    library.add_book(Book::new("Emma", "Jane Austen", 1815, 474, "Romance"));
    library.add_book(Book::new("Persuasion", "Jane Austen", 1817, 249, "Romance"));
    library.add_book(Book::new("Children of Dune", "Frank Herbert", 1976, 444, "Science Fiction"));
    library
}

fn titles(books: Vec<&Book>) -> Vec<&str> {
    books.into_iter().map(|book| book.title.as_str()).collect()
}

#[test]
fn test_added_book_is_found_by_each_field() {
    let mut library = setup_library();
    library.add_book(Book::new("Kindred", "Octavia E. Butler", 1979, 264, "Speculative"));

    assert!(titles(library.find_books_by_year(1979)).contains(&"Kindred"));
    assert!(titles(library.find_books_by_author("Octavia E. Butler")).contains(&"Kindred"));
    assert!(titles(library.find_books_by_category("Speculative")).contains(&"Kindred"));

    assert!(!titles(library.find_books_by_year(1980)).contains(&"Kindred"));
    assert!(!titles(library.find_books_by_author("Octavia Butler")).contains(&"Kindred"));
    assert!(!titles(library.find_books_by_category("speculative")).contains(&"Kindred"));
}

#[test]
fn test_queries_return_insertion_order() {
    let library = setup_library();
    assert_eq!(
        titles(library.find_books_by_author("Frank Herbert")),
        vec!["Dune", "Children of Dune"]
    );
    assert_eq!(
        titles(library.find_books_with_more_than_n_pages(412)),
        vec!["Emma", "Children of Dune"]
    );
}

#[test]
fn test_most_pages() {
    let library = setup_library();
    let book = library.find_book_with_most_pages().map(|b| b.title.as_str());
    assert_eq!(book, Some("Emma"));
}

#[test]
fn test_sorted_titles() {
    let library = setup_library();
    assert_eq!(
        library.get_all_book_titles_sorted(),
        vec!["Children of Dune", "Dune", "Emma", "Persuasion"]
    );
}

#[test]
fn test_remove_leaves_other_titles() {
    let mut library = setup_library();
    library.remove_book("Dune");

    assert_eq!(library.len(), 3);
    assert!(library.find_book_by_title("Dune").is_none());
    assert!(library.find_book_by_title("Children of Dune").is_some());
}

#[test]
fn test_queries_on_empty_library() {
    let library = Library::with_clock(FixedClock::new(NaiveDate::MIN));
    assert!(library.find_books_by_year(2000).is_empty());
    assert!(library.find_books_with_more_than_n_pages(-1).is_empty());
    assert!(library.get_all_book_titles_sorted().is_empty());
    assert!(library.find_book_with_most_pages().is_none());
    assert_eq!(library.stats().total_books, 0);
}

#[test]
fn test_stats_serialize() -> Result<(), serde_json::Error> {
    let library = setup_library();
    let json = serde_json::to_value(library.stats())?;
    assert_eq!(json["total_books"], 4);
    assert_eq!(json["unique_authors"], 2);
    assert_eq!(json["total_pages"], 1579);
    Ok(())
}
