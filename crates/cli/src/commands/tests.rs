use super::*;
use bookshelf_core::{FixedClock, NaiveDate};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
}

fn setup_library() -> Library<FixedClock> {
    let mut library = Library::with_clock(FixedClock::new(today()));
    sample_library(&mut library);
    library
}

fn sub_matches(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["bookshelf"];
    argv.extend_from_slice(args);
    let matches = crate::build_cli()
        .try_get_matches_from(argv)
        .expect("arguments should parse");
    let (_, sub) = matches.subcommand().expect("a subcommand");
    sub.clone()
}

fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> Result<()>,
{
    let mut buf = Vec::new();
    f(&mut buf).expect("command should succeed");
    String::from_utf8(buf).expect("output should be UTF-8")
}

#[test]
fn test_demo_output() {
    let mut library = setup_library();
    let output = render(|out| run_demo(&mut library, out));

    assert!(output.contains("  Title1\n  Title3\n"));
    assert!(output.contains("Book loaned: true"));
    assert!(output.contains("Late fees: $0.5\n"));
    assert!(output.contains("Book returned: true"));

    let book = library.find_book_by_title("Title1").unwrap();
    assert!(!book.is_on_loan());
}

#[test]
fn test_demo_uses_configured_grace_period() {
    let mut library = setup_library().with_policy(bookshelf_library::LoanPolicy::new(30, 2.0));
    let output = render(|out| run_demo(&mut library, out));
    assert!(output.contains("Late fees: $2.0\n"));
}

#[test]
fn test_query_by_author() {
    let library = setup_library();
    let matches = sub_matches(&["query", "--author", "Author1"]);
    let output = render(|out| query(&library, &matches, out));

    assert!(output.contains("Title1"));
    assert!(output.contains("Title3"));
    assert!(!output.contains("Title2"));
}

#[test]
fn test_query_no_results() {
    let library = setup_library();
    let matches = sub_matches(&["query", "--year", "1900"]);
    let output = render(|out| query(&library, &matches, out));
    assert!(output.contains("No books found."));
}

#[test]
fn test_query_titles_json() {
    let library = setup_library();
    let matches = sub_matches(&["query", "--titles", "--json"]);
    let output = render(|out| query(&library, &matches, out));

    let titles: Vec<String> = serde_json::from_str(&output).unwrap();
    assert_eq!(titles, vec!["Title1", "Title2", "Title3"]);
}

#[test]
fn test_query_largest_json() {
    let library = setup_library();
    let matches = sub_matches(&["query", "--largest", "--json"]);
    let output = render(|out| query(&library, &matches, out));

    let books: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(books.as_array().unwrap().len(), 1);
    assert_eq!(books[0]["title"], "Title2");
}

#[test]
fn test_query_min_pages_accepts_negative() {
    let library = setup_library();
    let matches = sub_matches(&["query", "--min-pages", "-1", "--json"]);
    let output = render(|out| query(&library, &matches, out));

    let books: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(books.as_array().unwrap().len(), 3);
}

#[test]
fn test_query_filters_are_exclusive() {
    let result = crate::build_cli().try_get_matches_from([
        "bookshelf", "query", "--author", "Author1", "--year", "2020",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_fees_reports_amount() {
    let mut library = setup_library();
    let matches = sub_matches(&["fees", "Title2", "--days", "20"]);
    let output = render(|out| fees(&mut library, &matches, out));

    assert!(output.contains("'Title2' on loan since 2024-01-21 (20 days): late fee $3.00"));
}

#[test]
fn test_fees_default_days() {
    let mut library = setup_library();
    let matches = sub_matches(&["fees", "Title1"]);
    let output = render(|out| fees(&mut library, &matches, out));
    assert!(output.contains("late fee $0.50"));
}

#[test]
fn test_fees_unknown_title() {
    let mut library = setup_library();
    let matches = sub_matches(&["fees", "Missing"]);
    let mut buf = Vec::new();

    let err = fees(&mut library, &matches, &mut buf).unwrap_err();
    assert!(err.to_string().contains("Cannot loan 'Missing'"));
}

#[test]
fn test_stats_json() {
    let library = setup_library();
    let output = render(|out| show_stats(&library, true, out));

    let stats: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(stats["total_books"], 3);
    assert_eq!(stats["unique_authors"], 2);
    assert_eq!(stats["total_pages"], 850);
}

#[test]
fn test_stats_text() {
    let library = setup_library();
    let output = render(|out| show_stats(&library, false, out));
    assert!(output.contains("Total Books: 3"));
    assert!(output.contains("Late Fees Owed: $0.00"));
}

#[test]
fn test_config_init_then_path() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf());

    let output = render(|out| config(&manager, &sub_matches(&["config", "init"]), out));
    assert!(output.contains("Created"));
    assert!(manager.config_path().exists());

    let output = render(|out| config(&manager, &sub_matches(&["config", "init"]), out));
    assert!(output.contains("already exists"));

    let output = render(|out| config(&manager, &sub_matches(&["config", "path"]), out));
    assert!(output.trim().ends_with("config.toml"));
}

#[test]
fn test_config_show_is_json() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf());

    let output = render(|out| config(&manager, &sub_matches(&["config", "show"]), out));
    let shown: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(shown["loans"]["grace_period_days"], 14);
}

#[test]
fn test_config_reset_repairs_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf());
    std::fs::write(manager.config_path(), "[loans]\ndaily_fee = -2.0\n").unwrap();

    let output = render(|out| config(&manager, &sub_matches(&["config", "reset"]), out));
    assert!(output.contains("to defaults"));

    let output = render(|out| config(&manager, &sub_matches(&["config", "validate"]), out));
    assert!(output.contains("Config is valid"));
    assert_eq!(manager.load().unwrap(), Config::default());
}

#[test]
fn test_config_validate_reports_problems() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf());
    std::fs::write(manager.config_path(), "[loans]\ndaily_fee = -2.0\n").unwrap();

    let mut buf = Vec::new();
    let result = config(&manager, &sub_matches(&["config", "validate"]), &mut buf);
    assert!(result.is_err());
    assert!(String::from_utf8(buf).unwrap().contains("loans.daily_fee"));
}
