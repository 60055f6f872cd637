use anyhow::{bail, Context, Result};
use bookshelf_config::{Config, ConfigManager};
use bookshelf_core::{Book, Clock};
use bookshelf_library::Library;
use chrono::Days;
use clap::ArgMatches;
use console::style;
use std::io::Write;

/// The three books the demo session starts with
pub fn sample_library<C: Clock>(library: &mut Library<C>) {
    library.add_book(Book::new("Title1", "Author1", 2020, 300, "Fiction"));
    library.add_book(Book::new("Title2", "Author2", 2019, 400, "Science"));
    library.add_book(Book::new("Title3", "Author1", 2021, 150, "History"));
}

/// Walk through a query, a loan, an overdue fee and a return
pub fn run_demo<C: Clock>(library: &mut Library<C>, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", style("Books by Author1").bold().cyan())?;
    let by_author: Vec<Book> = library
        .find_books_by_author("Author1")
        .into_iter()
        .cloned()
        .collect();
    for book in &by_author {
        writeln!(out, "  {}", book.title)?;
    }

    let loaned = library.loan_book("Title1");
    writeln!(out, "Book loaned: {}", loaned)?;

    // Backdate the first match so the loan is one day past the grace period
    if let Some(first) = by_author.first() {
        let days_back = library.policy().grace_period_days.saturating_add(1);
        let backdated = library
            .clock()
            .today()
            .checked_sub_days(Days::new(days_back.max(0) as u64))
            .context("Loan date out of calendar range")?;

        if let Some(book) = library.get_mut(first.id) {
            if book.is_on_loan() {
                book.set_on_loan(true, Some(backdated));
                let book = book.clone();
                let fee = library.calculate_late_fees(&book);
                writeln!(out, "Late fees: ${:?}", fee)?;
            }
        }
    }

    let returned = library.return_book("Title1");
    writeln!(out, "Book returned: {}", returned)?;

    Ok(())
}

/// Run one query against the catalog
pub fn query<C: Clock>(
    library: &Library<C>,
    matches: &ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    if matches.get_flag("titles") {
        let titles = library.get_all_book_titles_sorted();
        if matches.get_flag("json") {
            writeln!(out, "{}", serde_json::to_string_pretty(&titles)?)?;
        } else {
            for title in titles {
                writeln!(out, "{}", title)?;
            }
        }
        return Ok(());
    }

    let results: Vec<&Book> = if let Some(author) = matches.get_one::<String>("author") {
        library.find_books_by_author(author)
    } else if let Some(year) = matches.get_one::<i32>("year") {
        library.find_books_by_year(*year)
    } else if let Some(category) = matches.get_one::<String>("category") {
        library.find_books_by_category(category)
    } else if let Some(pages) = matches.get_one::<i32>("min-pages") {
        library.find_books_with_more_than_n_pages(*pages)
    } else if matches.get_flag("largest") {
        library.find_book_with_most_pages().into_iter().collect()
    } else {
        library.books().iter().collect()
    };

    if matches.get_flag("json") {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
        return Ok(());
    }

    if results.is_empty() {
        writeln!(out, "No books found.")?;
        return Ok(());
    }

    writeln!(out, "\n{} Books", style(results.len()).bold().cyan())?;
    writeln!(out, "{}", "=".repeat(60))?;
    for book in results {
        print_book_summary(book, out)?;
    }

    Ok(())
}

/// Loan a title, backdate it, and report the fee owed today
pub fn fees<C: Clock>(
    library: &mut Library<C>,
    matches: &ArgMatches,
    out: &mut impl Write,
) -> Result<()> {
    let title = matches
        .get_one::<String>("title")
        .ok_or_else(|| anyhow::anyhow!("Title is required"))?;
    let days_out = matches.get_one::<u64>("days").copied().unwrap_or(0);

    let id = library
        .try_loan_book(title)
        .with_context(|| format!("Cannot loan '{}'", title))?;

    let loan_date = library
        .clock()
        .today()
        .checked_sub_days(Days::new(days_out))
        .context("Loan date out of calendar range")?;

    let Some(book) = library.get_mut(id) else {
        bail!("Book '{}' vanished after loaning", title);
    };
    book.set_on_loan(true, Some(loan_date));
    let book = book.clone();

    let fee = library.calculate_late_fees(&book);
    writeln!(
        out,
        "'{}' on loan since {} ({} days): late fee ${:.2}",
        book.title, loan_date, days_out, fee
    )?;

    Ok(())
}

/// Print catalog statistics
pub fn show_stats<C: Clock>(library: &Library<C>, json: bool, out: &mut impl Write) -> Result<()> {
    let stats = library.stats();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    writeln!(out, "\n{}", style("Library Statistics").bold().cyan())?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "Total Books: {}", stats.total_books)?;
    writeln!(out, "On Loan: {}", stats.on_loan)?;
    writeln!(out, "Unique Authors: {}", stats.unique_authors)?;
    writeln!(out, "Categories: {}", stats.unique_categories)?;
    writeln!(out, "Total Pages: {}", stats.total_pages)?;
    writeln!(out, "Late Fees Owed: ${:.2}", library.total_late_fees())?;

    Ok(())
}

/// `config init|show|path|reset|validate`
pub fn config(manager: &ConfigManager, matches: &ArgMatches, out: &mut impl Write) -> Result<()> {
    match matches.subcommand() {
        Some(("init", _)) => {
            if manager.initialize().context("Failed to write default config")? {
                writeln!(
                    out,
                    "{} Created {}",
                    style("✓").green().bold(),
                    manager.config_path().display()
                )?;
            } else {
                writeln!(
                    out,
                    "Config already exists at {}",
                    manager.config_path().display()
                )?;
            }
        }
        Some(("show", _)) => {
            let config: Config = manager.load().context("Failed to load config")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
        }
        Some(("path", _)) => {
            writeln!(out, "{}", manager.config_path().display())?;
        }
        Some(("reset", _)) => {
            manager.reset().context("Failed to write default config")?;
            writeln!(
                out,
                "{} Reset {} to defaults",
                style("✓").green().bold(),
                manager.config_path().display()
            )?;
        }
        Some(("validate", _)) => {
            let problems = manager.problems().context("Failed to load config")?;
            if problems.is_empty() {
                writeln!(out, "{} Config is valid", style("✓").green().bold())?;
            } else {
                for problem in &problems {
                    writeln!(out, "{} {}", style("✗").red().bold(), problem)?;
                }
                bail!("{} config problem(s) found", problems.len());
            }
        }
        _ => bail!("Unknown config command"),
    }
    Ok(())
}

fn print_book_summary(book: &Book, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", style(&book.title).bold())?;
    writeln!(out, "  Author: {}", book.author)?;
    writeln!(
        out,
        "  Year: {}  Pages: {}  Category: {}",
        book.publication_year, book.pages, book.category
    )?;
    if let Some(date) = book.loan_date().filter(|_| book.is_on_loan()) {
        writeln!(out, "  On loan since {}", date)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
