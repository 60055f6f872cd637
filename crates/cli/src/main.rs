use anyhow::{Context, Result};
use bookshelf_config::ConfigManager;
use bookshelf_core::{parse_date, Clock, FixedClock, SystemClock};
use bookshelf_library::Library;
use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};
use std::io::Write;
use std::path::PathBuf;

mod commands;

fn build_cli() -> Command {
    Command::new("bookshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("In-memory library catalog with loans and late fees")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.toml (defaults to the platform config dir)")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("today")
                .long("today")
                .value_name("YYYY-MM-DD")
                .help("Pretend today is this date instead of reading the system clock")
                .global(true),
        )
        .subcommand(Command::new("demo").about("Run the sample session: query, loan, late fee, return"))
        .subcommand(
            Command::new("query")
                .about("Query the sample catalog")
                .arg(Arg::new("author").long("author").value_name("AUTHOR").help("Books by this exact author"))
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_name("YEAR")
                        .help("Books published in this year")
                        .value_parser(value_parser!(i32)),
                )
                .arg(Arg::new("category").long("category").value_name("CATEGORY").help("Books in this exact category"))
                .arg(
                    Arg::new("min-pages")
                        .long("min-pages")
                        .value_name("N")
                        .help("Books with more than N pages")
                        .value_parser(value_parser!(i32))
                        .allow_negative_numbers(true),
                )
                .arg(Arg::new("titles").long("titles").help("All titles, sorted").action(ArgAction::SetTrue))
                .arg(Arg::new("largest").long("largest").help("The book with the most pages").action(ArgAction::SetTrue))
                .group(
                    ArgGroup::new("filter")
                        .args(["author", "year", "category", "min-pages", "titles", "largest"])
                        .multiple(false),
                )
                .arg(Arg::new("json").long("json").help("Print JSON").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("fees")
                .about("Loan a sample title, backdate it, and show the late fee")
                .arg(Arg::new("title").required(true).value_name("TITLE").help("Title to loan"))
                .arg(
                    Arg::new("days")
                        .short('d')
                        .long("days")
                        .value_name("DAYS")
                        .help("How many days ago the loan started")
                        .value_parser(value_parser!(u64))
                        .default_value("15"),
                ),
        )
        .subcommand(
            Command::new("stats")
                .about("Show sample catalog statistics")
                .arg(Arg::new("json").long("json").help("Print JSON").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the config file")
                .subcommand_required(true)
                .subcommand(Command::new("init").about("Write a default config file if none exists"))
                .subcommand(Command::new("show").about("Print the effective config"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("reset").about("Overwrite the config file with defaults"))
                .subcommand(Command::new("validate").about("Check the config file for invalid values")),
        )
}

fn config_manager(matches: &clap::ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<PathBuf>("config") {
        Some(dir) => Ok(ConfigManager::with_directory(dir.clone())),
        None => ConfigManager::new().context("Failed to locate config directory"),
    }
}

fn clock(matches: &clap::ArgMatches) -> Result<Box<dyn Clock>> {
    match matches.get_one::<String>("today") {
        Some(value) => {
            let date = parse_date(value).context("Invalid --today")?;
            Ok(Box::new(FixedClock::new(date)))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let manager = config_manager(&matches)?;
    let config = manager
        .load_with_env_overrides()
        .context("Failed to load configuration")?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.to_string()),
    )
    .init();
    if !config.app.color_output {
        console::set_colors_enabled(false);
    }
    log::debug!("Using config at {}", manager.config_path().display());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Config commands must work even when the loan settings are invalid
    if let Some(("config", sub_matches)) = matches.subcommand() {
        return commands::config(&manager, sub_matches, &mut out);
    }

    let mut library = Library::from_config(&config.loans, clock(&matches)?)
        .context("Invalid loan settings")?;
    commands::sample_library(&mut library);

    match matches.subcommand() {
        Some(("demo", _)) => commands::run_demo(&mut library, &mut out),
        Some(("query", sub_matches)) => commands::query(&library, sub_matches, &mut out),
        Some(("fees", sub_matches)) => commands::fees(&mut library, sub_matches, &mut out),
        Some(("stats", sub_matches)) => {
            commands::show_stats(&library, sub_matches.get_flag("json"), &mut out)
        }
        _ => {
            build_cli().print_help()?;
            writeln!(out)?;
            Ok(())
        }
    }
}
