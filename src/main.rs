use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use seva_calendar::astro::Ephemeris;
use seva_calendar::config::Config;
use seva_calendar::dispatch::{Dispatcher, InputRow, ResolvedRow};
use seva_calendar::festival::FestivalRules;
use seva_calendar::panchanga::Almanac;
use seva_calendar::search::SearchEngine;

/// Resolves free-text observance descriptions to civil dates.
#[derive(Parser)]
#[command(name = "seva-calendar", version, about)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON festival rule table replacing the built-in one.
    #[arg(long, global = true)]
    festivals: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the given texts, in order, as one sheet.
    Resolve {
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: i32,
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Resolve a JSON array of `{name, text}` rows.
    Batch {
        #[arg(short, long, value_parser = clap::value_parser!(i32).range(1..=9999))]
        year: i32,
        #[arg(short, long)]
        input: PathBuf,
        /// Defaults to standard output.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("seva_calendar={level}")),
    )
    .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let festivals = match cli.festivals.as_ref().or(config.festival_rules.as_ref()) {
        Some(path) => FestivalRules::load(path)
            .with_context(|| format!("failed to load festival rules {}", path.display()))?,
        None => FestivalRules::builtin().context("built-in festival table is invalid")?,
    };

    // Without an ephemeris only the civil strategies can succeed.
    let ephemeris = match Ephemeris::open(&config.ephemeris, config.observer) {
        Ok(eph) => Some(eph),
        Err(e) => {
            log::warn!("astronomy disabled: {e}");
            None
        }
    };
    let almanac = ephemeris
        .as_ref()
        .map(|eph| Almanac::new(eph, config.ayanamsa(), config.clock()));
    let engine = SearchEngine::new(almanac, config.windows);
    let mut dispatcher = Dispatcher::new(engine, festivals);

    match cli.command {
        Command::Resolve { year, texts } => {
            let rows: Vec<InputRow> = texts
                .into_iter()
                .map(|text| InputRow {
                    name: String::new(),
                    text,
                })
                .collect();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for row in dispatcher.resolve_rows(&rows, year) {
                writeln!(out, "{}", format_row(&row))?;
            }
        }
        Command::Batch {
            year,
            input,
            output,
        } => {
            let raw = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let rows: Vec<InputRow> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of rows", input.display()))?;
            let resolved = dispatcher.resolve_rows(&rows, year);
            let json = serde_json::to_string_pretty(&resolved)?;
            match output {
                Some(path) => fs::write(&path, json + "\n")
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

fn format_row(row: &ResolvedRow) -> String {
    let date = match row.calculated_date {
        Some(date) => date.to_string(),
        None => "Manual Check".to_owned(),
    };
    format!("{date}\t{}\t{}", row.classification, row.processed_input)
}
