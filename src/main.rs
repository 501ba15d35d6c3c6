//! memquery command-line front end
//!
//! Reads a `;`-separated script from a file or stdin, runs every statement
//! against a fresh in-memory store and prints one JSON result per line.

use std::{
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use memquery::{QueryProcessor, error::Result, sql::parser::split_statements};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Run SQL-like statements against in-memory tables
#[derive(Parser)]
#[command(name = "memquery")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Script to run; statements are read from stdin when absent
    #[arg(long, short, env = "MEMQUERY_FILE")]
    file: Option<PathBuf>,

    /// Print the table-name listing after the script has run
    #[arg(long)]
    tables: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Stop at the first failing statement and exit with status 1
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Serialize)]
struct TableListing {
    tables: Vec<String>,
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_env("MEMQUERY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("memquery: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Runs the script; `Ok(false)` means a statement failed under `--fail-fast`
fn run(cli: &Cli) -> Result<bool> {
    let script = match &cli.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut script = String::new();
            io::stdin().read_to_string(&mut script)?;
            script
        }
    };

    let mut processor = QueryProcessor::new();
    for statement in split_statements(&script) {
        let result = processor.process(statement);
        println!("{}", render(&result, cli.pretty)?);
        if cli.fail_fast && result.is_error() {
            return Ok(false);
        }
    }

    if cli.tables {
        let listing = TableListing {
            tables: processor.table_names(),
        };
        println!("{}", render(&listing, cli.pretty)?);
    }
    Ok(true)
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
