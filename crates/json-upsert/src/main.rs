//! json-upsert CLI
//!
//! Command-line tool for turning JSON records into PostgreSQL UPSERT statements.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use json_upsert::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging (stderr only; stdout carries SQL)
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();
    match json_upsert::run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
