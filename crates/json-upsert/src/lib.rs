//! Command-line front end for `json-upsert-core`.
//!
//! Reads a JSON file holding an array of objects and writes one PostgreSQL
//! UPSERT statement per object, either to a file or to stdout.
//!
//! # CLI Usage
//!
//! ```bash
//! # Print statements to stdout
//! json-upsert users.json -t users -u id
//!
//! # Composite conflict key, selected columns, written to a file
//! json-upsert sales.json -t sales -u "id, region" -c id,region,total -o sales.sql
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use json_upsert_core::columns::split_list;
use json_upsert_core::{generate_upserts, parse_records, ColumnSet};

/// Generate PostgreSQL UPSERT statements from a JSON file.
#[derive(Parser, Debug)]
#[command(name = "json-upsert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the input JSON file.
    pub json_file: PathBuf,

    /// Path to the output SQL file. If not provided, outputs to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target PostgreSQL table name.
    #[arg(short, long)]
    pub table: String,

    /// Unique key column(s) for ON CONFLICT. Separate multiple columns with commas.
    #[arg(short, long)]
    pub unique: String,

    /// Comma-separated list of columns to include. Defaults to the keys of the first object.
    #[arg(short, long)]
    pub columns: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Runs the tool: reads, generates, then writes to the output file or `stdout`.
///
/// Generation completes before anything is written, so a failed batch never
/// leaves partial output behind.
///
/// # Errors
///
/// Fails if the input cannot be read or is not an array of objects, if a
/// conflict key is not among the selected columns, or if the output cannot
/// be written.
pub fn run(cli: &Cli, stdout: &mut dyn Write) -> anyhow::Result<()> {
    let statements = generate(cli)?;

    match &cli.output {
        Some(path) => {
            write_file(path, &statements).context("Error writing to output file")?;
            writeln!(
                stdout,
                "UPSERT statements have been written to '{}'.",
                path.display()
            )?;
            info!(count = statements.len(), path = %path.display(), "wrote statements");
        }
        None => {
            write_statements(stdout, &statements)?;
        }
    }

    Ok(())
}

/// Reads the input file and generates the statements in memory.
///
/// # Errors
///
/// See [`run`].
pub fn generate(cli: &Cli) -> anyhow::Result<Vec<String>> {
    debug!(input = %cli.json_file.display(), table = %cli.table, "reading records");
    let json = std::fs::read_to_string(&cli.json_file).context("Error reading JSON file")?;
    let records = parse_records(&json).context("Error reading JSON file")?;
    debug!(records = records.len(), "parsed input");

    // An empty list means "no explicit columns", same as leaving the flag out.
    let columns = cli
        .columns
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| ColumnSet::new(split_list(c)));

    generate_upserts(&records, &cli.table, &cli.unique, columns)
        .context("Error generating UPSERT statements")
}

fn write_file(path: &Path, statements: &[String]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_statements(&mut writer, statements)?;
    writer.flush()
}

fn write_statements<W: Write + ?Sized>(out: &mut W, statements: &[String]) -> std::io::Result<()> {
    for stmt in statements {
        writeln!(out, "{stmt}")?;
    }
    Ok(())
}
