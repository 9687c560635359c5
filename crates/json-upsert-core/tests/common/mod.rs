#![allow(dead_code)]

use json_upsert_core::{generate_upserts, parse_records, ColumnSet, Record, UpsertError};

fn records(json: &str) -> Vec<Record> {
    parse_records(json).unwrap_or_else(|e| panic!("Bad input: {json}\nError: {e}"))
}

pub fn upserts(json: &str, table: &str, conflict: &str) -> Vec<String> {
    generate_upserts(&records(json), table, conflict, None)
        .unwrap_or_else(|e| panic!("Failed to generate for: {json}\nError: {e}"))
}

pub fn upserts_with_columns(
    json: &str,
    table: &str,
    conflict: &str,
    columns: &[&str],
) -> Vec<String> {
    let columns = ColumnSet::new(columns.iter().copied());
    generate_upserts(&records(json), table, conflict, Some(columns))
        .unwrap_or_else(|e| panic!("Failed to generate for: {json}\nError: {e}"))
}

pub fn upsert_err(json: &str, table: &str, conflict: &str) -> UpsertError {
    generate_upserts(&records(json), table, conflict, None)
        .expect_err(&format!("Expected an error for: {json}"))
}
