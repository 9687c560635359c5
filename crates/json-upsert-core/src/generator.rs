//! Batch UPSERT generation from JSON records.

use tracing::debug;

use crate::columns::{self, ColumnSet, Resolved};
use crate::error::Result;
use crate::record::Record;
use crate::upsert::UpsertBuilder;

/// Generates one UPSERT statement per record, in input order.
///
/// `conflict_spec` is a comma-separated list of conflict keys. When `columns`
/// is `None`, the keys of the first record decide the column set. Fields a
/// record lacks are inserted as `NULL`.
///
/// An empty `records` slice yields no statements without validating the
/// other arguments.
///
/// # Errors
///
/// Returns [`crate::UpsertError::UnknownConflictKey`] if a conflict key is not
/// among the resolved columns. No statements are produced in that case.
pub fn generate_upserts(
    records: &[Record],
    table: &str,
    conflict_spec: &str,
    columns: Option<ColumnSet>,
) -> Result<Vec<String>> {
    if records.is_empty() {
        return Ok(vec![]);
    }

    let resolved = columns::resolve(records, columns, conflict_spec)?;
    let update_columns: Vec<&str> = resolved.update_columns().collect();

    let statements: Vec<String> = records
        .iter()
        .map(|record| build_statement(record, table, &resolved, &update_columns))
        .collect();

    debug!(table, count = statements.len(), "generated upsert statements");
    Ok(statements)
}

fn build_statement(
    record: &Record,
    table: &str,
    resolved: &Resolved,
    update_columns: &[&str],
) -> String {
    let values: Vec<_> = resolved
        .columns
        .iter()
        .map(|col| record.get_or_null(col))
        .collect();

    UpsertBuilder::new()
        .into_table(table)
        .columns(resolved.columns.as_slice())
        .values(values)
        .on_conflict(resolved.conflict_keys.as_slice())
        .do_update(update_columns)
        .build()
}
