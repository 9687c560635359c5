//! Column and conflict-key resolution.
//!
//! Both lists are fixed once per batch and then applied to every record.

use tracing::debug;

use crate::error::{Result, UpsertError};
use crate::record::Record;

/// Ordered column names a statement inserts, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet(Vec<String>);

impl ColumnSet {
    /// Takes an explicit column list as given (no deduplication).
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(columns.into_iter().map(Into::into).collect())
    }

    /// Derives the columns from the keys of `record`, in document order.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        Self::new(record.keys())
    }

    /// Returns `true` if `name` is one of the columns.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    /// Returns the column names.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterates over the column names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Conflict target of the `ON CONFLICT (...)` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictKeys(Vec<String>);

impl ConflictKeys {
    /// Parses a comma-separated key list, trimming each entry.
    ///
    /// Never returns an empty list: `""` parses to a single empty key.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        Self(split_list(spec))
    }

    /// Returns `true` if `name` is a conflict key.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|k| k == name)
    }

    /// Returns the key names.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterates over the key names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Splits a comma-separated list and trims whitespace around each entry.
///
/// Empty entries are kept.
#[must_use]
pub fn split_list(spec: &str) -> Vec<String> {
    spec.split(',').map(|s| s.trim().to_string()).collect()
}

/// Columns and conflict keys after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Columns every statement inserts.
    pub columns: ColumnSet,
    /// Conflict target, each entry a member of `columns`.
    pub conflict_keys: ConflictKeys,
}

impl Resolved {
    /// Columns assigned in `DO UPDATE SET`: every column that is not a
    /// conflict key, in column order.
    pub fn update_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| !self.conflict_keys.contains(c))
    }
}

/// Resolves the column set for a batch and validates the conflict keys.
///
/// Without `explicit` columns, the keys of the first record are used; later
/// records are never consulted. An empty batch resolves to an empty column
/// set, which fails validation.
///
/// # Errors
///
/// Returns [`UpsertError::UnknownConflictKey`] for the first conflict key that
/// is not a column.
pub fn resolve(
    records: &[Record],
    explicit: Option<ColumnSet>,
    conflict_spec: &str,
) -> Result<Resolved> {
    let columns = explicit.unwrap_or_else(|| {
        records
            .first()
            .map(ColumnSet::from_record)
            .unwrap_or_default()
    });
    let conflict_keys = ConflictKeys::parse(conflict_spec);

    if let Some(key) = conflict_keys.iter().find(|k| !columns.contains(k)) {
        return Err(UpsertError::UnknownConflictKey {
            key: key.to_string(),
        });
    }

    debug!(
        columns = ?columns.as_slice(),
        conflict_keys = ?conflict_keys.as_slice(),
        "resolved upsert columns"
    );

    Ok(Resolved {
        columns,
        conflict_keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_records;

    fn records(json: &str) -> Vec<Record> {
        parse_records(json).unwrap()
    }

    #[test]
    fn test_split_list_trims() {
        assert_eq!(split_list("id, region"), vec!["id", "region"]);
        assert_eq!(split_list("  a ,b,  c  "), vec!["a", "b", "c"]);
        assert_eq!(split_list(""), vec![""]);
        assert_eq!(split_list("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_columns_from_first_record_only() {
        let rows = records(r#"[{"id": 1, "name": "a"}, {"id": 2, "extra": true}]"#);
        let resolved = resolve(&rows, None, "id").unwrap();
        assert_eq!(resolved.columns, ColumnSet::new(["id", "name"]));
    }

    #[test]
    fn test_explicit_columns_win() {
        let rows = records(r#"[{"id": 1, "name": "a"}]"#);
        let explicit = ColumnSet::new(["name", "id", "missing"]);
        let resolved = resolve(&rows, Some(explicit), "id").unwrap();
        assert_eq!(resolved.columns.as_slice(), ["name", "id", "missing"]);
    }

    #[test]
    fn test_explicit_columns_not_deduplicated() {
        let resolved = resolve(&[], Some(ColumnSet::new(["id", "id"])), "id").unwrap();
        assert_eq!(resolved.columns.as_slice(), ["id", "id"]);
    }

    #[test]
    fn test_multi_column_conflict_key() {
        let rows = records(r#"[{"id": 1, "region": "eu", "total": 3}]"#);
        let resolved = resolve(&rows, None, "id, region").unwrap();
        assert_eq!(resolved.conflict_keys.as_slice(), ["id", "region"]);
        assert_eq!(resolved.update_columns().collect::<Vec<_>>(), vec!["total"]);
    }

    #[test]
    fn test_unknown_conflict_key() {
        let rows = records(r#"[{"id": 1}]"#);
        let err = resolve(&rows, None, "id,email").unwrap_err();
        assert!(matches!(&err, UpsertError::UnknownConflictKey { key } if key == "email"));
        assert_eq!(
            err.to_string(),
            "Unique key 'email' is not among the selected columns."
        );
    }

    #[test]
    fn test_conflict_key_outside_explicit_columns() {
        let rows = records(r#"[{"id": 1, "name": "a"}]"#);
        let err = resolve(&rows, Some(ColumnSet::new(["name"])), "id").unwrap_err();
        assert!(matches!(err, UpsertError::UnknownConflictKey { key } if key == "id"));
    }

    #[test]
    fn test_empty_conflict_spec_is_rejected() {
        let rows = records(r#"[{"id": 1}]"#);
        let err = resolve(&rows, None, "").unwrap_err();
        assert!(matches!(err, UpsertError::UnknownConflictKey { key } if key.is_empty()));
    }

    #[test]
    fn test_all_columns_are_conflict_keys() {
        let rows = records(r#"[{"a": 1, "b": 2}]"#);
        let resolved = resolve(&rows, None, "a,b").unwrap();
        assert_eq!(resolved.update_columns().count(), 0);
    }
}
