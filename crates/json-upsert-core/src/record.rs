//! JSON input records.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, UpsertError};

/// One input row: a JSON object mapping field names to values.
///
/// Field order is the order in which keys appeared in the source document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// Shared `null` returned for missing fields.
static NULL: Value = Value::Null;

impl Record {
    /// Returns the value of `field`, or JSON `null` if the record lacks it.
    #[must_use]
    pub fn get_or_null(&self, field: &str) -> &Value {
        self.0.get(field).unwrap_or(&NULL)
    }

    /// Iterates over field names in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Parses JSON text that must hold an array of objects.
///
/// # Errors
///
/// Returns [`UpsertError::InvalidJson`] if the text is not JSON,
/// [`UpsertError::NotAnArray`] if the top-level value is not an array, and
/// [`UpsertError::NotAnObject`] for the first element that is not an object.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(json)?;
    records_from_value(value)
}

/// Converts an already parsed JSON value into records.
///
/// # Errors
///
/// Same shape errors as [`parse_records`].
pub fn records_from_value(value: Value) -> Result<Vec<Record>> {
    let Value::Array(items) = value else {
        return Err(UpsertError::NotAnArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Record(fields)),
            _ => Err(UpsertError::NotAnObject { index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_key_order() {
        let records = parse_records(r#"[{"zeta": 1, "alpha": 2, "mid": 3}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].keys().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "mid"]
        );
    }

    #[test]
    fn test_missing_field_reads_as_null() {
        let records = parse_records(r#"[{"id": 1}]"#).unwrap();
        assert_eq!(records[0].get_or_null("id"), &json!(1));
        assert_eq!(records[0].get_or_null("name"), &Value::Null);
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            parse_records(r#"{"id": 1}"#),
            Err(UpsertError::NotAnArray)
        ));
    }

    #[test]
    fn test_rejects_non_object_element() {
        assert!(matches!(
            parse_records(r#"[{"id": 1}, 2]"#),
            Err(UpsertError::NotAnObject { index: 1 })
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            parse_records("[{"),
            Err(UpsertError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_deserialize_directly() {
        let record: Record = serde_json::from_value(json!({"a": true})).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(record.get_or_null("a"), &json!(true));
    }
}
