//! SQL literal rendering for JSON scalars.
//!
//! Generated statements carry their values inline, so every value is turned
//! into a literal that can be pasted straight into a `VALUES (...)` list.

use serde_json::{Number, Value};

/// A value to be rendered as an inline SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value. Also used for fields missing from a record.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer or floating point value, kept as written in the JSON input.
    Number(Number),
    /// Text value.
    Text(String),
    /// Anything else (nested arrays and objects).
    ///
    /// **Warning**: rendered as compact JSON text (`{"a":"b"}`) without
    /// quoting or escaping. Python-repr text such as `{'a': 'b'}` is not
    /// produced. The result is usually not valid SQL and is not safe to run
    /// against untrusted input.
    Other(Value),
}

impl SqlValue {
    /// Returns the SQL representation for inline use (escaped).
    ///
    /// Only single quotes inside text are escaped (doubled); backslashes and
    /// control characters are emitted as-is.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Number(n) => number_literal(n),
            Self::Text(s) => {
                // Escape single quotes by doubling them
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Other(v) => v.to_string(),
        }
    }
}

/// Integers keep their exact digits, whatever their size. Other numbers go
/// through `f64` so that `1e5` prints as `100000.0`.
fn number_literal(n: &Number) -> String {
    let text = n.to_string();
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return text;
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map_or(text, |f| f.to_string())
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for Value {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Self::Null => SqlValue::Null,
            Self::Bool(b) => SqlValue::Bool(b),
            Self::Number(n) => SqlValue::Number(n),
            Self::String(s) => SqlValue::Text(s),
            other @ (Self::Array(_) | Self::Object(_)) => SqlValue::Other(other),
        }
    }
}

impl ToSqlValue for &Value {
    fn to_sql_value(self) -> SqlValue {
        self.clone().to_sql_value()
    }
}
