//! # json-upsert-core
//!
//! Turns an array of JSON records into idempotent PostgreSQL UPSERT
//! statements (`INSERT ... ON CONFLICT (...) DO UPDATE SET ...`).
//!
//! This crate provides:
//! - [`SqlValue`] rendering of JSON scalars as inline SQL literals
//! - Column and conflict-key resolution for a batch of records
//! - A typestate [`UpsertBuilder`] for single statements
//!
//! ## Example
//!
//! ```rust
//! use json_upsert_core::{generate_upserts, parse_records};
//!
//! let records = parse_records(r#"[{"id": 1, "name": "O'Brien"}]"#).unwrap();
//! let statements = generate_upserts(&records, "users", "id", None).unwrap();
//!
//! assert_eq!(
//!     statements[0],
//!     "INSERT INTO users (id, name) VALUES (1, 'O''Brien') \
//!      ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name;"
//! );
//! ```
//!
//! ## Caveats
//!
//! Table and column names are trusted and emitted verbatim. Nested JSON
//! arrays and objects are written as raw JSON text, unquoted; see
//! [`SqlValue::Other`].

pub mod columns;
pub mod error;
pub mod generator;
pub mod record;
pub mod upsert;
pub mod value;

pub use columns::{ColumnSet, ConflictKeys, Resolved};
pub use error::{Result, UpsertError};
pub use generator::generate_upserts;
pub use record::{parse_records, Record};
pub use upsert::UpsertBuilder;
pub use value::{SqlValue, ToSqlValue};
