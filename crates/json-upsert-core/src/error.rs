//! Error types for UPSERT generation.

/// Errors that can occur while turning JSON records into UPSERT statements.
#[derive(Debug, thiserror::Error)]
pub enum UpsertError {
    /// A conflict key is not part of the resolved column set.
    #[error("Unique key '{key}' is not among the selected columns.")]
    UnknownConflictKey {
        /// The offending conflict key, as written after trimming.
        key: String,
    },

    /// The input text is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The top-level JSON value is not an array.
    #[error("JSON data must be an array of objects.")]
    NotAnArray,

    /// An element of the top-level array is not an object.
    #[error("JSON data must be an array of objects (element {index} is not an object).")]
    NotAnObject {
        /// Zero-based position of the element in the array.
        index: usize,
    },
}

/// Result type for UPSERT generation.
pub type Result<T> = std::result::Result<T, UpsertError>;
