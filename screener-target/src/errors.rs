//! Error types for the screener-target library.

use thiserror::Error;

/// Top-level error type for encoding and decoding screen records.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A wire value could not be coerced to the field's declared type.
    #[error("Schema mismatch in {record}.{field}: expected {expected}")]
    SchemaMismatch {
        record: &'static str,
        field: String,
        expected: &'static str,
    },

    /// A value has no wire form the codec can read back.
    #[error("Value out of range for {record}.{field}: {value}")]
    OutOfRange {
        record: &'static str,
        field: String,
        value: String,
    },

    /// A descriptor reached a record that has no slot for it.
    #[error("Unknown field {record}.{field}")]
    UnknownField {
        record: &'static str,
        field: &'static str,
    },

    /// Malformed JSON text.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn mismatch(
        record: &'static str,
        field: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        CodecError::SchemaMismatch {
            record,
            field: field.into(),
            expected,
        }
    }
}

/// Convenience Result type for this library.
pub type Result<T> = std::result::Result<T, CodecError>;
