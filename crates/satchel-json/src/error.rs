//! Error types for parsing, typed access and conversion.

use thiserror::Error;

/// Errors that can occur while parsing, reading or converting a [`Value`](crate::Value).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input text was not a well-formed document.
    /// `offset` is the byte position; `line` and `column` are 1-based.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        offset: usize,
        line: usize,
        column: usize,
    },

    /// A typed read asked for a type the stored variant cannot provide.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The stored integer does not fit the requested integer type.
    #[error("integer {value} out of range for {target}")]
    OutOfRange { target: &'static str, value: i64 },

    /// Keyed read access on something that is not an object.
    #[error("value is not an object")]
    NotAnObject,

    /// Keyed read access for a key the object does not hold.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Indexed read access on something that is not an array.
    #[error("value is not an array")]
    NotAnArray,

    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An application type rejected the structure it was decoded from.
    #[error("decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Build a [`Error::Decode`] from any displayable message.
    pub fn decode(message: impl std::fmt::Display) -> Self {
        Error::Decode(message.to_string())
    }
}

/// Convenience alias used throughout satchel-json.
pub type Result<T> = std::result::Result<T, Error>;
