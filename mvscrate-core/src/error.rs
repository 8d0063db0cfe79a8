//! Error types for mvscrate

use thiserror::Error;

/// Main error type for mvscrate operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Shape error: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

impl Error {
    /// Build a shape error from anything printable
    pub fn shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Error::Shape {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type alias for mvscrate operations
pub type Result<T> = std::result::Result<T, Error>;
