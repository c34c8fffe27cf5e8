//! Error types for pdfgrid page layout.

use thiserror::Error;

/// Primary error type for page layout operations.
#[derive(Error, Debug)]
pub enum GridError {
    /// A text-show operator ran before any `Tf` selected a font.
    #[error("no font selected before {0} operator: is the content stream missing a Tf?")]
    MissingFont(&'static str),

    /// `Tf` named a font resource that is not in the page font map.
    #[error("font resource not found: {0}")]
    UnknownFont(String),

    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        expected: &'static str,
        got: &'static str,
    },

    #[error("decode error: {0}")]
    DecodeError(String),

    #[error("invalid page dump: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for GridError.
pub type Result<T> = std::result::Result<T, GridError>;
