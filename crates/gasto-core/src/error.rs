//! Error types for the gasto-core library.

use thiserror::Error;

/// Main error type for the gasto library.
#[derive(Error, Debug)]
pub enum GastoError {
    /// Transaction extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Keyword table mutation error.
    #[error("keyword error: {0}")]
    Keyword(#[from] KeywordError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Decimal arithmetic exceeded the representable range.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to transaction extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No pattern family yielded a positive amount.
    #[error("no amount detected; include a price in the text")]
    NoAmountDetected,
}

/// Errors raised when extending the keyword configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    /// The category is not one of the keyword-bearing categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The keyword is empty after trimming.
    #[error("keyword must not be empty")]
    EmptyKeyword,
}

/// Result type for the gasto library.
pub type Result<T> = std::result::Result<T, GastoError>;
