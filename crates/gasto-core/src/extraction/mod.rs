//! Transaction extraction module.

mod engine;
pub mod rules;

pub use engine::{ExtractionEngine, SharedKeywords};

use chrono::NaiveDateTime;

use crate::error::ExtractionError;
use crate::models::transaction::{ExtractionResult, Transaction};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for sentence-to-transaction extractors.
pub trait TransactionExtractor {
    /// Extract a transaction, reporting failure as an error.
    fn try_extract(&self, text: &str, now: NaiveDateTime) -> Result<Transaction>;

    /// Extract a transaction as a tagged outcome.
    fn extract(&self, text: &str, now: NaiveDateTime) -> ExtractionResult {
        self.try_extract(text, now).into()
    }
}
