//! Core library for natural-language personal finance entries.
//!
//! This crate provides:
//! - Amount extraction from free-form Spanish sentences ("gasté 15 soles")
//! - Expense/income direction and category classification
//! - Relative date resolution ("ayer", "hace 3 días", "el lunes", "15/01")
//! - Description cleanup for storage and display

pub mod error;
pub mod extraction;
pub mod models;

pub use error::{ExtractionError, GastoError, KeywordError, Result};
pub use extraction::{ExtractionEngine, SharedKeywords, TransactionExtractor};
pub use models::config::GastoConfig;
pub use models::transaction::{
    CategoryTag, Direction, ExtractionResult, Summary, Transaction, TransactionRecord,
    format_amount,
};
