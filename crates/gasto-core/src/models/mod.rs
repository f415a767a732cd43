//! Data models for extracted transactions and configuration.

pub mod config;
pub mod transaction;

pub use config::GastoConfig;
pub use transaction::{CategoryTag, Direction, ExtractionResult, Transaction};
