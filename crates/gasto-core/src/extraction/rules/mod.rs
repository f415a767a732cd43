//! Rule-based field extractors for transaction sentences.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod description;
pub mod direction;
pub mod patterns;

pub use amounts::{AmountExtractor, AmountRule, extract_amount};
pub use category::{CategoryClassifier, KeywordTable};
pub use dates::{DateResolver, DateRule};
pub use description::DescriptionSynthesizer;
pub use direction::{DirectionClassifier, DirectionIndicators};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value matched in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
