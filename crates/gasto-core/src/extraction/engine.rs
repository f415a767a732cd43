//! Extraction engine running the amount, direction, category, date and
//! description stages over one sentence.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, GastoError, KeywordError};
use crate::models::config::{DEFAULT_PLACEHOLDER, GastoConfig};
use crate::models::transaction::{CategoryTag, ExtractionResult, Transaction};

use super::rules::{
    AmountExtractor, CategoryClassifier, DateResolver, DescriptionSynthesizer, DirectionClassifier,
    DirectionIndicators, FieldExtractor, KeywordTable,
};
use super::{Result, TransactionExtractor};

/// Keyword table shared between engines and the code that extends it.
pub type SharedKeywords = Arc<RwLock<KeywordTable>>;

/// Stateless-per-call extraction engine.
///
/// The keyword table is the only long-lived mutable state. It sits behind a
/// read-write lock so extraction can run concurrently with `add_keyword`.
#[derive(Debug)]
pub struct ExtractionEngine {
    keywords: SharedKeywords,
    amounts: AmountExtractor,
    direction: DirectionClassifier,
    category: CategoryClassifier,
    dates: DateResolver,
    description: DescriptionSynthesizer,
}

impl ExtractionEngine {
    /// Create an engine with the built-in tables.
    pub fn new() -> Self {
        let direction = DirectionClassifier::default();
        let description =
            DescriptionSynthesizer::new(direction.indicators().expense(), DEFAULT_PLACEHOLDER);

        Self {
            keywords: Arc::new(RwLock::new(KeywordTable::default())),
            amounts: AmountExtractor::new(),
            direction,
            category: CategoryClassifier::new(),
            dates: DateResolver::new(),
            description,
        }
    }

    /// Create an engine from configuration, applying extra keywords and indicators.
    pub fn from_config(config: &GastoConfig) -> std::result::Result<Self, GastoError> {
        let mut indicators = DirectionIndicators::default();
        indicators.extend(
            &config.indicators.extra_expense,
            &config.indicators.extra_income,
        );

        let mut table = KeywordTable::default();
        for (category, words) in &config.keywords.extra {
            for word in words {
                table.add_keyword_by_name(category, word)?;
            }
        }

        debug!("Engine configured with {} keywords", table.len());

        Ok(Self::new()
            .with_keywords(Arc::new(RwLock::new(table)))
            .with_indicators(indicators)
            .with_placeholder(config.description.placeholder.clone()))
    }

    /// Use an externally owned keyword table.
    pub fn with_keywords(mut self, keywords: SharedKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replace the direction indicator sets.
    pub fn with_indicators(mut self, indicators: DirectionIndicators) -> Self {
        let placeholder = self.description.placeholder().to_string();
        self.description = DescriptionSynthesizer::new(indicators.expense(), placeholder);
        self.direction = DirectionClassifier::new(indicators);
        self
    }

    /// Set the fallback description.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.description =
            DescriptionSynthesizer::new(self.direction.indicators().expense(), placeholder);
        self
    }

    /// Handle to the shared keyword table.
    pub fn shared_keywords(&self) -> SharedKeywords {
        Arc::clone(&self.keywords)
    }

    /// Add a keyword to the category named `category`.
    ///
    /// Returns `Ok(false)` if the keyword was already present.
    pub fn add_keyword(&self, category: &str, keyword: &str) -> std::result::Result<bool, KeywordError> {
        let added = self.write_keywords().add_keyword_by_name(category, keyword)?;
        info!("Keyword {:?} added to {} (new: {})", keyword, category, added);
        Ok(added)
    }

    /// Add a keyword to a category tag.
    pub fn add_keyword_to(&self, category: CategoryTag, keyword: &str) -> std::result::Result<bool, KeywordError> {
        self.write_keywords().add_keyword(category, keyword)
    }

    /// All categories, keyword-bearing ones first and `Otros` last.
    pub fn categories(&self) -> Vec<CategoryTag> {
        CategoryTag::ALL.to_vec()
    }

    /// Sorted snapshot of a category's keywords.
    pub fn keywords(&self, category: CategoryTag) -> Vec<String> {
        self.read_keywords()
            .keywords(category)
            .map(str::to_string)
            .collect()
    }

    /// Extract using the local clock as reference time.
    pub fn extract_now(&self, text: &str) -> ExtractionResult {
        self.extract(text, Local::now().naive_local())
    }

    fn read_keywords(&self) -> RwLockReadGuard<'_, KeywordTable> {
        self.keywords.read().unwrap_or_else(|e| {
            warn!("Keyword table lock was poisoned, reading anyway");
            PoisonError::into_inner(e)
        })
    }

    fn write_keywords(&self) -> RwLockWriteGuard<'_, KeywordTable> {
        self.keywords.write().unwrap_or_else(|e| {
            warn!("Keyword table lock was poisoned, writing anyway");
            PoisonError::into_inner(e)
        })
    }
}

impl Default for ExtractionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionExtractor for ExtractionEngine {
    fn try_extract(&self, text: &str, now: NaiveDateTime) -> Result<Transaction> {
        let start = Instant::now();
        let lowered = text.trim().to_lowercase();

        info!("Extracting transaction from {} characters of text", text.len());

        let amount = match self.amounts.extract(&lowered) {
            Some(m) => m.value,
            None => {
                debug!("No amount found in {:?}", lowered);
                return Err(ExtractionError::NoAmountDetected);
            }
        };

        let date = self.dates.resolve(&lowered, now);
        let direction = self.direction.classify(&lowered);
        let category = self.category.classify(&self.read_keywords(), &lowered);
        let description = self.description.synthesize(text, amount);

        debug!(
            "Extracted {} {} {} on {} in {:?}",
            direction,
            amount,
            category,
            date,
            start.elapsed()
        );

        Ok(Transaction {
            amount,
            category,
            direction,
            date,
            description,
        })
    }
}
