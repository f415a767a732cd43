//! Amount extraction for transaction sentences.
//!
//! Amounts are found by an ordered list of pattern families. Each family is
//! tried against the whole text; only its first occurrence is considered and
//! the first family producing a positive number wins.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use super::patterns::{AMOUNT_AFTER_SYMBOL, AMOUNT_BARE, AMOUNT_WITH_CURRENCY, AMOUNT_WITH_SOL};
use super::{ExtractionMatch, FieldExtractor};

/// One amount pattern family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRule {
    /// `20 soles`, `20 sol`, `20 s/`, `20 pen`.
    WithCurrency,
    /// `s/ 20`.
    AfterSymbol,
    /// `20 sol`, `20 soles`.
    WithSol,
    /// Any number; last resort.
    Bare,
}

impl AmountRule {
    /// All families in priority order.
    pub const ALL: [AmountRule; 4] = [
        Self::WithCurrency,
        Self::AfterSymbol,
        Self::WithSol,
        Self::Bare,
    ];

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::WithCurrency => &AMOUNT_WITH_CURRENCY,
            Self::AfterSymbol => &AMOUNT_AFTER_SYMBOL,
            Self::WithSol => &AMOUNT_WITH_SOL,
            Self::Bare => &AMOUNT_BARE,
        }
    }

    /// Parse the first occurrence of this family, if it is a positive number.
    pub fn first_match(&self, text: &str) -> Option<ExtractionMatch<Decimal>> {
        let caps = self.pattern().captures(text)?;
        let full_match = caps.get(0)?;

        let amount = Decimal::from_str(&caps[1]).ok()?;
        if amount <= Decimal::ZERO {
            debug!("{:?} matched non-positive amount {}", self, amount);
            return None;
        }

        Some(
            ExtractionMatch::new(amount, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }

    /// Parse every positive occurrence of this family.
    pub fn all_matches(&self, text: &str) -> Vec<ExtractionMatch<Decimal>> {
        self.pattern()
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                let amount = Decimal::from_str(&caps[1]).ok()?;
                (amount > Decimal::ZERO).then(|| {
                    ExtractionMatch::new(amount, full_match.as_str())
                        .with_position(full_match.start(), full_match.end())
                })
            })
            .collect()
    }
}

/// Amount field extractor.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    rules: Vec<AmountRule>,
}

impl AmountExtractor {
    pub fn new() -> Self {
        Self {
            rules: AmountRule::ALL.to_vec(),
        }
    }

    /// Use a custom family order.
    pub fn with_rules(rules: impl IntoIterator<Item = AmountRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> &[AmountRule] {
        &self.rules
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.rules.iter().find_map(|rule| {
            let found = rule.first_match(text);
            if let Some(m) = &found {
                debug!("Amount {} detected by {:?} in {:?}", m.value, rule, m.source);
            }
            found
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.rules
            .iter()
            .map(|rule| rule.all_matches(text))
            .find(|matches| !matches.is_empty())
            .unwrap_or_default()
    }
}

/// Extract the transaction amount from lowercased text.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    AmountExtractor::new().extract(text).map(|m| m.value)
}
