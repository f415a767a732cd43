//! Description cleanup: turns the original sentence into a short label.

use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::config::DEFAULT_PLACEHOLDER;

use super::patterns::{CURRENCY_SYMBOL_FRAGMENT, CURRENCY_UNIT_FRAGMENT, LEADING_CONNECTOR, WHITESPACE};

/// Builds human-readable labels from transaction sentences.
#[derive(Debug, Clone)]
pub struct DescriptionSynthesizer {
    /// Whole-word, case-insensitive alternation of indicator phrases, longest first.
    indicators: Option<Regex>,
    placeholder: String,
}

impl DescriptionSynthesizer {
    /// Create a synthesizer that strips the given expense indicator phrases.
    pub fn new<I>(indicators: I, placeholder: impl Into<String>) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            indicators: indicator_pattern(indicators),
            placeholder: placeholder.into(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Produce a label from the original (not lowercased) text. Never fails.
    pub fn synthesize(&self, text: &str, amount: Decimal) -> String {
        let mut description = CURRENCY_SYMBOL_FRAGMENT.replace_all(text.trim(), "").into_owned();
        description = CURRENCY_UNIT_FRAGMENT.replace_all(&description, "").into_owned();

        let amount_token = format!(r"\b{}\b", regex::escape(&amount.to_string()));
        if let Ok(re) = Regex::new(&amount_token) {
            description = re.replace_all(&description, "").into_owned();
        }

        if let Some(re) = &self.indicators {
            description = re.replace_all(&description, "").into_owned();
        }

        description = WHITESPACE.replace_all(&description, " ").into_owned();
        let trimmed = description.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':'));
        let trimmed = LEADING_CONNECTOR.replace(trimmed, "");
        let trimmed = trimmed.trim();

        let mut chars = trimmed.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => self.placeholder.clone(),
        }
    }
}

impl Default for DescriptionSynthesizer {
    fn default() -> Self {
        Self::new(super::direction::EXPENSE_INDICATORS, DEFAULT_PLACEHOLDER)
    }
}

fn indicator_pattern<I>(indicators: I) -> Option<Regex>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut phrases: Vec<String> = indicators
        .into_iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();

    if phrases.is_empty() {
        return None;
    }

    // Longest first so "me gasté" wins over "gasté"
    phrases.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    phrases.dedup();

    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");

    match Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Indicator phrases could not be compiled, keeping them in descriptions: {}", e);
            None
        }
    }
}
