//! Transaction data models produced by the extraction engine.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, GastoError};

/// Message attached to every successful extraction.
pub const SUCCESS_MESSAGE: &str = "Gasto procesado exitosamente";

/// Closed set of transaction categories.
///
/// Declaration order is significant: it is the tie-break order used by the
/// category classifier when two categories reach the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    /// Food, groceries and restaurants.
    Alimentacion,
    /// Fuel, taxis, public transport and vehicle costs.
    Transporte,
    /// Leisure, subscriptions and sports.
    Entretenimiento,
    /// Medicine, doctors and insurance.
    Salud,
    /// Courses, books and school supplies.
    Educacion,
    /// Utilities, rent and personal services.
    Servicios,
    /// Clothing, electronics and general shopping.
    Compras,
    /// Fallback when no keyword matches.
    Otros,
}

impl CategoryTag {
    /// All categories in enumeration order, `Otros` last.
    pub const ALL: [CategoryTag; 8] = [
        Self::Alimentacion,
        Self::Transporte,
        Self::Entretenimiento,
        Self::Salud,
        Self::Educacion,
        Self::Servicios,
        Self::Compras,
        Self::Otros,
    ];

    /// Categories that carry a keyword list.
    pub const WITH_KEYWORDS: [CategoryTag; 7] = [
        Self::Alimentacion,
        Self::Transporte,
        Self::Entretenimiento,
        Self::Salud,
        Self::Educacion,
        Self::Servicios,
        Self::Compras,
    ];

    /// Stable lowercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alimentacion => "alimentacion",
            Self::Transporte => "transporte",
            Self::Entretenimiento => "entretenimiento",
            Self::Salud => "salud",
            Self::Educacion => "educacion",
            Self::Servicios => "servicios",
            Self::Compras => "compras",
            Self::Otros => "otros",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Alimentacion => "Alimentación",
            Self::Transporte => "Transporte",
            Self::Entretenimiento => "Entretenimiento",
            Self::Salud => "Salud",
            Self::Educacion => "Educación",
            Self::Servicios => "Servicios",
            Self::Compras => "Compras",
            Self::Otros => "Otros",
        }
    }

    /// Icon shown next to the category in listings.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Alimentacion => "🍽️",
            Self::Transporte => "🚗",
            Self::Entretenimiento => "🎮",
            Self::Salud => "⚕️",
            Self::Educacion => "📚",
            Self::Servicios => "💡",
            Self::Compras => "🛍️",
            Self::Otros => "📦",
        }
    }

    /// Whether the category can hold keywords.
    pub fn has_keywords(&self) -> bool {
        !matches!(self, Self::Otros)
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('ó', "o");
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == normalized)
            .ok_or_else(|| s.to_string())
    }
}

/// Whether money leaves or enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money leaving (gasto).
    #[default]
    Expense,
    /// Money entering (ingreso).
    Income,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// Spanish display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Gasto",
            Self::Income => "Ingreso",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured transaction extracted from one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Monetary amount, always positive.
    pub amount: Decimal,

    /// Detected category.
    pub category: CategoryTag,

    /// Expense or income.
    pub direction: Direction,

    /// Calendar date the transaction refers to.
    pub date: NaiveDate,

    /// Cleaned-up label.
    pub description: String,
}

impl Transaction {
    /// Build the record handed to a persistence layer.
    pub fn into_record(
        self,
        original_text: impl Into<String>,
        owner: impl Into<String>,
    ) -> TransactionRecord {
        TransactionRecord {
            amount: self.amount,
            category: self.category,
            description: self.description,
            original_text: original_text.into(),
            date: self.date,
            owner: owner.into(),
            direction: self.direction,
        }
    }
}

/// Storage-facing shape of a transaction.
///
/// Identifiers and storage timestamps are assigned by the store, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub amount: Decimal,
    pub category: CategoryTag,
    pub description: String,
    pub original_text: String,
    pub date: NaiveDate,
    pub owner: String,
    pub direction: Direction,
}

/// Outcome of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResult {
    /// All fields were produced.
    Success(Transaction),
    /// Extraction could not proceed.
    Failure { reason: String },
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The extracted transaction, if any.
    pub fn transaction(&self) -> Option<&Transaction> {
        match self {
            Self::Success(tx) => Some(tx),
            Self::Failure { .. } => None,
        }
    }

    /// User-facing feedback line.
    pub fn message(&self) -> &str {
        match self {
            Self::Success(_) => SUCCESS_MESSAGE,
            Self::Failure { reason } => reason,
        }
    }
}

impl From<Result<Transaction, ExtractionError>> for ExtractionResult {
    fn from(result: Result<Transaction, ExtractionError>) -> Self {
        match result {
            Ok(tx) => Self::Success(tx),
            Err(e) => Self::Failure {
                reason: e.to_string(),
            },
        }
    }
}

/// Aggregate statistics over a set of transactions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Number of transactions.
    pub count: usize,
    /// Sum of expense amounts.
    pub expense_total: Decimal,
    /// Sum of income amounts.
    pub income_total: Decimal,
    /// Mean amount across all transactions.
    pub mean: Decimal,
    /// Median amount across all transactions.
    pub median: Decimal,
    /// Smallest amount.
    pub min: Decimal,
    /// Largest amount.
    pub max: Decimal,
    /// Expense totals per category.
    pub by_category: BTreeMap<CategoryTag, Decimal>,
}

impl Summary {
    /// Compute statistics; an empty slice yields all zeros.
    ///
    /// Fails with [`GastoError::Overflow`] when a total exceeds `Decimal::MAX`.
    pub fn from_transactions(transactions: &[Transaction]) -> Result<Self, GastoError> {
        if transactions.is_empty() {
            return Ok(Self::default());
        }

        let mut summary = Self {
            count: transactions.len(),
            ..Self::default()
        };

        for tx in transactions {
            match tx.direction {
                Direction::Expense => {
                    summary.expense_total =
                        checked_sum(summary.expense_total, tx.amount, "expense total")?;
                    let entry = summary.by_category.entry(tx.category).or_default();
                    *entry = checked_sum(*entry, tx.amount, "category total")?;
                }
                Direction::Income => {
                    summary.income_total =
                        checked_sum(summary.income_total, tx.amount, "income total")?;
                }
            }
        }

        let mut amounts: Vec<Decimal> = transactions.iter().map(|t| t.amount).collect();
        amounts.sort();

        let total = amounts
            .iter()
            .try_fold(Decimal::ZERO, |acc, amount| checked_sum(acc, *amount, "mean"))?;
        summary.mean = total / Decimal::from(amounts.len());
        summary.min = amounts[0];
        summary.max = amounts[amounts.len() - 1];

        let mid = amounts.len() / 2;
        summary.median = if amounts.len() % 2 == 0 {
            amounts[mid - 1] / Decimal::TWO + amounts[mid] / Decimal::TWO
        } else {
            amounts[mid]
        };

        Ok(summary)
    }

    /// Income minus expenses.
    pub fn balance(&self) -> Decimal {
        self.income_total - self.expense_total
    }
}

fn checked_sum(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, GastoError> {
    a.checked_add(b).ok_or_else(|| GastoError::Overflow(what.to_string()))
}

/// Format an amount with a currency symbol, e.g. `S/ 1,234.50`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let s = format!("{:.2}", amount.round_dp(2).abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}{} {}.{}", sign, symbol, formatted, decimal_part)
}
