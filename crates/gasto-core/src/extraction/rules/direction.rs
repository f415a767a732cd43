//! Expense/income classification by indicator phrases.

use std::collections::BTreeSet;

use tracing::debug;

use crate::models::transaction::Direction;

/// Built-in phrases signalling money leaving.
pub const EXPENSE_INDICATORS: &[&str] = &[
    "gasté", "gaste", "pague", "pagué", "compré", "compre", "me gaste", "me gasté", "costo",
    "costó", "salió", "pago", "pagó", "invertí", "inverti", "di",
];

/// Built-in phrases signalling money entering.
///
/// "pago" also appears among the expense indicators; ties resolve to expense.
pub const INCOME_INDICATORS: &[&str] = &[
    "gané", "gane", "cobré", "cobre", "recibí", "recibi", "me pagaron", "ingreso", "ganancia",
    "salario", "sueldo", "pago", "honorarios", "bono", "propina", "venta", "vendí", "vendi",
    "ingresó", "me dieron", "transferencia",
];

/// Expense and income indicator phrase sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionIndicators {
    expense: BTreeSet<String>,
    income: BTreeSet<String>,
}

impl DirectionIndicators {
    /// Build from arbitrary phrase lists; phrases are lowercased and deduplicated.
    pub fn new<E, I>(expense: E, income: I) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            expense: normalize(expense),
            income: normalize(income),
        }
    }

    /// Add extra phrases on top of the current sets.
    pub fn extend<E, I>(&mut self, expense: E, income: I)
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.expense.extend(normalize(expense));
        self.income.extend(normalize(income));
    }

    pub fn expense(&self) -> &BTreeSet<String> {
        &self.expense
    }

    pub fn income(&self) -> &BTreeSet<String> {
        &self.income
    }
}

impl Default for DirectionIndicators {
    fn default() -> Self {
        Self::new(EXPENSE_INDICATORS, INCOME_INDICATORS)
    }
}

fn normalize<T>(phrases: T) -> BTreeSet<String>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}

/// Count how many distinct phrases occur as substrings of `text`.
fn count_present(phrases: &BTreeSet<String>, text: &str) -> usize {
    phrases.iter().filter(|p| text.contains(p.as_str())).count()
}

/// Decides whether a sentence describes an expense or an income.
#[derive(Debug, Clone, Default)]
pub struct DirectionClassifier {
    indicators: DirectionIndicators,
}

impl DirectionClassifier {
    pub fn new(indicators: DirectionIndicators) -> Self {
        Self { indicators }
    }

    pub fn indicators(&self) -> &DirectionIndicators {
        &self.indicators
    }

    /// Classify lowercased text. Income only wins on a strict majority.
    pub fn classify(&self, text: &str) -> Direction {
        let income_score = count_present(&self.indicators.income, text);
        let expense_score = count_present(&self.indicators.expense, text);

        debug!("Direction scores: income={} expense={}", income_score, expense_score);

        if income_score > expense_score {
            Direction::Income
        } else {
            Direction::Expense
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Direction {
        DirectionClassifier::default().classify(text)
    }

    #[test]
    fn test_expense() {
        assert_eq!(classify("gasté 15 soles en un adobo"), Direction::Expense);
        assert_eq!(classify("pagué 50 soles en gasolina"), Direction::Expense);
    }

    #[test]
    fn test_income() {
        assert_eq!(classify("cobré 500 soles de mi sueldo"), Direction::Income);
        assert_eq!(classify("me pagaron 300 por el trabajo"), Direction::Income);
    }

    #[test]
    fn test_no_indicators_defaults_to_expense() {
        assert_eq!(classify("netflix 35 soles"), Direction::Expense);
    }

    #[test]
    fn test_tie_goes_to_expense() {
        // "pago" is in both sets.
        assert_eq!(classify("pago 100"), Direction::Expense);
    }

    #[test]
    fn test_counts_distinct_phrases_once() {
        // "bono" twice still scores 1, against "compré" scoring 1.
        assert_eq!(classify("compré bono bono bono"), Direction::Expense);
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let indicators = DirectionIndicators::new(["Gasté", "gasté "], ["ingreso", "ingreso"]);
        assert_eq!(indicators.expense().len(), 1);
        assert_eq!(indicators.income().len(), 1);
    }

    #[test]
    fn test_extend() {
        let mut indicators = DirectionIndicators::default();
        indicators.extend(Vec::<String>::new(), ["me depositaron"]);
        let classifier = DirectionClassifier::new(indicators);
        assert_eq!(classifier.classify("me depositaron 200 soles"), Direction::Income);
    }
}
