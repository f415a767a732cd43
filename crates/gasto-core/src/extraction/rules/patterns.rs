//! Common regex patterns for transaction extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount families, in priority order
    pub static ref AMOUNT_WITH_CURRENCY: Regex = Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]{1,2})?)\s*(?:sol(?:es)?|s/|pen)"
    ).unwrap();

    pub static ref AMOUNT_AFTER_SYMBOL: Regex = Regex::new(
        r"(?i)s/\s*([0-9]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    pub static ref AMOUNT_WITH_SOL: Regex = Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]{1,2})?)\s*(?:sol|soles)"
    ).unwrap();

    pub static ref AMOUNT_BARE: Regex = Regex::new(
        r"([0-9]+(?:\.[0-9]{1,2})?)"
    ).unwrap();

    // Currency-tagged fragments removed from descriptions
    pub static ref CURRENCY_SYMBOL_FRAGMENT: Regex = Regex::new(
        r"(?i)s/\s*[0-9]+(?:\.[0-9]{1,2})?"
    ).unwrap();

    pub static ref CURRENCY_UNIT_FRAGMENT: Regex = Regex::new(
        r"(?i)[0-9]+(?:\.[0-9]{1,2})?\s*(?:sol(?:es)?|s/|pen)"
    ).unwrap();

    // Relative and numeric dates
    pub static ref DAYS_AGO: Regex = Regex::new(
        r"hace\s+([0-9]+)\s+d[ií]as?"
    ).unwrap();

    pub static ref WEEKS_AGO: Regex = Regex::new(
        r"hace\s+([0-9]+)\s+semanas?"
    ).unwrap();

    pub static ref DAY_MONTH: Regex = Regex::new(
        r"([0-9]{1,2})[/-]([0-9]{1,2})"
    ).unwrap();

    // Description cleanup
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    pub static ref LEADING_CONNECTOR: Regex = Regex::new(
        r"(?i)^(?:en|de)\s+"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_with_currency() {
        let caps = AMOUNT_WITH_CURRENCY.captures("gasté 15.50 soles").unwrap();
        assert_eq!(&caps[1], "15.50");

        let caps = AMOUNT_WITH_CURRENCY.captures("pagué 20pen").unwrap();
        assert_eq!(&caps[1], "20");
    }

    #[test]
    fn test_amount_after_symbol() {
        let caps = AMOUNT_AFTER_SYMBOL.captures("taxi s/ 12").unwrap();
        assert_eq!(&caps[1], "12");
        assert!(AMOUNT_AFTER_SYMBOL.captures("taxi 12").is_none());
    }

    #[test]
    fn test_days_ago() {
        let caps = DAYS_AGO.captures("hace 3 días").unwrap();
        assert_eq!(&caps[1], "3");
        assert!(DAYS_AGO.is_match("hace 1 dia"));
        assert!(!DAYS_AGO.is_match("hace 2 semanas"));
    }

    #[test]
    fn test_day_month() {
        let caps = DAY_MONTH.captures("el 15/01 compré pan").unwrap();
        assert_eq!((&caps[1], &caps[2]), ("15", "01"));
        assert!(DAY_MONTH.is_match("3-12"));
    }

    #[test]
    fn test_digits_are_ascii_only() {
        assert!(!AMOUNT_WITH_CURRENCY.is_match("٣ soles"));
        assert!(!AMOUNT_BARE.is_match("٣"));
        assert!(!DAYS_AGO.is_match("hace ٣ días"));
        assert!(!DAY_MONTH.is_match("١٥/٠١"));
    }
}
