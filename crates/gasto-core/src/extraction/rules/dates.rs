//! Relative and numeric date resolution for transaction sentences.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};
use tracing::debug;

use super::patterns::{DAY_MONTH, DAYS_AGO, WEEKS_AGO};

/// Spanish weekday names, with and without accents.
const WEEKDAYS: &[(&str, Weekday)] = &[
    ("lunes", Weekday::Mon),
    ("martes", Weekday::Tue),
    ("miércoles", Weekday::Wed),
    ("miercoles", Weekday::Wed),
    ("jueves", Weekday::Thu),
    ("viernes", Weekday::Fri),
    ("sábado", Weekday::Sat),
    ("sabado", Weekday::Sat),
    ("domingo", Weekday::Sun),
];

/// The rule that produced a resolved date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// "ayer".
    Yesterday,
    /// "anteayer" / "antier".
    DayBeforeYesterday,
    /// "hace N días".
    DaysAgo,
    /// "hace N semanas".
    WeeksAgo,
    /// "semana pasada".
    LastWeek,
    /// A weekday name.
    Weekday,
    /// "DD/MM" or "DD-MM".
    DayMonth,
    /// Nothing matched.
    Today,
}

/// Resolves the calendar date a sentence refers to.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateResolver;

impl DateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve lowercased text against `now`.
    pub fn resolve(&self, text: &str, now: NaiveDateTime) -> NaiveDate {
        self.resolve_with_rule(text, now).0
    }

    /// Resolve and report which rule fired. Rules are tried in priority order
    /// and never combined.
    pub fn resolve_with_rule(&self, text: &str, now: NaiveDateTime) -> (NaiveDate, DateRule) {
        let today = now.date();

        let resolved = yesterday(text, today)
            .or_else(|| day_before_yesterday(text, today))
            .or_else(|| days_ago(text, today))
            .or_else(|| weeks_ago(text, today))
            .or_else(|| last_week(text, today))
            .or_else(|| weekday(text, today))
            .or_else(|| day_month(text, today))
            .unwrap_or((today, DateRule::Today));

        debug!("Date {} resolved by {:?}", resolved.0, resolved.1);
        resolved
    }
}

fn yesterday(text: &str, today: NaiveDate) -> Option<(NaiveDate, DateRule)> {
    // "anteayer" must not count as "ayer"
    if !text.replace("anteayer", "").contains("ayer") {
        return None;
    }
    Some((today.checked_sub_days(Days::new(1))?, DateRule::Yesterday))
}

fn day_before_yesterday(text: &str, today: NaiveDate) -> Option<(NaiveDate, DateRule)> {
    if !(text.contains("anteayer") || text.contains("antier")) {
        return None;
    }
    Some((today.checked_sub_days(Days::new(2))?, DateRule::DayBeforeYesterday))
}

fn days_ago(text: &str, today: NaiveDate) -> Option<(NaiveDate, DateRule)> {
    let caps = DAYS_AGO.captures(text)?;
    let days: u64 = caps[1].parse().ok()?;
    Some((today.checked_sub_days(Days::new(days))?, DateRule::DaysAgo))
}

fn weeks_ago(text: &str, today: NaiveDate) -> Option<(NaiveDate, DateRule)> {
    let caps = WEEKS_AGO.captures(text)?;
    let weeks: u64 = caps[1].parse().ok()?;
    let days = weeks.checked_mul(7)?;
    Some((today.checked_sub_days(Days::new(days))?, DateRule::WeeksAgo))
}

fn last_week(text: &str, today: NaiveDate) -> Option<(NaiveDate, DateRule)> {
    if !text.contains("semana pasada") {
        return None;
    }
    Some((today.checked_sub_days(Days::new(7))?, DateRule::LastWeek))
}

/// Most recent occurrence strictly before today; today's own weekday means a week ago.
fn weekday(text: &str, today: NaiveDate) -> Option<(NaiveDate, DateRule)> {
    let (_, target) = WEEKDAYS.iter().find(|(name, _)| text.contains(*name))?;

    let current = today.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let back = match (current + 7 - wanted) % 7 {
        0 => 7,
        n => n,
    };

    Some((today.checked_sub_days(Days::new(u64::from(back)))?, DateRule::Weekday))
}

/// "DD/MM" in the current year, or the previous year when that would be in the future.
fn day_month(text: &str, today: NaiveDate) -> Option<(NaiveDate, DateRule)> {
    let caps = DAY_MONTH.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;

    let mut date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date > today {
        date = NaiveDate::from_ymd_opt(today.year() - 1, month, day)?;
    }

    Some((date, DateRule::DayMonth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(14, 30, 0).unwrap()
    }

    fn resolve(text: &str, now: NaiveDateTime) -> (NaiveDate, DateRule) {
        DateResolver::new().resolve_with_rule(text, now)
    }

    // 2024-03-10 is a Sunday.
    const Y: i32 = 2024;

    #[test]
    fn test_default_is_today() {
        assert_eq!(resolve("gasté 15 soles", at(Y, 3, 10)), (date(Y, 3, 10), DateRule::Today));
    }

    #[test]
    fn test_yesterday() {
        assert_eq!(resolve("pagué 50 soles ayer", at(Y, 3, 10)), (date(Y, 3, 9), DateRule::Yesterday));
        assert_eq!(resolve("ayer", at(Y, 3, 1)).0, date(Y, 2, 29));
    }

    #[test]
    fn test_day_before_yesterday() {
        assert_eq!(
            resolve("antier compré pan", at(Y, 3, 10)),
            (date(Y, 3, 8), DateRule::DayBeforeYesterday)
        );
        assert_eq!(
            resolve("anteayer compré pan", at(Y, 3, 10)),
            (date(Y, 3, 8), DateRule::DayBeforeYesterday)
        );
    }

    #[test]
    fn test_yesterday_wins_when_both_words_present() {
        assert_eq!(resolve("ayer y anteayer", at(Y, 3, 10)).1, DateRule::Yesterday);
    }

    #[test]
    fn test_days_ago() {
        assert_eq!(resolve("hace 3 días", at(Y, 3, 10)), (date(Y, 3, 7), DateRule::DaysAgo));
        assert_eq!(resolve("hace 1 dia", at(Y, 3, 10)).0, date(Y, 3, 9));
    }

    #[test]
    fn test_weeks_ago() {
        assert_eq!(resolve("hace 2 semanas", at(Y, 3, 10)), (date(Y, 2, 25), DateRule::WeeksAgo));
    }

    #[test]
    fn test_last_week() {
        assert_eq!(
            resolve("la semana pasada fui al cine", at(Y, 3, 10)),
            (date(Y, 3, 3), DateRule::LastWeek)
        );
    }

    #[test]
    fn test_weekday_is_strictly_before_today() {
        // Sunday 2024-03-10
        assert_eq!(resolve("el lunes", at(Y, 3, 10)), (date(Y, 3, 4), DateRule::Weekday));
        assert_eq!(resolve("el sábado", at(Y, 3, 10)).0, date(Y, 3, 9));
        assert_eq!(resolve("el domingo", at(Y, 3, 10)).0, date(Y, 3, 3));
    }

    #[test]
    fn test_same_weekday_goes_back_a_full_week() {
        // Wednesday 2024-03-13
        assert_eq!(resolve("el miércoles", at(Y, 3, 13)).0, date(Y, 3, 6));
        assert_eq!(resolve("el miercoles", at(Y, 3, 13)).0, date(Y, 3, 6));
    }

    #[test]
    fn test_yesterday_precedes_weekday() {
        assert_eq!(resolve("ayer lunes", at(Y, 3, 10)), (date(Y, 3, 9), DateRule::Yesterday));
    }

    #[test]
    fn test_day_month() {
        assert_eq!(resolve("el 15/01", at(Y, 3, 10)), (date(Y, 1, 15), DateRule::DayMonth));
        assert_eq!(resolve("el 5-3", at(Y, 3, 10)).0, date(Y, 3, 5));
        assert_eq!(resolve("el 10/03", at(Y, 3, 10)).0, date(Y, 3, 10));
    }

    #[test]
    fn test_future_day_month_uses_previous_year() {
        assert_eq!(resolve("el 25/12", at(Y, 3, 10)).0, date(Y - 1, 12, 25));
        assert_eq!(resolve("el 28/12", at(2025, 1, 3)).0, date(2024, 12, 28));
    }

    #[test]
    fn test_invalid_day_month_is_skipped() {
        assert_eq!(resolve("el 31/02", at(Y, 3, 10)), (date(Y, 3, 10), DateRule::Today));
        // 2024-02-29 is in the future, 2023-02-29 does not exist.
        assert_eq!(resolve("el 29/02", at(Y, 1, 10)).1, DateRule::Today);
    }

    #[test]
    fn test_overflowing_offset_is_skipped() {
        assert_eq!(resolve("hace 100000000000 días", at(Y, 3, 10)).1, DateRule::Today);
        assert_eq!(resolve("hace 99999999999999999999 días", at(Y, 3, 10)).1, DateRule::Today);
    }

    #[test]
    fn test_non_ascii_digits_are_ignored() {
        assert_eq!(resolve("hace ٣ días", at(Y, 3, 10)).1, DateRule::Today);
        assert_eq!(resolve("hace ٢ semanas", at(Y, 3, 10)).1, DateRule::Today);
        assert_eq!(resolve("el ١٥/٠١", at(Y, 3, 10)).1, DateRule::Today);
    }
}
