//! Pattern matching for the payment details inside a transaction alert body.
//!
//! Each field is an independent scan that takes the first match in the body. When a body holds
//! several amount-shaped or date-shaped substrings, the earliest one wins; there is no attempt
//! to decide which one is the "real" transaction value.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// A rupee amount such as `Rs.30.00`, `Rs 30.00` or `Rs.1,250.00`.
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Rs\.?\s?([\d,]+\.\d{2})").expect("invalid amount pattern")
});

/// A `DD-MM-YY` date.
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{2})-(\d{2})-(\d{2})\b").expect("invalid date pattern")
});

/// A virtual payment address such as `gt.96169@hdfcbank`.
static VPA_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([a-zA-Z0-9.\-_]+@[a-zA-Z0-9.\-_]+)\b").expect("invalid VPA pattern")
});

/// The outcome of looking for a field that has to be parsed after it is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted<T> {
    /// Nothing shaped like the field appears in the text.
    Absent,
    /// The field was found and parsed.
    Found(T),
    /// Something shaped like the field was found, but it is not a valid value.
    ///
    /// Holds the matched text.
    Unparseable(String),
}

impl<T> Extracted<T> {
    /// The parsed value, if there is one.
    pub fn found(self) -> Option<T> {
        match self {
            Extracted::Found(value) => Some(value),
            Extracted::Absent | Extracted::Unparseable(_) => None,
        }
    }
}

/// The payment details found in an email body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyDetails {
    /// The amount exactly as written, e.g. "1,250.00".
    pub amount: Option<String>,
    /// The transaction date.
    pub date: Option<Date>,
    /// The virtual payment address of the counterparty.
    pub vpa: Option<String>,
}

/// Scan `body` for an amount, a date and a VPA.
///
/// A date-shaped substring that is not a real calendar date (e.g. `31-02-24`) is left out.
pub fn extract_details(body: &str) -> BodyDetails {
    let date = match extract_date(body) {
        Extracted::Found(date) => Some(date),
        Extracted::Unparseable(raw) => {
            tracing::debug!("Ignoring date-shaped text {raw:?} that is not a calendar date");
            None
        }
        Extracted::Absent => None,
    };

    BodyDetails {
        amount: extract_amount(body),
        date,
        vpa: extract_vpa(body),
    }
}

/// The first rupee amount in `body`, without the currency marker and with thousands
/// separators kept as written.
pub fn extract_amount(body: &str) -> Option<String> {
    AMOUNT_PATTERN
        .captures(body)
        .map(|captures| captures[1].to_owned())
}

/// The first `DD-MM-YY` date in `body`.
///
/// Two-digit years are expanded with [expand_two_digit_year].
pub fn extract_date(body: &str) -> Extracted<Date> {
    let Some(captures) = DATE_PATTERN.captures(body) else {
        return Extracted::Absent;
    };

    match parse_day_month_year(&captures[1], &captures[2], &captures[3]) {
        Some(date) => Extracted::Found(date),
        None => Extracted::Unparseable(captures[0].to_owned()),
    }
}

/// The first `token@token` address in `body`.
pub fn extract_vpa(body: &str) -> Option<String> {
    VPA_PATTERN
        .captures(body)
        .map(|captures| captures[1].to_owned())
}

/// Expand a two-digit year the way POSIX `%y` does: 00-68 are 2000-2068, 69-99 are 1969-1999.
pub fn expand_two_digit_year(year: u8) -> i32 {
    let year = i32::from(year);

    if year < 69 { 2000 + year } else { 1900 + year }
}

fn parse_day_month_year(day: &str, month: &str, year: &str) -> Option<Date> {
    let day: u8 = day.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    let year: u8 = year.parse().ok()?;
    let month = Month::try_from(month).ok()?;

    Date::from_calendar_date(expand_two_digit_year(year), month, day).ok()
}

#[cfg(test)]
mod extract_amount_tests {
    use super::extract_amount;

    #[test]
    fn finds_amount_after_currency_marker() {
        assert_eq!(
            extract_amount("Rs.30.00 has been debited from your account"),
            Some("30.00".to_owned())
        );
    }

    #[test]
    fn allows_space_and_missing_dot_after_marker() {
        assert_eq!(extract_amount("Paid Rs. 30.00"), Some("30.00".to_owned()));
        assert_eq!(extract_amount("Paid Rs 30.00"), Some("30.00".to_owned()));
        assert_eq!(extract_amount("Paid Rs30.00"), Some("30.00".to_owned()));
    }

    #[test]
    fn keeps_thousands_separators() {
        assert_eq!(
            extract_amount("Paid Rs.1,250.00 on 05-01-24"),
            Some("1,250.00".to_owned())
        );
    }

    #[test]
    fn requires_two_fraction_digits() {
        assert_eq!(extract_amount("Paid Rs.30 to a friend"), None);
        assert_eq!(extract_amount("Paid Rs.30.5 to a friend"), None);
    }

    #[test]
    fn requires_currency_marker() {
        assert_eq!(extract_amount("Paid 30.00 to a friend"), None);
    }

    #[test]
    fn takes_first_amount() {
        assert_eq!(
            extract_amount("Rs.10.00 debited, available balance Rs.990.00"),
            Some("10.00".to_owned())
        );
    }
}
