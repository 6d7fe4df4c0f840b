//! Normalising free text from email subjects and bodies.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of zero-width non-joiners and line breaks.
static INVISIBLE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[\u{200C}\r\n]+").expect("invalid line break pattern"));

/// Collapse each run of zero-width non-joiners, carriage returns and line feeds into a single
/// space and trim the surrounding whitespace.
///
/// An empty string stays empty.
pub fn clean_text(text: &str) -> String {
    INVISIBLE_BREAKS.replace_all(text, " ").trim().to_owned()
}

#[cfg(test)]
mod clean_text_tests {
    use super::clean_text;

    #[test]
    fn empty_string_stays_empty() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(clean_text("  \tDebit alert \n"), "Debit alert");
    }

    #[test]
    fn collapses_line_breaks_into_single_space() {
        assert_eq!(
            clean_text("Dear Customer,\r\n\r\nRs.30.00 has been debited"),
            "Dear Customer, Rs.30.00 has been debited"
        );
    }

    #[test]
    fn removes_zero_width_non_joiners() {
        assert_eq!(clean_text("\u{200C}UPI\u{200C}\u{200C}txn"), "UPI txn");
    }

    #[test]
    fn keeps_other_text_untouched() {
        assert_eq!(clean_text("₹ 1,250.00 to gt.96169@hdfcbank"), "₹ 1,250.00 to gt.96169@hdfcbank");
    }
}
