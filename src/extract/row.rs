//! Reading the columns of a feed row.

use crate::{
    extract::{Timestamp, clean_text, parse_sender},
    feed::FeedRow,
};

/// The column holding when the email arrived.
pub const TIMESTAMP_COLUMN: &str = "Timestamp";
/// The column holding the email's `From` header.
pub const FROM_COLUMN: &str = "From";
/// The column holding the email subject.
pub const SUBJECT_COLUMN: &str = "Subject";
/// The column holding the email body.
pub const BODY_COLUMN: &str = "Body";
/// The column holding the feed's status for the row.
pub const STATUS_COLUMN: &str = "Status";

/// A feed row with its email fields separated and cleaned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// When the email arrived, `None` if the cell was empty.
    pub timestamp: Option<Timestamp>,
    /// The sender's address.
    pub email: String,
    /// The sender's display name.
    pub name: String,
    /// The subject, cleaned.
    pub subject: String,
    /// The body, cleaned.
    pub body: String,
    /// The feed's status for the row, as supplied.
    pub status: String,
}

/// Split a feed row into its email fields.
///
/// Never fails: missing columns read as empty text and a timestamp that is not ISO 8601 is kept
/// as text.
pub fn parse_row(row: &FeedRow) -> ParsedRow {
    let sender = parse_sender(row.get(FROM_COLUMN));

    ParsedRow {
        timestamp: Timestamp::from_cell(row.get(TIMESTAMP_COLUMN)),
        email: sender.address,
        name: sender.name,
        subject: clean_text(row.get(SUBJECT_COLUMN)),
        body: clean_text(row.get(BODY_COLUMN)),
        status: row.get(STATUS_COLUMN).to_owned(),
    }
}

#[cfg(test)]
mod parse_row_tests {
    use time::macros::datetime;

    use crate::{
        extract::{ParsedRow, Timestamp, parse_row},
        feed::FeedRow,
    };

    #[test]
    fn parses_complete_row() {
        let row = FeedRow::from([
            ("Timestamp", "2024-01-05T10:30:00Z"),
            ("From", "HDFC Bank InstaAlerts <alerts@hdfcbank.net>"),
            ("Subject", "\u{200C}UPI txn alert\r\n"),
            ("Body", "Dear Customer,\r\nRs.30.00 has been debited"),
            ("Status", "NEW"),
        ]);

        let parsed = parse_row(&row);

        assert_eq!(
            parsed,
            ParsedRow {
                timestamp: Some(Timestamp::Instant(datetime!(2024-01-05 10:30:00 UTC))),
                email: "alerts@hdfcbank.net".to_owned(),
                name: "HDFC Bank InstaAlerts".to_owned(),
                subject: "UPI txn alert".to_owned(),
                body: "Dear Customer, Rs.30.00 has been debited".to_owned(),
                status: "NEW".to_owned(),
            }
        );
    }

    #[test]
    fn keeps_unparseable_timestamp_as_text() {
        let row = FeedRow::from([("Timestamp", "05/01/2024 10:30:00")]);

        let parsed = parse_row(&row);

        assert_eq!(
            parsed.timestamp,
            Some(Timestamp::Text("05/01/2024 10:30:00".to_owned()))
        );
    }

    #[test]
    fn empty_row_has_empty_fields() {
        let parsed = parse_row(&FeedRow::default());

        assert_eq!(parsed.timestamp, None);
        assert_eq!(parsed.email, "");
        assert_eq!(parsed.name, "");
        assert_eq!(parsed.subject, "");
        assert_eq!(parsed.body, "");
        assert_eq!(parsed.status, "");
    }
}
