//! Best-effort parsing of the feed's timestamp column.

use std::fmt::Display;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::well_known::{Iso8601, Rfc3339},
};

/// When an email arrived, either as a point in time or as the text the feed supplied when it
/// could not be read as ISO 8601.
///
/// Both forms travel and are stored as text: an instant is written in RFC 3339 and any other
/// text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// A parsed point in time.
    Instant(OffsetDateTime),
    /// The original text, kept because it is not an ISO 8601 date-time.
    Text(String),
}

impl Timestamp {
    /// Read a timestamp cell from the feed.
    ///
    /// Returns `None` for an empty cell, otherwise never fails.
    pub fn from_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();

        if cell.is_empty() {
            None
        } else {
            Some(Self::parse_lossy(cell))
        }
    }

    /// Parse `raw` as ISO 8601, falling back to keeping the text as-is.
    pub fn parse_lossy(raw: &str) -> Self {
        match parse_iso8601(raw) {
            Ok(instant) => Timestamp::Instant(instant),
            Err(error) => {
                tracing::debug!("Keeping timestamp {raw:?} as text: {error}");
                Timestamp::Text(raw.to_owned())
            }
        }
    }

    /// The parsed instant, if the timestamp could be parsed.
    pub fn instant(&self) -> Option<OffsetDateTime> {
        match self {
            Timestamp::Instant(instant) => Some(*instant),
            Timestamp::Text(_) => None,
        }
    }

    /// The text form used on the wire and in the database.
    pub fn to_text(&self) -> String {
        match self {
            Timestamp::Instant(instant) => instant
                .format(&Rfc3339)
                .unwrap_or_else(|_| instant.to_string()),
            Timestamp::Text(text) => text.clone(),
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Parse an ISO 8601 date-time.
///
/// A trailing `Z` is read as `+00:00` and a space may separate the date from the time, as in
/// "2024-01-05 10:30:00+05:30". Date-times without an offset, and bare dates, are taken to be in
/// UTC.
///
/// # Errors
/// Returns the error from the last format tried if `raw` matches none of them.
pub fn parse_iso8601(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    let normalised = raw.trim().replace('Z', "+00:00").replacen(' ', "T", 1);

    OffsetDateTime::parse(&normalised, &Iso8601::DEFAULT)
        .or_else(|_| {
            PrimitiveDateTime::parse(&normalised, &Iso8601::DEFAULT)
                .map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|_| {
            Date::parse(&normalised, &Iso8601::DEFAULT).map(|date| date.midnight().assume_utc())
        })
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        Ok(Timestamp::parse_lossy(&raw))
    }
}

impl ToSql for Timestamp {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_text()))
    }
}

impl FromSql for Timestamp {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(Timestamp::parse_lossy)
    }
}

#[cfg(test)]
mod parse_iso8601_tests {
    use time::macros::datetime;

    use super::parse_iso8601;

    #[test]
    fn parses_zulu_time() {
        assert_eq!(
            parse_iso8601("2024-01-05T10:30:00Z"),
            Ok(datetime!(2024-01-05 10:30:00 UTC))
        );
    }

    #[test]
    fn parses_fractional_seconds_and_zulu() {
        assert_eq!(
            parse_iso8601("2024-01-05T10:30:00.250Z"),
            Ok(datetime!(2024-01-05 10:30:00.25 UTC))
        );
    }

    #[test]
    fn parses_explicit_offset() {
        assert_eq!(
            parse_iso8601("2024-01-05T16:00:00+05:30"),
            Ok(datetime!(2024-01-05 16:00:00 +05:30))
        );
    }

    #[test]
    fn naive_date_time_is_utc() {
        assert_eq!(
            parse_iso8601("2024-01-05T10:30:00"),
            Ok(datetime!(2024-01-05 10:30:00 UTC))
        );
        assert_eq!(
            parse_iso8601("2024-01-05 10:30:00"),
            Ok(datetime!(2024-01-05 10:30:00 UTC))
        );
    }

    #[test]
    fn space_separated_with_offset() {
        assert_eq!(
            parse_iso8601("2024-01-05 10:30:00Z"),
            Ok(datetime!(2024-01-05 10:30:00 UTC))
        );
        assert_eq!(
            parse_iso8601("2024-01-05 10:30:00+05:30"),
            Ok(datetime!(2024-01-05 10:30:00 +05:30))
        );
    }

    #[test]
    fn space_separated_with_fractional_seconds() {
        assert_eq!(
            parse_iso8601("2024-01-05 10:30:00.123456"),
            Ok(datetime!(2024-01-05 10:30:00.123456 UTC))
        );
    }

    #[test]
    fn space_separated_without_seconds() {
        assert_eq!(
            parse_iso8601("2024-01-05 10:30"),
            Ok(datetime!(2024-01-05 10:30:00 UTC))
        );
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        assert_eq!(
            parse_iso8601("2024-01-05"),
            Ok(datetime!(2024-01-05 00:00:00 UTC))
        );
    }

    #[test]
    fn rejects_spreadsheet_locale_format() {
        assert!(parse_iso8601("1/5/2024 10:30:00").is_err());
    }
}
