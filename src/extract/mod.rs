//! Turning raw feed rows into structured records.
//!
//! Every function here is best-effort: nothing in this module returns an error.
//! Values that cannot be recognised are either left out or kept as the original text.

mod details;
mod row;
mod sender;
mod text;
mod timestamp;

pub use details::{
    BodyDetails, Extracted, expand_two_digit_year, extract_amount, extract_date, extract_details,
    extract_vpa,
};
pub use row::{
    BODY_COLUMN, FROM_COLUMN, ParsedRow, STATUS_COLUMN, SUBJECT_COLUMN, TIMESTAMP_COLUMN,
    parse_row,
};
pub use sender::{Sender, parse_sender};
pub use text::clean_text;
pub use timestamp::{Timestamp, parse_iso8601};
