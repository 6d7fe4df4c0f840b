//! Core record domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::extract::{BodyDetails, ParsedRow, Timestamp};

/// Database identifier for a stored record.
pub type RecordId = i64;

/// A record as pushed to the ingestion endpoint.
///
/// The string fields are required. `timestamp`, `amount`, `date` and `vpa` may be missing or
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPolledRecord {
    /// When the email arrived.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    /// The sender's address.
    pub email: String,
    /// The sender's display name.
    pub name: String,
    /// The email subject.
    pub subject: String,
    /// The email body with line breaks folded into spaces.
    pub body: String,
    /// The feed's status for the row.
    pub status: String,
    /// The amount as written in the body, e.g. "1,250.00".
    #[serde(default)]
    pub amount: Option<String>,
    /// The transaction date found in the body.
    #[serde(default)]
    pub date: Option<Date>,
    /// The counterparty's virtual payment address.
    #[serde(default)]
    pub vpa: Option<String>,
}

impl NewPolledRecord {
    /// Combine a parsed feed row with the details extracted from its body.
    pub fn new(row: ParsedRow, details: BodyDetails) -> Self {
        Self {
            timestamp: row.timestamp,
            email: row.email,
            name: row.name,
            subject: row.subject,
            body: row.body,
            status: row.status,
            amount: details.amount,
            date: details.date,
            vpa: details.vpa,
        }
    }
}

/// A stored record with its generated ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolledRecord {
    /// The ID assigned when the record was stored.
    pub id: RecordId,
    /// When the email arrived.
    pub timestamp: Option<Timestamp>,
    /// The sender's address.
    pub email: String,
    /// The sender's display name.
    pub name: String,
    /// The email subject.
    pub subject: String,
    /// The email body.
    pub body: String,
    /// The feed's status for the row.
    pub status: String,
    /// The amount found in the body.
    pub amount: Option<String>,
    /// The transaction date found in the body.
    pub date: Option<Date>,
    /// The virtual payment address found in the body.
    pub vpa: Option<String>,
}

/// The body returned after a record is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushResponse {
    /// The ID assigned to the new record.
    pub id: RecordId,
    /// A human readable confirmation.
    pub message: String,
}
