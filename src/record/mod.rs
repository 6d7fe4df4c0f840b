//! Stored transaction-alert records and the endpoints that push and list them.

mod db;
mod domain;
mod list;
mod push;

pub use db::{create_record, create_record_table, get_all_records};
pub use domain::{NewPolledRecord, PolledRecord, PushResponse, RecordId};
pub use list::get_all_records_endpoint;
pub use push::{PUSH_CONFIRMATION, push_record_endpoint};
