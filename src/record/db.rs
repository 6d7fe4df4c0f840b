//! Database operations for polled records.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    record::{NewPolledRecord, PolledRecord},
};

/// Store a record and return it with its generated ID.
///
/// Records are never deduplicated: storing the same record twice creates two rows.
///
/// # Errors
/// Returns an [Error::SqlError] if the insert fails.
pub fn create_record(
    record: NewPolledRecord,
    connection: &Connection,
) -> Result<PolledRecord, Error> {
    connection
        .prepare(
            "INSERT INTO polled_record
                (timestamp, email, name, subject, body, status, amount, date, vpa)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             RETURNING id, timestamp, email, name, subject, body, status, amount, date, vpa",
        )?
        .query_row(
            (
                record.timestamp,
                record.email,
                record.name,
                record.subject,
                record.body,
                record.status,
                record.amount,
                record.date,
                record.vpa,
            ),
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve every stored record in the order they were stored.
pub fn get_all_records(connection: &Connection) -> Result<Vec<PolledRecord>, Error> {
    connection
        .prepare(
            "SELECT id, timestamp, email, name, subject, body, status, amount, date, vpa
             FROM polled_record
             ORDER BY id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect()
}

/// Initialize the polled record table and indexes.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS polled_record (
            id INTEGER PRIMARY KEY,
            timestamp TEXT,
            email TEXT NOT NULL,
            name TEXT NOT NULL,
            subject TEXT NOT NULL,
            body TEXT NOT NULL,
            status TEXT NOT NULL,
            amount TEXT,
            date TEXT,
            vpa TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_polled_record_email ON polled_record(email);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<PolledRecord, rusqlite::Error> {
    Ok(PolledRecord {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        email: row.get(2)?,
        name: row.get(3)?,
        subject: row.get(4)?,
        body: row.get(5)?,
        status: row.get(6)?,
        amount: row.get(7)?,
        date: row.get(8)?,
        vpa: row.get(9)?,
    })
}
