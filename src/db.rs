//! Creates the application's database schema.

use rusqlite::Connection;

use crate::record::create_record_table;

/// Create the tables and indexes for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if any statement fails.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_record_table(connection)
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn creates_polled_record_table() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'polled_record'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        assert!(initialize(&connection).is_ok());
    }
}
