//! Fetching new rows from the spreadsheet feed.

use std::{collections::HashMap, future::Future};

use serde::Deserialize;
use serde_json::Value;

use crate::Error;

/// One response from the feed: column names plus the rows reported as new.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeedPage {
    /// The column names, in cell order.
    pub header: Vec<String>,
    /// The new rows. Each row's cells are aligned to `header`.
    pub rows: Vec<Vec<Value>>,
}

impl FeedPage {
    /// Label each row's cells with the column names from the header.
    pub fn labelled_rows(&self) -> Vec<FeedRow> {
        self.rows
            .iter()
            .map(|cells| FeedRow::from_cells(&self.header, cells))
            .collect()
    }
}

/// A feed row with its cells keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRow(HashMap<String, String>);

impl FeedRow {
    /// Pair `header` with `cells`.
    ///
    /// Cells past the end of the header are dropped and columns without a cell are left out.
    /// Strings are used as-is, other scalars are written as text and `null` becomes "".
    pub fn from_cells(header: &[String], cells: &[Value]) -> Self {
        let row = header
            .iter()
            .zip(cells)
            .map(|(column, cell)| (column.clone(), cell_text(cell)))
            .collect();

        Self(row)
    }

    /// The text in `column`, or "" if the row has no such column.
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map(String::as_str).unwrap_or_default()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FeedRow {
    fn from(cells: [(&str, &str); N]) -> Self {
        Self(
            cells
                .into_iter()
                .map(|(column, cell)| (column.to_owned(), cell.to_owned()))
                .collect(),
        )
    }
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A source of new feed rows.
pub trait Feed {
    /// Fetch the rows the feed currently reports as new.
    ///
    /// # Errors
    /// Returns [Error::FeedRequest] if the feed cannot be reached or answers with an error status,
    /// or [Error::MalformedFeed] if the response is not a `header` and `rows` object.
    fn fetch(&self) -> impl Future<Output = Result<FeedPage, Error>> + Send;
}

/// Fetches the feed with an unauthenticated GET request.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    /// Create a feed reader for `url`.
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_owned(),
        }
    }
}

impl Feed for HttpFeed {
    async fn fetch(&self) -> Result<FeedPage, Error> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|error| Error::FeedRequest(error.to_string()))?;

        let text = response
            .text()
            .await
            .map_err(|error| Error::FeedRequest(error.to_string()))?;

        serde_json::from_str(&text).map_err(|error| Error::MalformedFeed(error.to_string()))
    }
}

#[cfg(test)]
mod feed_row_tests {
    use serde_json::json;

    use super::{FeedPage, FeedRow};

    fn header(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|column| column.to_string()).collect()
    }

    #[test]
    fn labels_cells_with_header() {
        let row = FeedRow::from_cells(
            &header(&["From", "Subject"]),
            &[json!("alerts@bank.example"), json!("Debit alert")],
        );

        assert_eq!(row.get("From"), "alerts@bank.example");
        assert_eq!(row.get("Subject"), "Debit alert");
    }

    #[test]
    fn missing_column_is_empty() {
        let row = FeedRow::from_cells(&header(&["From", "Subject"]), &[json!("a@b")]);

        assert_eq!(row.get("Subject"), "");
        assert_eq!(row.get("Body"), "");
    }

    #[test]
    fn extra_cells_are_dropped() {
        let row = FeedRow::from_cells(&header(&["From"]), &[json!("a@b"), json!("extra")]);

        assert_eq!(row, FeedRow::from([("From", "a@b")]));
    }

    #[test]
    fn non_string_cells_become_text() {
        let row = FeedRow::from_cells(
            &header(&["Status", "Count", "Note"]),
            &[json!(true), json!(42), json!(null)],
        );

        assert_eq!(row.get("Status"), "true");
        assert_eq!(row.get("Count"), "42");
        assert_eq!(row.get("Note"), "");
    }

    #[test]
    fn parses_feed_response() {
        let page: FeedPage = serde_json::from_value(json!({
            "header": ["From", "Body"],
            "rows": [["a@b", "Rs.30.00"], ["c@d", "hello"]]
        }))
        .expect("Could not parse feed page");

        let rows = page.labelled_rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("From"), "c@d");
    }

    #[test]
    fn rejects_response_without_rows() {
        let page = serde_json::from_value::<FeedPage>(json!({ "header": ["From"] }));

        assert!(page.is_err());
    }
}
