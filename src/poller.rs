//! The poll loop: fetch new feed rows, turn each into a record and push it for storage.
//!
//! The poller alternates between sleeping and fetching. A fetch processes the whole batch one
//! row at a time and always ends with a sleep, whatever happened to the individual rows. Nothing
//! is remembered between polls, so rows the feed reports again are pushed again.

use crate::{
    Error, NewPolledRecord, PollerConfig,
    extract::{BodyDetails, extract_details, parse_row},
    feed::{Feed, FeedRow, HttpFeed},
    ingest::{HttpIngest, Ingest},
};

/// What happened during one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// The number of rows the feed reported as new.
    pub rows: usize,
    /// The number of rows the ingestion endpoint accepted.
    pub pushed: usize,
    /// The number of rows that could not be delivered or were rejected.
    pub failed: usize,
}

/// Polls a [Feed] and pushes every row to an [Ingest].
#[derive(Debug)]
pub struct Poller<F, I> {
    config: PollerConfig,
    feed: F,
    ingest: I,
}

impl Poller<HttpFeed, HttpIngest> {
    /// Create a poller that talks HTTP to the URLs in `config`.
    pub fn from_config(config: PollerConfig) -> Self {
        let client = reqwest::Client::new();
        let feed = HttpFeed::new(client.clone(), &config.feed_url);
        let ingest = HttpIngest::new(client, &config.ingest_url);

        Self::new(config, feed, ingest)
    }
}

impl<F: Feed, I: Ingest> Poller<F, I> {
    /// Create a poller from its parts.
    pub fn new(config: PollerConfig, feed: F, ingest: I) -> Self {
        Self {
            config,
            feed,
            ingest,
        }
    }

    /// The configuration the poller was built with.
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Turn a feed row into the record to push.
    ///
    /// Payment details are only extracted when the sender is the watch address.
    pub fn build_record(&self, row: &FeedRow) -> NewPolledRecord {
        let parsed = parse_row(row);

        let details = if self.config.is_watched(&parsed.email) {
            extract_details(&parsed.body)
        } else {
            BodyDetails::default()
        };

        NewPolledRecord::new(parsed, details)
    }

    /// Fetch the feed once and push every new row.
    ///
    /// A row that cannot be delivered is logged and counted in [PollSummary::failed]; the rest of
    /// the batch is still pushed.
    ///
    /// # Errors
    /// Returns the feed's error if the feed cannot be fetched or parsed. No rows are pushed in
    /// that case.
    pub async fn poll_once(&self) -> Result<PollSummary, Error> {
        let page = self.feed.fetch().await?;
        let rows = page.labelled_rows();

        if rows.is_empty() {
            tracing::info!("No new rows.");
            return Ok(PollSummary::default());
        }

        tracing::info!("New rows ({}):", rows.len());

        let mut summary = PollSummary {
            rows: rows.len(),
            ..Default::default()
        };

        for row in &rows {
            let record = self.build_record(row);
            tracing::debug!("Pushing: {record:?}");

            match self.ingest.push(&record).await {
                Ok(outcome) if outcome.is_success() => {
                    tracing::info!("API status code: {}", outcome.status);
                    tracing::debug!("API response text: {}", outcome.body);
                    summary.pushed += 1;
                }
                Ok(outcome) => {
                    tracing::warn!(
                        "Ingestion rejected record from {:?} with status {}: {}",
                        record.email,
                        outcome.status,
                        outcome.body
                    );
                    summary.failed += 1;
                }
                Err(error) => {
                    tracing::error!("API error: {error}");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Poll forever, sleeping for the configured interval after every poll.
    ///
    /// A failed poll is logged and the loop carries on at the next interval.
    pub async fn run(&self) {
        loop {
            match self.poll_once().await {
                Ok(summary) => tracing::debug!("Poll finished: {summary:?}"),
                Err(error) => tracing::error!("Poll failed: {error}"),
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
