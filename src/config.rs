//! Configuration for the poller, built once at start-up.

use std::time::Duration;

/// How long the poller sleeps between polls when no interval is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Where the poller sends records when no ingestion URL is configured.
pub const DEFAULT_INGEST_URL: &str = "http://127.0.0.1:8000/push";

/// Everything the poller needs to know about the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// The URL of the feed to poll.
    pub feed_url: String,
    /// The only sender whose email bodies are scanned for payment details.
    ///
    /// When `None`, no row has details extracted.
    pub watch_address: Option<String>,
    /// How long to sleep between polls.
    pub poll_interval: Duration,
    /// The URL of the ingestion endpoint.
    pub ingest_url: String,
}

impl PollerConfig {
    /// Create a config with the default poll interval and ingestion URL.
    ///
    /// An empty `watch_address` is treated as no watch address.
    pub fn new(feed_url: &str, watch_address: Option<&str>) -> Self {
        Self {
            feed_url: feed_url.to_owned(),
            watch_address: watch_address
                .map(str::trim)
                .filter(|address| !address.is_empty())
                .map(str::to_owned),
            poll_interval: DEFAULT_POLL_INTERVAL,
            ingest_url: DEFAULT_INGEST_URL.to_owned(),
        }
    }

    /// Set how long to sleep between polls.
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the URL of the ingestion endpoint.
    pub fn ingest_url(mut self, ingest_url: &str) -> Self {
        self.ingest_url = ingest_url.to_owned();
        self
    }

    /// Whether `email` is the watch address.
    ///
    /// The comparison is exact, so an address that differs only in case does not match.
    pub fn is_watched(&self, email: &str) -> bool {
        self.watch_address.as_deref() == Some(email)
    }
}

#[cfg(test)]
mod poller_config_tests {
    use std::time::Duration;

    use super::{DEFAULT_INGEST_URL, DEFAULT_POLL_INTERVAL, PollerConfig};

    #[test]
    fn new_uses_defaults() {
        let config = PollerConfig::new("http://feed.example/rows", Some("alerts@hdfcbank.net"));

        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.ingest_url, DEFAULT_INGEST_URL);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = PollerConfig::new("http://feed.example/rows", None)
            .poll_interval(Duration::from_secs(60))
            .ingest_url("http://ingest.example/push");

        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.ingest_url, "http://ingest.example/push");
    }

    #[test]
    fn watches_only_exact_address() {
        let config = PollerConfig::new("http://feed.example/rows", Some("alerts@hdfcbank.net"));

        assert!(config.is_watched("alerts@hdfcbank.net"));
        assert!(!config.is_watched("Alerts@hdfcbank.net"));
        assert!(!config.is_watched("friend@example.com"));
    }

    #[test]
    fn empty_watch_address_watches_nobody() {
        let config = PollerConfig::new("http://feed.example/rows", Some("  "));

        assert_eq!(config.watch_address, None);
        assert!(!config.is_watched(""));
    }
}
