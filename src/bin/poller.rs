use std::time::Duration;

use clap::Parser;

use txn_tracker::{
    DEFAULT_INGEST_URL, DEFAULT_POLL_INTERVAL, Poller, PollerConfig, setup_logging,
    shutdown_signal,
};

/// Polls the spreadsheet feed for transaction alert emails and pushes them to the ingestion
/// server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The URL of the spreadsheet feed.
    #[arg(long, env = "SHEET_LINK")]
    feed_url: String,

    /// The sender address whose emails are scanned for payment details.
    #[arg(long, env = "EMAIL_TO_BE_CHECKED")]
    watch_address: Option<String>,

    /// Seconds to wait between polls.
    #[arg(long, env = "POLL_INTERVAL", default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    poll_interval: u64,

    /// The URL of the ingestion endpoint.
    #[arg(long, env = "INGEST_URL", default_value = DEFAULT_INGEST_URL)]
    ingest_url: String,
}

impl Args {
    fn into_config(self) -> PollerConfig {
        PollerConfig::new(&self.feed_url, self.watch_address.as_deref())
            .poll_interval(Duration::from_secs(self.poll_interval))
            .ingest_url(&self.ingest_url)
    }
}

#[tokio::main]
async fn main() {
    setup_logging("poller.log").expect("Could not create log file");

    let poller = Poller::from_config(Args::parse().into_config());
    let config = poller.config();

    if config.watch_address.is_none() {
        tracing::warn!("No watch address set, payment details will not be extracted.");
    }

    tracing::info!(
        "Polling {} every {:?}, pushing to {}",
        config.feed_url,
        config.poll_interval,
        config.ingest_url
    );

    tokio::select! {
        _ = poller.run() => {},
        _ = shutdown_signal() => tracing::info!("Shutting down poller."),
    }
}
