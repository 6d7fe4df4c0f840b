//! Sending records to the ingestion endpoint.

use std::future::Future;

use crate::{Error, NewPolledRecord};

/// How the ingestion endpoint answered a push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    /// The HTTP status code.
    pub status: u16,
    /// The response body as text.
    pub body: String,
}

impl PushOutcome {
    /// Whether the record was accepted.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A destination for parsed records.
pub trait Ingest {
    /// Send one record.
    ///
    /// An answer with an error status is still an `Ok` [PushOutcome].
    ///
    /// # Errors
    /// Returns [Error::IngestRequest] if the endpoint cannot be reached.
    fn push(
        &self,
        record: &NewPolledRecord,
    ) -> impl Future<Output = Result<PushOutcome, Error>> + Send;
}

/// Posts records as JSON to the ingestion endpoint.
#[derive(Debug, Clone)]
pub struct HttpIngest {
    client: reqwest::Client,
    url: String,
}

impl HttpIngest {
    /// Create a client that posts to `url`.
    pub fn new(client: reqwest::Client, url: &str) -> Self {
        Self {
            client,
            url: url.to_owned(),
        }
    }
}

impl Ingest for HttpIngest {
    async fn push(&self, record: &NewPolledRecord) -> Result<PushOutcome, Error> {
        let response = self
            .client
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|error| Error::IngestRequest(error.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| Error::IngestRequest(error.to_string()))?;

        Ok(PushOutcome { status, body })
    }
}
