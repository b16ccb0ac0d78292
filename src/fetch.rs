// src/fetch.rs

//! Archive retrieval
//!
//! Downloads are single-shot: no retries, the whole body is buffered in
//! memory because the zip reader needs random access.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Source of raw archive bytes
///
/// The pipeline only talks to this trait, so tests can substitute an
/// in-memory source for the network.
pub trait ArchiveFetcher {
    /// Retrieve the full body at `location`
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl ArchiveFetcher for HttpFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        info!("Downloading {}", location);

        let response = self
            .client
            .get(location)
            .send()
            .map_err(|e| Error::Transport(format!("Failed to fetch {}: {}", location, e)))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "HTTP {} from {}",
                response.status(),
                location
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;

        debug!("Downloaded {} bytes from {}", bytes.len(), location);
        Ok(bytes.to_vec())
    }
}
