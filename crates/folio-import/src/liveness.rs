//! Media URL liveness probing
//!
//! A probe is a `HEAD` request bounded by a per-request timeout. Every
//! failure mode (bad URL, DNS, connection, timeout, non-2xx status) reads as
//! "not reachable"; the probe itself never fails.

use folio_common::{FolioError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default per-probe timeout in seconds
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Issues liveness probes against remote media
#[derive(Debug, Clone)]
pub struct UrlChecker {
    client: Client,
    timeout: Duration,
}

impl UrlChecker {
    /// Create a checker with its own HTTP client
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("folio-import/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FolioError::HttpClient(e.to_string()))?;

        Ok(Self::with_client(client, timeout))
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Whether `url` answers a `HEAD` request with a success status in time
    pub async fn is_reachable(&self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            debug!("Empty URL treated as unreachable");
            return false;
        }

        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(response) => {
                let status = response.status();
                debug!(%url, %status, "Probe answered");
                status.is_success()
            },
            Err(e) => {
                debug!(%url, error = %e, timed_out = e.is_timeout(), "Probe failed");
                false
            },
        }
    }

    /// Probe two URLs concurrently
    pub async fn check_pair(&self, first: &str, second: &str) -> (bool, bool) {
        tokio::join!(self.is_reachable(first), self.is_reachable(second))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_and_malformed_urls_are_unreachable() {
        let checker = UrlChecker::new(Duration::from_millis(200)).unwrap();

        assert!(!checker.is_reachable("").await);
        assert!(!checker.is_reachable("   ").await);
        assert!(!checker.is_reachable("not a url").await);
        assert!(!checker.is_reachable("ftp//missing-colon").await);
    }
}
