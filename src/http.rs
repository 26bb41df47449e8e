use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One client for the whole run; every request inherits its timeout.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// GET `url` and return the body. Non-success statuses are errors.
pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let network = |source| ScrapeError::Network {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(network)?;
    let status = response.status();
    debug!(%url, %status, "response");
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(network)
}
