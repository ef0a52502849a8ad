// src/core/net.rs
// HTTP GET of the scheduler status page. The only blocking step of a scrape.

use std::time::Duration;

use reqwest::Client;

use crate::config::consts::USER_AGENT;
use crate::error::{ExporterError, Result};

/// One client per process; it pools connections and carries the timeout.
pub fn client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Fetch the page body. Non-2xx is an error; no retries.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let resp = client.get(url).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ExporterError::Status { status: status.as_u16(), url: s!(url) });
    }
    let body = resp.text().await?;
    logd!("Fetched {} bytes from {url}", body.len());
    Ok(body)
}
