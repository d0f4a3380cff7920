//! Periodic self-ping to keep the hosting platform from idling the process
//!
//! Purely operational: the task has no data dependency on request handling
//! and its failures are only ever logged.

use std::time::Duration;
use tokio::task::JoinHandle;

use crate::constants::{KEEPALIVE_INTERVAL_SECS, KEEPALIVE_REQUEST_TIMEOUT_SECS};

/// Spawns a background task that sends a GET request to `url` at a fixed
/// interval
pub fn spawn_keepalive(url: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(KEEPALIVE_REQUEST_TIMEOUT_SECS))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                log::error!("Failed to build keep-alive client: {}", e);
                return;
            }
        };

        let mut interval = tokio::time::interval(Duration::from_secs(KEEPALIVE_INTERVAL_SECS));
        loop {
            interval.tick().await;
            match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    log::debug!("Keep-alive ping succeeded")
                }
                Ok(response) => {
                    log::warn!("Keep-alive ping returned status {}", response.status())
                }
                Err(e) => log::warn!("Keep-alive ping failed: {}", e),
            }
        }
    })
}
