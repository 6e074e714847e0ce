//! Connectivity probe
//!
//! The desktop has no platform online/offline event, so reachability of the
//! backend itself is the signal: a lightweight request on an interval feeds
//! transitions into the shared network monitor. The monitor deduplicates, so
//! repeated probes in the same state publish nothing.

use std::sync::Arc;
use std::time::Duration;

use gearlog_core::offline::NetworkMonitor;
use tokio::task::JoinHandle;

const PROBE_INTERVAL: Duration = Duration::from_secs(15);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Spawn the background probe loop against the backend base URL
pub fn spawn_connectivity_probe(
    base_url: String,
    monitor: Arc<NetworkMonitor>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
            Ok(client) => client,
            Err(error) => {
                tracing::error!("Failed to build connectivity probe client: {error}");
                return;
            }
        };

        loop {
            // Any response, even an HTTP error status, proves reachability;
            // only transport failures count as offline.
            match client.head(&base_url).send().await {
                Ok(_) => monitor.set_online(),
                Err(error) => {
                    tracing::debug!("Connectivity probe failed: {error}");
                    monitor.set_offline();
                }
            }
            tokio::time::sleep(PROBE_INTERVAL).await;
        }
    })
}
