//! Long-lived catalog task
//!
//! Polls the store's download signal every `poll_interval`. On a request it
//! runs one search and publishes the results; failures are logged and leave
//! the previous result list in place. The signal is cleared either way.
//! Returns once the exit signal is observed.

use std::time::Duration;

use tracing::{info, warn};

use super::client::CatalogClient;
use crate::state::store::{SharedStore, Store};

pub async fn run(store: Store, client: CatalogClient, poll_interval: Duration) {
    info!("🔄 Catalog worker started");

    while !store.exit_requested() {
        if store.download_requested() {
            fetch_once(&store, &client).await;
        }
        tokio::time::sleep(poll_interval).await;
    }

    info!("🛑 Catalog worker stopped");
}

/// Serve a single raised download signal
pub async fn fetch_once(store: &SharedStore, client: &CatalogClient) {
    let request = store.snapshot_request();

    match client.search(&request).await {
        Ok(books) => store.publish_results(books),
        Err(e) => warn!("Search failed: {}", e),
    }

    store.finish_download();
}
