//! Application configuration
//!
//! Everything here is fixed at build time. The process exposes no flags or
//! environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Open Library host queried for searches and detail lookups
pub const CATALOG_BASE_URL: &str = "https://openlibrary.org";

/// Connection timeout for every catalog request
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// How often the catalog worker checks the download signal
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Directory holding favorites.txt and notes.json (relative to the working directory)
pub const DATA_DIR: &str = "data";

pub const FAVORITES_FILE: &str = "favorites.txt";
pub const NOTES_FILE: &str = "notes.json";

/// Results-per-page slider bounds
pub const MIN_RESULTS_PER_PAGE: u32 = 5;
pub const MAX_RESULTS_PER_PAGE: u32 = 50;
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub catalog_base_url: String,
    pub connect_timeout: Duration,
    pub poll_interval: Duration,
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: CATALOG_BASE_URL.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            poll_interval: POLL_INTERVAL,
            data_dir: PathBuf::from(DATA_DIR),
        }
    }
}

impl AppConfig {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
