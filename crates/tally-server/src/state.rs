//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use tally_core::config::Config;
use tally_core::FileStore;

/// State shared by all request handlers.
///
/// The store mutex serializes every read-append-rewrite cycle; two
/// concurrent writers can no longer interleave and lose a full-file
/// rewrite.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<FileStore>>,
    pub config: Arc<Config>,
    /// Process start, for the `/api/stats` uptime field.
    pub started: Instant,
}

impl AppState {
    pub fn new(store: FileStore, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
            started: Instant::now(),
        }
    }
}
