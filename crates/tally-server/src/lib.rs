//! tally-server — HTTP endpoint layer for the bitable expense bridge.
//!
//! Every endpoint is a pure request/response cycle over the shared
//! [`AppState`]: verify the signature where required, run the payload
//! through the `tally-core` pipeline, persist the full store, respond with
//! the wire envelope. No per-request state outlives the request.

pub mod error;
pub mod routes;
pub mod signature;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use tally_core::config::Config;
use tally_core::FileStore;

/// Open the store, bind, and serve until the process is stopped.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = FileStore::open(&config.storage.dir)?;
    tracing::info!(
        received = store.received().len(),
        processed = store.processed().len(),
        "store loaded"
    );

    let addr: std::net::SocketAddr =
        format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(store, config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
