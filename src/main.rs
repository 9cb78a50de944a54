//! metrics-ingest - in-memory gauge and counter ingestion over HTTP
//!
//! This is the composition root that wires together all the components.

use metrics_ingest::{load_config, DashMapMetricsStore, UpdateServer, UpdateService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();

    tracing::info!("starting metrics-ingest listen={}", cfg.listen_addr);

    // ===== COMPOSITION ROOT =====

    // 1. Metrics store (DashMap), created once and shared by every request
    let store = Arc::new(DashMapMetricsStore::new());

    // 2. Application service
    let update_service = Arc::new(UpdateService::new(store));

    // 3. Inbound adapter; a bind failure ends the process
    let server = UpdateServer::new(cfg.listen_addr, update_service);

    server.run().await
}
