//! Proc Metrics: structured runtime metrics from line-oriented `/proc` files.
//!
//! The [`procfs`] module turns `key: value` style kernel files into typed snapshots.
//! [`collector`] reads them from a procfs root and [`api`] serves them over HTTP.

use std::sync::Arc;

use error::ResultOkLogExt;

pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod procfs;

/// Runs the Proc Metrics service.
///
/// Reads the configuration from the environment, builds the collector, and serves the
/// HTTP API until the server fails.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid configuration values (e.g., `PROC_METRICS_LISTEN_ADDR`).
/// - Failure to bind the listen address.
pub async fn run() -> error::Result<()> {
    let config = config::Config::from_env()?;
    log::debug!("Final config: {:?}", config);

    let collector = Arc::new(collector::ProcCollector::new(&config.proc_root));
    if collector.meminfo().ok_log().is_none() {
        log::warn!(
            "procfs root `{}` is not readable, requests will fail until it is",
            collector.root().display()
        );
    }

    let api = api::APIServer::new(collector);
    log::info!("Serving metrics on {}", config.listen_addr);
    api.listen(config.listen_addr).await
}
