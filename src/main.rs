/// Entry point for the Proc Metrics service.
///
/// Serves snapshots of `/proc/meminfo`, `/proc/vmstat` and `/proc/stat` as JSON.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the listen address cannot be
/// bound.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=info PROC_METRICS_LISTEN_ADDR=127.0.0.1:19637 cargo run
/// ```
#[tokio::main]
async fn main() -> Result<(), proc_metrics::error::Error> {
    env_logger::init();
    proc_metrics::run().await
}
