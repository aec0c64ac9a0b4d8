use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;

use crate::collector::{ProcCollector, Snapshot};
use crate::error::{Error, ResultOkLogExt};
use crate::procfs::ExtractError;

mod models;

type SharedCollector = State<Arc<ProcCollector>>;

async fn meminfo(State(collector): SharedCollector) -> Response {
    snapshot_response(collector, ProcCollector::meminfo).await
}

async fn vmstat(State(collector): SharedCollector) -> Response {
    snapshot_response(collector, ProcCollector::vmstat).await
}

async fn kernel_stat(State(collector): SharedCollector) -> Response {
    snapshot_response(collector, ProcCollector::kernel_stat).await
}

async fn all(State(collector): SharedCollector) -> Response {
    let collected = tokio::task::spawn_blocking(move || models::AllSnapshots {
        meminfo: collector.meminfo().ok_log().map(Into::into),
        vmstat: collector.vmstat().ok_log().map(Into::into),
        stat: collector.kernel_stat().ok_log().map(Into::into),
    })
    .await;

    match collected {
        Ok(body) if body.is_empty() => {
            log::error!("No metrics source under the proc root could be read");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "failed to read metrics sources",
            )
                .into_response()
        }
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => {
            log::error!("Extraction task failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to collect metrics").into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

/// Runs `collect` off the async runtime and renders its snapshot as JSON.
async fn snapshot_response<S, F>(collector: Arc<ProcCollector>, collect: F) -> Response
where
    S: serde::Serialize + Send + 'static,
    F: FnOnce(&ProcCollector) -> Result<Snapshot<S>, ExtractError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || collect(&collector)).await {
        Ok(Ok(snapshot)) => {
            (StatusCode::OK, Json(models::SnapshotBody::from(snapshot))).into_response()
        }
        Ok(Err(err)) => {
            log::error!("Failed to read metrics source: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "failed to read metrics source",
            )
                .into_response()
        }
        Err(err) => {
            log::error!("Extraction task failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to collect metrics").into_response()
        }
    }
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new(collector: Arc<ProcCollector>) -> Self {
        let router = axum::Router::new()
            .route("/proc", get(all))
            .route("/proc/meminfo", get(meminfo))
            .route("/proc/vmstat", get(vmstat))
            .route("/proc/stat", get(kernel_stat))
            .route("/health", get(health))
            .with_state(collector);
        Self { router }
    }

    pub fn into_router(self) -> axum::Router {
        self.router
    }

    /// Serves the API on `addr` until the server fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bind`] if the address cannot be bound and [`Error::Serve`] if
    /// serving fails.
    pub async fn listen(self, addr: SocketAddr) -> Result<(), Error> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| Error::Bind { addr, source })?;
        axum::serve(listener, self.router.into_make_service())
            .await
            .map_err(Error::Serve)
    }
}
