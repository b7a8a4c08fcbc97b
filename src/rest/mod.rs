//! REST API for the SVD and PCA services.
//!
//! Two resource collections, `/tsvd` and `/pca`, each accepting matrices by `POST`
//! and serving stored, optionally rank-truncated decompositions by `GET /{id}`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Json, Router};
use log::warn;
use ndarray::Array2;
use serde_json::Value;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::linalg_backends::LinAlgBackendProvider;
use crate::matrix::parse_matrix;
use crate::pca::PcaRecord;
use crate::store::{RecordId, RecordStore};
use crate::svd::SvdRecord;

pub mod error;
pub mod pca;
pub mod tsvd;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use types::*;

/// Context shared across REST handlers.
pub struct DecompApiContext {
    /// Stored SVD records.
    pub svd_store: RecordStore<SvdRecord>,
    /// Stored PCA records.
    pub pca_store: RecordStore<PcaRecord>,
    /// Linear algebra backend used for decompositions.
    pub backend: LinAlgBackendProvider<f64>,
}

impl Default for DecompApiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DecompApiContext {
    /// Create a context with empty stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            svd_store: RecordStore::new("svd"),
            pca_store: RecordStore::new("pca"),
            backend: LinAlgBackendProvider::new(),
        }
    }
}

/// Plain-text description served at `/`.
pub const HOME_TEXT: &str = "Truncated SVD and PCA service. Resources: /tsvd, /pca";

async fn home() -> &'static str {
    HOME_TEXT
}

/// Create the REST API router with default configuration.
pub fn router(ctx: Arc<DecompApiContext>) -> Router {
    router_with_config(ctx, &ServerConfig::default())
}

/// Create the REST API router with configuration.
pub fn router_with_config(ctx: Arc<DecompApiContext>, config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(home))
        // SVD endpoints
        .route("/tsvd", get(tsvd::home).post(tsvd::create))
        .route("/tsvd/", get(tsvd::home).post(tsvd::create))
        .route("/tsvd/{id}", get(tsvd::get))
        // PCA endpoints
        .route("/pca", get(pca::home).post(pca::create))
        .route("/pca/", get(pca::home).post(pca::create))
        .route("/pca/{id}", get(pca::get))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .with_state(ctx)
}

/// Extracts the `matrix` member of a create request body.
fn matrix_from_body(body: Result<Json<Value>, JsonRejection>) -> Result<Array2<f64>, ApiError> {
    let Json(value) = body?;
    let object = value
        .as_object()
        .ok_or_else(|| ApiError::bad_request("request body must be a JSON object with a \"matrix\" member"))?;
    parse_matrix(object.get("matrix")).map_err(|e| {
        warn!("Rejected submitted matrix: {e}");
        ApiError::from(crate::error::DecompositionError::from(e))
    })
}

/// Parses an identifier path segment. Anything but a plain unsigned integer names no record.
fn record_id_from_path(raw: &str) -> Result<RecordId, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::not_found(format!("no record stored under id {raw:?}")));
    }
    raw.parse::<u64>()
        .map(RecordId)
        .map_err(|_| ApiError::not_found(format!("no record stored under id {raw:?}")))
}

/// Runs a CPU-bound decomposition off the async worker threads.
async fn run_decomposition<T, F>(job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ApiError::internal(format!("decomposition task failed: {e}")))?
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_starts_empty() {
        let ctx = DecompApiContext::new();
        assert!(ctx.svd_store.is_empty());
        assert!(ctx.pca_store.is_empty());
    }

    #[test]
    fn test_router_creation() {
        let ctx = Arc::new(DecompApiContext::new());
        let _router = router(ctx);
    }

    #[test]
    fn test_record_id_from_path() {
        assert_eq!(record_id_from_path("12").unwrap(), RecordId(12));
        for raw in ["", "abc", "-1", "1.0", "99999999999999999999999"] {
            assert_eq!(record_id_from_path(raw).unwrap_err().code, 404, "path {raw:?}");
        }
    }

    #[test]
    fn test_matrix_from_body_requires_object_with_matrix() {
        let ok = matrix_from_body(Ok(Json(json!({"matrix": [[1, 2], [3, 4]]})))).unwrap();
        assert_eq!(ok.dim(), (2, 2));

        let list_body = matrix_from_body(Ok(Json(json!([[1, 2]])))).unwrap_err();
        assert_eq!(list_body.code, 400);

        let missing = matrix_from_body(Ok(Json(json!({"rows": [[1]]})))).unwrap_err();
        assert_eq!(missing.code, 400);
        assert!(missing.error.contains("2D list"));
    }
}
