//! REST API handlers for PCA records.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::pca;
use crate::rank::parse_rank;
use crate::rest::error::{ApiError, ApiResult};
use crate::rest::types::{CreateResponse, PcaResponse, RankQuery};
use crate::rest::{matrix_from_body, record_id_from_path, run_decomposition, DecompApiContext};
use crate::truncate::Truncate;

/// Describe the PCA resource.
pub async fn home() -> &'static str {
    "PCA API with optional rank truncation"
}

/// Fit PCA to a submitted matrix and store the result.
pub async fn create(
    State(ctx): State<Arc<DecompApiContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let matrix = matrix_from_body(body)?;
    let backend = ctx.backend;
    let record = run_decomposition(move || pca::fit_pca(&backend, matrix)).await?;
    let id = ctx.pca_store.create(record);
    Ok((StatusCode::CREATED, Json(CreateResponse { id: id.0 })))
}

/// Get a PCA record, truncated to `?rank=` when given.
pub async fn get(
    State(ctx): State<Arc<DecompApiContext>>,
    Path(raw_id): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<PcaResponse> {
    let id = record_id_from_path(&raw_id)?;
    let record = ctx.pca_store.get(id)?;
    let Query(pairs) = query?;
    let rank = parse_rank(RankQuery::from_pairs(pairs).rank.as_deref())?;
    Ok(Json(PcaResponse::from_view(id, &record.truncate(rank))))
}
