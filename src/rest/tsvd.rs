//! REST API handlers for SVD records.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::rank::parse_rank;
use crate::rest::error::{ApiError, ApiResult};
use crate::rest::types::{CreateResponse, RankQuery, SvdResponse};
use crate::rest::{matrix_from_body, record_id_from_path, run_decomposition, DecompApiContext};
use crate::svd;
use crate::truncate::Truncate;

/// Describe the SVD resource.
pub async fn home() -> &'static str {
    "Matrix SVD API with optional truncation"
}

/// Decompose a submitted matrix and store the result.
pub async fn create(
    State(ctx): State<Arc<DecompApiContext>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let matrix = matrix_from_body(body)?;
    let backend = ctx.backend;
    let record = run_decomposition(move || svd::decompose(&backend, matrix)).await?;
    let id = ctx.svd_store.create(record);
    Ok((StatusCode::CREATED, Json(CreateResponse { id: id.0 })))
}

/// Get an SVD record, truncated to `?rank=` when given.
pub async fn get(
    State(ctx): State<Arc<DecompApiContext>>,
    Path(raw_id): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<SvdResponse> {
    let id = record_id_from_path(&raw_id)?;
    let record = ctx.svd_store.get(id)?;
    let Query(pairs) = query?;
    let rank = parse_rank(RankQuery::from_pairs(pairs).rank.as_deref())?;
    Ok(Json(SvdResponse::from_view(id, &record.truncate(rank))))
}
