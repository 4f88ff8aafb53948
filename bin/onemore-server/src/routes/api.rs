//! Content and submission endpoints, nested under `/api`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use onemore_core::{ContentItem, SubmissionText};
use tracing::info;
use utoipa::OpenApi;

use crate::entities::{SubmissionRecord, SubmissionStore};
use crate::error::ServerError;
use crate::schemas::api::{ErrorResponse, OneMoreQuery, SubmitRequest, SubmitResponse};
use crate::services::selection;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(one_more, submit),
    components(schemas(ContentItem, SubmitRequest, SubmitResponse, ErrorResponse))
)]
pub struct ContentApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/one-more", get(one_more))
        .route("/submit", post(submit))
}

/// Serve one weighted-random approved item.
///
/// Every call re-rolls; responses are marked `no-store`.
#[utoipa::path(
    get,
    path = "/api/one-more",
    tag = "content",
    params(OneMoreQuery),
    responses(
        (status = 200, description = "An item, or the system placeholder when the catalog is empty", body = ContentItem),
        (status = 404, description = "Selected item disappeared", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn one_more(
    State(state): State<Arc<AppState>>,
    Query(q): Query<OneMoreQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let exclude = q.exclude.as_deref().filter(|id| !id.is_empty());
    let item = selection::select_random(state.store.as_ref(), exclude).await?;
    Ok(([(header::CACHE_CONTROL, "no-store")], Json(item)))
}

/// Queue a text for manual review.
#[utoipa::path(
    post,
    path = "/api/submit",
    tag = "content",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Submission stored", body = SubmitResponse),
        (status = 400, description = "Text missing, blank, not a string or too long", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse),
    )
)]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitResponse>, ServerError> {
    let Json(req) = payload.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let text = SubmissionText::from_json(req.text.as_ref())?;

    // Known gap: no deduplication and no rate limiting. Identical or rapid
    // repeat submissions are all stored.
    let record = SubmissionRecord::pending(text);
    let id = record.id.clone();
    state.store.insert_submission(record).await?;
    info!(%id, "submission stored for review");

    Ok(Json(SubmitResponse { success: true }))
}
