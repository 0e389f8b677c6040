use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct RevalidateData {
    pub revalidated: bool,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/v1/revalidate — drop the cached snapshot after a secret check,
/// forcing the next portfolio read to refetch.
pub(super) async fn revalidate(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Response {
    let provided = headers
        .get("x-revalidate-secret")
        .and_then(|v| v.to_str().ok());

    if !secret_matches(state.revalidate_secret.as_deref(), provided) {
        return ApiError::new(req_id.0, "unauthorized", "Invalid or missing secret")
            .into_response();
    }

    state.cache.invalidate().await;
    tracing::info!("snapshot cache invalidated");

    Json(ApiResponse {
        data: RevalidateData {
            revalidated: true,
            timestamp: Utc::now(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response()
}

/// Constant-time comparison; an unconfigured secret matches nothing.
fn secret_matches(configured: Option<&str>, provided: Option<&str>) -> bool {
    match (configured, provided) {
        (Some(configured), Some(provided)) => {
            configured.as_bytes().ct_eq(provided.as_bytes()).into()
        }
        _ => false,
    }
}
