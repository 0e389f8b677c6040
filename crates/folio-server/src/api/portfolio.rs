use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// GET /api/v1/portfolio — the aggregate snapshot, served through the TTL
/// cache. Never errors; a down content source yields the fallback snapshot.
pub(super) async fn get_portfolio(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let snapshot = state.cache.get_or_refresh().await;
    Json(ApiResponse {
        data: snapshot,
        meta: ResponseMeta::new(req_id.0),
    })
}
