use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::middleware::{client_key, RequestId};
use crate::relay::{handle_submission, RelayOutcome};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct ContactData {
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,
}

/// POST /api/v1/contact — relay one contact-form submission.
///
/// Takes the raw body so the rate gate runs before any parsing; the `Json`
/// extractor would reject malformed bodies ahead of the gate.
pub(super) async fn submit_contact(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let source_key = client_key(&headers);
    let outcome = handle_submission(
        &state.limiter,
        state.mailer.as_deref(),
        &state.from_address,
        &source_key,
        &body,
    )
    .await;

    let rid = req_id.0;
    match outcome {
        RelayOutcome::Delivered { id } => Json(ApiResponse {
            data: ContactData {
                delivered: true,
                id: Some(id),
                mailto: None,
            },
            meta: ResponseMeta::new(rid),
        })
        .into_response(),
        RelayOutcome::Fallback { mailto } => Json(ApiResponse {
            data: ContactData {
                delivered: false,
                id: None,
                mailto: Some(mailto),
            },
            meta: ResponseMeta::new(rid),
        })
        .into_response(),
        RelayOutcome::RateLimited => ApiError::new(
            rid,
            "rate_limited",
            "Too many requests. Please try again later.",
        )
        .into_response(),
        RelayOutcome::Invalid { reason } => {
            ApiError::new(rid, "validation_error", reason).into_response()
        }
        RelayOutcome::UpstreamFailed => {
            ApiError::new(rid, "upstream_failure", "Failed to send email").into_response()
        }
    }
}
