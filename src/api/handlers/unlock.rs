//! PIN verification endpoint.

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::gate::{self, GateConfig};

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pin: String,
}

/// Verify a submitted PIN and set the auth cookie on success.
///
/// A malformed or missing JSON body is a client error, not a server fault;
/// the rejection is mapped to a 400 instead of bubbling up. Retries are
/// unlimited: there is no lockout state to accumulate.
#[instrument(skip(gate_config, body))]
pub async fn unlock(
    Extension(gate_config): Extension<GateConfig>,
    body: Result<Json<UnlockRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        debug!("Failed to parse unlock request body");
        return (StatusCode::BAD_REQUEST, "Invalid request body").into_response();
    };

    if gate_config.pin_matches(&request.pin) {
        let mut headers = HeaderMap::new();
        headers.insert(SET_COOKIE, gate::auth_cookie());
        (StatusCode::OK, headers, "OK").into_response()
    } else {
        debug!("PIN mismatch");
        (StatusCode::UNAUTHORIZED, "Invalid PIN").into_response()
    }
}
