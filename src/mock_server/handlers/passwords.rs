//! Pwned Passwords range handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::mock_server::state::SharedState;

/// GET /range/{prefix}
///
/// Serves the matching suffixes as a JSON object of `suffix -> count`.
pub async fn password_range(
    State(state): State<SharedState>,
    Path(prefix): Path<String>,
) -> impl IntoResponse {
    if prefix.len() != 5 || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        return (
            StatusCode::BAD_REQUEST,
            "The hash prefix was not in a valid format",
        )
            .into_response();
    }

    let state = state.read().await;
    (StatusCode::OK, Json(state.password_range(&prefix))).into_response()
}
