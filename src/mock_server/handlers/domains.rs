//! Domain and subscription handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::mock_server::state::SharedState;

/// GET /breacheddomain/{domain}
pub async fn breached_domain(
    State(state): State<SharedState>,
    Path(domain): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.breached_domain(&domain) {
        Some(aliases) => (StatusCode::OK, Json(aliases.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /subscribeddomains
pub async fn subscribed_domains(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(state.subscribed_domains.clone())
}

/// GET /subscription/status
pub async fn subscription_status(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    match &state.subscription {
        Some(subscription) => (StatusCode::OK, Json(subscription.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
