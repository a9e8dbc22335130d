//! Breach catalogue handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::mock_server::state::SharedState;

/// Query parameters for listing breaches.
#[derive(Debug, Default, Deserialize)]
pub struct ListBreachesQuery {
    pub domain: Option<String>,
}

/// GET /breaches
pub async fn list_breaches(
    State(state): State<SharedState>,
    Query(query): Query<ListBreachesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let breaches: Vec<_> = state
        .list_breaches(query.domain.as_deref())
        .into_iter()
        .cloned()
        .collect();

    Json(breaches)
}

/// GET /breach/{name}
pub async fn get_breach(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_breach(&name) {
        Some(breach) => (StatusCode::OK, Json(breach.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /latestbreach
pub async fn latest_breach(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    match state.latest_breach() {
        Some(breach) => (StatusCode::OK, Json(breach.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// GET /dataclasses
pub async fn list_data_classes(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(state.data_classes.clone())
}
