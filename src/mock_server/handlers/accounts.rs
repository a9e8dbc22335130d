//! Account search handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::mock_server::state::SharedState;

/// Query parameters for searching an account.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreachedAccountQuery {
    /// Return only breach names. Defaults to `true`, as on the live API.
    pub truncate_response: Option<bool>,
    pub domain: Option<String>,
}

/// GET /breachedaccount/{account}
///
/// Unknown accounts get a 404 with an empty body.
pub async fn breached_account(
    State(state): State<SharedState>,
    Path(account): Path<String>,
    Query(query): Query<BreachedAccountQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let Some(breaches) = state.breaches_for_account(&account, query.domain.as_deref()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let body: Vec<Value> = if query.truncate_response.unwrap_or(true) {
        breaches
            .into_iter()
            .map(|b| json!({ "Name": b.name() }))
            .collect()
    } else {
        breaches
            .into_iter()
            .map(|b| Value::Object(b.as_map().clone()))
            .collect()
    };

    (StatusCode::OK, Json(body)).into_response()
}

/// GET /pasteaccount/{account}
pub async fn paste_account(
    State(state): State<SharedState>,
    Path(account): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.pastes_for_account(&account) {
        Some(pastes) => (StatusCode::OK, Json(pastes.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
