//! Mock HIBP API server.
//!
//! Provides an axum-based HTTP server that simulates the HIBP v3 API.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::{MockState, SharedState};
use crate::factory::HEADER_AUTH_NAME;

/// A mock HIBP API server for testing.
///
/// The server runs in the background; point a [`Factory`](crate::Factory)
/// at [`MockServer::url`] to exercise the client against it.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// State built from the default fixtures.
    pub fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new()
            .with_data_classes(scenario.data_classes)
            .with_subscription(scenario.subscription);

        for breach in scenario.breaches {
            state = state.with_breach(breach);
        }

        for (account, names) in scenario.accounts {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            state = state.with_account(&account, &names);
        }

        for (account, paste) in scenario.pastes {
            state = state.with_paste(&account, paste);
        }

        for (domain, alias, names) in scenario.domain_aliases {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            state = state.with_domain_alias(&domain, &alias, &names);
        }

        for domain in scenario.subscribed_domains {
            state = state.with_subscribed_domain(domain);
        }

        for (hash, count) in scenario.passwords {
            state = state.with_password_hash(&hash, count);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: SharedState) -> Router {
        // Routes that need a subscription key on the live API
        let protected = Router::new()
            .route("/breachedaccount/:account", get(handlers::breached_account))
            .route("/breacheddomain/:domain", get(handlers::breached_domain))
            .route("/subscribeddomains", get(handlers::subscribed_domains))
            .route("/subscription/status", get(handlers::subscription_status))
            .route("/pasteaccount/:account", get(handlers::paste_account))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_api_key,
            ));

        Router::new()
            .merge(protected)
            .route("/breaches", get(handlers::list_breaches))
            .route("/breach/:name", get(handlers::get_breach))
            .route("/latestbreach", get(handlers::latest_breach))
            .route("/dataclasses", get(handlers::list_data_classes))
            .route("/range/:prefix", get(handlers::password_range))
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests without the configured API key.
async fn require_api_key(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_api_key.clone();

    if let Some(required) = required {
        let provided = request
            .headers()
            .get(HEADER_AUTH_NAME)
            .and_then(|v| v.to_str().ok());

        if provided != Some(required.as_str()) {
            tracing::debug!("rejecting request without a valid api key");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "statusCode": 401,
                    "message": "Access denied due to missing or invalid hibp-api-key."
                })),
            )
                .into_response();
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Factory, PwnedApi};
    use axum::body::{to_bytes, Body};
    use axum::http;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(router: Router, request: http::Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get_request(uri: &str) -> http::Request<Body> {
        http::Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn router(state: MockState) -> Router {
        MockServer::create_router(state.shared())
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let response = reqwest::Client::new()
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_breached_account_truncates_by_default() {
        let (status, body) = call(
            router(MockServer::default_state()),
            get_request("/breachedaccount/test@example.com"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, json!([{"Name": "Adobe"}, {"Name": "Dropbox"}]));
    }

    #[tokio::test]
    async fn test_breached_account_full_records() {
        let (status, body) = call(
            router(MockServer::default_state()),
            get_request("/breachedaccount/test@example.com?truncateResponse=false&domain=adobe.com"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["PwnCount"], 152_445_165);
    }

    #[tokio::test]
    async fn test_unknown_account_is_empty_404() {
        let (status, body) = call(
            router(MockServer::default_state()),
            get_request("/breachedaccount/nobody@example.com"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_protected_routes_require_api_key() {
        let state = MockServer::default_state().with_required_api_key("secret");
        let shared = state.shared();

        let (status, body) = call(
            MockServer::create_router(shared.clone()),
            get_request("/subscription/status"),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("hibp-api-key"));

        let request = http::Request::builder()
            .uri("/subscription/status")
            .header(HEADER_AUTH_NAME, "secret")
            .body(Body::empty())
            .unwrap();
        let (status, _) = call(MockServer::create_router(shared.clone()), request).await;
        assert_eq!(status, StatusCode::OK);

        // Public catalogue stays open
        let (status, _) = call(MockServer::create_router(shared), get_request("/breaches")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_range_rejects_bad_prefix() {
        let (status, _) = call(
            router(MockServer::default_state()),
            get_request("/range/XYZ"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            router(MockServer::default_state()),
            get_request("/range/5baa6"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["1E4C9B93F3F0682250B6CF8331B7EE68FD8"], 10_434_004);
    }

    #[tokio::test]
    async fn test_breach_lookup_ignores_case() {
        let (status, body) = call(
            router(MockServer::default_state()),
            get_request("/breach/dropbox"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"Name\":\"Dropbox\""));

        let (status, _) = call(
            router(MockServer::default_state()),
            get_request("/breach/Unknown"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_latest_breach_with_client() {
        let server = MockServer::start().await;
        let client = Factory::new().with_base_uri(server.url()).make();

        let latest = client.latest_breach().await.expect("Failed to get breach");
        assert_eq!(latest.name(), Some("Dropbox"));

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_state_changes_are_visible() {
        let server = MockServer::start_empty().await;
        let client = Factory::new().with_base_uri(server.url()).make();

        assert!(client.breaches().await.unwrap().is_empty());

        {
            let state = server.state();
            let mut state = state.write().await;
            state.breaches.push(Fixtures::linkedin());
        }

        let breaches = client.breaches().await.unwrap();
        assert_eq!(breaches.get(0).name(), Some("LinkedIn"));

        server.shutdown().await;
    }
}
