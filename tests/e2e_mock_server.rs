//! E2E tests using the mock HIBP server.
//!
//! These tests exercise full workflows against the mock server over a real
//! socket, rather than individual endpoints.

#![cfg(feature = "test-server")]

use pwnedapi::mock_server::{Fixtures, MockServer, MockState};
use pwnedapi::{Factory, PwnedApi, PwnedClient, HEADER_AUTH_NAME};
use serde_json::json;

fn client(server: &MockServer) -> PwnedClient {
    Factory::new()
        .with_api_key("test-key")
        .with_base_uri(server.url())
        .make()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let factory = Factory::new().with_base_uri(server.url());

    server.shutdown().await;

    // After shutdown the client gets a synthetic failure
    let response = factory.get("/health").await;
    assert_eq!(response.status(), 500);
}

// =============================================================================
// Account Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_account_to_breach_details_workflow() {
    let server = MockServer::start().await;
    let client = client(&server);

    // Step 1: truncated list of breach names
    let breaches = client
        .breached_account("test@example.com")
        .await
        .expect("Failed to get breaches");
    assert_eq!(breaches.len(), 2);
    assert_eq!(breaches.get(0).len(), 1);

    // Step 2: full record for each name
    for summary in &breaches {
        let name = summary.name().expect("Truncated record has a name");
        let breach = client.breach(name).await.expect("Failed to get breach");
        assert_eq!(breach.name(), Some(name));
        assert!(breach.pwn_count().is_some());
        assert!(breach.breach_date().is_some());
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_full_records_with_query_parameters() {
    let server = MockServer::start().await;
    let client = Factory::new()
        .with_base_uri(server.url())
        .with_query_parameters([("truncateResponse", "false")])
        .make();

    let breaches = client.breached_account("TEST@example.com").await.unwrap();
    assert_eq!(breaches.get(1).name(), Some("Dropbox"));
    assert_eq!(breaches.get(1).get("is_verified"), Some(&json!(true)));

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_account_is_empty() {
    let server = MockServer::start().await;

    let breaches = client(&server)
        .breached_account("nobody@example.com")
        .await
        .unwrap();
    assert!(breaches.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_paste_account() {
    let server = MockServer::start().await;

    let pastes = client(&server).paste_account("test@example.com").await.unwrap();
    assert_eq!(pastes[0]["Source"], "Pastebin");
    assert_eq!(pastes[0]["EmailCount"], 139);

    server.shutdown().await;
}

// =============================================================================
// Catalogue Tests
// =============================================================================

#[tokio::test]
async fn test_catalogue_endpoints() {
    let server = MockServer::start().await;
    let client = client(&server);

    let breaches = client.breaches().await.unwrap();
    assert_eq!(breaches.len(), 3);

    let latest = client.latest_breach().await.unwrap();
    assert_eq!(latest.name(), Some("Dropbox"));

    let classes = client.data_classes().await.unwrap();
    assert!(classes.as_array().unwrap().contains(&json!("Passwords")));

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_breach_is_empty_record() {
    let server = MockServer::start().await;

    let breach = client(&server).breach("NoSuchBreach").await.unwrap();
    assert!(breach.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_domain_endpoints() {
    let server = MockServer::start().await;
    let client = client(&server);

    let domain = client.breached_domain("example.com").await.unwrap();
    assert_eq!(domain, json!({"test": ["Adobe", "Dropbox"]}));

    let subscribed = client.subscribed_domains().await.unwrap();
    assert_eq!(subscribed[0]["DomainName"], "example.com");

    let status = client.subscription_status().await.unwrap();
    assert_eq!(status["SubscriptionName"], "Pwned 1");

    server.shutdown().await;
}

#[tokio::test]
async fn test_password_range() {
    let server = MockServer::start().await;

    let range = client(&server).range("5BAA6").await.unwrap();
    assert_eq!(range["1E4C9B93F3F0682250B6CF8331B7EE68FD8"], 10_434_004);

    server.shutdown().await;
}

// =============================================================================
// Authentication Tests
// =============================================================================

#[tokio::test]
async fn test_api_key_is_enforced() {
    let state = MockServer::default_state().with_required_api_key("test-key");
    let server = MockServer::with_state(state).await;

    // Wrong key
    let denied = Factory::new()
        .with_api_key("wrong-key")
        .with_base_uri(server.url());
    let response = denied.get("/subscription/status").await;
    assert_eq!(response.status(), 401);
    assert!(response.failed());
    assert_eq!(response.json().unwrap()["statusCode"], 401);

    // Public routes stay open without a key
    let anonymous = Factory::new().with_base_uri(server.url()).make();
    assert_eq!(anonymous.breaches().await.unwrap().len(), 3);
    assert!(!anonymous.range("5BAA6").await.unwrap().as_object().unwrap().is_empty());

    // Right key
    let response = client(&server).factory().get("/subscription/status").await;
    assert!(response.successful());

    server.shutdown().await;
}

#[tokio::test]
async fn test_configured_header_overrides_api_key() {
    let state = MockState::new()
        .with_breach(Fixtures::adobe())
        .with_account("a@example.com", &["Adobe"])
        .with_required_api_key("header-key");
    let server = MockServer::with_state(state).await;

    let client = Factory::new()
        .with_api_key("stale-key")
        .with_headers([(HEADER_AUTH_NAME, "header-key")])
        .with_base_uri(server.url())
        .make();

    let breaches = client.breached_account("a@example.com").await.unwrap();
    assert_eq!(breaches.get(0).name(), Some("Adobe"));

    server.shutdown().await;
}

// =============================================================================
// State Tests
// =============================================================================

#[tokio::test]
async fn test_state_updates_are_served() {
    let server = MockServer::start_empty().await;
    let client = client(&server);

    assert!(client.breached_account("new@example.com").await.unwrap().is_empty());

    {
        let state = server.state();
        let mut state = state.write().await;
        state.breaches.push(Fixtures::linkedin());
        state
            .accounts
            .insert("new@example.com".to_string(), vec!["LinkedIn".to_string()]);
    }

    let breaches = client.breached_account("new@example.com").await.unwrap();
    assert_eq!(breaches.get(0).name(), Some("LinkedIn"));

    server.shutdown().await;
}
