//! Environment configuration.
//!
//! Environment variables are process-wide, so every case runs inside one
//! sequential test in its own test binary.

use std::env;
use std::time::Duration;

use pwnedapi::{Factory, PwnedClient, PwnedError, DEFAULT_BASE_URI, HEADER_AUTH_NAME};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VARS: [&str; 4] = ["HIBP_API_KEY", "HIBP_API_URL", "HIBP_USER_AGENT", "HIBP_TIMEOUT"];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[tokio::test]
async fn test_from_env() {
    clear_env();

    // Defaults
    let factory = Factory::from_env().expect("Empty environment is valid");
    assert_eq!(factory.base_uri(), DEFAULT_BASE_URI);
    assert!(!factory.has_api_key());

    // Invalid timeouts
    for raw in ["soon", "-1.5"] {
        env::set_var("HIBP_TIMEOUT", raw);
        let err = Factory::from_env().unwrap_err();
        assert!(matches!(err, PwnedError::ConfigMissing(_)), "{raw}");
    }
    env::remove_var("HIBP_TIMEOUT");

    // Relative base URI
    env::set_var("HIBP_API_URL", "not a url");
    let err = PwnedClient::from_env().unwrap_err();
    assert!(matches!(err, PwnedError::UrlError(_)));

    // Full configuration against a real server
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breaches"))
        .and(header(HEADER_AUTH_NAME, "env-key"))
        .and(header("User-Agent", "env-agent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latestbreach"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Name": "Adobe"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    env::set_var("HIBP_API_KEY", "env-key");
    env::set_var("HIBP_API_URL", server.uri());
    env::set_var("HIBP_USER_AGENT", "env-agent/1.0");
    env::set_var("HIBP_TIMEOUT", "0.25");

    let factory = Factory::from_env().expect("Failed to read environment");
    assert_eq!(factory.base_uri(), server.uri());
    assert!(factory.has_api_key());
    assert_eq!(factory.user_agent(), "env-agent/1.0");

    assert!(factory.get("/breaches").await.successful());

    // The fractional timeout is enforced by the HTTP client
    let slow = factory.get("/latestbreach").await;
    assert_eq!(slow.status(), 500);

    clear_env();
}
