//! Mock HIBP API server for E2E testing.
//!
//! An in-memory server that simulates the HIBP v3 API. Unlike wiremock,
//! which mocks single requests per test, this server keeps state across
//! requests, so whole workflows can be tested against a real socket.
//!
//! # Example
//!
//! ```ignore
//! use pwnedapi::mock_server::MockServer;
//! use pwnedapi::{Factory, PwnedApi};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = Factory::new().with_base_uri(server.url()).make();
//!
//!     // Server comes with default fixtures
//!     let breaches = client.breached_account("test@example.com").await.unwrap();
//!     assert_eq!(breaches.get(0).name(), Some("Adobe"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, PASSWORD_SHA1};
pub use server::MockServer;
pub use state::{MockState, SharedState};
