//! Have I Been Pwned API client library.
//!
//! A Rust library for the HIBP v3 REST API. Requests are built by a
//! [`Factory`], which can answer them from registered fakes instead of the
//! network, and results are wrapped in read-only [`Breach`] and
//! [`Breaches`] containers.
//!
//! # Quick Start
//!
//! ```no_run
//! use pwnedapi::{PwnedApi, PwnedClient};
//!
//! #[tokio::main]
//! async fn main() -> pwnedapi::Result<()> {
//!     // Create client from environment variables
//!     let client = PwnedClient::from_env()?;
//!
//!     // Breaches an account appears in
//!     let breaches = client.breached_account("test@example.com").await?;
//!     println!("Found {} breaches", breaches.len());
//!
//!     // A single breach, with snake_case field access
//!     let adobe = client.breach("Adobe").await?;
//!     println!("Adobe: {:?} accounts", adobe.get("pwn_count"));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing without the network
//!
//! ```
//! use pwnedapi::{Factory, FakeRegistry, PwnedApi};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> pwnedapi::Result<()> {
//! let client = Factory::new()
//!     .with_fakes(FakeRegistry::new().with_fake("/latestbreach", json!({"Name": "Adobe"})))
//!     .make();
//!
//! assert_eq!(client.latest_breach().await?.name(), Some("Adobe"));
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`Factory::from_env`] reads configuration from environment variables:
//!
//! - `HIBP_API_KEY` (optional) - Your HIBP API key
//! - `HIBP_API_URL` (optional) - Base URL (defaults to `https://haveibeenpwned.com/api/v3`)
//! - `HIBP_USER_AGENT` (optional) - User agent sent with every request
//! - `HIBP_TIMEOUT` (optional) - Request timeout in seconds

mod client;
mod error;
pub mod facade;
mod factory;
mod fakes;
mod models;
mod response;
pub mod support;
mod traits;
mod transport;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::PwnedClient;
pub use error::{PwnedError, Result};
pub use factory::{
    Factory, DEFAULT_BASE_URI, DEFAULT_USER_AGENT, HEADER_AUTH_NAME, HEADER_USER_AGENT,
};
pub use response::Response;

// Re-export traits
pub use traits::PwnedApi;

// Re-export models
pub use models::{Breach, Breaches};

// Fakes and transport seams
pub use fakes::{global as global_fakes, FakeRegistry, WILDCARD};
pub use transport::{
    Handler, Middleware, Next, Request, RequestOptions, ReqwestHandler, TransportError,
};
