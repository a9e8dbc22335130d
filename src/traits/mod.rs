//! Trait definitions for HIBP operations.
//!
//! [`PwnedApi`] is the full endpoint surface. [`crate::PwnedClient`] is the
//! HTTP implementation; tests can provide their own.

mod api;

pub use api::PwnedApi;
