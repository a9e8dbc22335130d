//! HTTP request handlers for the mock server.

pub mod accounts;
pub mod breaches;
pub mod domains;
pub mod passwords;

pub use accounts::*;
pub use breaches::*;
pub use domains::*;
pub use passwords::*;
