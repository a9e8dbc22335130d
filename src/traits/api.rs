//! The HIBP v3 endpoint contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::{Breach, Breaches};

/// Every endpoint of the Have I Been Pwned v3 API.
///
/// Identifiers are inserted into paths verbatim; callers pass URL-safe
/// values. Endpoints without a typed model return the decoded JSON as is.
///
/// # Example
///
/// ```no_run
/// use pwnedapi::{PwnedApi, PwnedClient};
///
/// # async fn example() -> pwnedapi::Result<()> {
/// let client = PwnedClient::from_env()?;
/// let breaches = client.breached_account("test@example.com").await?;
/// for breach in &breaches {
///     println!("{}", breach.name().unwrap_or("?"));
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PwnedApi: Send + Sync {
    /// `GET /breachedaccount/{account}`: breaches for an email, username
    /// or phone number. A 404 means "no breaches" and yields an empty
    /// collection.
    async fn breached_account(&self, account: &str) -> Result<Breaches>;

    /// `GET /breacheddomain/{domain}`: breached aliases of a verified
    /// domain.
    async fn breached_domain(&self, domain: &str) -> Result<Value>;

    /// `GET /subscribeddomains`: domains verified under the API key.
    async fn subscribed_domains(&self) -> Result<Value>;

    /// `GET /breaches`: every breach in the system.
    async fn breaches(&self) -> Result<Breaches>;

    /// `GET /breach/{name}`: a single breach by name.
    async fn breach(&self, name: &str) -> Result<Breach>;

    /// `GET /latestbreach`: the most recently added breach.
    async fn latest_breach(&self) -> Result<Breach>;

    /// `GET /dataclasses`: every data class in the system.
    async fn data_classes(&self) -> Result<Value>;

    /// `GET /pasteaccount/{account}`: pastes containing an email address.
    async fn paste_account(&self, account: &str) -> Result<Value>;

    /// `GET /subscription/status`: the API key's subscription.
    async fn subscription_status(&self) -> Result<Value>;

    /// `GET /range/{hash_prefix}`: k-anonymity password lookup by the
    /// first five characters of a SHA-1 hash. The service does not need an
    /// API key for this one.
    async fn range(&self, hash_prefix: &str) -> Result<Value>;
}
