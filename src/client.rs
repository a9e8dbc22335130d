//! HIBP API client.
//!
//! Maps each endpoint to a path on the [`Factory`] and wraps the decoded
//! JSON into the matching model.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::factory::Factory;
use crate::models::{Breach, Breaches};
use crate::traits::PwnedApi;

/// High-level HIBP client.
///
/// All endpoint methods come from the [`PwnedApi`] trait. Requests go
/// through the bound [`Factory`], so fakes, middleware and handlers
/// configured there apply here too.
///
/// # Example
///
/// ```no_run
/// use pwnedapi::{Factory, PwnedApi, PwnedClient};
///
/// # async fn example() -> pwnedapi::Result<()> {
/// let client = PwnedClient::new(Factory::new().with_api_key("your-api-key"));
/// let latest = client.latest_breach().await?;
/// println!("Latest breach: {:?}", latest.name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PwnedClient {
    factory: Factory,
}

impl PwnedClient {
    pub fn new(factory: Factory) -> Self {
        Self { factory }
    }

    /// Create a client configured from environment variables.
    ///
    /// See [`Factory::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds invalid settings.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Factory::from_env()?))
    }

    /// Replace the factory.
    #[must_use]
    pub fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = factory;
        self
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    async fn fetch_json(&self, path: &str) -> Result<Value> {
        self.factory.get(path).await.json()
    }
}

#[async_trait]
impl PwnedApi for PwnedClient {
    #[tracing::instrument(skip(self))]
    async fn breached_account(&self, account: &str) -> Result<Breaches> {
        let response = self
            .factory
            .get(&format!("/breachedaccount/{account}"))
            .await;

        if response.status() == 404 {
            tracing::debug!("no breaches for account");
            return Ok(Breaches::empty());
        }

        Breaches::try_from(response.json()?)
    }

    #[tracing::instrument(skip(self))]
    async fn breached_domain(&self, domain: &str) -> Result<Value> {
        self.fetch_json(&format!("/breacheddomain/{domain}")).await
    }

    #[tracing::instrument(skip(self))]
    async fn subscribed_domains(&self) -> Result<Value> {
        self.fetch_json("/subscribeddomains").await
    }

    #[tracing::instrument(skip(self))]
    async fn breaches(&self) -> Result<Breaches> {
        Breaches::try_from(self.fetch_json("/breaches").await?)
    }

    #[tracing::instrument(skip(self))]
    async fn breach(&self, name: &str) -> Result<Breach> {
        Breach::try_from(self.fetch_json(&format!("/breach/{name}")).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn latest_breach(&self) -> Result<Breach> {
        Breach::try_from(self.fetch_json("/latestbreach").await?)
    }

    #[tracing::instrument(skip(self))]
    async fn data_classes(&self) -> Result<Value> {
        self.fetch_json("/dataclasses").await
    }

    #[tracing::instrument(skip(self))]
    async fn paste_account(&self, account: &str) -> Result<Value> {
        self.fetch_json(&format!("/pasteaccount/{account}")).await
    }

    #[tracing::instrument(skip(self))]
    async fn subscription_status(&self) -> Result<Value> {
        self.fetch_json("/subscription/status").await
    }

    #[tracing::instrument(skip(self))]
    async fn range(&self, hash_prefix: &str) -> Result<Value> {
        self.fetch_json(&format!("/range/{hash_prefix}")).await
    }
}
