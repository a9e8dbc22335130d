//! Mock server state management.
//!
//! Provides the in-memory data store for the mock HIBP API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::Breach;

/// State shared between the server and its handlers.
pub type SharedState = Arc<RwLock<MockState>>;

/// Shared state for the mock server.
///
/// Holds all the mock data that the server will serve. Account and domain
/// keys are stored lowercase, since HIBP matches them case-insensitively.
#[derive(Debug, Default)]
pub struct MockState {
    /// Breach catalogue, in the order it was added.
    pub breaches: Vec<Breach>,

    /// Breach names per account.
    pub accounts: HashMap<String, Vec<String>>,

    /// Paste records per account.
    pub pastes: HashMap<String, Vec<Value>>,

    /// Breached aliases per domain: alias -> breach names.
    pub domains: HashMap<String, BTreeMap<String, Vec<String>>>,

    /// Domains verified by the subscriber.
    pub subscribed_domains: Vec<Value>,

    /// Every data class known to the service.
    pub data_classes: Vec<String>,

    /// Subscription details for the API key.
    pub subscription: Option<Value>,

    /// Pwned password suffix counts per 5-character hash prefix.
    pub password_ranges: HashMap<String, BTreeMap<String, u64>>,

    /// Optional API key. If set, key-protected routes require it.
    pub required_api_key: Option<String>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Add a breach to the catalogue.
    pub fn with_breach(mut self, breach: Breach) -> Self {
        self.breaches.push(breach);
        self
    }

    /// Record `account` as appearing in the named breaches.
    pub fn with_account(mut self, account: &str, breach_names: &[&str]) -> Self {
        self.accounts
            .entry(account.to_lowercase())
            .or_default()
            .extend(breach_names.iter().map(|name| name.to_string()));
        self
    }

    /// Add a paste for an account.
    pub fn with_paste(mut self, account: &str, paste: Value) -> Self {
        self.pastes
            .entry(account.to_lowercase())
            .or_default()
            .push(paste);
        self
    }

    /// Record an alias of `domain` as appearing in the named breaches.
    pub fn with_domain_alias(mut self, domain: &str, alias: &str, breach_names: &[&str]) -> Self {
        self.domains
            .entry(domain.to_lowercase())
            .or_default()
            .insert(
                alias.to_string(),
                breach_names.iter().map(|name| name.to_string()).collect(),
            );
        self
    }

    /// Add a verified domain.
    pub fn with_subscribed_domain(mut self, domain: Value) -> Self {
        self.subscribed_domains.push(domain);
        self
    }

    /// Replace the data class list.
    pub fn with_data_classes(mut self, classes: Vec<String>) -> Self {
        self.data_classes = classes;
        self
    }

    /// Set the subscription details.
    pub fn with_subscription(mut self, subscription: Value) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Add a pwned password by its full SHA-1 hex digest.
    ///
    /// Digests shorter than a prefix are ignored.
    pub fn with_password_hash(mut self, sha1: &str, count: u64) -> Self {
        let sha1 = sha1.to_uppercase();
        if let (Some(prefix), Some(suffix)) = (sha1.get(..5), sha1.get(5..)) {
            self.password_ranges
                .entry(prefix.to_string())
                .or_default()
                .insert(suffix.to_string(), count);
        }
        self
    }

    /// Require an API key on protected routes.
    pub fn with_required_api_key(mut self, key: &str) -> Self {
        self.required_api_key = Some(key.to_string());
        self
    }

    /// Get a breach by name, ignoring case.
    pub fn get_breach(&self, name: &str) -> Option<&Breach> {
        self.breaches
            .iter()
            .find(|b| b.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// List breaches, optionally only those for a domain.
    pub fn list_breaches(&self, domain_filter: Option<&str>) -> Vec<&Breach> {
        self.breaches
            .iter()
            .filter(|b| match domain_filter {
                Some(domain) => b.domain().is_some_and(|d| d.eq_ignore_ascii_case(domain)),
                None => true,
            })
            .collect()
    }

    /// The most recently added breach.
    pub fn latest_breach(&self) -> Option<&Breach> {
        self.breaches.iter().max_by_key(|b| b.added_date())
    }

    /// Breaches an account appears in, optionally only those for a domain.
    ///
    /// Returns `None` for unknown accounts and when nothing matches.
    pub fn breaches_for_account(
        &self,
        account: &str,
        domain_filter: Option<&str>,
    ) -> Option<Vec<&Breach>> {
        let names = self.accounts.get(&account.to_lowercase())?;

        let found: Vec<&Breach> = names
            .iter()
            .filter_map(|name| self.get_breach(name))
            .filter(|b| match domain_filter {
                Some(domain) => b.domain().is_some_and(|d| d.eq_ignore_ascii_case(domain)),
                None => true,
            })
            .collect();

        (!found.is_empty()).then_some(found)
    }

    /// Pastes for an account, if any.
    pub fn pastes_for_account(&self, account: &str) -> Option<&Vec<Value>> {
        self.pastes
            .get(&account.to_lowercase())
            .filter(|pastes| !pastes.is_empty())
    }

    /// Breached aliases for a domain, if any.
    pub fn breached_domain(&self, domain: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.domains
            .get(&domain.to_lowercase())
            .filter(|aliases| !aliases.is_empty())
    }

    /// Suffix counts for a hash prefix; empty when nothing is known.
    pub fn password_range(&self, prefix: &str) -> BTreeMap<String, u64> {
        self.password_ranges
            .get(&prefix.to_uppercase())
            .cloned()
            .unwrap_or_default()
    }
}
