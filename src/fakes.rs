//! Fake responses for tests.
//!
//! A [`FakeRegistry`] maps path patterns to canned [`Response`]s. A pattern
//! matches when it is [`WILDCARD`] or a substring of the requested path; the
//! first matching pattern, in registration order, wins.
//!
//! Prefer building a registry and injecting it with
//! [`crate::Factory::with_fakes`]. The [`global`] registry exists for
//! top-level test setup only: it is shared by the whole process, so tests
//! that run in parallel threads will see each other's fakes.

use crate::response::Response;

/// Pattern that matches every path.
pub const WILDCARD: &str = "*";

/// Ordered pattern -> response table.
#[derive(Debug, Clone, Default)]
pub struct FakeRegistry {
    entries: Vec<(String, Response)>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fake. Re-registering a pattern replaces its response but
    /// keeps its position.
    pub fn fake(&mut self, pattern: impl Into<String>, response: impl Into<Response>) {
        let pattern = pattern.into();
        let response = response.into();

        match self.entries.iter_mut().find(|(p, _)| *p == pattern) {
            Some(entry) => entry.1 = response,
            None => self.entries.push((pattern, response)),
        }
    }

    /// Builder form of [`FakeRegistry::fake`].
    #[must_use]
    pub fn with_fake(mut self, pattern: impl Into<String>, response: impl Into<Response>) -> Self {
        self.fake(pattern, response);
        self
    }

    /// Remove every fake.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The response registered for the first pattern matching `path`.
    pub fn find(&self, path: &str) -> Option<&Response> {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern == WILDCARD || path.contains(pattern.as_str()))
            .map(|(_, response)| response)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide registry consulted by every [`crate::Factory`].
///
/// Not meant for concurrent use: register fakes from a single test thread.
pub mod global {
    use std::sync::{OnceLock, PoisonError, RwLock};

    use super::FakeRegistry;
    use crate::response::Response;

    fn registry() -> &'static RwLock<FakeRegistry> {
        static REGISTRY: OnceLock<RwLock<FakeRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| RwLock::new(FakeRegistry::new()))
    }

    /// Register a fake in the global registry.
    pub fn fake(pattern: impl Into<String>, response: impl Into<Response>) {
        registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fake(pattern, response);
    }

    /// Empty the global registry.
    pub fn clear() {
        registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Look up `path` in the global registry.
    pub fn find(path: &str) -> Option<Response> {
        registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .find(path)
            .cloned()
    }
}
