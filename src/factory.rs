//! Request factory.
//!
//! Holds connection configuration and turns a path into a [`Response`].
//! Endpoint-specific behaviour lives in [`crate::PwnedClient`].

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::Method;
use url::Url;

use crate::client::PwnedClient;
use crate::error::{PwnedError, Result};
use crate::fakes::{self, FakeRegistry};
use crate::response::Response;
use crate::support::{has_scheme, join_uri};
use crate::transport::{
    Handler, Middleware, Next, ReqwestHandler, Request, RequestOptions, TransportError,
};

/// Default API root.
pub const DEFAULT_BASE_URI: &str = "https://haveibeenpwned.com/api/v3";
/// Default `User-Agent` value.
pub const DEFAULT_USER_AGENT: &str = concat!("pwnedapi/", env!("CARGO_PKG_VERSION"));
/// Header carrying the API key.
pub const HEADER_AUTH_NAME: &str = "hibp-api-key";
/// Header carrying the user agent.
pub const HEADER_USER_AGENT: &str = "User-Agent";

/// Builds and sends requests to the HIBP API.
///
/// Configuration methods consume the factory and return it, so a factory
/// is fully configured before it is shared. Cloning is cheap.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use pwnedapi::Factory;
///
/// # async fn example() {
/// let factory = Factory::new()
///     .with_api_key("your-api-key")
///     .with_timeout(Duration::from_secs(10));
///
/// let response = factory.get("/breaches").await;
/// println!("{} {}", response.status(), response.body());
/// # }
/// ```
#[derive(Clone)]
pub struct Factory {
    http: reqwest::Client,
    base_uri: String,
    api_key: Option<String>,
    user_agent: String,
    headers: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
    options: RequestOptions,
    middleware: Vec<Arc<dyn Middleware>>,
    handler: Option<Arc<dyn Handler>>,
    fakes: Option<Arc<FakeRegistry>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("base_uri", &self.base_uri)
            .field("user_agent", &self.user_agent)
            .field("middleware", &self.middleware.len())
            .field("custom_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl Factory {
    /// A factory with default settings and no API key.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_uri: DEFAULT_BASE_URI.to_string(),
            api_key: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            options: RequestOptions::default(),
            middleware: Vec::new(),
            handler: None,
            fakes: None,
        }
    }

    /// Create a factory from environment variables.
    ///
    /// - `HIBP_API_KEY`: API key (optional)
    /// - `HIBP_API_URL`: base URI (defaults to [`DEFAULT_BASE_URI`])
    /// - `HIBP_USER_AGENT`: user agent (defaults to [`DEFAULT_USER_AGENT`])
    /// - `HIBP_TIMEOUT`: request timeout in seconds, fractions allowed
    ///
    /// # Errors
    ///
    /// Returns an error if `HIBP_API_URL` is not an absolute URL, if
    /// `HIBP_TIMEOUT` is not a non-negative number of seconds, or if the
    /// HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        let mut factory = Self::new();
        let mut builder = reqwest::Client::builder();

        if let Ok(key) = env::var("HIBP_API_KEY") {
            factory = factory.with_api_key(key);
        }
        if let Ok(uri) = env::var("HIBP_API_URL") {
            Url::parse(&uri)?;
            factory = factory.with_base_uri(uri);
        }
        if let Ok(agent) = env::var("HIBP_USER_AGENT") {
            factory = factory.with_user_agent(agent);
        }
        if let Ok(raw) = env::var("HIBP_TIMEOUT") {
            builder = builder.timeout(parse_timeout(&raw)?);
        }

        Ok(factory.with_http_client(builder.build()?))
    }

    /// Add request headers. Names are case-insensitive; later values win.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.extend(
            headers
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into())),
        );
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URI that relative paths are joined to.
    #[must_use]
    pub fn with_base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = uri.into();
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Merge transport options; later values win.
    ///
    /// Only `timeout` is applied by the default handler. Keys in `extra`
    /// reach custom handlers and middleware and are otherwise ignored.
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options.merge(options);
        self
    }

    /// Add default query parameters; later values win.
    #[must_use]
    pub fn with_query_parameters<I, K, V>(mut self, query: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(query.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the total request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Append a middleware. The first one added is the outermost.
    #[must_use]
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Replace the default handler.
    #[must_use]
    pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Swap the `reqwest::Client` used by the default handler.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Consult `fakes` before the global registry and the network.
    #[must_use]
    pub fn with_fakes(mut self, fakes: FakeRegistry) -> Self {
        self.fakes = Some(Arc::new(fakes));
        self
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Configured extra headers, keyed by lowercase name.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Configured default query parameters.
    pub fn query(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Build the API client bound to this factory.
    pub fn make(self) -> PwnedClient {
        PwnedClient::new(self)
    }

    /// Register a fake in the process-wide registry.
    ///
    /// See [`crate::global_fakes`] for the caveats.
    pub fn fake(pattern: impl Into<String>, response: impl Into<Response>) {
        fakes::global::fake(pattern, response);
    }

    /// Empty the process-wide fake registry.
    pub fn clear_fakes() {
        fakes::global::clear();
    }

    /// Make a GET request.
    ///
    /// Never fails: transport errors come back as a failed [`Response`].
    pub async fn get(&self, path: &str) -> Response {
        self.get_with_query(path, &[]).await
    }

    /// Make a GET request with extra query parameters.
    ///
    /// `query` is merged over the configured defaults.
    #[tracing::instrument(skip(self))]
    pub async fn get_with_query(&self, path: &str, query: &[(&str, &str)]) -> Response {
        if let Some(response) = self.find_fake(path) {
            tracing::debug!(status = response.status(), "serving fake response");
            return response;
        }

        let mut merged = self.query.clone();
        merged.extend(query.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        match self.send(Method::GET, path, merged).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "request failed, returning synthetic response");
                Response::new(err.status().unwrap_or(500), HeaderMap::new(), err.to_string())
            }
        }
    }

    fn find_fake(&self, path: &str) -> Option<Response> {
        self.fakes
            .as_ref()
            .and_then(|fakes| fakes.find(path).cloned())
            .or_else(|| fakes::global::find(path))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: BTreeMap<String, String>,
    ) -> core::result::Result<Response, TransportError> {
        let url = if has_scheme(path) {
            path.to_string()
        } else {
            join_uri([self.base_uri.as_str(), path])
        };

        let request = Request {
            method,
            url,
            headers: self.request_headers()?,
            query: query.into_iter().collect(),
            options: self.options.clone(),
        };
        tracing::debug!(url = %request.url, "sending request");

        let fallback = ReqwestHandler::new(self.http.clone());
        let handler: &dyn Handler = match &self.handler {
            Some(handler) => handler.as_ref(),
            None => &fallback,
        };

        Next::new(handler, &self.middleware).run(request).await
    }

    /// Mandatory headers first, then configured headers over them.
    fn request_headers(&self) -> core::result::Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &self.api_key {
            headers.insert(HEADER_AUTH_NAME, header_value(HEADER_AUTH_NAME, key)?);
        }
        headers.insert(USER_AGENT, header_value(HEADER_USER_AGENT, &self.user_agent)?);

        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            headers.insert(header_name, header_value(name, value)?);
        }

        Ok(headers)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| {
            PwnedError::ConfigMissing(format!(
                "HIBP_TIMEOUT must be a number of seconds, got '{raw}'"
            ))
        })
}

fn header_value(name: &str, value: &str) -> core::result::Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value).map_err(|_| TransportError::InvalidHeader(name.to_string()))
}
