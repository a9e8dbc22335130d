//! Pluggable HTTP transport.
//!
//! A request travels through the configured [`Middleware`] chain, in
//! registration order, and ends at a [`Handler`]. The default handler is
//! [`ReqwestHandler`]; tests usually swap in a closure:
//!
//! ```
//! use pwnedapi::{Factory, Request, Response, TransportError};
//!
//! let factory = Factory::new().with_handler(|request: Request| {
//!     assert!(request.url.ends_with("/breaches"));
//!     Ok::<_, TransportError>(Response::text("[]"))
//! });
//! # let _ = factory;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::response::Response;

/// An outbound request, fully resolved by the factory.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    pub headers: HeaderMap,
    /// Query parameters, appended by the handler.
    pub query: Vec<(String, String)>,
    pub options: RequestOptions,
}

impl Request {
    /// Value of the named query parameter, if present.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Per-request transport options.
///
/// `timeout` is honoured by [`ReqwestHandler`]. `extra` is a free-form bag
/// passed through untouched for custom handlers and middleware; the
/// default handler ignores it. Configure the `reqwest::Client` itself
/// (see [`crate::Factory::with_http_client`]) for TLS, proxies and the like.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub extra: BTreeMap<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a free-form option.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Merge `other` into `self`; values set in `other` win.
    pub fn merge(&mut self, other: RequestOptions) {
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        self.extra.extend(other.extra);
    }
}

/// Failure below the HTTP layer: connection, DNS, TLS, timeout, bad URL.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    #[error("{message}")]
    Other {
        message: String,
        status: Option<u16>,
    },
}

impl TransportError {
    /// A failure with a message and no status code.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            status: None,
        }
    }

    /// A failure carrying an HTTP status code.
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self::Other {
            message: message.into(),
            status: Some(status),
        }
    }

    /// The status code associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Other { status, .. } => *status,
            Self::InvalidUrl { .. } | Self::InvalidHeader(_) => None,
        }
    }
}

/// Executes a request and produces a response.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, request: Request) -> Result<Response, TransportError>;
}

/// Plain closures are handlers.
#[async_trait]
impl<F> Handler for F
where
    F: Fn(Request) -> Result<Response, TransportError> + Send + Sync,
{
    async fn handle(&self, request: Request) -> Result<Response, TransportError> {
        self(request)
    }
}

/// Wraps request execution; call `next.run(request)` to continue the chain.
///
/// ```
/// use async_trait::async_trait;
/// use pwnedapi::{Middleware, Next, Request, Response, TransportError};
///
/// struct Tag;
///
/// #[async_trait]
/// impl Middleware for Tag {
///     async fn handle(
///         &self,
///         mut request: Request,
///         next: Next<'_>,
///     ) -> Result<Response, TransportError> {
///         request.query.push(("tag".into(), "1".into()));
///         next.run(request).await
///     }
/// }
/// ```
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, request: Request, next: Next<'_>)
        -> Result<Response, TransportError>;
}

/// The remainder of the middleware chain plus the final handler.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    handler: &'a dyn Handler,
    middleware: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(handler: &'a dyn Handler, middleware: &'a [Arc<dyn Middleware>]) -> Self {
        Self {
            handler,
            middleware,
        }
    }

    /// Pass the request to the next middleware, or to the handler.
    pub async fn run(self, request: Request) -> Result<Response, TransportError> {
        match self.middleware.split_first() {
            Some((current, rest)) => {
                current
                    .handle(request, Next::new(self.handler, rest))
                    .await
            }
            None => self.handler.handle(request).await,
        }
    }
}

/// Default handler backed by a `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHandler {
    client: reqwest::Client,
}

impl ReqwestHandler {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Handler for ReqwestHandler {
    async fn handle(&self, request: Request) -> Result<Response, TransportError> {
        let url = Url::parse(&request.url).map_err(|source| TransportError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;

        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(timeout) = request.options.timeout {
            builder = builder.timeout(timeout);
        }
        for key in request.options.extra.keys() {
            tracing::debug!(option = %key, "option not supported by the default handler");
        }

        let response = builder.send().await?;
        Ok(Response::from_reqwest(response).await?)
    }
}
