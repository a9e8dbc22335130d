//! HTTP response wrapper.
//!
//! [`Response`] is plain data (status, headers, body) so that real network
//! responses, fakes and synthetic failure responses all look the same to
//! the API surface.

use std::borrow::Cow;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A completed HTTP exchange as seen by the caller.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: String,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// A 200 response with a literal body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(200, HeaderMap::new(), body)
    }

    /// A 200 response whose body is `data` encoded as JSON.
    ///
    /// A value that fails to serialize yields an empty body.
    pub fn json_body<T: Serialize + ?Sized>(data: &T) -> Self {
        let body = serde_json::to_string(data).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not encode response body as JSON");
            String::new()
        });
        Self::text(body)
    }

    /// Replace the status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Append a header. Invalid names or values are ignored.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.append(name, value);
            }
            _ => tracing::warn!(header = name, "ignoring invalid response header"),
        }
        self
    }

    /// Collect a `reqwest` response into a [`Response`].
    pub async fn from_reqwest(response: reqwest::Response) -> reqwest::Result<Self> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self::new(status, headers, body))
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// All headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Decode the body as JSON.
    ///
    /// An empty body decodes to an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PwnedError::ParseError`] if a non-empty body is not
    /// valid JSON.
    pub fn json(&self) -> Result<Value> {
        if self.body.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PwnedError::ParseError`] if the body does not
    /// decode into `T`.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.json()?)?)
    }

    /// Whether the status is in `200..300`.
    pub fn successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is outside `200..300`.
    pub fn failed(&self) -> bool {
        !self.successful()
    }

    /// First value of the named header, compared case-insensitively.
    ///
    /// Values with non-ASCII bytes are decoded as UTF-8, lossily.
    pub fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(|v| match v.to_str() {
            Ok(text) => Cow::Borrowed(text),
            Err(_) => String::from_utf8_lossy(v.as_bytes()),
        })
    }

    /// First value of the named header, or `default` when it is absent.
    pub fn header_or<'a>(&'a self, name: &str, default: &'a str) -> Cow<'a, str> {
        self.header(name).unwrap_or(Cow::Borrowed(default))
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::text("")
    }
}

/// Structured values are JSON-encoded; strings are used literally.
impl From<Value> for Response {
    fn from(data: Value) -> Self {
        match data {
            Value::Null => Self::text(""),
            Value::String(s) => Self::text(s),
            Value::Bool(_) | Value::Number(_) => Self::text(data.to_string()),
            Value::Array(_) | Value::Object(_) => Self::json_body(&data),
        }
    }
}

impl From<&str> for Response {
    fn from(body: &str) -> Self {
        Self::text(body)
    }
}

impl From<String> for Response {
    fn from(body: String) -> Self {
        Self::text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Response {
        Response::text(r#"{"name":"Saeed","value":123}"#)
            .with_header("Content-Type", "application/json")
            .with_header("X-Test", "ABC")
    }

    #[test]
    fn test_accessors() {
        let res = sample();
        assert_eq!(res.status(), 200);
        assert_eq!(res.body(), r#"{"name":"Saeed","value":123}"#);
        assert_eq!(res.json().unwrap(), json!({"name": "Saeed", "value": 123}));
        assert!(res.successful());
        assert!(!res.failed());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let res = sample();
        assert_eq!(res.header("Content-Type").as_deref(), Some("application/json"));
        assert_eq!(res.header("content-type").as_deref(), Some("application/json"));
        assert_eq!(res.header("x-test").as_deref(), Some("ABC"));
        assert_eq!(res.header("Unknown"), None);
        assert_eq!(res.header_or("Unknown", "default"), "default");
    }

    #[test]
    fn test_header_returns_first_value() {
        let res = Response::text("")
            .with_header("X-Multi", "one")
            .with_header("X-Multi", "two");
        assert_eq!(res.header("x-multi").as_deref(), Some("one"));
    }

    #[test]
    fn test_header_with_utf8_value_is_readable() {
        let mut headers = HeaderMap::new();
        headers.insert("x-name", HeaderValue::from_bytes("café".as_bytes()).unwrap());
        let res = Response::new(200, headers, "");
        assert_eq!(res.header("X-Name").as_deref(), Some("café"));
        assert_eq!(res.header_or("x-name", "DEFAULT"), "café");

        let res = Response::text("").with_header("X-Name", "café");
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.header("x-name").as_deref(), Some("café"));
    }

    #[test]
    fn test_header_with_invalid_utf8_is_lossy() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(&[b'a', 0xff, b'b']).unwrap());
        let res = Response::new(200, headers, "");
        assert_eq!(res.header("x-raw").as_deref(), Some("a\u{FFFD}b"));
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        let res = Response::text("");
        assert_eq!(res.json().unwrap(), json!({}));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let res = Response::text("{invalid json");
        let err = res.json().unwrap_err();
        assert!(matches!(err, crate::PwnedError::ParseError(_)));
    }

    #[test]
    fn test_failed_statuses() {
        let not_found = Response::text("Not Found").with_status(404);
        assert!(not_found.failed());
        assert!(!not_found.successful());

        assert!(Response::text("").with_status(299).successful());
        assert!(Response::text("").with_status(300).failed());
        assert!(Response::text("").with_status(199).failed());
    }

    #[test]
    fn test_object_keys_keep_source_order() {
        let res = Response::text(r#"{"Zeta":1,"Alpha":2,"Mid":3}"#);
        let value = res.json().unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_from_value() {
        let res = Response::from(json!({"foo": "bar"}));
        assert_eq!(res.status(), 200);
        assert_eq!(res.body(), r#"{"foo":"bar"}"#);

        let res = Response::from(json!("fake-body"));
        assert_eq!(res.body(), "fake-body");

        let res = Response::from(json!(5));
        assert_eq!(res.body(), "5");

        let res = Response::from(Value::Null);
        assert_eq!(res.body(), "");
    }

    #[test]
    fn test_json_as() {
        let res = Response::from(json!(["Emails", "Passwords"]));
        let classes: Vec<String> = res.json_as().unwrap();
        assert_eq!(classes, ["Emails", "Passwords"]);
    }
}
