//! Shortcuts for common setup.

use crate::client::PwnedClient;
use crate::factory::Factory;
use crate::fakes;
use crate::response::Response;

/// A factory with default settings.
pub fn factory() -> Factory {
    Factory::new()
}

/// A client authenticated with `api_key`.
pub fn make(api_key: impl Into<String>) -> PwnedClient {
    Factory::new().with_api_key(api_key).make()
}

/// Build a [`Response`] from a body, a status and headers.
///
/// The body follows the same rules as fake registration: JSON values are
/// encoded, strings are used literally.
pub fn response(body: impl Into<Response>, status: u16, headers: &[(&str, &str)]) -> Response {
    let mut response = body.into().with_status(status);

    for (name, value) in headers {
        response = response.with_header(name, value);
    }
    response
}

/// Replace every global fake with a single one.
///
/// Use [`fakes::WILDCARD`] as `pattern` to answer every request.
pub fn fake(pattern: &str, body: impl Into<Response>) {
    fakes::global::clear();
    fakes::global::fake(pattern, body);
}
