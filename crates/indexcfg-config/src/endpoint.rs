//! Default-port normalization for endpoint URLs.

use std::borrow::Cow;

const HTTPS_PREFIX: &str = "https:";
const HTTP_PREFIX: &str = "http:";
const HTTPS_DEFAULT_PORT: u16 = 443;
const HTTP_DEFAULT_PORT: u16 = 80;

/// Default port implied by an endpoint's scheme, if the scheme is known.
pub fn default_port(endpoint: &str) -> Option<u16> {
    if endpoint.starts_with(HTTPS_PREFIX) {
        Some(HTTPS_DEFAULT_PORT)
    } else if endpoint.starts_with(HTTP_PREFIX) {
        Some(HTTP_DEFAULT_PORT)
    } else {
        None
    }
}

/// True when the endpoint already names a port.
///
/// The scheme separator contributes one colon, so a second colon means a
/// port is present.
pub fn has_explicit_port(endpoint: &str) -> bool {
    endpoint.matches(':').count() >= 2
}

/// Append the scheme's default port when the endpoint names none.
///
/// Empty endpoints and endpoints with an unrecognized scheme are returned
/// unchanged, as are endpoints with two or more colons (so a bare IPv6 host
/// such as `http://[::1]` gets no port). Applying this to its own output is
/// a no-op.
pub fn with_default_port(endpoint: &str) -> Cow<'_, str> {
    if endpoint.is_empty() || has_explicit_port(endpoint) {
        return Cow::Borrowed(endpoint);
    }
    match default_port(endpoint) {
        Some(port) => Cow::Owned(format!("{endpoint}:{port}")),
        None => Cow::Borrowed(endpoint),
    }
}
