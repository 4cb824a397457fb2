//! Rendering of shareable, credential-bearing connection strings.

use super::target::{ConnectionTarget, SRV_PREFIX, STANDARD_PREFIX};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes escaped in the userinfo part: everything but the RFC 3986
/// unreserved set.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A connection string for a freshly provisioned user.
///
/// `Display` yields the full string, password included, because handing it
/// to the operator is the point. `Debug` masks the password.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedConnectionString(String);

impl RenderedConnectionString {
    /// The rendered string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RenderedConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for RenderedConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RenderedConnectionString")
            .field(&crate::error::redact_connection_url(&self.0))
            .finish()
    }
}

/// Percent-escapes a username or password for the userinfo component.
pub fn escape_userinfo(value: &str) -> String {
    utf8_percent_encode(value, USERINFO).to_string()
}

/// Builds a connection string for `username` on `database`.
///
/// The scheme is re-detected from the target's raw URL. Service discovery
/// strings never carry a port; standard strings carry one unless the target
/// has none.
pub fn render(
    target: &ConnectionTarget,
    username: &str,
    password: &str,
    database: &str,
) -> RenderedConnectionString {
    let user = escape_userinfo(username);
    let pass = escape_userinfo(password);
    let host = target.host();

    let rendered = if target.uses_service_discovery() {
        format!("{SRV_PREFIX}{user}:{pass}@{host}/{database}")
    } else {
        match target.port().filter(|port| !port.is_empty()) {
            Some(port) => format!("{STANDARD_PREFIX}{user}:{pass}@{host}:{port}/{database}"),
            None => format!("{STANDARD_PREFIX}{user}:{pass}@{host}/{database}"),
        }
    };

    RenderedConnectionString(rendered)
}
