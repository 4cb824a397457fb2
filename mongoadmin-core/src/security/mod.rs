//! Credential protection utilities.
//!
//! - `credentials`: zeroizing container for the username and password of a
//!   user being provisioned
//!
//! Connection string redaction lives in [`crate::error::redact_connection_url`].

mod credentials;

pub use credentials::Credentials;
