//! Credential container for users being provisioned.
//!
//! The username and password live in `Zeroizing` containers so their memory
//! is cleared when the request is dropped. Neither value appears in `Debug`
//! output.

use zeroize::{Zeroize, Zeroizing};

/// Username and password for a new database user.
///
/// # Example
///
/// ```rust
/// use mongoadmin_core::security::Credentials;
///
/// let creds = Credentials::new("app".to_string(), "s3cret".to_string());
/// assert_eq!(creds.username(), "app");
/// assert!(!format!("{:?}", creds).contains("s3cret"));
/// ```
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Credentials {
    username: Zeroizing<String>,
    password: Zeroizing<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_str())
            .field("password", &"****")
            .finish()
    }
}

impl Credentials {
    /// Wraps a username and password.
    pub fn new(username: String, password: String) -> Self {
        Self {
            username: Zeroizing::new(username),
            password: Zeroizing::new(password),
        }
    }

    /// Gets the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Gets the password. Callers must not log it.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Checks both fields are present.
    ///
    /// # Errors
    /// Returns a configuration error naming the first empty field.
    pub fn validate(&self) -> crate::Result<()> {
        if self.username.is_empty() {
            return Err(crate::error::AdminError::configuration(
                "username cannot be empty",
            ));
        }
        if self.password.is_empty() {
            return Err(crate::error::AdminError::configuration(
                "password cannot be empty",
            ));
        }
        Ok(())
    }
}
