//! Server session abstraction.
//!
//! The provisioning workflow only talks to the server through
//! [`AdminSession`], which keeps it testable without a running MongoDB.
//!
//! # Module Structure
//! - `mongodb`: the real session backed by the official driver
//! - `recording`: in-memory session for tests (feature `test-support`)

mod mongodb;
#[cfg(any(test, feature = "test-support"))]
pub mod recording;

pub use self::mongodb::MongoSession;
#[cfg(any(test, feature = "test-support"))]
pub use recording::{RecordedCall, RecordingSession};

use crate::Result;
use ::mongodb::bson::Document;
use async_trait::async_trait;
use std::time::Duration;

/// Default bound on connecting and the initial ping.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Driver settings applied once when the session is established.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Bound on connection establishment and server selection
    pub connect_timeout: Duration,
    /// Application name reported to the server
    pub app_name: String,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            app_name: format!("mongoadmin-{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConnectOptions {
    /// Builder method to set the connect timeout.
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validates the options.
    ///
    /// # Errors
    /// Returns a configuration error for a zero timeout or empty app name
    pub fn validate(&self) -> Result<()> {
        if self.connect_timeout.is_zero() {
            return Err(crate::error::AdminError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }
        if self.app_name.is_empty() {
            return Err(crate::error::AdminError::configuration(
                "app_name cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Server capabilities the provisioning workflow relies on.
///
/// Every call is awaited to completion before the next one is issued.
/// Errors are already classified: `Connect` for [`ping`](Self::ping),
/// `Session` for everything else.
#[async_trait]
pub trait AdminSession: Send + Sync {
    /// Round-trips a ping to the server.
    async fn ping(&self) -> Result<()>;

    /// Names of every database visible to the session.
    async fn list_database_names(&self) -> Result<Vec<String>>;

    /// Creates collection `name` inside `database`.
    async fn create_collection(&self, database: &str, name: &str) -> Result<()>;

    /// Runs an administrative command against `database`.
    async fn run_admin_command(&self, database: &str, command: Document) -> Result<Document>;

    /// Releases the session. Further calls are not supported.
    async fn disconnect(&self);
}

#[async_trait]
impl<T: AdminSession + ?Sized> AdminSession for std::sync::Arc<T> {
    async fn ping(&self) -> Result<()> {
        (**self).ping().await
    }

    async fn list_database_names(&self) -> Result<Vec<String>> {
        (**self).list_database_names().await
    }

    async fn create_collection(&self, database: &str, name: &str) -> Result<()> {
        (**self).create_collection(database, name).await
    }

    async fn run_admin_command(&self, database: &str, command: Document) -> Result<Document> {
        (**self).run_admin_command(database, command).await
    }

    async fn disconnect(&self) {
        (**self).disconnect().await;
    }
}
