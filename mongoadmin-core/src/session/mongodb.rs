//! MongoDB session backed by the official async driver.
//!
//! # Security Features
//! - Connection string credentials are never logged
//! - Connect and server selection are bounded by the configured timeout

use super::{AdminSession, ConnectOptions};
use crate::Result;
use crate::error::{AdminError, redact_connection_url};
use async_trait::async_trait;
use mongodb::Client;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;

/// A live connection to a MongoDB deployment.
pub struct MongoSession {
    client: Client,
    redacted_url: String,
}

impl std::fmt::Debug for MongoSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoSession")
            .field("url", &self.redacted_url)
            .finish_non_exhaustive()
    }
}

impl MongoSession {
    /// Connects to `connection_string` and verifies the server answers a ping.
    ///
    /// # Errors
    /// Returns `AdminError::Connect` if the options cannot be parsed, the
    /// client cannot be built, or the ping fails within the timeout. The
    /// connection string is redacted in every error.
    pub async fn connect(connection_string: &str, options: &ConnectOptions) -> Result<Self> {
        options.validate()?;
        let redacted_url = redact_connection_url(connection_string);

        let client_options = Self::create_client_options(connection_string, options).await?;
        let client = Client::with_options(client_options)
            .map_err(|e| AdminError::connect_failed(connection_string, e))?;

        let session = Self {
            client,
            redacted_url,
        };

        tracing::debug!("Pinging {}", session.redacted_url);
        if let Err(e) = session.ping().await {
            session.disconnect().await;
            return Err(e);
        }

        tracing::info!("Connected to {}", session.redacted_url);
        Ok(session)
    }

    async fn create_client_options(
        connection_string: &str,
        options: &ConnectOptions,
    ) -> Result<ClientOptions> {
        let mut client_options = ClientOptions::parse(connection_string)
            .await
            .map_err(|e| AdminError::connect_failed(connection_string, e))?;

        client_options.connect_timeout = Some(options.connect_timeout);
        client_options.server_selection_timeout = Some(options.connect_timeout);
        client_options.app_name = Some(options.app_name.clone());

        Ok(client_options)
    }
}

#[async_trait]
impl AdminSession for MongoSession {
    async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AdminError::connect_failed(&self.redacted_url, e))?;
        Ok(())
    }

    async fn list_database_names(&self) -> Result<Vec<String>> {
        self.client.list_database_names().await.map_err(|e| {
            tracing::error!("Failed to enumerate databases: {}", e);
            AdminError::session_failed("list databases", &self.redacted_url, e)
        })
    }

    async fn create_collection(&self, database: &str, name: &str) -> Result<()> {
        tracing::debug!("Creating collection {}.{}", database, name);
        self.client
            .database(database)
            .create_collection(name)
            .await
            .map_err(|e| {
                AdminError::session_failed("create collection", format!("{database}.{name}"), e)
            })
    }

    async fn run_admin_command(&self, database: &str, command: Document) -> Result<Document> {
        // Only the command name is logged; the body can hold a password.
        let command_name = command.keys().next().cloned().unwrap_or_default();
        tracing::debug!("Running {} against {}", command_name, database);

        self.client
            .database(database)
            .run_command(command)
            .await
            .map_err(|e| AdminError::session_failed("admin command", database, e))
    }

    async fn disconnect(&self) {
        tracing::debug!("Disconnecting from {}", self.redacted_url);
        self.client.clone().shutdown().await;
    }
}
