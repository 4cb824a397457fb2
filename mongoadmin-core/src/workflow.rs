//! Database and user provisioning.
//!
//! [`ProvisioningWorkflow`] owns the session and the resolved connection
//! target for the lifetime of the program. It sequences existence checks,
//! database creation and user creation, and guarantees a user is never
//! created against a database that does not exist.

use crate::Result;
use crate::connection::{ConnectionTarget, RenderedConnectionString, render};
use crate::error::AdminError;
use crate::security::Credentials;
use crate::session::AdminSession;
use mongodb::bson::{Bson, Document, doc};
use serde::Serialize;

/// Collection created to force a database into existence.
pub const SENTINEL_COLLECTION: &str = "_init";

/// Role granted when the caller names none.
pub const DEFAULT_ROLE: &str = "readWrite";

/// Databases MongoDB manages itself.
pub const SYSTEM_DATABASES: &[&str] = &["admin", "config", "local"];

/// Built-in roles offered by the interactive menu.
pub const BUILTIN_ROLES: &[&str] = &["read", "readWrite", "dbAdmin", "userAdmin", "dbOwner"];

/// One entry of a database listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseEntry {
    /// Database name
    pub name: String,
    /// Whether this is a system database
    pub is_system: bool,
}

impl DatabaseEntry {
    /// Creates an entry, flagging system databases.
    pub fn new(name: String) -> Self {
        let is_system = SYSTEM_DATABASES.contains(&name.as_str());
        Self { name, is_system }
    }
}

/// A single user-creation attempt.
#[derive(Debug, Clone)]
pub struct ProvisioningRequest {
    database: String,
    credentials: Credentials,
    roles: Vec<String>,
}

impl ProvisioningRequest {
    /// Builds a request. An empty role list becomes `[readWrite]`.
    pub fn new(database: impl Into<String>, credentials: Credentials, roles: Vec<String>) -> Self {
        let roles = if roles.is_empty() {
            vec![DEFAULT_ROLE.to_string()]
        } else {
            roles
        };
        Self {
            database: database.into(),
            credentials,
            roles,
        }
    }

    /// Target database.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Credentials of the new user.
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Roles to grant, never empty.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Checks every field is populated.
    ///
    /// # Errors
    /// Returns a configuration error naming the empty field
    pub fn validate(&self) -> Result<()> {
        if self.database.is_empty() {
            return Err(AdminError::configuration("database name cannot be empty"));
        }
        self.credentials.validate()?;
        if self.roles.iter().any(String::is_empty) {
            return Err(AdminError::configuration("role names cannot be empty"));
        }
        Ok(())
    }

    /// Role documents, each scoped to the target database.
    pub fn role_documents(&self) -> Vec<Bson> {
        self.roles
            .iter()
            .map(|role| {
                Bson::Document(doc! { "role": role.as_str(), "db": self.database.as_str() })
            })
            .collect()
    }

    /// The `createUser` command for this request.
    pub fn create_user_command(&self) -> Document {
        doc! {
            "createUser": self.credentials.username(),
            "pwd": self.credentials.password(),
            "roles": self.role_documents()
        }
    }
}

/// Splits a comma-separated role list, dropping blanks.
///
/// An input with no usable names yields `[readWrite]`.
pub fn parse_roles(input: &str) -> Vec<String> {
    let roles: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect();

    if roles.is_empty() {
        vec![DEFAULT_ROLE.to_string()]
    } else {
        roles
    }
}

/// Provisioning operations over an exclusively owned session.
pub struct ProvisioningWorkflow<S> {
    session: S,
    target: ConnectionTarget,
}

impl<S> std::fmt::Debug for ProvisioningWorkflow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisioningWorkflow")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<S: AdminSession> ProvisioningWorkflow<S> {
    /// Takes ownership of an established session.
    pub const fn new(session: S, target: ConnectionTarget) -> Self {
        Self { session, target }
    }

    /// The resolved connection target.
    pub const fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    /// The underlying session.
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Reports whether `name` is among the server's databases.
    ///
    /// # Errors
    /// Propagates the session's listing error unchanged
    pub async fn database_exists(&self, name: &str) -> Result<bool> {
        let databases = self.session.list_database_names().await?;
        let exists = databases.iter().any(|db| db == name);
        tracing::debug!("Database '{}' exists: {}", name, exists);
        Ok(exists)
    }

    /// Materializes database `name` by creating the sentinel collection.
    ///
    /// Not idempotent: if the sentinel already exists the session error is
    /// returned as-is.
    ///
    /// # Errors
    /// Returns `AdminError::Session` naming the database
    pub async fn create_database(&self, name: &str) -> Result<()> {
        self.session
            .create_collection(name, SENTINEL_COLLECTION)
            .await
            .map_err(|e| AdminError::session_failed("create database", name, e))?;

        tracing::info!("Created database '{}'", name);
        Ok(())
    }

    /// Creates database `name` unless it already exists.
    ///
    /// Returns `true` when the database was created by this call.
    pub async fn ensure_database(&self, name: &str) -> Result<bool> {
        if self.database_exists(name).await? {
            return Ok(false);
        }
        self.create_database(name).await?;
        Ok(true)
    }

    /// Creates a user scoped to an existing database and returns a
    /// connection string for it.
    ///
    /// # Errors
    /// - `AdminError::Session` if the existence check or the command fails
    /// - `AdminError::Precondition` if the database does not exist; no
    ///   command is sent in that case
    pub async fn create_user(
        &self,
        request: &ProvisioningRequest,
    ) -> Result<RenderedConnectionString> {
        let database = request.database();

        if !self.database_exists(database).await? {
            tracing::warn!("Refusing to create a user in missing database '{}'", database);
            return Err(AdminError::database_missing("create user", database));
        }

        self.session
            .run_admin_command(database, request.create_user_command())
            .await
            .map_err(|e| AdminError::session_failed("create user", database, e))?;

        let username = request.credentials().username();
        tracing::info!(
            "Created user '{}' in database '{}' with roles {:?}",
            username,
            database,
            request.roles()
        );

        Ok(render(
            &self.target,
            username,
            request.credentials().password(),
            database,
        ))
    }

    /// Lists every database on the server in server order.
    pub async fn list_databases(&self) -> Result<Vec<DatabaseEntry>> {
        let names = self.session.list_database_names().await?;
        tracing::debug!("Listed {} databases", names.len());
        Ok(names.into_iter().map(DatabaseEntry::new).collect())
    }

    /// Disconnects the session. Must run on every exit path.
    pub async fn close(self) {
        self.session.disconnect().await;
        tracing::debug!("Session closed");
    }
}
