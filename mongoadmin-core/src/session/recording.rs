//! In-memory [`AdminSession`] that records every call.
//!
//! Databases are plain names; creating a collection in an unknown database
//! makes it appear in the listing, the way MongoDB materializes databases on
//! first write. Failures can be scripted per operation.

use super::AdminSession;
use crate::Result;
use crate::error::AdminError;
use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One call observed by a [`RecordingSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// `ping()`
    Ping,
    /// `list_database_names()`
    ListDatabaseNames,
    /// `create_collection(database, name)`
    CreateCollection {
        /// Target database
        database: String,
        /// Collection name
        name: String,
    },
    /// `run_admin_command(database, command)`
    RunAdminCommand {
        /// Target database
        database: String,
        /// Command document as submitted
        command: Document,
    },
    /// `disconnect()`
    Disconnect,
}

#[derive(Debug, Default)]
struct State {
    databases: Vec<String>,
    collections: HashSet<(String, String)>,
    calls: Vec<RecordedCall>,
    fail_listing: bool,
    fail_commands: bool,
}

/// Scriptable in-memory session.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: Mutex<State>,
}

impl RecordingSession {
    /// Creates a session whose server already holds `databases`.
    pub fn with_databases<I, S>(databases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let session = Self::default();
        session.lock().databases = databases.into_iter().map(Into::into).collect();
        session
    }

    /// Makes every `list_database_names` call fail.
    pub fn failing_listing(self) -> Self {
        self.lock().fail_listing = true;
        self
    }

    /// Makes every `run_admin_command` call fail.
    pub fn failing_commands(self) -> Self {
        self.lock().fail_commands = true;
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Admin commands received so far as `(database, command)` pairs.
    pub fn admin_commands(&self) -> Vec<(String, Document)> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::RunAdminCommand { database, command } => {
                    Some((database.clone(), command.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Current database names.
    pub fn databases(&self) -> Vec<String> {
        self.lock().databases.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn simulated(message: &str) -> std::io::Error {
    std::io::Error::other(message.to_string())
}

#[async_trait]
impl AdminSession for RecordingSession {
    async fn ping(&self) -> Result<()> {
        self.lock().calls.push(RecordedCall::Ping);
        Ok(())
    }

    async fn list_database_names(&self) -> Result<Vec<String>> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::ListDatabaseNames);
        if state.fail_listing {
            return Err(AdminError::session_failed(
                "list databases",
                "recording",
                simulated("connection reset"),
            ));
        }
        Ok(state.databases.clone())
    }

    async fn create_collection(&self, database: &str, name: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::CreateCollection {
            database: database.to_string(),
            name: name.to_string(),
        });

        if !state
            .collections
            .insert((database.to_string(), name.to_string()))
        {
            return Err(AdminError::session_failed(
                "create collection",
                format!("{database}.{name}"),
                simulated("collection already exists"),
            ));
        }
        if !state.databases.iter().any(|db| db == database) {
            state.databases.push(database.to_string());
        }
        Ok(())
    }

    async fn run_admin_command(&self, database: &str, command: Document) -> Result<Document> {
        let mut state = self.lock();
        state.calls.push(RecordedCall::RunAdminCommand {
            database: database.to_string(),
            command,
        });
        if state.fail_commands {
            return Err(AdminError::session_failed(
                "admin command",
                database,
                simulated("not authorized"),
            ));
        }
        Ok(doc! { "ok": 1.0 })
    }

    async fn disconnect(&self) {
        self.lock().calls.push(RecordedCall::Disconnect);
    }
}
