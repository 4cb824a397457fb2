//! Core types and workflow for mongoadmin.
//!
//! This crate resolves MongoDB connection strings, provisions databases and
//! users through an [`AdminSession`], and renders connection strings for the
//! users it creates. The binary crate is a thin prompt and CLI layer on top.
//!
//! # Security Guarantees
//! - Connection strings are redacted in every error and log line
//! - New-user passwords are held in zeroizing containers
//! - Users are only ever created inside databases that already exist
//!
//! # Module Organization
//! - [`connection`] - connection target resolution and string rendering
//! - [`workflow`] - provisioning operations and their ordering rules
//! - [`session`] - the server capability trait and the MongoDB session
//! - [`security`] - credential container
//! - [`error`] - error taxonomy with credential sanitization
//! - [`logging`] - tracing subscriber setup

pub mod connection;
pub mod error;
pub mod logging;
pub mod security;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use connection::{ConnectionTarget, RenderedConnectionString, Scheme, render, resolve};
pub use error::{AdminError, Result};
pub use logging::init_logging;
pub use security::Credentials;
pub use session::{AdminSession, ConnectOptions, MongoSession};
pub use workflow::{DatabaseEntry, ProvisioningRequest, ProvisioningWorkflow, parse_roles};
