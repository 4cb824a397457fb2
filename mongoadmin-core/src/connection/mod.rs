//! Connection string handling.
//!
//! # Module Structure
//! - `target`: resolves a raw connection string into scheme, host and port
//! - `render`: builds escaped connection strings for newly created users
//!
//! Neither module performs I/O and neither can fail.

mod render;
mod target;

pub use render::{RenderedConnectionString, escape_userinfo, render};
pub use target::{
    ConnectionTarget, DEFAULT_PORT, FALLBACK_HOST, SRV_PREFIX, STANDARD_PREFIX, Scheme, resolve,
};
