//! Interactive and scripted front end for `mongoadmin-core`.
//!
//! The binary in `main.rs` only wires these modules together: it parses the
//! [`cli`], finds the connection URL through [`source`], and then hands a
//! connected workflow to the [`menu`] or one of the [`commands`]. All prompting
//! goes through [`console::Console`] so every flow can be driven from tests.

pub mod cli;
pub mod commands;
pub mod console;
pub mod menu;
pub mod source;
