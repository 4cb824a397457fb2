//! Where the connection URL comes from.
//!
//! The URL usually embeds an administrator password, so it is kept in a
//! zeroizing buffer and never echoed back.

use mongoadmin_core::error::AdminError;
use mongoadmin_core::Result;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// How the connection URL was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    /// `--connection-url` or the `MONGODB_URI` environment variable
    Argument,
    /// `--connection-url-file`
    File(PathBuf),
    /// Typed at the hidden prompt
    Prompt,
}

impl std::fmt::Display for UrlSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlSource::Argument => write!(f, "command line or environment"),
            UrlSource::File(path) => write!(f, "file {}", path.display()),
            UrlSource::Prompt => write!(f, "interactive prompt"),
        }
    }
}

/// Picks the connection URL from the argument or the file, in that order.
///
/// Returns `Ok(None)` when neither is configured so the caller can prompt.
///
/// # Errors
/// Returns an I/O error if the file cannot be read, or a configuration error
/// if the selected value is blank.
pub fn configured_url(
    argument: Option<&str>,
    file: Option<&Path>,
) -> Result<Option<(Zeroizing<String>, UrlSource)>> {
    if let Some(url) = argument {
        let url = validate_connection_url(url, "connection URL argument")?;
        return Ok(Some((url, UrlSource::Argument)));
    }

    if let Some(path) = file {
        let contents = Zeroizing::new(fs::read_to_string(path).map_err(|e| AdminError::Io {
            context: format!("Failed to read connection URL file {}", path.display()),
            source: e,
        })?);
        let url = validate_connection_url(&contents, &format!("file {}", path.display()))?;
        return Ok(Some((url, UrlSource::File(path.to_path_buf()))));
    }

    Ok(None)
}

/// Trims the URL and rejects blank input.
///
/// Anything else is accepted; target resolution is best effort and the
/// driver reports malformed URLs when connecting.
///
/// # Errors
/// Returns a configuration error naming `origin` when the URL is blank
pub fn validate_connection_url(url: &str, origin: &str) -> Result<Zeroizing<String>> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(AdminError::configuration(format!(
            "connection URL from {} cannot be empty",
            origin
        )));
    }

    if !trimmed.starts_with(mongoadmin_core::connection::STANDARD_PREFIX)
        && !trimmed.starts_with(mongoadmin_core::connection::SRV_PREFIX)
    {
        tracing::warn!(
            "Connection URL from {} does not start with mongodb:// or mongodb+srv://",
            origin
        );
    }

    Ok(Zeroizing::new(trimmed.to_string()))
}
