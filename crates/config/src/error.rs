//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while resolving a [`CodexConfig`](crate::CodexConfig).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No organization slug could be determined from any source.
    #[error(
        "Organization slug could not be resolved; pass it explicitly, use a \
         'codex.{{org}}.{{tld}}' repository name, or set ORGANIZATION_SLUG / CODEX_ORG_SLUG"
    )]
    OrganizationUnresolved,

    /// An explicitly requested config file does not exist.
    #[error("Configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The config file exists but could not be read.
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config document is not valid YAML/JSON or has mistyped fields.
    #[error("Invalid configuration in {origin}: {message}")]
    Parse { origin: String, message: String },

    /// The config document is valid but its top level is not a mapping.
    #[error("Configuration in {origin} must be a mapping, got {found}")]
    InvalidShape { origin: String, found: &'static str },
}

impl ConfigError {
    /// Stable identifier for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OrganizationUnresolved => "ORG_UNRESOLVED",
            Self::NotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            Self::Read { .. } => "CONFIG_READ_ERROR",
            Self::Parse { .. } => "INVALID_CONFIG_SYNTAX",
            Self::InvalidShape { .. } => "INVALID_CONFIG_TYPE",
        }
    }
}
