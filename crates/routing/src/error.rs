//! Error types for routing inputs that are parsed rather than matched.

use thiserror::Error;

/// A custom destination directive that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The directive was empty or whitespace.
    #[error("Custom destination is empty")]
    Empty,

    /// The directive has no `:` between repository and path.
    #[error("Custom destination '{value}' must have the form 'repo:path'")]
    MissingSeparator { value: String },

    /// Nothing before the first `:`.
    #[error("Custom destination '{value}' has an empty repository")]
    EmptyRepo { value: String },

    /// Nothing after the first `:`.
    #[error("Custom destination '{value}' has an empty path")]
    EmptyPath { value: String },
}

impl ValidationError {
    /// Stable identifier for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY_DESTINATION",
            Self::MissingSeparator { .. } => "MISSING_SEPARATOR",
            Self::EmptyRepo { .. } => "EMPTY_REPO",
            Self::EmptyPath { .. } => "EMPTY_PATH",
        }
    }
}
