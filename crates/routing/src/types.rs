//! Shared data model for routing decisions.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Parsed frontmatter of one document.
///
/// The routing fields are read leniently: a missing, `null`, or
/// non-sequence value is an empty list, and non-string items are dropped.
/// Any other key lands in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Repository globs this document opts into.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub codex_sync_include: Vec<String>,
    /// Repository globs this document opts out of.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub codex_sync_exclude: Vec<String>,
    /// Raw `repo:path` publishing directives.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub codex_sync_custom: Vec<String>,
    /// Fields not interpreted by routing.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Metadata {
    /// Build metadata from an already-parsed frontmatter value.
    ///
    /// Anything other than a mapping yields empty metadata.
    pub fn from_value(value: serde_yaml::Value) -> Self {
        if !value.is_mapping() {
            return Self::default();
        }
        serde_yaml::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(
                target: "codex::routing",
                error = %err,
                "Frontmatter could not be read as metadata; using empty metadata"
            );
            Self::default()
        })
    }

    /// Metadata carrying only include patterns.
    pub fn with_include<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codex_sync_include: patterns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    let serde_yaml::Value::Sequence(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            serde_yaml::Value::String(s) => Some(s),
            other => {
                tracing::debug!(
                    target: "codex::routing",
                    item = ?other,
                    "Dropping non-string routing directive"
                );
                None
            }
        })
        .collect())
}

/// A configuration rule that routes by file path alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSyncPattern {
    /// Glob over file paths.
    pub pattern: String,
    /// Globs over repository names.
    pub include: Vec<String>,
    /// Globs over repository names that are never targeted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl AutoSyncPattern {
    pub fn new<I, S>(pattern: impl Into<String>, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            include: include.into_iter().map(Into::into).collect(),
            exclude: None,
        }
    }

    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(exclude.into_iter().map(Into::into).collect());
        self
    }
}

/// Organization-wide routing policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncRules {
    /// Evaluated in order; the first entry whose `pattern` matches wins.
    pub auto_sync_patterns: Vec<AutoSyncPattern>,
    pub prevent_self_sync: bool,
    pub prevent_codex_sync: bool,
    pub allow_project_overrides: bool,
    pub default_include: Vec<String>,
    pub default_exclude: Vec<String>,
}

impl Default for SyncRules {
    fn default() -> Self {
        Self {
            auto_sync_patterns: Vec::new(),
            prevent_self_sync: true,
            prevent_codex_sync: true,
            allow_project_overrides: true,
            default_include: Vec::new(),
            default_exclude: Vec::new(),
        }
    }
}
