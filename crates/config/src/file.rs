//! Config file discovery and parsing.
//!
//! Config files live at `.fractary/codex/config.{yaml,yml,json}`. The
//! project-scope file is searched for from a start directory upwards; the
//! organization-scope file sits at the same relative path in the user's home
//! directory.

use crate::error::ConfigError;
use crate::types::PartialCodexConfig;
use crate::Result;
use std::path::{Path, PathBuf};

/// Directory holding the config file, relative to a search root.
pub const CONFIG_DIR: &str = ".fractary/codex";
/// Accepted file names, in lookup order.
pub const CONFIG_FILENAMES: [&str; 3] = ["config.yaml", "config.yml", "config.json"];

/// Syntax of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` is JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Config files found for a working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPaths {
    pub organization: Option<PathBuf>,
    pub project: Option<PathBuf>,
}

/// Parse a config document into a partial layer.
///
/// `origin` names the document in error messages. An empty or `null`
/// document is an empty layer.
pub fn parse_config_str(
    content: &str,
    format: ConfigFormat,
    origin: &str,
) -> Result<PartialCodexConfig> {
    let parse_error = |message: String| ConfigError::Parse {
        origin: origin.to_string(),
        message,
    };

    if content.trim().is_empty() {
        return Ok(PartialCodexConfig::default());
    }

    match format {
        ConfigFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            match value {
                serde_yaml::Value::Null => Ok(PartialCodexConfig::default()),
                serde_yaml::Value::Mapping(_) => {
                    serde_yaml::from_value(value).map_err(|e| parse_error(e.to_string()))
                }
                other => Err(ConfigError::InvalidShape {
                    origin: origin.to_string(),
                    found: yaml_kind(&other),
                }),
            }
        }
        ConfigFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            match value {
                serde_json::Value::Null => Ok(PartialCodexConfig::default()),
                serde_json::Value::Object(_) => {
                    serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
                }
                other => Err(ConfigError::InvalidShape {
                    origin: origin.to_string(),
                    found: json_kind(&other),
                }),
            }
        }
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}

/// Read and parse one config file.
pub fn read_config_file(path: &Path) -> Result<PartialCodexConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let layer = parse_config_str(
        &content,
        ConfigFormat::from_path(path),
        &path.display().to_string(),
    )?;

    tracing::debug!(
        target: "codex::config",
        path = %path.display(),
        "Loaded configuration file"
    );
    Ok(layer)
}

/// Config file directly under `root`, if any.
pub fn find_config_in(root: &Path) -> Option<PathBuf> {
    let dir = root.join(CONFIG_DIR);
    if !dir.is_dir() {
        return None;
    }
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Nearest config file in `start` or any of its ancestors.
pub fn find_config_in_ancestors(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(find_config_in)
}

/// Discover config files using an explicit home directory.
///
/// A project search that only reaches the home directory's file yields it as
/// the organization file, not as a project file.
pub fn discover_config_paths_with_home(start: &Path, home: Option<&Path>) -> ConfigPaths {
    let organization = home.and_then(find_config_in);
    let project = find_config_in_ancestors(start).filter(|found| Some(found) != organization.as_ref());

    tracing::debug!(
        target: "codex::config",
        organization = ?organization,
        project = ?project,
        "Discovered configuration files"
    );
    ConfigPaths {
        organization,
        project,
    }
}

/// Discover config files for `start`, using the current user's home.
pub fn discover_config_paths(start: &Path) -> ConfigPaths {
    let home = dirs::home_dir();
    discover_config_paths_with_home(start, home.as_deref())
}
