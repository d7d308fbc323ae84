//! Layered configuration resolution.
//!
//! Layers are applied in a fixed order, later layers winning:
//!
//! 1. built-in defaults for the resolved organization
//! 2. organization-scope config file
//! 3. project-scope config file
//! 4. environment variables
//! 5. programmatic overrides

use crate::error::ConfigError;
use crate::file::{discover_config_paths, read_config_file, ConfigPaths};
use crate::organization::{config_from_env, resolve_organization, OrganizationOptions};
use crate::types::{CodexConfig, PartialCodexConfig};
use crate::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Inputs for [`load_config`].
///
/// The environment is explicit so resolution stays a function of its
/// inputs; [`LoadConfigOptions::with_process_env`] captures the real
/// environment.
#[derive(Debug, Clone, Default)]
pub struct LoadConfigOptions {
    /// Organization slug chosen by the caller.
    pub organization_slug: Option<String>,
    /// Repository name used to infer the organization (`codex.{org}.{tld}`).
    pub repo_name: Option<String>,
    pub org_config_path: Option<PathBuf>,
    pub project_config_path: Option<PathBuf>,
    pub env: HashMap<String, String>,
    /// Applied last, over every other layer.
    pub overrides: PartialCodexConfig,
}

impl LoadConfigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the process environment into these options.
    pub fn with_process_env(mut self) -> Self {
        self.env = std::env::vars().collect();
        self
    }

    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn with_organization(mut self, slug: impl Into<String>) -> Self {
        self.organization_slug = Some(slug.into());
        self
    }

    pub fn with_repo_name(mut self, repo_name: impl Into<String>) -> Self {
        self.repo_name = Some(repo_name.into());
        self
    }

    pub fn with_overrides(mut self, overrides: PartialCodexConfig) -> Self {
        self.overrides = overrides;
        self
    }

    /// Use the given config file paths where none were set explicitly.
    pub fn with_config_paths(mut self, paths: ConfigPaths) -> Self {
        self.org_config_path = self.org_config_path.or(paths.organization);
        self.project_config_path = self.project_config_path.or(paths.project);
        self
    }

    /// Discover config files from `start` and the user's home directory.
    pub fn discover_from(self, start: &Path) -> Self {
        self.with_config_paths(discover_config_paths(start))
    }
}

fn read_layer(path: Option<&Path>) -> Result<PartialCodexConfig> {
    path.map(read_config_file)
        .transpose()
        .map(Option::unwrap_or_default)
}

fn non_empty(slug: Option<String>) -> Option<String> {
    slug.filter(|slug| !slug.is_empty())
}

/// Resolve a [`CodexConfig`] from every configured layer.
///
/// File layers are read before anything is merged, so a malformed file
/// fails the whole load.
///
/// # Examples
///
/// ```
/// use codex_config::{load_config, LoadConfigOptions};
///
/// let config = load_config(&LoadConfigOptions::new().with_repo_name("codex.fractary.com"))
///     .unwrap();
/// assert_eq!(config.organization_slug, "fractary");
/// assert_eq!(config.directories.systems, ".fractary/systems");
/// ```
pub fn load_config(options: &LoadConfigOptions) -> Result<CodexConfig> {
    let org_layer = read_layer(options.org_config_path.as_deref())?;
    let project_layer = read_layer(options.project_config_path.as_deref())?;
    let env_layer = config_from_env(&options.env);

    let mut overrides = options.overrides.clone();
    overrides.organization_slug = non_empty(overrides.organization_slug.take())
        .or_else(|| non_empty(options.organization_slug.clone()));

    let organization = match resolve_organization(&OrganizationOptions {
        explicit: overrides.organization_slug.as_deref(),
        repo_name: options.repo_name.as_deref(),
        env: &options.env,
    }) {
        Ok(slug) => slug,
        Err(ConfigError::OrganizationUnresolved) => {
            non_empty(project_layer.organization_slug.clone())
                .or_else(|| non_empty(org_layer.organization_slug.clone()))
                .ok_or(ConfigError::OrganizationUnresolved)?
        }
        Err(err) => return Err(err),
    };

    let layers = [
        ("organization file", org_layer),
        ("project file", project_layer),
        ("environment", env_layer),
        ("overrides", overrides),
    ];

    let config = layers
        .into_iter()
        .fold(CodexConfig::defaults(&organization), |config, (name, layer)| {
            if layer.is_empty() {
                return config;
            }
            tracing::debug!(target: "codex::config", layer = name, "Applying configuration layer");
            config.merge(layer)
        });

    tracing::debug!(
        target: "codex::config",
        organization = %config.organization_slug,
        auto_sync_patterns = config.rules.auto_sync_patterns.len(),
        "Configuration resolved"
    );
    Ok(config)
}
