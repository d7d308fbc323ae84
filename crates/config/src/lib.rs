//! Configuration resolution for codex documentation sync.
//!
//! Produces the [`CodexConfig`] consumed by `codex-routing` by layering
//! built-in defaults, an organization config file, a project config file,
//! environment variables, and programmatic overrides.
//!
//! ## Configuration File Format
//!
//! ```yaml
//! # .fractary/codex/config.yaml
//! organizationSlug: fractary
//! directories:
//!   systems: .fractary/systems
//! rules:
//!   preventSelfSync: true
//!   autoSyncPatterns:
//!     - pattern: "standards/*"
//!       include: ["*"]
//!       exclude: ["sandbox-*"]
//!   defaultExclude: []
//! ```
//!
//! Recognized environment variables: `ORGANIZATION_SLUG`, `CODEX_ORG_SLUG`,
//! `CODEX_SOURCE_DIR`, `CODEX_TARGET_DIR`, `CODEX_SYSTEMS_DIR`.
//!
//! # Example
//!
//! ```no_run
//! use codex_config::{load_config, LoadConfigOptions};
//!
//! let options = LoadConfigOptions::new()
//!     .with_process_env()
//!     .discover_from(&std::env::current_dir()?);
//! let config = load_config(&options)?;
//! println!("routing for {}", config.organization_slug);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]

pub type Result<T> = std::result::Result<T, ConfigError>;

pub mod error;
pub mod file;
pub mod loader;
pub mod organization;
pub mod types;

pub use error::ConfigError;
pub use file::{
    discover_config_paths, discover_config_paths_with_home, find_config_in,
    find_config_in_ancestors, parse_config_str, read_config_file, ConfigFormat, ConfigPaths,
};
pub use loader::{load_config, LoadConfigOptions};
pub use organization::{
    config_from_env, extract_org_from_repo_name, resolve_organization, OrganizationOptions,
};
pub use types::{
    CodexConfig, Directories, PartialCodexConfig, PartialDirectories, PartialSyncRules,
};
