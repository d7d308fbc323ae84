//! Organization slug resolution and the environment layer.

use crate::error::ConfigError;
use crate::types::{PartialCodexConfig, PartialDirectories};
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Preferred organization slug variable.
pub const ENV_ORGANIZATION_SLUG: &str = "ORGANIZATION_SLUG";
/// Fallback organization slug variable.
pub const ENV_CODEX_ORG_SLUG: &str = "CODEX_ORG_SLUG";
pub const ENV_SOURCE_DIR: &str = "CODEX_SOURCE_DIR";
pub const ENV_TARGET_DIR: &str = "CODEX_TARGET_DIR";
pub const ENV_SYSTEMS_DIR: &str = "CODEX_SYSTEMS_DIR";

// codex.{org}.{tld} with exactly one segment for the organization
static CODEX_REPO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^codex\.([^.]+)\.[^.]+$").expect("valid regex"));

/// Inputs for [`resolve_organization`].
#[derive(Debug, Clone, Copy)]
pub struct OrganizationOptions<'a> {
    /// Slug passed by the caller; wins when non-empty.
    pub explicit: Option<&'a str>,
    /// Repository name to infer the slug from.
    pub repo_name: Option<&'a str>,
    pub env: &'a HashMap<String, String>,
}

/// Look up a variable, treating empty values as unset.
pub(crate) fn env_value<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Extract `{org}` from a codex repository name `codex.{org}.{tld}`.
///
/// ```
/// use codex_config::extract_org_from_repo_name;
///
/// assert_eq!(extract_org_from_repo_name("codex.fractary.com").as_deref(), Some("fractary"));
/// assert_eq!(extract_org_from_repo_name("codex.a.b.com"), None);
/// ```
pub fn extract_org_from_repo_name(repo_name: &str) -> Option<String> {
    CODEX_REPO_REGEX
        .captures(repo_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Resolve the organization slug.
///
/// Order: explicit value, then a `codex.{org}.{tld}` repository name, then
/// `ORGANIZATION_SLUG`, then `CODEX_ORG_SLUG`.
pub fn resolve_organization(options: &OrganizationOptions<'_>) -> Result<String> {
    if let Some(explicit) = options.explicit.filter(|s| !s.is_empty()) {
        return Ok(explicit.to_string());
    }

    if let Some(org) = options.repo_name.and_then(extract_org_from_repo_name) {
        tracing::debug!(
            target: "codex::config",
            organization = %org,
            "Organization inferred from repository name"
        );
        return Ok(org);
    }

    env_value(options.env, ENV_ORGANIZATION_SLUG)
        .or_else(|| env_value(options.env, ENV_CODEX_ORG_SLUG))
        .map(str::to_string)
        .ok_or(ConfigError::OrganizationUnresolved)
}

/// Build the configuration layer contributed by environment variables.
pub fn config_from_env(env: &HashMap<String, String>) -> PartialCodexConfig {
    let organization_slug = env_value(env, ENV_ORGANIZATION_SLUG)
        .or_else(|| env_value(env, ENV_CODEX_ORG_SLUG))
        .map(str::to_string);

    let directories = PartialDirectories {
        source: env_value(env, ENV_SOURCE_DIR).map(str::to_string),
        target: env_value(env, ENV_TARGET_DIR).map(str::to_string),
        systems: env_value(env, ENV_SYSTEMS_DIR).map(str::to_string),
    };
    let has_directories = directories != PartialDirectories::default();

    PartialCodexConfig {
        organization_slug,
        directories: has_directories.then_some(directories),
        rules: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repo_name_extraction() {
        assert_eq!(
            extract_org_from_repo_name("codex.fractary.com").as_deref(),
            Some("fractary")
        );
        assert_eq!(extract_org_from_repo_name("codex.acme.io").as_deref(), Some("acme"));
        assert_eq!(extract_org_from_repo_name("codex.fractary"), None);
        assert_eq!(extract_org_from_repo_name("codex.a.b.com"), None);
        assert_eq!(extract_org_from_repo_name("api-gateway"), None);
        assert_eq!(extract_org_from_repo_name("mycodex.acme.io"), None);
    }

    #[test]
    fn explicit_slug_wins() {
        let vars = env(&[(ENV_ORGANIZATION_SLUG, "from-env")]);
        let org = resolve_organization(&OrganizationOptions {
            explicit: Some("explicit"),
            repo_name: Some("codex.fromrepo.com"),
            env: &vars,
        })
        .unwrap();
        assert_eq!(org, "explicit");
    }

    #[test]
    fn repo_name_beats_environment() {
        let vars = env(&[(ENV_ORGANIZATION_SLUG, "from-env")]);
        let org = resolve_organization(&OrganizationOptions {
            explicit: None,
            repo_name: Some("codex.fromrepo.com"),
            env: &vars,
        })
        .unwrap();
        assert_eq!(org, "fromrepo");
    }

    #[test]
    fn organization_slug_beats_codex_org_slug() {
        let vars = env(&[(ENV_CODEX_ORG_SLUG, "fallback"), (ENV_ORGANIZATION_SLUG, "primary")]);
        let options = OrganizationOptions {
            explicit: None,
            repo_name: Some("api-gateway"),
            env: &vars,
        };
        assert_eq!(resolve_organization(&options).unwrap(), "primary");

        let vars = env(&[(ENV_CODEX_ORG_SLUG, "fallback"), (ENV_ORGANIZATION_SLUG, "")]);
        let options = OrganizationOptions { env: &vars, ..options };
        assert_eq!(resolve_organization(&options).unwrap(), "fallback");
    }

    #[test]
    fn unresolvable_slug_is_an_error() {
        let vars = HashMap::new();
        let err = resolve_organization(&OrganizationOptions {
            explicit: Some(""),
            repo_name: None,
            env: &vars,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::OrganizationUnresolved));
    }

    #[test]
    fn env_layer_reads_directories() {
        let vars = env(&[
            (ENV_SOURCE_DIR, "docs/src"),
            (ENV_SYSTEMS_DIR, "docs/systems"),
            (ENV_TARGET_DIR, ""),
        ]);
        let layer = config_from_env(&vars);

        assert_eq!(layer.organization_slug, None);
        let dirs = layer.directories.unwrap();
        assert_eq!(dirs.source.as_deref(), Some("docs/src"));
        assert_eq!(dirs.target, None);
        assert_eq!(dirs.systems.as_deref(), Some("docs/systems"));
    }

    #[test]
    fn empty_env_contributes_nothing() {
        assert!(config_from_env(&HashMap::new()).is_empty());
    }
}
