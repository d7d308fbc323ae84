//! Resolved configuration and the partial layers merged into it.
//!
//! Every layer is a [`PartialCodexConfig`]: fields a layer leaves out keep
//! the earlier value. Scalars and nested objects merge key by key, while
//! lists (`autoSyncPatterns`, `defaultInclude`, `defaultExclude`) are
//! replaced wholesale whenever a layer provides them, even when empty.

use codex_routing::{AutoSyncPattern, SyncRules};
use serde::{Deserialize, Serialize};

/// Where codex content lives inside a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directories {
    pub source: String,
    pub target: String,
    pub systems: String,
}

impl Directories {
    /// `.{org}` for source and target, `.{org}/systems` for systems.
    pub fn for_organization(organization_slug: &str) -> Self {
        let root = format!(".{organization_slug}");
        Self {
            systems: format!("{root}/systems"),
            source: root.clone(),
            target: root,
        }
    }
}

/// Fully resolved configuration for one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexConfig {
    pub organization_slug: String,
    pub directories: Directories,
    pub rules: SyncRules,
}

impl CodexConfig {
    /// Built-in defaults for `organization_slug`.
    pub fn defaults(organization_slug: &str) -> Self {
        Self {
            organization_slug: organization_slug.to_string(),
            directories: Directories::for_organization(organization_slug),
            rules: SyncRules::default(),
        }
    }

    /// Apply a later layer on top of this configuration.
    pub fn merge(mut self, layer: PartialCodexConfig) -> Self {
        // An empty slug counts as unset, as it does in the environment.
        if let Some(slug) = layer.organization_slug.filter(|slug| !slug.is_empty()) {
            self.organization_slug = slug;
        }
        if let Some(directories) = layer.directories {
            directories.apply_to(&mut self.directories);
        }
        if let Some(rules) = layer.rules {
            rules.apply_to(&mut self.rules);
        }
        self
    }
}

/// One configuration layer; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCodexConfig {
    #[serde(
        default,
        alias = "organization_slug",
        alias = "organization",
        alias = "org",
        skip_serializing_if = "Option::is_none"
    )]
    pub organization_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directories: Option<PartialDirectories>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<PartialSyncRules>,
}

impl PartialCodexConfig {
    /// True when the layer would not change anything.
    pub fn is_empty(&self) -> bool {
        self.organization_slug.is_none() && self.directories.is_none() && self.rules.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDirectories {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systems: Option<String>,
}

impl PartialDirectories {
    fn apply_to(self, directories: &mut Directories) {
        if let Some(source) = self.source {
            directories.source = source;
        }
        if let Some(target) = self.target {
            directories.target = target;
        }
        if let Some(systems) = self.systems {
            directories.systems = systems;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialSyncRules {
    #[serde(default, alias = "auto_sync_patterns", skip_serializing_if = "Option::is_none")]
    pub auto_sync_patterns: Option<Vec<AutoSyncPattern>>,
    #[serde(default, alias = "prevent_self_sync", skip_serializing_if = "Option::is_none")]
    pub prevent_self_sync: Option<bool>,
    #[serde(default, alias = "prevent_codex_sync", skip_serializing_if = "Option::is_none")]
    pub prevent_codex_sync: Option<bool>,
    #[serde(
        default,
        alias = "allow_project_overrides",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_project_overrides: Option<bool>,
    #[serde(default, alias = "default_include", skip_serializing_if = "Option::is_none")]
    pub default_include: Option<Vec<String>>,
    #[serde(default, alias = "default_exclude", skip_serializing_if = "Option::is_none")]
    pub default_exclude: Option<Vec<String>>,
}

impl PartialSyncRules {
    fn apply_to(self, rules: &mut SyncRules) {
        if let Some(patterns) = self.auto_sync_patterns {
            rules.auto_sync_patterns = patterns;
        }
        if let Some(flag) = self.prevent_self_sync {
            rules.prevent_self_sync = flag;
        }
        if let Some(flag) = self.prevent_codex_sync {
            rules.prevent_codex_sync = flag;
        }
        if let Some(flag) = self.allow_project_overrides {
            rules.allow_project_overrides = flag;
        }
        if let Some(include) = self.default_include {
            rules.default_include = include;
        }
        if let Some(exclude) = self.default_exclude {
            rules.default_exclude = exclude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_derive_directories_from_slug() {
        let config = CodexConfig::defaults("fractary");
        assert_eq!(config.organization_slug, "fractary");
        assert_eq!(config.directories.source, ".fractary");
        assert_eq!(config.directories.target, ".fractary");
        assert_eq!(config.directories.systems, ".fractary/systems");
        assert_eq!(config.rules, SyncRules::default());
    }

    #[test]
    fn directories_merge_key_by_key() {
        let layer = PartialCodexConfig {
            directories: Some(PartialDirectories {
                systems: Some("platform/systems".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = CodexConfig::defaults("acme").merge(layer);
        assert_eq!(config.directories.source, ".acme");
        assert_eq!(config.directories.systems, "platform/systems");
    }

    #[test]
    fn rule_flags_merge_individually() {
        let layer = PartialCodexConfig {
            rules: Some(PartialSyncRules {
                prevent_codex_sync: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = CodexConfig::defaults("acme").merge(layer);
        assert!(!config.rules.prevent_codex_sync);
        assert!(config.rules.prevent_self_sync);
        assert!(config.rules.allow_project_overrides);
    }

    #[test]
    fn lists_replace_instead_of_appending() {
        let org = PartialCodexConfig {
            rules: Some(PartialSyncRules {
                default_exclude: Some(vec!["archive-*".into(), "*-test".into()]),
                auto_sync_patterns: Some(vec![AutoSyncPattern::new("standards/*", ["*"])]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let project = PartialCodexConfig {
            rules: Some(PartialSyncRules {
                default_exclude: Some(Vec::new()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = CodexConfig::defaults("acme").merge(org).merge(project);
        assert!(config.rules.default_exclude.is_empty());
        assert_eq!(config.rules.auto_sync_patterns.len(), 1);
    }

    #[test]
    fn partial_layer_accepts_camel_and_snake_case() {
        let camel: PartialCodexConfig = serde_yaml::from_str(
            "organizationSlug: acme\nrules:\n  preventSelfSync: false\n  defaultInclude: ['a']\n",
        )
        .unwrap();
        let snake: PartialCodexConfig = serde_yaml::from_str(
            "organization_slug: acme\nrules:\n  prevent_self_sync: false\n  default_include: ['a']\n",
        )
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.organization_slug.as_deref(), Some("acme"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let layer: PartialCodexConfig = serde_yaml::from_str(
            "organization: acme\ncache:\n  ttl: 3600\nrules:\n  futureFlag: true\n",
        )
        .unwrap();
        assert_eq!(layer.organization_slug.as_deref(), Some("acme"));
        assert_eq!(layer.rules, Some(PartialSyncRules::default()));
    }

    #[test]
    fn empty_layer_is_a_no_op() {
        let layer = PartialCodexConfig::default();
        assert!(layer.is_empty());
        assert_eq!(
            CodexConfig::defaults("acme").merge(layer),
            CodexConfig::defaults("acme")
        );
    }

    #[test]
    fn empty_slug_in_a_layer_keeps_the_resolved_one() {
        let layer: PartialCodexConfig =
            serde_yaml::from_str("organizationSlug: ''\ndirectories:\n  target: out\n").unwrap();
        let config = CodexConfig::defaults("acme").merge(layer);
        assert_eq!(config.organization_slug, "acme");
        assert_eq!(config.directories.target, "out");
    }
}
