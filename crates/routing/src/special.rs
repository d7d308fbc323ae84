//! Configuration-level routing rules that run before document frontmatter.
//!
//! Each rule returns `Some(decision)` when it applies and `None` to defer to
//! the next rule in the chain.

use crate::pattern::match_pattern;
use crate::rules::evaluate_patterns;
use crate::types::{AutoSyncPattern, SyncRules};

/// Path component that introduces a system subtree.
const SYSTEMS_SEGMENT: &str = "systems";

/// Glob identifying codex repositories by name.
const CODEX_REPO_PATTERN: &str = "codex.*";

/// Find the first auto-sync entry whose pattern matches `file_path`.
///
/// Returns the entry's position alongside it.
pub fn matching_auto_sync_pattern<'r>(
    file_path: &str,
    rules: &'r SyncRules,
) -> Option<(usize, &'r AutoSyncPattern)> {
    rules
        .auto_sync_patterns
        .iter()
        .enumerate()
        .find(|(_, entry)| match_pattern(&entry.pattern, file_path))
}

/// Apply the first auto-sync pattern matching `file_path` to `target_repo`.
pub fn evaluate_auto_sync_patterns(
    file_path: &str,
    target_repo: &str,
    rules: &SyncRules,
) -> Option<bool> {
    let (_, entry) = matching_auto_sync_pattern(file_path, rules)?;
    Some(evaluate_auto_sync_entry(entry, target_repo))
}

pub(crate) fn evaluate_auto_sync_entry(entry: &AutoSyncPattern, target_repo: &str) -> bool {
    let exclude = entry.exclude.as_deref().unwrap_or_default();
    evaluate_patterns(target_repo, &entry.include, exclude)
}

/// Extract the system name from a path under a `systems/` directory.
///
/// The name is the component right after `systems` and must itself be a
/// directory, so `systems/readme.md` has no system name.
///
/// ```
/// use codex_routing::extract_system_name;
///
/// assert_eq!(
///     extract_system_name(".fractary/systems/api-gateway/docs/x.md"),
///     Some("api-gateway")
/// );
/// assert_eq!(extract_system_name("docs/guide.md"), None);
/// ```
pub fn extract_system_name(file_path: &str) -> Option<&str> {
    let segments: Vec<&str> = file_path.split('/').filter(|s| !s.is_empty()).collect();
    segments
        .windows(3)
        .find(|window| window[0] == SYSTEMS_SEGMENT)
        .map(|window| window[1])
}

/// Block routing a system's own documents back to the system repository.
pub fn evaluate_self_sync(file_path: &str, target_repo: &str, rules: &SyncRules) -> Option<bool> {
    if !rules.prevent_self_sync {
        return None;
    }

    match extract_system_name(file_path) {
        Some(system) if system == target_repo => Some(false),
        _ => None,
    }
}

/// Block routing to the source repository or to any codex repository.
pub fn evaluate_codex_sync(target_repo: &str, source_repo: &str, rules: &SyncRules) -> Option<bool> {
    if !rules.prevent_codex_sync {
        return None;
    }

    if target_repo == source_repo || match_pattern(CODEX_REPO_PATTERN, target_repo) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_with(patterns: Vec<AutoSyncPattern>) -> SyncRules {
        SyncRules {
            auto_sync_patterns: patterns,
            ..Default::default()
        }
    }

    #[test]
    fn auto_sync_returns_none_without_matching_entry() {
        let rules = rules_with(vec![AutoSyncPattern::new("standards/*", ["*"])]);
        assert_eq!(evaluate_auto_sync_patterns("docs/x.md", "api", &rules), None);
        assert_eq!(
            evaluate_auto_sync_patterns("docs/x.md", "api", &SyncRules::default()),
            None
        );
    }

    #[test]
    fn auto_sync_applies_include_and_exclude() {
        let rules = rules_with(vec![
            AutoSyncPattern::new("standards/*", ["api-*"]).with_exclude(["api-legacy"]),
        ]);
        assert_eq!(
            evaluate_auto_sync_patterns("standards/style.md", "api-core", &rules),
            Some(true)
        );
        assert_eq!(
            evaluate_auto_sync_patterns("standards/style.md", "api-legacy", &rules),
            Some(false)
        );
        assert_eq!(
            evaluate_auto_sync_patterns("standards/style.md", "web-portal", &rules),
            Some(false)
        );
    }

    #[test]
    fn auto_sync_first_match_wins() {
        let rules = rules_with(vec![
            AutoSyncPattern::new("standards/security/*", ["sec-*"]),
            AutoSyncPattern::new("standards/*", ["*"]),
        ]);
        // The broader second entry would allow it; the first entry decides.
        assert_eq!(
            evaluate_auto_sync_patterns("standards/security/tls.md", "api-core", &rules),
            Some(false)
        );
        assert_eq!(
            matching_auto_sync_pattern("standards/security/tls.md", &rules).map(|(i, _)| i),
            Some(0)
        );
        assert_eq!(
            evaluate_auto_sync_patterns("standards/naming.md", "api-core", &rules),
            Some(true)
        );
    }

    #[test]
    fn auto_sync_with_empty_include_allows_all_not_excluded() {
        let empty: [&str; 0] = [];
        let rules = rules_with(vec![AutoSyncPattern::new("*", empty).with_exclude(["web-*"])]);
        assert_eq!(evaluate_auto_sync_patterns("a.md", "api", &rules), Some(true));
        assert_eq!(evaluate_auto_sync_patterns("a.md", "web-x", &rules), Some(false));
    }

    #[test]
    fn system_name_extraction() {
        assert_eq!(
            extract_system_name(".org/systems/api-gateway/docs/x.md"),
            Some("api-gateway")
        );
        assert_eq!(extract_system_name("systems/web/readme.md"), Some("web"));
        assert_eq!(extract_system_name("systems//web/readme.md"), Some("web"));
        assert_eq!(extract_system_name("systems/readme.md"), None);
        assert_eq!(extract_system_name("docs/mysystems/api/x.md"), None);
        assert_eq!(extract_system_name(""), None);
    }

    #[test]
    fn self_sync_blocks_matching_system() {
        let rules = SyncRules::default();
        assert_eq!(
            evaluate_self_sync(".org/systems/api/docs/x.md", "api", &rules),
            Some(false)
        );
        assert_eq!(
            evaluate_self_sync(".org/systems/api/docs/x.md", "web", &rules),
            None
        );
        assert_eq!(evaluate_self_sync("docs/x.md", "api", &rules), None);
    }

    #[test]
    fn self_sync_can_be_disabled() {
        let rules = SyncRules {
            prevent_self_sync: false,
            ..Default::default()
        };
        assert_eq!(
            evaluate_self_sync(".org/systems/api/docs/x.md", "api", &rules),
            None
        );
    }

    #[test]
    fn codex_sync_blocks_source_and_codex_repos() {
        let rules = SyncRules::default();
        assert_eq!(
            evaluate_codex_sync("codex.fractary.com", "codex.fractary.com", &rules),
            Some(false)
        );
        assert_eq!(evaluate_codex_sync("codex.other.io", "src", &rules), Some(false));
        assert_eq!(evaluate_codex_sync("my-source", "my-source", &rules), Some(false));
        assert_eq!(evaluate_codex_sync("codexapi", "src", &rules), None);
        assert_eq!(evaluate_codex_sync("api-core", "codex.fractary.com", &rules), None);
    }

    #[test]
    fn codex_sync_can_be_disabled() {
        let rules = SyncRules {
            prevent_codex_sync: false,
            ..Default::default()
        };
        assert_eq!(evaluate_codex_sync("codex.other.io", "src", &rules), None);
    }
}
