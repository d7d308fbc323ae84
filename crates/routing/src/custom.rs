//! Explicit `repo:path` publishing targets declared in frontmatter.
//!
//! These destinations sit outside pattern routing: a document lists them in
//! `codex_sync_custom` and they are published as written.

use crate::error::ValidationError;
use crate::types::Metadata;
use crate::Result;
use serde::{Deserialize, Serialize};

/// One `repo:path` publishing target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomSyncDestination {
    pub repo: String,
    pub path: String,
}

/// Parse a `repo:path` directive.
///
/// Only the first `:` separates repository from path, so paths may contain
/// colons. Both halves are trimmed and must be non-empty.
///
/// # Examples
///
/// ```
/// use codex_routing::parse_custom_destination;
///
/// let dest = parse_custom_destination("docs.example.com:guides/api/").unwrap();
/// assert_eq!(dest.repo, "docs.example.com");
/// assert_eq!(dest.path, "guides/api/");
///
/// assert!(parse_custom_destination("docs.example.com").is_err());
/// ```
pub fn parse_custom_destination(value: &str) -> Result<CustomSyncDestination> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    let (repo, path) = value
        .split_once(':')
        .ok_or_else(|| ValidationError::MissingSeparator {
            value: value.to_string(),
        })?;

    let repo = repo.trim();
    if repo.is_empty() {
        return Err(ValidationError::EmptyRepo {
            value: value.to_string(),
        });
    }

    let path = path.trim();
    if path.is_empty() {
        return Err(ValidationError::EmptyPath {
            value: value.to_string(),
        });
    }

    Ok(CustomSyncDestination {
        repo: repo.to_string(),
        path: path.to_string(),
    })
}

/// Collect every well-formed custom destination in `metadata`, in order.
///
/// Malformed entries are logged and skipped.
pub fn get_custom_sync_destinations(metadata: &Metadata) -> Vec<CustomSyncDestination> {
    metadata
        .codex_sync_custom
        .iter()
        .filter_map(|entry| match parse_custom_destination(entry) {
            Ok(dest) => Some(dest),
            Err(err) => {
                tracing::warn!(
                    target: "codex::routing",
                    entry = %entry,
                    code = err.code(),
                    "Skipping malformed custom destination: {err}"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_with_custom(entries: &[&str]) -> Metadata {
        Metadata {
            codex_sync_custom: entries.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn parses_repo_and_path() {
        let dest = parse_custom_destination("a.com:b/c/").unwrap();
        assert_eq!(
            dest,
            CustomSyncDestination {
                repo: "a.com".into(),
                path: "b/c/".into()
            }
        );
    }

    #[test]
    fn splits_on_first_colon_only() {
        let dest = parse_custom_destination("site.io:docs/v1:legacy/").unwrap();
        assert_eq!(dest.repo, "site.io");
        assert_eq!(dest.path, "docs/v1:legacy/");
    }

    #[test]
    fn trims_both_halves() {
        let dest = parse_custom_destination("  site.io :  docs/  ").unwrap();
        assert_eq!(dest.repo, "site.io");
        assert_eq!(dest.path, "docs/");
    }

    #[test]
    fn rejects_malformed_directives() {
        assert_eq!(parse_custom_destination(""), Err(ValidationError::Empty));
        assert_eq!(parse_custom_destination("   "), Err(ValidationError::Empty));
        assert!(matches!(
            parse_custom_destination("a.com"),
            Err(ValidationError::MissingSeparator { .. })
        ));
        assert!(matches!(
            parse_custom_destination(" :docs/"),
            Err(ValidationError::EmptyRepo { .. })
        ));
        assert!(matches!(
            parse_custom_destination("a.com:  "),
            Err(ValidationError::EmptyPath { .. })
        ));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ValidationError::Empty.code(), "EMPTY_DESTINATION");
        let err = parse_custom_destination("a.com").unwrap_err();
        assert_eq!(err.code(), "MISSING_SEPARATOR");
        assert!(err.to_string().contains("a.com"));
    }

    #[test]
    fn skips_malformed_entries() {
        let metadata = metadata_with_custom(&["valid.com:p/", "bad-no-colon"]);
        assert_eq!(
            get_custom_sync_destinations(&metadata),
            vec![CustomSyncDestination {
                repo: "valid.com".into(),
                path: "p/".into()
            }]
        );
    }

    #[test]
    fn keeps_input_order() {
        let metadata = metadata_with_custom(&["b.com:x/", ":broken", "a.com:y/", "c.com:"]);
        let repos: Vec<String> = get_custom_sync_destinations(&metadata)
            .into_iter()
            .map(|d| d.repo)
            .collect();
        assert_eq!(repos, vec!["b.com", "a.com"]);
    }

    #[test]
    fn no_custom_field_means_no_destinations() {
        assert!(get_custom_sync_destinations(&Metadata::default()).is_empty());
    }
}
