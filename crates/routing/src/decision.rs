//! Per-repository routing decisions and batch target resolution.
//!
//! Rules are evaluated in a fixed priority order and the first one that
//! applies decides:
//!
//! 1. auto-sync patterns from configuration
//! 2. self-sync prevention
//! 3. codex repository prevention
//! 4. document frontmatter (`codex_sync_include` / `codex_sync_exclude`)
//!
//! A document with no include patterns is not routed anywhere by step 4.

use crate::rules::evaluate_patterns;
use crate::special::{
    evaluate_auto_sync_entry, evaluate_codex_sync, evaluate_self_sync, matching_auto_sync_pattern,
};
use crate::types::{Metadata, SyncRules};
use serde::{Deserialize, Serialize};

/// Inputs for deciding one (document, target repository) pair.
#[derive(Debug, Clone, Copy)]
pub struct SyncRequest<'a> {
    pub file_path: &'a str,
    pub metadata: &'a Metadata,
    pub target_repo: &'a str,
    pub source_repo: &'a str,
    pub rules: &'a SyncRules,
}

/// Inputs for resolving every target repository of one document.
#[derive(Debug, Clone, Copy)]
pub struct TargetQuery<'a, R> {
    pub file_path: &'a str,
    pub metadata: &'a Metadata,
    pub source_repo: &'a str,
    pub all_repos: &'a [R],
    pub rules: &'a SyncRules,
}

impl<'a, R: AsRef<str>> TargetQuery<'a, R> {
    fn request_for(&self, target_repo: &'a str) -> SyncRequest<'a> {
        SyncRequest {
            file_path: self.file_path,
            metadata: self.metadata,
            target_repo,
            source_repo: self.source_repo,
            rules: self.rules,
        }
    }
}

/// Which rule settled a routing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DecisionReason {
    /// An auto-sync pattern matched the file path.
    AutoSyncPattern { index: usize, pattern: String },
    /// The document lives under the target's own `systems/` subtree.
    SelfSync { system: String },
    /// The target is the source repository or a codex repository.
    CodexRepository,
    /// Frontmatter routing is switched off for the organization.
    ProjectOverridesDisabled,
    /// The document's own include/exclude patterns decided.
    Frontmatter,
}

impl DecisionReason {
    /// Returns a human-readable description of the reason.
    pub fn description(&self) -> String {
        match self {
            Self::AutoSyncPattern { index, pattern } => {
                format!("auto-sync pattern #{} ('{}') matched the file path", index, pattern)
            }
            Self::SelfSync { system } => {
                format!("document belongs to system '{}' and is not synced back to it", system)
            }
            Self::CodexRepository => "target is the source or a codex repository".to_string(),
            Self::ProjectOverridesDisabled => {
                "frontmatter routing is disabled by organization rules".to_string()
            }
            Self::Frontmatter => "decided by document frontmatter".to_string(),
        }
    }
}

/// A routing decision together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDecision {
    pub sync: bool,
    pub reason: DecisionReason,
}

/// Decide whether a document goes to `target_repo`, recording why.
pub fn decide_sync(request: &SyncRequest<'_>) -> SyncDecision {
    let decision = evaluate_chain(request);
    tracing::debug!(
        target: "codex::routing",
        file = request.file_path,
        target_repo = request.target_repo,
        sync = decision.sync,
        reason = ?decision.reason,
        "Routing decision"
    );
    decision
}

fn evaluate_chain(request: &SyncRequest<'_>) -> SyncDecision {
    let SyncRequest {
        file_path,
        metadata,
        target_repo,
        source_repo,
        rules,
    } = *request;

    if let Some((index, entry)) = matching_auto_sync_pattern(file_path, rules) {
        return SyncDecision {
            sync: evaluate_auto_sync_entry(entry, target_repo),
            reason: DecisionReason::AutoSyncPattern {
                index,
                pattern: entry.pattern.clone(),
            },
        };
    }

    if let Some(sync) = evaluate_self_sync(file_path, target_repo, rules) {
        return SyncDecision {
            sync,
            reason: DecisionReason::SelfSync {
                system: target_repo.to_string(),
            },
        };
    }

    if let Some(sync) = evaluate_codex_sync(target_repo, source_repo, rules) {
        return SyncDecision {
            sync,
            reason: DecisionReason::CodexRepository,
        };
    }

    if !rules.allow_project_overrides {
        return SyncDecision {
            sync: false,
            reason: DecisionReason::ProjectOverridesDisabled,
        };
    }

    // No include patterns in frontmatter means the document stays put.
    let sync = !metadata.codex_sync_include.is_empty()
        && evaluate_patterns(
            target_repo,
            &metadata.codex_sync_include,
            &metadata.codex_sync_exclude,
        );
    SyncDecision {
        sync,
        reason: DecisionReason::Frontmatter,
    }
}

/// Decide whether a document should be distributed to `target_repo`.
///
/// # Examples
///
/// ```
/// use codex_routing::{should_sync_to_repo, Metadata, SyncRequest, SyncRules};
///
/// let metadata = Metadata::with_include(["api-*"]);
/// let rules = SyncRules::default();
/// let request = SyncRequest {
///     file_path: "docs/auth.md",
///     metadata: &metadata,
///     target_repo: "api-gateway",
///     source_repo: "codex.fractary.com",
///     rules: &rules,
/// };
/// assert!(should_sync_to_repo(&request));
/// ```
pub fn should_sync_to_repo(request: &SyncRequest<'_>) -> bool {
    decide_sync(request).sync
}

/// Every repository in `all_repos` the document should reach, in input order.
pub fn get_target_repos<R: AsRef<str>>(query: &TargetQuery<'_, R>) -> Vec<String> {
    let targets: Vec<String> = query
        .all_repos
        .iter()
        .map(R::as_ref)
        .filter(|repo| should_sync_to_repo(&query.request_for(*repo)))
        .map(str::to_string)
        .collect();

    tracing::debug!(
        target: "codex::routing",
        file = query.file_path,
        candidates = query.all_repos.len(),
        selected = targets.len(),
        "Resolved target repositories"
    );
    targets
}

/// Parallel form of [`get_target_repos`] with identical, ordered output.
#[cfg(feature = "parallel")]
pub fn get_target_repos_par<R>(query: &TargetQuery<'_, R>) -> Vec<String>
where
    R: AsRef<str> + Sync,
{
    use rayon::prelude::*;

    query
        .all_repos
        .par_iter()
        .map(R::as_ref)
        .filter(|repo| should_sync_to_repo(&query.request_for(*repo)))
        .map(str::to_string)
        .collect()
}
