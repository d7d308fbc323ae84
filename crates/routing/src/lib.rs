//! Routing decisions for codex documentation sync.
//!
//! Decides which downstream repositories receive each markdown document of
//! a central codex repository. Inputs are the document path, its parsed
//! frontmatter, and the organization's [`SyncRules`]; every function here is
//! pure and safe to call from many threads at once.
//!
//! # Examples
//!
//! ```
//! use codex_routing::{
//!     get_custom_sync_destinations, get_target_repos, AutoSyncPattern, Metadata, SyncRules,
//!     TargetQuery,
//! };
//!
//! let rules = SyncRules {
//!     auto_sync_patterns: vec![AutoSyncPattern::new("standards/*", ["*"])],
//!     ..SyncRules::default()
//! };
//! let metadata: Metadata = serde_yaml::from_str(
//!     "codex_sync_include: ['api-*']\ncodex_sync_custom: ['docs.example.com:api/']",
//! )
//! .unwrap();
//! let repos = ["api-gateway", "web-portal", "codex.fractary.com"];
//!
//! let targets = get_target_repos(&TargetQuery {
//!     file_path: "docs/auth.md",
//!     metadata: &metadata,
//!     source_repo: "codex.fractary.com",
//!     all_repos: &repos,
//!     rules: &rules,
//! });
//! assert_eq!(targets, vec!["api-gateway".to_string()]);
//!
//! let custom = get_custom_sync_destinations(&metadata);
//! assert_eq!(custom[0].repo, "docs.example.com");
//! ```

#![deny(unsafe_code)]

pub type Result<T> = std::result::Result<T, ValidationError>;

pub mod custom;
pub mod decision;
pub mod error;
pub mod pattern;
pub mod rules;
pub mod special;
pub mod types;

pub use custom::{get_custom_sync_destinations, parse_custom_destination, CustomSyncDestination};
#[cfg(feature = "parallel")]
pub use decision::get_target_repos_par;
pub use decision::{
    decide_sync, get_target_repos, should_sync_to_repo, DecisionReason, SyncDecision,
    SyncRequest, TargetQuery,
};
pub use error::ValidationError;
pub use pattern::{
    clear_pattern_cache, filter_by_patterns, glob_to_regex, match_any_pattern, match_pattern,
};
pub use rules::evaluate_patterns;
pub use special::{
    evaluate_auto_sync_patterns, evaluate_codex_sync, evaluate_self_sync, extract_system_name,
};
pub use types::{AutoSyncPattern, Metadata, SyncRules};
