//! Glob-style pattern matching with bash-compatible semantics.
//!
//! Patterns understand two wildcards:
//! - `*` matches zero or more characters of any kind, `/` included
//! - `?` matches exactly one character
//!
//! Every other character is literal. In particular `.` is a plain dot, so
//! `codex.*.com` never matches `codexXfractaryXcom`. Matches are always
//! anchored to the whole value.
//!
//! Bracket classes (`[abc]`, `[!abc]`) are not interpreted: brackets match
//! themselves, which keeps results identical to the existing shell tooling.
//!
//! Compiled matchers may grow to [`PATTERN_SIZE_LIMIT`] bytes, enough for
//! patterns of several hundred thousand wildcards. A pattern beyond that
//! cannot be compiled and matches nothing.

use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Compiled matchers kept before the cache is flushed.
const CACHE_LIMIT: usize = 1024;

/// Upper bound on the compiled size of a single matcher, in bytes.
pub const PATTERN_SIZE_LIMIT: usize = 256 * (1 << 20);

static PATTERN_CACHE: LazyLock<RwLock<HashMap<String, Arc<Regex>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Translate a glob pattern into anchored regex source.
///
/// All regex metacharacters are escaped first, then `*` becomes `.*` and
/// `?` becomes `.`.
pub fn glob_to_regex_source(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() * 2 + 8);
    source.push_str("(?s)^");
    let mut buf = [0u8; 4];
    for ch in pattern.chars() {
        match ch {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut buf))),
        }
    }
    source.push('$');
    source
}

/// Compile a glob pattern into an anchored matcher.
///
/// Matchers are memoized by raw pattern string. The cache is process-wide
/// and safe to share across threads; a flushed cache only costs a
/// recompilation.
pub fn glob_to_regex(pattern: &str) -> Result<Arc<Regex>, regex::Error> {
    if let Some(re) = PATTERN_CACHE.read().get(pattern) {
        tracing::trace!(target: "codex::routing", pattern, "pattern cache hit");
        return Ok(Arc::clone(re));
    }

    tracing::trace!(target: "codex::routing", pattern, "pattern cache miss");
    let compiled = Arc::new(
        RegexBuilder::new(&glob_to_regex_source(pattern))
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()?,
    );

    let mut cache = PATTERN_CACHE.write();
    if cache.len() >= CACHE_LIMIT {
        cache.clear();
    }
    cache.insert(pattern.to_string(), Arc::clone(&compiled));
    Ok(compiled)
}

/// Drop every memoized matcher.
pub fn clear_pattern_cache() {
    PATTERN_CACHE.write().clear();
}

/// Check whether `value` matches `pattern` in full.
///
/// # Examples
///
/// ```
/// use codex_routing::match_pattern;
///
/// assert!(match_pattern("api-*", "api-gateway"));
/// assert!(match_pattern("codex.*.com", "codex.fractary.com"));
/// assert!(!match_pattern("codex.*.com", "codexXfractaryXcom"));
/// ```
pub fn match_pattern(pattern: &str, value: &str) -> bool {
    if pattern == value {
        return true;
    }
    // Without wildcards only exact equality can match.
    if !pattern.contains(['*', '?']) {
        return false;
    }

    match glob_to_regex(pattern) {
        Ok(re) => re.is_match(value),
        Err(err) => {
            tracing::warn!(
                target: "codex::routing",
                pattern,
                error = %err,
                "Pattern could not be compiled; treating as no match"
            );
            false
        }
    }
}

/// Check whether `value` matches any of `patterns`.
///
/// A lone `*` matches everything without touching the matcher. An empty
/// pattern list matches nothing.
pub fn match_any_pattern<S: AsRef<str>>(patterns: &[S], value: &str) -> bool {
    if let [only] = patterns {
        if only.as_ref() == "*" {
            return true;
        }
    }

    patterns
        .iter()
        .any(|pattern| match_pattern(pattern.as_ref(), value))
}

/// Keep the values matching any of `patterns`, preserving input order.
pub fn filter_by_patterns<S, V>(patterns: &[S], values: &[V]) -> Vec<String>
where
    S: AsRef<str>,
    V: AsRef<str>,
{
    values
        .iter()
        .map(V::as_ref)
        .filter(|value| match_any_pattern(patterns, value))
        .map(str::to_string)
        .collect()
}
