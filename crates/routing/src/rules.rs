//! Include/exclude evaluation for a single candidate value.

use crate::pattern::match_any_pattern;

/// Decide whether `value` passes an include/exclude pattern pair.
///
/// Exclusion is checked first and always wins. An empty include list admits
/// every value that was not excluded.
///
/// # Examples
///
/// ```
/// use codex_routing::evaluate_patterns;
///
/// assert!(!evaluate_patterns("api-test", &["*"], &["*-test"]));
/// assert!(evaluate_patterns("anything", &[] as &[&str], &[] as &[&str]));
/// ```
pub fn evaluate_patterns<I, E>(value: &str, include: &[I], exclude: &[E]) -> bool
where
    I: AsRef<str>,
    E: AsRef<str>,
{
    if !exclude.is_empty() && match_any_pattern(exclude, value) {
        return false;
    }

    if include.is_empty() {
        return true;
    }

    match_any_pattern(include, value)
}
