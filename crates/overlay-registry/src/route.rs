//! Path pattern matching
//!
//! Patterns are paths whose segments are either literals or dynamic
//! segments written as a bracketed token (`/services/[id]`). A dynamic
//! segment matches exactly one concrete segment. Matching operates on
//! pre-split segment slices so it can be tested without any registry.

use std::collections::BTreeMap;

/// Values captured by dynamic segments, keyed by the bracketed name.
pub type Params = BTreeMap<String, String>;

/// A concrete path matched against a registered pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The registered pattern that matched
    pub pattern: String,
    /// Values captured by the pattern's dynamic segments
    pub params: Params,
}

/// Split a path into its non-empty segments.
///
/// Leading, trailing and repeated slashes do not produce segments, so
/// `/a/b/` and `/a/b` split identically.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Whether a pattern segment is a dynamic (wildcard) segment.
pub fn is_dynamic(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('[') && segment.ends_with(']')
}

/// Name of a dynamic segment (`[id]` -> `id`).
pub fn dynamic_name(segment: &str) -> Option<&str> {
    if is_dynamic(segment) {
        Some(&segment[1..segment.len() - 1])
    } else {
        None
    }
}

/// Whether a pattern contains at least one dynamic segment.
pub fn has_dynamic_segments(pattern: &str) -> bool {
    split_segments(pattern).into_iter().any(is_dynamic)
}

/// Match pre-split segments, returning the captured params on success.
///
/// Segment counts must be equal. Dynamic segments accept any value; every
/// other segment must match literally.
pub fn match_segments(pattern: &[&str], path: &[&str]) -> Option<Params> {
    if pattern.len() != path.len() {
        return None;
    }

    let mut params = Params::new();
    for (expected, actual) in pattern.iter().zip(path) {
        match dynamic_name(expected) {
            Some(name) => {
                params.insert(name.to_string(), (*actual).to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(params)
}

/// Whether pre-split segments match.
pub fn segments_match(pattern: &[&str], path: &[&str]) -> bool {
    match_segments(pattern, path).is_some()
}

/// Match a concrete path against a pattern.
pub fn captures(pattern: &str, path: &str) -> Option<Params> {
    match_segments(&split_segments(pattern), &split_segments(path))
}

/// Whether a concrete path matches a pattern.
pub fn matches(pattern: &str, path: &str) -> bool {
    captures(pattern, path).is_some()
}
