//! Best-effort static dependency extraction.
//!
//! A fixed, ordered set of regex matchers is applied to the raw source text.
//! This is deliberately not a parser: dynamic imports are missed (false
//! negatives are accepted), duplicates are collapsed by set semantics, and
//! malformed code simply yields fewer candidates — never an error.

use regex::Regex;
use std::collections::BTreeSet;

/// Collect every module specifier captured by `patterns` (first capture
/// group), in source order, deduplicated.
pub fn scan(code: &str, patterns: &[Regex]) -> BTreeSet<String> {
    let mut specifiers = BTreeSet::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(code) {
            if let Some(m) = caps.get(1) {
                specifiers.insert(m.as_str().to_string());
            }
        }
    }
    specifiers
}

/// Normalize a module specifier to an installable package name.
///
/// Relative and absolute specifiers (starting with `.` or `/`) are local
/// files, not packages, and yield `None`. Sub-path qualifiers are stripped
/// down to the first path segment (`lodash/fp` → `lodash`).
pub fn first_segment(specifier: &str) -> Option<&str> {
    if specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }
    specifier.split('/').next().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Vec<Regex> {
        vec![Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap()]
    }

    #[test]
    fn scan_collects_and_dedupes() {
        let code = "const a = require('left-pad');\nconst b = require('left-pad');";
        let found = scan(code, &patterns());
        assert_eq!(found.len(), 1);
        assert!(found.contains("left-pad"));
    }

    #[test]
    fn scan_never_fails_on_garbage() {
        assert!(scan("not ( even \" close to valid", &patterns()).is_empty());
        assert!(scan("", &patterns()).is_empty());
    }

    #[test]
    fn first_segment_strips_subpaths() {
        assert_eq!(first_segment("lodash/fp"), Some("lodash"));
        assert_eq!(first_segment("lodash"), Some("lodash"));
    }

    #[test]
    fn first_segment_rejects_local_specifiers() {
        assert_eq!(first_segment("./utils"), None);
        assert_eq!(first_segment("../shared/lib"), None);
        assert_eq!(first_segment("/abs/path"), None);
    }
}
