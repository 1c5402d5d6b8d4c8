//! Property-based tests for path pattern matching.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::import::matcher::{contains_wildcard, PathMatcher};
    use crate::path::normalize;
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    // ============================================================================
    // PathMatcher property tests
    // ============================================================================

    proptest! {
        /// Property: glob compilation never panics, whatever the input
        #[test]
        fn glob_compilation_never_panics(pattern in ".*") {
            let _ = PathMatcher::glob(&pattern);
        }

        /// Property: heuristic construction never panics, whatever the input
        #[test]
        fn heuristic_construction_never_panics(pattern in ".*") {
            let _ = PathMatcher::new(&pattern);
        }

        /// Property: a literal path pattern (no wildcards, no regex
        /// metacharacters) matches itself
        #[test]
        fn literal_pattern_matches_itself(path in "[a-zA-Z0-9_]{1,10}(/[a-zA-Z0-9_]{1,10}){0,3}") {
            let matcher = PathMatcher::new(&path).unwrap();
            prop_assert!(matcher.is_match(&path), "'{}' should match itself", path);
        }

        /// Property: matching is deterministic
        #[test]
        fn matching_is_deterministic(
            pattern in "[a-zA-Z0-9*?_./]{1,20}",
            path in "[a-zA-Z0-9_./]{1,20}",
        ) {
            let result1 = PathMatcher::new(&pattern);
            let result2 = PathMatcher::new(&pattern);
            prop_assert_eq!(result1.is_ok(), result2.is_ok());
            if let (Ok(m1), Ok(m2)) = (result1, result2) {
                prop_assert_eq!(m1.is_match(&path), m2.is_match(&path));
            }
        }

        /// Property: a `*` component never matches across a slash
        #[test]
        fn star_never_crosses_directories(
            prefix in "[a-z]{1,8}",
            nested in "[a-z]{1,8}/[a-z]{1,8}",
        ) {
            let pattern = format!("{}/*", prefix);
            let matcher = PathMatcher::glob(&pattern).unwrap();
            let path = format!("{}/{}", prefix, nested);
            prop_assert!(
                !matcher.is_match(&path),
                "'{}' should not match '{}'",
                pattern,
                path
            );
        }

        /// Property: `contains_wildcard` agrees with the presence of glob
        /// metacharacters in the pattern
        #[test]
        fn contains_wildcard_matches_metachars(pattern in "[a-zA-Z0-9*?_./\\[\\]{}]{0,20}") {
            let expected = pattern.contains('*')
                || pattern.contains('?')
                || pattern.contains('[')
                || pattern.contains('{');
            prop_assert_eq!(contains_wildcard(&pattern), expected);
        }
    }

    // ============================================================================
    // path normalization property tests
    // ============================================================================

    proptest! {
        /// Property: normalization is idempotent
        #[test]
        fn normalize_is_idempotent(path in "[a-zA-Z0-9_./]{0,40}") {
            let once = normalize(Path::new(&path));
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: normalized paths contain no `.` or `..` components
        /// when the input never escapes its root
        #[test]
        fn normalize_removes_dot_components(
            components in prop::collection::vec("[a-z]{1,6}", 1..5),
        ) {
            let mut raw = PathBuf::from("/root");
            for component in &components {
                raw.push(".");
                raw.push(component);
            }
            let normalized = normalize(&raw);
            let has_dots = normalized
                .components()
                .any(|c| matches!(c, std::path::Component::CurDir | std::path::Component::ParentDir));
            prop_assert!(!has_dots, "normalize left dot components in {:?}", normalized);
        }
    }
}
