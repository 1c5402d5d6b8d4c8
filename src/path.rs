//! Path manipulation utilities for ctx-gen
//!
//! Import resolution deals in paths written as config strings, resolved
//! against the directory of whichever config file mentioned them. The
//! helpers here do purely lexical work: no filesystem access, so the same
//! logic serves both the real filesystem and the in-memory one in tests.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: resolve `.` and `..` components without
/// touching the filesystem.
///
/// `..` at the start of a relative path is preserved since there is nothing
/// to pop.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = result.components().next_back().is_some_and(|c| {
                    !matches!(c, Component::RootDir | Component::Prefix(_) | Component::ParentDir)
                });
                if popped {
                    result.pop();
                } else if !matches!(result.components().next_back(), Some(Component::RootDir)) {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}

/// Resolve a raw config path string against a base directory.
///
/// Absolute paths pass through unchanged (normalized); relative paths are
/// joined onto `base`.
pub fn resolve(raw: &str, base: &Path) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Render a path with forward slashes, as used in config strings and for
/// pattern matching.
pub fn to_slash_string(path: &Path) -> String {
    let s = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Join two config-path strings with a single `/`, trimming redundant
/// separators at the boundary.
pub fn join_str(prefix: &str, rest: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let rest = rest.trim_start_matches("./").trim_start_matches('/');
    if prefix.is_empty() {
        rest.to_string()
    } else {
        format!("{}/{}", prefix, rest)
    }
}
