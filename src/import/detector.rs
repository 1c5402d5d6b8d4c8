//! Circular import detection for the import graph walk.
//!
//! The detector keeps an ordered stack of the absolute paths currently being
//! resolved. A path may appear at most once on the stack; re-entering a path
//! still in flight is a circular import. One detector instance lives for
//! exactly one full import-graph traversal and is threaded through the
//! recursion inside the resolution context, never as ambient state.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::to_slash_string;

/// Stack of absolute import paths currently being processed.
#[derive(Debug, Default)]
pub struct CircularImportDetector {
    stack: Vec<PathBuf>,
}

impl CircularImportDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff `path` is already anywhere on the processing stack.
    pub fn would_create_cycle(&self, path: &Path) -> bool {
        self.stack.iter().any(|p| p == path)
    }

    /// Push `path` onto the stack, failing with `CircularImport` when it is
    /// already in flight. The error carries the full stack trail.
    pub fn begin_processing(&mut self, path: &Path) -> Result<()> {
        if self.would_create_cycle(path) {
            return Err(Error::CircularImport {
                path: to_slash_string(path),
                stack: self.trail(),
            });
        }
        self.stack.push(path.to_path_buf());
        Ok(())
    }

    /// Truncate the stack at the first occurrence of `path`, removing it and
    /// everything pushed after it. Tolerates out-of-order unwinding from
    /// errors in nested imports; unknown paths are a no-op.
    pub fn end_processing(&mut self, path: &Path) {
        if let Some(idx) = self.stack.iter().position(|p| p == path) {
            self.stack.truncate(idx);
        }
    }

    /// The current stack joined with `" -> "`, for diagnostics.
    pub fn trail(&self) -> String {
        self.stack
            .iter()
            .map(|p| to_slash_string(p))
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Number of paths currently in flight.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reentering_in_flight_path_is_a_cycle() {
        let mut detector = CircularImportDetector::new();
        detector.begin_processing(Path::new("/a.yaml")).unwrap();
        detector.begin_processing(Path::new("/b.yaml")).unwrap();

        let err = detector.begin_processing(Path::new("/a.yaml")).unwrap_err();
        match err {
            Error::CircularImport { path, stack } => {
                assert_eq!(path, "/a.yaml");
                assert_eq!(stack, "/a.yaml -> /b.yaml");
            }
            other => panic!("expected CircularImport, got {}", other),
        }
    }

    #[test]
    fn test_balanced_end_processing_empties_stack() {
        let mut detector = CircularImportDetector::new();
        detector.begin_processing(Path::new("/a.yaml")).unwrap();
        detector.begin_processing(Path::new("/b.yaml")).unwrap();

        detector.end_processing(Path::new("/b.yaml"));
        detector.end_processing(Path::new("/a.yaml"));
        assert_eq!(detector.depth(), 0);
    }

    #[test]
    fn test_end_processing_truncates_at_first_occurrence() {
        let mut detector = CircularImportDetector::new();
        detector.begin_processing(Path::new("/a.yaml")).unwrap();
        detector.begin_processing(Path::new("/b.yaml")).unwrap();
        detector.begin_processing(Path::new("/c.yaml")).unwrap();

        // Removing B drops everything pushed after it as well
        detector.end_processing(Path::new("/b.yaml"));
        assert_eq!(detector.depth(), 1);
        assert!(!detector.would_create_cycle(Path::new("/c.yaml")));
        assert!(detector.would_create_cycle(Path::new("/a.yaml")));
    }

    #[test]
    fn test_end_processing_unknown_path_is_noop() {
        let mut detector = CircularImportDetector::new();
        detector.begin_processing(Path::new("/a.yaml")).unwrap();
        detector.end_processing(Path::new("/never-seen.yaml"));
        assert_eq!(detector.depth(), 1);
    }

    #[test]
    fn test_path_reusable_after_completion() {
        let mut detector = CircularImportDetector::new();
        detector.begin_processing(Path::new("/a.yaml")).unwrap();
        detector.end_processing(Path::new("/a.yaml"));
        // Not recursive, so not a cycle
        assert!(detector.begin_processing(Path::new("/a.yaml")).is_ok());
    }
}
