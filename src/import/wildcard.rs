//! Wildcard expansion of import paths against a base directory.
//!
//! Resolves a glob pattern like `configs/**/*.yaml` into the concrete list
//! of configuration files it matches. Only files with a recognized
//! configuration extension are considered. Enumeration failures are treated
//! as "no matches", never as fatal errors; an unmatched pattern is the
//! caller's concern (the resolver logs a warning and moves on).

use std::path::{Path, PathBuf};

use log::debug;

use crate::filesystem::FileSystem;
use crate::import::matcher::{contains_wildcard, PathMatcher};
use crate::loader::CONFIG_EXTENSIONS;
use crate::path;

/// Resolves glob patterns into concrete configuration file paths.
pub struct WildcardPathFinder<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> WildcardPathFinder<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Resolve `pattern` against `base_path` into a list of absolute paths.
    ///
    /// Non-wildcard patterns resolve directly: a single-element list iff the
    /// file exists. Wildcard patterns scan from the directory containing the
    /// longest fixed prefix of the pattern and filter candidates by the
    /// remaining pattern suffix. Matches come back in filesystem-enumeration
    /// order; callers must not depend on the order for correctness.
    pub fn find_matching_paths(&self, pattern: &str, base_path: &Path) -> Vec<PathBuf> {
        if !contains_wildcard(pattern) {
            let resolved = path::resolve(pattern, base_path);
            if self.fs.exists(&resolved) {
                return vec![resolved];
            }
            return Vec::new();
        }

        let scan_root = match self.scan_root(pattern, base_path) {
            Some(root) => root,
            None => return Vec::new(),
        };

        let suffix = pattern_suffix(pattern, base_path, &scan_root);

        let files = match self.fs.walk(&scan_root) {
            Ok(files) => files,
            Err(e) => {
                debug!("Enumeration failed under {}: {}", scan_root.display(), e);
                return Vec::new();
            }
        };

        let candidates: Vec<PathBuf> = files
            .into_iter()
            .filter(|f| has_config_extension(f))
            .map(|f| path::normalize(&f))
            .collect();

        if suffix == "*" {
            return candidates;
        }

        // Wildcard import suffixes are always globs; the explicit
        // constructor keeps brace patterns out of the regex heuristic.
        let matcher = match PathMatcher::glob(&suffix) {
            Ok(matcher) => matcher,
            Err(e) => {
                debug!("Unusable pattern suffix '{}': {}", suffix, e);
                return Vec::new();
            }
        };

        let root_prefix = format!("{}/", path::to_slash_string(&scan_root));
        candidates
            .into_iter()
            .filter(|candidate| {
                let full = path::to_slash_string(candidate);
                let relative = full.strip_prefix(&root_prefix).unwrap_or(&full);
                matcher.is_match(relative)
            })
            .collect()
    }

    /// Directory containing the longest fixed (non-wildcard) prefix of the
    /// pattern, resolved against `base_path` when relative. `None` when that
    /// directory does not exist.
    fn scan_root(&self, pattern: &str, base_path: &Path) -> Option<PathBuf> {
        let first_wildcard = pattern
            .find(|c| ['*', '?', '[', '{'].contains(&c))
            .unwrap_or(pattern.len());
        let fixed = &pattern[..first_wildcard];

        let root = match fixed.rfind('/') {
            Some(idx) if idx > 0 => path::resolve(&fixed[..idx], base_path),
            Some(_) => PathBuf::from("/"),
            None => base_path.to_path_buf(),
        };

        if self.fs.is_dir(&root) {
            Some(root)
        } else {
            debug!("Wildcard scan root is not a directory: {}", root.display());
            None
        }
    }
}

/// The portion of the fully resolved pattern after the scan root, falling
/// back to the whole pattern when the root is not a literal prefix of it.
///
/// The joined pattern is lexically normalized first, matching how
/// `scan_root` resolves its directory, so parent-relative patterns like
/// `../shared/*.yaml` strip down to `*.yaml` rather than keeping their
/// `..` components.
fn pattern_suffix(pattern: &str, base_path: &Path, scan_root: &Path) -> String {
    let joined = if Path::new(pattern).is_absolute() {
        PathBuf::from(pattern)
    } else {
        base_path.join(pattern)
    };
    let full = path::to_slash_string(&path::normalize(&joined));
    let root_prefix = format!("{}/", path::to_slash_string(scan_root));
    match full.strip_prefix(&root_prefix) {
        Some(suffix) => suffix.to_string(),
        None => pattern.to_string(),
    }
}

fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
}
