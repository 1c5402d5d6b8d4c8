//! Recursive import-graph resolution and configuration merging.
//!
//! `ImportResolver` walks the `import` directive of a raw configuration:
//! each entry is loaded (through the [`ConfigLoading`] seam), resolved
//! recursively with the imported file's own directory as the new base path,
//! rewritten (output-path prefixing, source-path rebasing), and merged into
//! the root configuration. Wildcard entries expand to zero or more concrete
//! files first.
//!
//! ## Traversal state
//!
//! One [`ResolutionContext`] lives for exactly one top-level
//! `resolve_imports` call and is threaded by `&mut` through the recursion.
//! It carries two distinct guards:
//!
//! - the *parsed-imports* list: an idempotent re-import guard, so the same
//!   absolute path referenced twice (directly or via two wildcard
//!   expansions) is merged only once, and
//! - the [`CircularImportDetector`]: a stack of in-flight paths catching
//!   *recursive* self-reference, which is an error.
//!
//! Hard failures (`ConfigLoad`, `CircularImport`) abort the entire
//! resolution. An unmatched wildcard is not an error; it logs a warning and
//! contributes nothing.

use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::import::config::ImportConfig;
use crate::import::detector::CircularImportDetector;
use crate::import::prefix::{prefix_document_outputs, rebase_source_paths};
use crate::import::wildcard::WildcardPathFinder;
use crate::loader::ConfigLoading;

/// Nesting limit for legitimate (acyclic) import chains. The cycle detector
/// only catches re-entrant paths; this bounds chain depth as well.
pub const MAX_IMPORT_DEPTH: usize = 32;

/// Mutable state for one full import-graph traversal.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    parsed: Vec<PathBuf>,
    detector: CircularImportDetector,
    depth: usize,
}

impl ResolutionContext {
    fn already_parsed(&self, path: &Path) -> bool {
        self.parsed.iter().any(|p| p == path)
    }

    fn mark_parsed(&mut self, path: &Path) {
        self.parsed.push(path.to_path_buf());
    }
}

/// Resolves the import graph of a raw configuration into one merged mapping.
pub struct ImportResolver<'a> {
    loader: &'a dyn ConfigLoading,
    fs: &'a dyn FileSystem,
}

impl<'a> ImportResolver<'a> {
    pub fn new(loader: &'a dyn ConfigLoading, fs: &'a dyn FileSystem) -> Self {
        Self { loader, fs }
    }

    /// Resolve all imports of `config`, recursively, and return the fully
    /// merged configuration with the `import` key removed.
    pub fn resolve_imports(&self, config: Mapping, base_path: &Path) -> Result<Mapping> {
        let mut ctx = ResolutionContext::default();
        self.resolve(config, base_path, &mut ctx)
    }

    fn resolve(
        &self,
        mut config: Mapping,
        base_path: &Path,
        ctx: &mut ResolutionContext,
    ) -> Result<Mapping> {
        let entries = match config.get("import") {
            None => return Ok(config),
            Some(Value::Sequence(seq)) if seq.is_empty() => return Ok(config),
            Some(Value::Sequence(seq)) => seq.clone(),
            Some(_) => {
                return Err(Error::ConfigLoad {
                    message: "'import' must be a list of import entries".to_string(),
                    hint: Some("Write imports as `import:\n  - path: configs/api.yaml`".to_string()),
                });
            }
        };

        let mut imported: Vec<Mapping> = Vec::new();
        for entry in &entries {
            let import = ImportConfig::from_value(entry, base_path)?;
            if import.has_wildcard {
                let finder = WildcardPathFinder::new(self.fs);
                let matches = finder.find_matching_paths(&import.path, base_path);
                if matches.is_empty() {
                    warn!(
                        "Wildcard import '{}' matched no configuration files under {}",
                        import.path,
                        base_path.display()
                    );
                    continue;
                }
                for matched in matches {
                    if ctx.already_parsed(&matched) {
                        debug!("Skipping already-imported file: {}", matched.display());
                        continue;
                    }
                    let synthesized = import.for_wildcard_match(&matched, base_path);
                    self.process_single(&synthesized, ctx, &mut imported)?;
                }
            } else {
                self.process_single(&import, ctx, &mut imported)?;
            }
        }

        config.remove("import");
        Ok(merge_configs(config, imported))
    }

    /// Resolve one concrete (non-wildcard) import and append its transformed
    /// configuration to `out`.
    fn process_single(
        &self,
        import: &ImportConfig,
        ctx: &mut ResolutionContext,
        out: &mut Vec<Mapping>,
    ) -> Result<()> {
        if ctx.already_parsed(&import.absolute_path) {
            debug!(
                "Skipping already-imported file: {}",
                import.absolute_path.display()
            );
            return Ok(());
        }

        ctx.detector.begin_processing(&import.absolute_path)?;
        let outcome = self.load_and_resolve(import, ctx);
        // Must run even when nested resolution failed, so siblings in the
        // same traversal see an intact stack.
        ctx.detector.end_processing(&import.absolute_path);

        match outcome {
            Ok(mut resolved) => {
                if let Some(prefix) = &import.path_prefix {
                    prefix_document_outputs(&mut resolved, prefix);
                }
                let base_dir = import.absolute_path.parent().unwrap_or(Path::new("."));
                rebase_source_paths(&mut resolved, base_dir);
                out.push(resolved);
                ctx.mark_parsed(&import.absolute_path);
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to resolve import '{}' ({}): {}",
                    import.path,
                    import.absolute_path.display(),
                    e
                );
                Err(e)
            }
        }
    }

    fn load_and_resolve(
        &self,
        import: &ImportConfig,
        ctx: &mut ResolutionContext,
    ) -> Result<Mapping> {
        if ctx.depth >= MAX_IMPORT_DEPTH {
            return Err(Error::ConfigLoad {
                message: format!(
                    "Maximum import depth ({}) exceeded at {}",
                    MAX_IMPORT_DEPTH,
                    import.absolute_path.display()
                ),
                hint: Some("Check the configuration for overly deep import chains".to_string()),
            });
        }

        let raw = self.loader.load_import(import)?;
        let base_path = import.absolute_path.parent().unwrap_or(Path::new("."));

        ctx.depth += 1;
        let resolved = self.resolve(raw, base_path, ctx);
        ctx.depth -= 1;
        resolved
    }
}

/// Merge `[root, import1, import2, ...]` in declaration order.
///
/// `documents` lists concatenate across all configs; every other top-level
/// key follows last-write-wins.
fn merge_configs(root: Mapping, imported: Vec<Mapping>) -> Mapping {
    let mut merged = root;
    for mut config in imported {
        if let Some(Value::Sequence(new_docs)) = config.remove("documents") {
            match merged.get_mut("documents").and_then(Value::as_sequence_mut) {
                Some(existing) => existing.extend(new_docs),
                None => {
                    merged.insert(Value::from("documents"), Value::Sequence(new_docs));
                }
            }
        }
        for (key, value) in config {
            merged.insert(key, value);
        }
    }
    merged
}
