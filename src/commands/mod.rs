//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `ctx-gen` command-line tool. Each subcommand is defined in its own file
//! to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and
//!   options, derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `ctx_gen` library.

pub mod generate;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_yaml::Mapping;

use ctx_gen::filesystem::OsFileSystem;
use ctx_gen::import::ImportResolver;
use ctx_gen::loader::{FormatLoader, CONFIG_EXTENSIONS};

/// Resolve the configuration file path, defaulting to `context.<ext>` in
/// the current directory for each supported extension.
pub(crate) fn locate_config(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }
        return Ok(path);
    }
    for ext in CONFIG_EXTENSIONS {
        let candidate = PathBuf::from(format!("context.{}", ext));
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    anyhow::bail!(
        "No configuration file found (looked for context.{{{}}})",
        CONFIG_EXTENSIONS.join(",")
    )
}

/// Load the entry configuration and resolve all of its imports.
///
/// Returns the merged raw configuration and the base directory every
/// relative path in it is resolved against (the entry config's parent).
pub(crate) fn load_merged_config(config_path: &Path) -> anyhow::Result<(Mapping, PathBuf)> {
    let canonical = std::fs::canonicalize(config_path)
        .with_context(|| format!("Cannot resolve {}", config_path.display()))?;
    let base = canonical
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let fs = OsFileSystem::new();
    let loader = FormatLoader::new(&fs);
    let raw = loader.load_path(&canonical)?;

    let resolver = ImportResolver::new(&loader, &fs);
    let merged = resolver.resolve_imports(raw, &base)?;
    Ok((merged, base))
}
