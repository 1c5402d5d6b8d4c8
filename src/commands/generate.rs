//! Generate command implementation
//!
//! The generate command executes the full pipeline:
//! 1. Locate and parse the entry configuration file
//! 2. Recursively resolve and merge imports
//! 3. Build the modifier registry (built-ins plus config aliases)
//! 4. Build the document registry from the merged configuration
//! 5. Compile every document to its output file

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use ctx_gen::compiler::{DocumentCompiler, LocalSourceParser};
use ctx_gen::document::DocumentRegistry;
use ctx_gen::filesystem::OsFileSystem;
use ctx_gen::modifier::{ModifierSpec, SourceModifierRegistry};
use ctx_gen::modifiers::register_builtins;
use serde_yaml::Mapping;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to config file (defaults to context.yaml and friends)
    #[arg(short, long, value_name = "PATH", env = "CTX_GEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show what would be compiled without writing files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let start_time = Instant::now();

    let config_path = super::locate_config(args.config)?;
    let (merged, base) = super::load_merged_config(&config_path)?;

    let mut modifiers = SourceModifierRegistry::new();
    register_builtins(&mut modifiers);
    register_config_aliases(&mut modifiers, &merged)?;

    let documents = DocumentRegistry::from_config(&merged)?;
    if documents.is_empty() {
        if !args.quiet {
            println!("Nothing to do: the configuration defines no documents");
        }
        return Ok(());
    }

    if args.dry_run {
        if !args.quiet {
            println!("DRY RUN - no files will be written");
            for doc in documents.iter() {
                println!("  {} ({} sources)", doc.output_path, doc.sources.len());
            }
        }
        return Ok(());
    }

    let reader = OsFileSystem::new();
    let parser = LocalSourceParser::new(&reader, base.clone());
    let compiler = DocumentCompiler::new(&parser, &modifiers, base);

    let mut writer = OsFileSystem::new();
    let results = compiler.compile_all(&documents, &mut writer)?;

    if !args.quiet {
        let compiled = results.iter().filter(|r| !r.skipped).count();
        let skipped = results.len() - compiled;
        let duration = start_time.elapsed();

        println!(
            "✅ Compiled {} document{} in {:.2}s",
            compiled,
            if compiled == 1 { "" } else { "s" },
            duration.as_secs_f64()
        );
        if skipped > 0 {
            println!("   {} skipped (output exists, overwrite disabled)", skipped);
        }
        for result in results.iter().filter(|r| !r.skipped) {
            println!("   {}", result.output_path.display());
        }
    }

    Ok(())
}

/// Register every entry of the top-level `modifiers` mapping as a named
/// alias for a pre-configured modifier spec.
pub(crate) fn register_config_aliases(
    registry: &mut SourceModifierRegistry,
    config: &Mapping,
) -> Result<()> {
    let aliases = match config.get("modifiers") {
        None => return Ok(()),
        Some(value) => value
            .as_mapping()
            .context("'modifiers' must be a mapping of alias name to modifier spec")?,
    };
    for (name, spec) in aliases {
        let name = name
            .as_str()
            .context("modifier alias names must be strings")?;
        let spec: ModifierSpec = serde_yaml::from_value(spec.clone())
            .with_context(|| format!("invalid modifier alias '{}'", name))?;
        registry.register_alias(name, spec);
    }
    Ok(())
}
