//! Validate command implementation
//!
//! Parses the configuration, resolves all imports, and builds the document
//! registry without writing any output. Useful in CI to catch malformed
//! configs, broken imports, and circular import graphs before generation.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use ctx_gen::document::DocumentRegistry;
use ctx_gen::modifier::SourceModifierRegistry;
use ctx_gen::modifiers::register_builtins;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to config file (defaults to context.yaml and friends)
    #[arg(short, long, value_name = "PATH", env = "CTX_GEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the validate command
pub fn execute(args: ValidateArgs) -> Result<()> {
    let config_path = super::locate_config(args.config)?;
    let (merged, _base) = super::load_merged_config(&config_path)?;

    // Exercise the same parsing paths generation would use
    let mut modifiers = SourceModifierRegistry::new();
    register_builtins(&mut modifiers);
    super::generate::register_config_aliases(&mut modifiers, &merged)?;

    let documents = DocumentRegistry::from_config(&merged)?;

    if !args.quiet {
        println!("✅ {} is valid", config_path.display());
        println!(
            "   {} document{}",
            documents.len(),
            if documents.len() == 1 { "" } else { "s" }
        );
        for doc in documents.iter() {
            println!("   {} ({} sources)", doc.output_path, doc.sources.len());
        }
    }

    Ok(())
}
