//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Context Generator - Compile project context documents for AI assistants
#[derive(Parser, Debug)]
#[command(name = "ctx-gen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile all documents defined by the configuration
    Generate(commands::generate::GenerateArgs),

    /// Parse and resolve a configuration without writing any output
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Generate(args) => commands::generate::execute(args),
            Commands::Validate(args) => commands::validate::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Warn);
    // try_init so tests invoking execute() twice do not panic
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp(None)
        .try_init();
}
