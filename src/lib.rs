//! # Context Generation Library
//!
//! This library provides the core functionality for compiling project
//! context documents: flat markdown files assembled from files, inline
//! text, and other sources, driven by a YAML/JSON/TOML configuration. It
//! is designed to be used by the `ctx-gen` command-line tool but can also
//! be embedded in other applications that need to produce AI-ready
//! context files.
//!
//! ## Quick Example
//!
//! ```
//! use ctx_gen::compiler::{DocumentCompiler, LocalSourceParser};
//! use ctx_gen::document::DocumentRegistry;
//! use ctx_gen::filesystem::MemoryFS;
//! use ctx_gen::modifier::SourceModifierRegistry;
//!
//! // Stage a project on an in-memory filesystem
//! let mut fs = MemoryFS::new();
//! fs.add_file("/project/src/lib.rs", "pub fn answer() -> u32 { 42 }\n");
//!
//! let config: serde_yaml::Mapping = serde_yaml::from_str(
//!     r#"
//! documents:
//!   - description: Library context
//!     outputPath: context.md
//!     sources:
//!       - type: file
//!         sourcePaths: ["src"]
//! "#,
//! )
//! .unwrap();
//!
//! let documents = DocumentRegistry::from_config(&config).unwrap();
//! let modifiers = SourceModifierRegistry::new();
//! let reader = fs.clone();
//! let parser = LocalSourceParser::new(&reader, "/project");
//! let compiler = DocumentCompiler::new(&parser, &modifiers, "/project");
//!
//! let results = compiler.compile_all(&documents, &mut fs).unwrap();
//! assert_eq!(results.len(), 1);
//! assert!(fs.get_file("/project/context.md").unwrap().contains("answer"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Raw Configuration**: Configs are loaded into a generic
//!   `serde_yaml::Mapping` first, because import resolution rewrites and
//!   merges them before any typed model exists.
//! - **Import Resolution (`import`)**: Recursively resolves `import`
//!   directives (including wildcard paths), detects circular imports, and
//!   merges everything into one configuration.
//! - **Document Model (`document`)**: The typed registry of documents and
//!   sources built from the merged configuration.
//! - **Modifiers (`modifier`, `modifiers`)**: Named content transforms
//!   applied to each source before it is embedded.
//! - **Compilation (`compiler`)**: Assembles each document's sources into
//!   one flat markdown output file.
//! - **Filesystem (`filesystem`)**: A trait seam over file access so the
//!   whole pipeline runs against an in-memory filesystem in tests.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: Parse the entry configuration file (`loader`).
//! 2.  **Resolve**: Recursively resolve and merge imports (`import`).
//! 3.  **Model**: Build the document registry from the merged config.
//! 4.  **Compile**: For each document, parse sources, apply modifiers,
//!     and write the assembled markdown file.

pub mod compiler;
pub mod document;
pub mod error;
pub mod filesystem;
pub mod import;
pub mod loader;
pub mod modifier;
pub mod modifiers;
pub mod path;

#[cfg(test)]
mod matcher_proptest;
