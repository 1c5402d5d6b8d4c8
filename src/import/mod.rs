//! # Import Resolution
//!
//! Resolves the `import` directives of a raw configuration into a single
//! merged configuration. Resolution walks the import graph recursively:
//! each import is loaded, its own imports resolved first, its document
//! output paths prefixed and source paths rebased, and the result merged
//! into the importing configuration.
//!
//! ## Components
//!
//! - **`config`**: Parsed form of one `import` entry.
//! - **`matcher`**: Path pattern matching, with a heuristic that tells
//!   delimited regular expressions apart from glob patterns.
//! - **`wildcard`**: Expands wildcard import paths against the filesystem.
//! - **`detector`**: Stack-based circular import detection.
//! - **`prefix`**: Output-path prefixing and source-path rebasing applied
//!   to imported configs before merging.
//! - **`resolver`**: The recursive resolution driver and config merge.

pub mod config;
pub mod detector;
pub mod matcher;
pub mod prefix;
pub mod resolver;
pub mod wildcard;

pub use config::{ImportConfig, ImportKind};
pub use detector::CircularImportDetector;
pub use matcher::PathMatcher;
pub use resolver::ImportResolver;
pub use wildcard::WildcardPathFinder;
