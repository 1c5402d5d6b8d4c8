//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for `ctx-gen`.
//! It uses the `thiserror` library to create a comprehensive `Error` enum that
//! covers all anticipated failure modes, providing clear and descriptive
//! error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures.
//!
//! ## Failure Policy
//!
//! Hard failures during import resolution are `ConfigLoad` (malformed
//! `import` directive, missing or unparseable import file) and
//! `CircularImport` (re-entrant import detected while the path is still on
//! the processing stack). Both abort the whole resolution; there is no
//! partial-success mode. Unmatched wildcard imports and unregistered or
//! inapplicable modifiers are *not* errors — they are logged and skipped by
//! the components that encounter them.

use thiserror::Error;

/// Main error type for ctx-gen operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while loading or parsing a configuration file.
    ///
    /// This covers a malformed `import` directive, a missing import target,
    /// an unsupported file format, and parse failures. Includes an optional
    /// hint about how to fix the configuration.
    #[error("Configuration loading error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigLoad {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A circular dependency was detected in the import graph.
    ///
    /// Carries the offending path and the full processing stack at the time
    /// of detection, joined with `" -> "`.
    #[error("Circular import detected for {path}: {stack}")]
    CircularImport { path: String, stack: String },

    /// An error occurred while compiling a document to its output file.
    #[error("Document compilation error: {document} - {message}")]
    Compile { document: String, message: String },

    /// An error occurred while applying a content modifier.
    #[error("Modifier error: {modifier} - {message}")]
    Modifier { modifier: String, message: String },

    /// An error occurred with a filesystem operation.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An error for a capability that has no built-in implementation.
    ///
    /// Raised when a config references a source or import type (e.g. `url`)
    /// that requires a collaborator this build does not provide.
    #[error("Feature not implemented: {feature}")]
    NotImplemented { feature: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON parsing error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML parsing error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_load() {
        let error = Error::ConfigLoad {
            message: "Invalid YAML".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration loading error"));
        assert!(display.contains("Invalid YAML"));
    }

    #[test]
    fn test_error_display_config_load_with_hint() {
        let error = Error::ConfigLoad {
            message: "Missing path field".to_string(),
            hint: Some("Add 'path:' to the import entry".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration loading error"));
        assert!(display.contains("Missing path field"));
        assert!(display.contains("hint:"));
        assert!(display.contains("Add 'path:'"));
    }

    #[test]
    fn test_error_display_circular_import() {
        let error = Error::CircularImport {
            path: "/configs/a.yaml".to_string(),
            stack: "/configs/a.yaml -> /configs/b.yaml".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Circular import detected"));
        assert!(display.contains("/configs/a.yaml -> /configs/b.yaml"));
    }

    #[test]
    fn test_error_display_compile() {
        let error = Error::Compile {
            document: "api.md".to_string(),
            message: "source path missing".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Document compilation error"));
        assert!(display.contains("api.md"));
        assert!(display.contains("source path missing"));
    }

    #[test]
    fn test_error_display_modifier() {
        let error = Error::Modifier {
            modifier: "sanitizer".to_string(),
            message: "rules must be a sequence".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Modifier error"));
        assert!(display.contains("sanitizer"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_str = "invalid: [unclosed";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: Error = yaml_error.into();
        let display = format!("{}", error);
        assert!(display.contains("YAML parsing error"));
    }

    #[test]
    fn test_error_not_implemented() {
        let error = Error::NotImplemented {
            feature: "url source fetching".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Feature not implemented"));
        assert!(display.contains("url source fetching"));
    }
}
