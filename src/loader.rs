//! Configuration file loading.
//!
//! The import resolver consumes configs through the [`ConfigLoading`] seam
//! so tests can substitute canned configurations and so remote import kinds
//! (`github`, `url`, `composer`) can be served by a fetching loader supplied
//! by the surrounding application. The built-in [`FormatLoader`] resolves
//! `local` imports from a [`FileSystem`], detecting the on-disk format by
//! file extension and parsing everything into one raw `serde_yaml` mapping.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::import::config::{ImportConfig, ImportKind};

/// File extensions recognized as importable configuration files.
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml", "json", "toml"];

/// Capability to load the raw configuration behind an import entry.
pub trait ConfigLoading {
    fn load_import(&self, import: &ImportConfig) -> Result<Mapping>;
}

/// Loads local configuration files, picking the parser by extension.
pub struct FormatLoader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> FormatLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Load and parse the configuration file at `path` into a raw mapping.
    ///
    /// An empty file yields an empty mapping; any other non-mapping root is
    /// a `ConfigLoad` error.
    pub fn load_path(&self, path: &Path) -> Result<Mapping> {
        if !self.fs.exists(path) {
            return Err(Error::ConfigLoad {
                message: format!("Configuration file not found: {}", path.display()),
                hint: Some("Check the import path and the importing file's directory".to_string()),
            });
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let raw = self.fs.read_to_string(path)?;
        let value: Value = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&raw)?,
            "json" => {
                let json: serde_json::Value = serde_json::from_str(&raw)?;
                serde_yaml::to_value(json)?
            }
            "toml" => {
                let toml: toml::Value = toml::from_str(&raw)?;
                serde_yaml::to_value(toml)?
            }
            other => {
                return Err(Error::ConfigLoad {
                    message: format!(
                        "Unsupported configuration format '{}' for {}",
                        other,
                        path.display()
                    ),
                    hint: Some(format!("Supported extensions: {}", CONFIG_EXTENSIONS.join(", "))),
                });
            }
        };

        match value {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            _ => Err(Error::ConfigLoad {
                message: format!(
                    "Configuration root must be a mapping: {}",
                    path.display()
                ),
                hint: None,
            }),
        }
    }
}

impl ConfigLoading for FormatLoader<'_> {
    fn load_import(&self, import: &ImportConfig) -> Result<Mapping> {
        match import.kind {
            ImportKind::Local => self.load_path(&import.absolute_path),
            other => Err(Error::ConfigLoad {
                message: format!("No loader available for '{}' imports", other),
                hint: Some(
                    "Remote import kinds require a fetching loader supplied by the application"
                        .to_string(),
                ),
            }),
        }
    }
}
