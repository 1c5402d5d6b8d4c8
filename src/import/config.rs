//! One entry of an `import` directive, parsed into an immutable value object.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::import::matcher::contains_wildcard;
use crate::path;

/// Where an import's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Local,
    Github,
    Url,
    Composer,
}

impl ImportKind {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "local" => Ok(Self::Local),
            "github" => Ok(Self::Github),
            "url" => Ok(Self::Url),
            "composer" => Ok(Self::Composer),
            other => Err(Error::ConfigLoad {
                message: format!("Unknown import type '{}'", other),
                hint: Some("Valid types are: local, github, url, composer".to_string()),
            }),
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Local => "local",
            Self::Github => "github",
            Self::Url => "url",
            Self::Composer => "composer",
        };
        f.write_str(name)
    }
}

/// Immutable value object for one `import` entry.
///
/// Constructed fresh per entry per resolution pass; never mutated or cached
/// across invocations.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Raw path string as written in the config.
    pub path: String,
    /// Resolved path. Equals `path` unchanged for non-local kinds; for local
    /// kinds it is resolved against the importing file's base directory
    /// unless already absolute.
    pub absolute_path: PathBuf,
    pub kind: ImportKind,
    /// Optional prefix prepended to every imported document's output path.
    pub path_prefix: Option<String>,
    /// True when `path` contains glob metacharacters and the kind is local.
    pub has_wildcard: bool,
    /// Selective import of named documents. Carried through, not enforced
    /// by the resolver.
    pub docs: Option<Vec<String>>,
    /// Kind-specific parameters (e.g. `ref`/`token` for github, `headers`
    /// for url), carried through for the loading collaborator.
    pub extra: Mapping,
}

const RESERVED_KEYS: [&str; 4] = ["path", "type", "pathPrefix", "docs"];

impl ImportConfig {
    /// Parse one entry of the `import` list.
    pub fn from_value(value: &Value, base_path: &Path) -> Result<Self> {
        let map = value.as_mapping().ok_or_else(|| Error::ConfigLoad {
            message: "Import entry must be a mapping".to_string(),
            hint: Some("Write imports as `- path: configs/api.yaml`".to_string()),
        })?;

        let raw_path = map
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::ConfigLoad {
                message: "Import entry is missing the required 'path' key".to_string(),
                hint: None,
            })?;

        let kind = match map.get("type") {
            None => ImportKind::Local,
            Some(value) => {
                let raw = value.as_str().ok_or_else(|| Error::ConfigLoad {
                    message: "Import 'type' must be a string".to_string(),
                    hint: None,
                })?;
                ImportKind::parse(raw)?
            }
        };

        let path_prefix = map
            .get("pathPrefix")
            .and_then(Value::as_str)
            .map(String::from);

        let docs = match map.get("docs") {
            None => None,
            Some(value) => {
                let seq = value.as_sequence().ok_or_else(|| Error::ConfigLoad {
                    message: "Import 'docs' must be a list of document names".to_string(),
                    hint: None,
                })?;
                Some(
                    seq.iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect(),
                )
            }
        };

        let extra: Mapping = map
            .iter()
            .filter(|(k, _)| {
                !k.as_str().is_some_and(|key| RESERVED_KEYS.contains(&key))
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let has_wildcard = kind == ImportKind::Local && contains_wildcard(raw_path);
        let absolute_path = if kind == ImportKind::Local {
            path::resolve(raw_path, base_path)
        } else {
            PathBuf::from(raw_path)
        };

        Ok(Self {
            path: raw_path.to_string(),
            absolute_path,
            kind,
            path_prefix,
            has_wildcard,
            docs,
            extra,
        })
    }

    /// Synthesize the non-wildcard config for one file matched by a wildcard
    /// import, inheriting the prefix, docs allow-list, and extras.
    pub fn for_wildcard_match(&self, matched: &Path, root: &Path) -> Self {
        let full = path::to_slash_string(matched);
        let relative = full
            .strip_prefix(&format!("{}/", path::to_slash_string(root)))
            .map(String::from)
            .unwrap_or_else(|| full.clone());
        Self {
            path: relative,
            absolute_path: matched.to_path_buf(),
            kind: ImportKind::Local,
            path_prefix: self.path_prefix.clone(),
            has_wildcard: false,
            docs: self.docs.clone(),
            extra: self.extra.clone(),
        }
    }
}
