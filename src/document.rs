//! # Document Model
//!
//! In-memory representation of the compiled document set. A [`Document`] is
//! a named, ordered collection of [`Source`]s that compiles to one output
//! file; the [`DocumentRegistry`] is the flat, append-only list of all
//! documents built from the fully merged configuration.
//!
//! Both are built once from the merged raw configuration (after import
//! resolution) and consumed once by the compiler; they are not persisted.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::modifier::ModifierSpec;

/// A named, ordered collection of sources compiling to one output file.
///
/// A document exclusively owns its sources; sources are appended, never
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Human-readable description, written as the document header.
    #[serde(default)]
    pub description: String,
    /// Output file path, relative to the compiler's base path.
    pub output_path: String,
    /// Whether compilation may replace an existing output file. When false
    /// and the target exists, compilation is a silent no-op.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    /// Document-level modifiers, applied to every source before any
    /// source-level modifiers.
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
    /// Ordered sources; content blocks appear in declaration order.
    #[serde(default)]
    pub sources: Vec<Source>,
}

fn default_overwrite() -> bool {
    true
}

impl Document {
    pub fn new(description: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            output_path: output_path.into(),
            overwrite: true,
            modifiers: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Append a source. Declaration order is compilation order.
    pub fn add_source(&mut self, source: Source) -> &mut Self {
        self.sources.push(source);
        self
    }
}

/// A reference to external content plus fetch parameters.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Source {
    /// Files or directories read from the project tree.
    File(FileSource),
    /// Inline text written directly into the document.
    Text(TextSource),
    /// Remote content; fetching requires a collaborating parser.
    Url(UrlSource),
}

// Sources without an explicit `type` are file sources, so the tag is
// injected before dispatching on it.
impl<'de> Deserialize<'de> for Source {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(tag = "type", rename_all = "snake_case")]
        enum Tagged {
            File(FileSource),
            Text(TextSource),
            Url(UrlSource),
        }

        let mut value = serde_yaml::Value::deserialize(deserializer)?;
        if let Some(map) = value.as_mapping_mut() {
            let tag = serde_yaml::Value::from("type");
            if !map.contains_key(&tag) {
                map.insert(tag, serde_yaml::Value::from("file"));
            }
        }
        let tagged: Tagged = serde_yaml::from_value(value).map_err(serde::de::Error::custom)?;
        Ok(match tagged {
            Tagged::File(source) => Self::File(source),
            Tagged::Text(source) => Self::Text(source),
            Tagged::Url(source) => Self::Url(source),
        })
    }
}

impl Source {
    pub fn description(&self) -> &str {
        match self {
            Self::File(s) => &s.description,
            Self::Text(s) => &s.description,
            Self::Url(s) => &s.description,
        }
    }

    pub fn modifiers(&self) -> &[ModifierSpec] {
        match self {
            Self::File(s) => &s.modifiers,
            Self::Text(s) => &s.modifiers,
            Self::Url(s) => &s.modifiers,
        }
    }

    /// Content-type label handed to modifiers' `supports` check. For file
    /// sources this is the first path's extension; text and url sources use
    /// fixed pseudo-extensions.
    pub fn content_label(&self) -> &str {
        match self {
            Self::File(s) => s
                .source_paths
                .first()
                .and_then(|p| std::path::Path::new(p).extension())
                .and_then(|ext| ext.to_str())
                .unwrap_or("txt"),
            Self::Text(_) => "txt",
            Self::Url(_) => "html",
        }
    }
}

/// Files or directories to embed, with paths relative to the config that
/// declared them (already rebased by import resolution where needed).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSource {
    #[serde(deserialize_with = "string_or_list")]
    pub source_paths: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
}

/// Inline text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSource {
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
}

/// Remote URLs with optional request headers, carried in the model; the
/// built-in parser does not fetch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSource {
    #[serde(deserialize_with = "string_or_list")]
    pub urls: Vec<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modifiers: Vec<ModifierSpec>,
}

/// Accept either a single string or a list of strings.
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(one) => vec![one],
        OneOrMany::Many(many) => many,
    })
}

/// Flat, append-only list of documents. Serializes as `{documents: [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentRegistry {
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from a fully merged raw configuration.
    ///
    /// A config without a `documents` key yields an empty registry; a
    /// malformed `documents` entry is a `ConfigLoad` error.
    pub fn from_config(config: &Mapping) -> Result<Self> {
        let docs = match config.get("documents") {
            None => return Ok(Self::new()),
            Some(value) => value.clone(),
        };
        let documents: Vec<Document> =
            serde_yaml::from_value(docs).map_err(|e| Error::ConfigLoad {
                message: format!("Invalid 'documents' section: {}", e),
                hint: Some(
                    "Each document needs an outputPath and a list of typed sources".to_string(),
                ),
            })?;
        Ok(Self { documents })
    }

    /// Append a document.
    pub fn register(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_registry_from_config() {
        let config = mapping(
            r#"
documents:
  - description: API docs
    outputPath: api.md
    sources:
      - type: file
        sourcePaths: ["src/api"]
      - type: text
        content: trailer
"#,
        );
        let registry = DocumentRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 1);

        let doc = &registry.documents[0];
        assert_eq!(doc.description, "API docs");
        assert_eq!(doc.output_path, "api.md");
        assert!(doc.overwrite);
        assert_eq!(doc.sources.len(), 2);
        assert!(matches!(doc.sources[0], Source::File(_)));
        assert!(matches!(doc.sources[1], Source::Text(_)));
    }

    #[test]
    fn test_registry_without_documents_is_empty() {
        let registry = DocumentRegistry::from_config(&mapping("settings: {}")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_output_path_is_error() {
        let err = DocumentRegistry::from_config(&mapping("documents:\n  - description: d\n"))
            .unwrap_err();
        assert!(matches!(err, Error::ConfigLoad { .. }));
    }

    #[test]
    fn test_source_paths_accept_single_string() {
        let config = mapping(
            r#"
documents:
  - outputPath: out.md
    sources:
      - type: file
        sourcePaths: src/lib.rs
"#,
        );
        let registry = DocumentRegistry::from_config(&config).unwrap();
        match &registry.documents[0].sources[0] {
            Source::File(file) => assert_eq!(file.source_paths, vec!["src/lib.rs"]),
            other => panic!("expected file source, got {:?}", other),
        }
    }

    #[test]
    fn test_untyped_source_defaults_to_file() {
        let config = mapping(
            "documents:\n  - outputPath: out.md\n    sources:\n      - sourcePaths: [\"README.md\"]\n",
        );
        let registry = DocumentRegistry::from_config(&config).unwrap();
        match &registry.documents[0].sources[0] {
            Source::File(file) => assert_eq!(file.source_paths, vec!["README.md"]),
            other => panic!("expected file source, got {:?}", other),
        }
    }

    #[test]
    fn test_overwrite_false_parses() {
        let config = mapping(
            "documents:\n  - outputPath: out.md\n    overwrite: false\n",
        );
        let registry = DocumentRegistry::from_config(&config).unwrap();
        assert!(!registry.documents[0].overwrite);
    }

    #[test]
    fn test_content_label() {
        let file = Source::File(FileSource {
            source_paths: vec!["src/main.rs".to_string()],
            description: String::new(),
            modifiers: Vec::new(),
        });
        assert_eq!(file.content_label(), "rs");

        let text = Source::Text(TextSource {
            content: "x".to_string(),
            description: String::new(),
            modifiers: Vec::new(),
        });
        assert_eq!(text.content_label(), "txt");
    }

    #[test]
    fn test_registry_serializes_with_documents_key() {
        let mut registry = DocumentRegistry::new();
        registry.register(Document::new("d", "out.md"));
        let yaml = serde_yaml::to_string(&registry).unwrap();
        assert!(yaml.starts_with("documents:"));
    }
}
