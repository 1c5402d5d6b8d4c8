//! # Document Compilation
//!
//! Turns each [`Document`] from the registry into one flat markdown file.
//! Compilation walks the document's sources in declaration order, fetches
//! each source's raw content through a [`SourceParser`], runs the combined
//! document-level and source-level modifier chain over it, and joins the
//! resulting blocks with `---` separators under the document header.
//!
//! ## Output layout
//!
//! ```text
//! # <document description>
//!
//! SOURCE: <source description>
//! <modified content>
//!
//! ---
//! ```
//!
//! The `SOURCE:` label is omitted when a source has no description. After
//! assembly, runs of blank lines are collapsed to a single blank line and
//! leading blanks are dropped.
//!
//! ## Overwrite policy
//!
//! A document with `overwrite: false` whose output file already exists is
//! skipped without touching the file; the result marks it as skipped so
//! callers can report it.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::document::{Document, DocumentRegistry, FileSource, Source};
use crate::error::{Error, Result};
use crate::filesystem::FileSystem;
use crate::modifier::{ModifiersApplier, SourceModifierRegistry};
use crate::path;

/// Fetches the raw content for one source.
///
/// The built-in [`LocalSourceParser`] handles `file` and `text` sources;
/// `url` sources need a collaborating implementation that can perform
/// network fetches.
pub trait SourceParser {
    fn parse(&self, source: &Source) -> Result<String>;
}

/// Parser for sources reachable through the local filesystem.
pub struct LocalSourceParser<'a> {
    fs: &'a dyn FileSystem,
    base_path: PathBuf,
}

impl<'a> LocalSourceParser<'a> {
    pub fn new(fs: &'a dyn FileSystem, base_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            base_path: base_path.into(),
        }
    }

    fn parse_file_source(&self, file: &FileSource) -> Result<String> {
        let mut blocks = Vec::new();
        for raw in &file.source_paths {
            let resolved = path::resolve(raw, &self.base_path);
            if self.fs.is_dir(&resolved) {
                let mut files = self.fs.walk(&resolved)?;
                files.sort();
                for file_path in &files {
                    blocks.push(self.read_with_header(file_path)?);
                }
            } else if self.fs.exists(&resolved) {
                blocks.push(self.read_with_header(&resolved)?);
            } else {
                return Err(Error::Filesystem {
                    message: format!("Source path not found: {}", resolved.display()),
                });
            }
        }
        Ok(blocks.join("\n"))
    }

    /// Read one file, prefixed with a path header so the flat document
    /// keeps the provenance of each embedded file.
    fn read_with_header(&self, file_path: &Path) -> Result<String> {
        let content = self.fs.read_to_string(file_path)?;
        let display = file_path
            .strip_prefix(&self.base_path)
            .unwrap_or(file_path);
        let mut block = format!("// Path: {}\n", path::to_slash_string(display));
        block.push_str(&content);
        if !block.ends_with('\n') {
            block.push('\n');
        }
        Ok(block)
    }
}

impl SourceParser for LocalSourceParser<'_> {
    fn parse(&self, source: &Source) -> Result<String> {
        match source {
            Source::File(file) => self.parse_file_source(file),
            Source::Text(text) => Ok(text.content.clone()),
            Source::Url(_) => Err(Error::NotImplemented {
                feature: "url source fetching".to_string(),
            }),
        }
    }
}

/// Result of compiling one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDocument {
    /// Absolute path of the output file.
    pub output_path: PathBuf,
    /// Number of sources embedded.
    pub sources: usize,
    /// Whether the document was skipped because the output already exists
    /// and `overwrite` is false.
    pub skipped: bool,
}

/// Compiles documents into flat markdown files.
pub struct DocumentCompiler<'a> {
    parser: &'a dyn SourceParser,
    modifiers: &'a SourceModifierRegistry,
    base_path: PathBuf,
}

impl<'a> DocumentCompiler<'a> {
    pub fn new(
        parser: &'a dyn SourceParser,
        modifiers: &'a SourceModifierRegistry,
        base_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            parser,
            modifiers,
            base_path: base_path.into(),
        }
    }

    /// Compile one document and write its output file.
    pub fn compile(&self, document: &Document, fs: &mut dyn FileSystem) -> Result<CompiledDocument> {
        let output_path = path::resolve(&document.output_path, &self.base_path);

        if !document.overwrite && fs.exists(&output_path) {
            debug!(
                "Skipping {}: output exists and overwrite is disabled",
                output_path.display()
            );
            return Ok(CompiledDocument {
                output_path,
                sources: 0,
                skipped: true,
            });
        }

        let document_applier =
            ModifiersApplier::new(self.modifiers).with_modifiers(&document.modifiers);

        let mut assembled = String::new();
        if !document.description.trim().is_empty() {
            assembled.push_str("# ");
            assembled.push_str(document.description.trim());
            assembled.push_str("\n\n");
        }

        for source in &document.sources {
            let raw = self
                .parser
                .parse(source)
                .map_err(|e| self.compile_error(document, e))?;
            let applier = document_applier.with_modifiers(source.modifiers());
            let content = applier
                .apply(raw, source.content_label())
                .map_err(|e| self.compile_error(document, e))?;

            if !source.description().trim().is_empty() {
                assembled.push_str("SOURCE: ");
                assembled.push_str(source.description().trim());
                assembled.push('\n');
            }
            assembled.push_str(&content);
            if !assembled.ends_with('\n') {
                assembled.push('\n');
            }
            assembled.push_str("\n---\n\n");
        }

        let content = normalize_blank_lines(&assembled);

        if let Some(parent) = output_path.parent() {
            fs.ensure_directory(parent)?;
        }
        fs.write(&output_path, &content)?;
        info!(
            "Compiled {} ({} sources)",
            output_path.display(),
            document.sources.len()
        );

        Ok(CompiledDocument {
            output_path,
            sources: document.sources.len(),
            skipped: false,
        })
    }

    /// Compile every document in the registry, in registration order.
    pub fn compile_all(
        &self,
        registry: &DocumentRegistry,
        fs: &mut dyn FileSystem,
    ) -> Result<Vec<CompiledDocument>> {
        let mut results = Vec::with_capacity(registry.len());
        for document in registry.iter() {
            results.push(self.compile(document, fs)?);
        }
        Ok(results)
    }

    fn compile_error(&self, document: &Document, source: Error) -> Error {
        Error::Compile {
            document: document.output_path.clone(),
            message: source.to_string(),
        }
    }
}

/// Collapse runs of blank lines to one and drop leading blanks. The result
/// always ends with exactly one newline when non-empty.
fn normalize_blank_lines(content: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;
    for line in content.lines() {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(if blank { "" } else { line });
        previous_blank = blank;
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let mut result = lines.join("\n");
    if !result.is_empty() {
        result.push('\n');
    }
    result
}
