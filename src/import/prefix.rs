//! Path rewriting applied to imported configurations before merging.
//!
//! Two independent rewrites run on each imported raw config:
//!
//! - `prefix_document_outputs` prepends an import's `pathPrefix` to every
//!   imported document's output path, namespacing the imported documents
//!   under the importing config.
//! - `rebase_source_paths` prepends the imported file's own directory to
//!   every relative source path, so relative references inside an imported
//!   file stay correct relative to *its* location after being merged into
//!   the root config.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::path;

/// Prepend `prefix` to the `outputPath` of every document in `config`.
pub fn prefix_document_outputs(config: &mut Mapping, prefix: &str) {
    let docs = match config.get_mut("documents").and_then(Value::as_sequence_mut) {
        Some(docs) => docs,
        None => return,
    };
    for doc in docs.iter_mut() {
        let doc = match doc.as_mapping_mut() {
            Some(doc) => doc,
            None => continue,
        };
        if let Some(output) = doc.get("outputPath").and_then(Value::as_str) {
            let prefixed = path::join_str(prefix, output);
            doc.insert(Value::from("outputPath"), Value::from(prefixed));
        }
    }
}

/// Rebase every relative `sourcePaths` entry of every file source in
/// `config` onto `base_dir`. Absolute paths pass through untouched.
pub fn rebase_source_paths(config: &mut Mapping, base_dir: &Path) {
    let docs = match config.get_mut("documents").and_then(Value::as_sequence_mut) {
        Some(docs) => docs,
        None => return,
    };
    let base = path::to_slash_string(base_dir);
    for doc in docs.iter_mut() {
        let sources = match doc
            .as_mapping_mut()
            .and_then(|d| d.get_mut("sources"))
            .and_then(Value::as_sequence_mut)
        {
            Some(sources) => sources,
            None => continue,
        };
        for source in sources.iter_mut() {
            let source = match source.as_mapping_mut() {
                Some(source) => source,
                None => continue,
            };
            let kind = source
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("file");
            if kind != "file" {
                continue;
            }
            if let Some(paths) = source.get_mut("sourcePaths") {
                rebase_value(paths, &base);
            }
        }
    }
}

fn rebase_value(value: &mut Value, base: &str) {
    match value {
        Value::String(s) => {
            if !Path::new(s.as_str()).is_absolute() {
                *s = path::join_str(base, s);
            }
        }
        Value::Sequence(seq) => {
            for entry in seq.iter_mut() {
                rebase_value(entry, base);
            }
        }
        _ => {}
    }
}
