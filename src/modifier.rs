//! Content modifier chain applied to each source before embedding.
//!
//! A [`ModifierSpec`] names a registered [`SourceModifier`] implementation
//! and carries its per-use options. The [`SourceModifierRegistry`] maps
//! stable string keys to implementations (registered at startup) and tracks
//! named aliases: pre-configured specs reusable across sources. The
//! [`ModifiersApplier`] folds a source's content through its modifier list
//! in declaration order; each modifier sees the previous one's output.
//!
//! An unregistered modifier name is skipped with a warning; a modifier
//! whose `supports` check rejects the content type is skipped with a debug
//! log. Neither is an error — content passes through that step unmodified.

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::error::Result;

/// Reference to a modifier: a bare name, or a name with options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifierSpec {
    Name(String),
    Configured {
        name: String,
        #[serde(default)]
        options: Mapping,
    },
}

impl ModifierSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn configured(name: impl Into<String>, options: Mapping) -> Self {
        Self::Configured {
            name: name.into(),
            options,
        }
    }

    /// Identifier used for registry lookup.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Configured { name, .. } => name,
        }
    }

    pub fn options(&self) -> Option<&Mapping> {
        match self {
            Self::Name(_) => None,
            Self::Configured { options, .. } => Some(options),
        }
    }
}

/// Capability implemented by every content modifier.
pub trait SourceModifier {
    /// Whether this modifier applies to content labeled `content_type`
    /// (typically a file extension or pseudo-extension). Applicability is
    /// decided on the label only, never by inspecting content structure.
    fn supports(&self, content_type: &str) -> bool;

    /// Transform `content`, with `context` carrying the configured options.
    fn modify(&self, content: &str, context: &Mapping) -> Result<String>;
}

/// Maps modifier names to implementations, plus named aliases.
#[derive(Default)]
pub struct SourceModifierRegistry {
    modifiers: HashMap<String, Box<dyn SourceModifier>>,
    aliases: HashMap<String, ModifierSpec>,
}

impl SourceModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation under a stable string key.
    pub fn register(&mut self, name: impl Into<String>, modifier: Box<dyn SourceModifier>) {
        self.modifiers.insert(name.into(), modifier);
    }

    /// Register a named, pre-configured spec for reuse across sources.
    pub fn register_alias(&mut self, name: impl Into<String>, spec: ModifierSpec) {
        self.aliases.insert(name.into(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&dyn SourceModifier> {
        self.modifiers.get(name).map(|m| m.as_ref())
    }

    /// Resolve a spec through the alias table. A bare name matching an
    /// alias becomes the alias's full spec; anything else passes through.
    pub fn resolve(&self, spec: &ModifierSpec) -> ModifierSpec {
        if spec.options().is_none() {
            if let Some(alias) = self.aliases.get(spec.name()) {
                return alias.clone();
            }
        }
        spec.clone()
    }
}

/// Immutable, ordered modifier pipeline bound to a registry.
pub struct ModifiersApplier<'a> {
    modifiers: Vec<ModifierSpec>,
    registry: &'a SourceModifierRegistry,
}

impl<'a> ModifiersApplier<'a> {
    pub fn new(registry: &'a SourceModifierRegistry) -> Self {
        Self {
            modifiers: Vec::new(),
            registry,
        }
    }

    /// A new applier with `additional` appended after the existing
    /// modifiers. This is how document-level and source-level lists
    /// compose: source-level modifiers run after document-level ones.
    pub fn with_modifiers(&self, additional: &[ModifierSpec]) -> Self {
        let mut modifiers = self.modifiers.clone();
        modifiers.extend_from_slice(additional);
        Self {
            modifiers,
            registry: self.registry,
        }
    }

    /// Fold `content` through the modifier list in order.
    pub fn apply(&self, content: String, filename: &str) -> Result<String> {
        if self.modifiers.is_empty() {
            return Ok(content);
        }

        let mut current = content;
        for spec in &self.modifiers {
            let spec = self.registry.resolve(spec);
            let modifier = match self.registry.get(spec.name()) {
                Some(modifier) => modifier,
                None => {
                    warn!("Skipping unregistered modifier '{}'", spec.name());
                    continue;
                }
            };
            if !modifier.supports(filename) {
                debug!(
                    "Modifier '{}' does not apply to '{}' content",
                    spec.name(),
                    filename
                );
                continue;
            }
            let empty = Mapping::new();
            let context = spec.options().unwrap_or(&empty);
            current = modifier.modify(&current, context)?;
        }
        Ok(current)
    }
}
