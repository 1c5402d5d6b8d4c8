//! Built-in modifier implementations.
//!
//! Registered under stable string keys by [`register_builtins`]. Both apply
//! to every content type; applicability filtering matters for modifiers
//! bound to a specific language, which external callers can register
//! through the same [`SourceModifierRegistry`] seam.

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::modifier::{SourceModifier, SourceModifierRegistry};

/// Register the built-in modifiers.
pub fn register_builtins(registry: &mut SourceModifierRegistry) {
    registry.register("sanitizer", Box::new(Sanitizer));
    registry.register("trim", Box::new(Trim));
}

/// Rule-driven content scrubbing.
///
/// The context carries a `rules` sequence; each rule is a mapping with a
/// `type` of `keyword` or `regex`:
///
/// - `keyword`: lines containing any entry of `keywords` are replaced with
///   `replacement` when given, dropped otherwise.
/// - `regex`: every match of `pattern` is replaced with `replacement`
///   (empty when omitted).
pub struct Sanitizer;

impl SourceModifier for Sanitizer {
    fn supports(&self, _content_type: &str) -> bool {
        true
    }

    fn modify(&self, content: &str, context: &Mapping) -> Result<String> {
        let rules = match context.get("rules") {
            None => return Ok(content.to_string()),
            Some(value) => value.as_sequence().ok_or_else(|| Error::Modifier {
                modifier: "sanitizer".to_string(),
                message: "'rules' must be a sequence".to_string(),
            })?,
        };

        let mut current = content.to_string();
        for rule in rules {
            let rule = rule.as_mapping().ok_or_else(|| Error::Modifier {
                modifier: "sanitizer".to_string(),
                message: "each rule must be a mapping".to_string(),
            })?;
            let kind = rule.get("type").and_then(Value::as_str).unwrap_or("");
            current = match kind {
                "keyword" => apply_keyword_rule(&current, rule),
                "regex" => apply_regex_rule(&current, rule)?,
                other => {
                    return Err(Error::Modifier {
                        modifier: "sanitizer".to_string(),
                        message: format!("unknown rule type '{}'", other),
                    });
                }
            };
        }
        Ok(current)
    }
}

fn apply_keyword_rule(content: &str, rule: &Mapping) -> String {
    let keywords: Vec<&str> = rule
        .get("keywords")
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if keywords.is_empty() {
        return content.to_string();
    }
    let replacement = rule.get("replacement").and_then(Value::as_str);

    let mut lines = Vec::new();
    for line in content.lines() {
        if keywords.iter().any(|kw| line.contains(kw)) {
            if let Some(replacement) = replacement {
                lines.push(replacement);
            }
        } else {
            lines.push(line);
        }
    }
    let mut result = lines.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    result
}

fn apply_regex_rule(content: &str, rule: &Mapping) -> Result<String> {
    let pattern = rule
        .get("pattern")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Modifier {
            modifier: "sanitizer".to_string(),
            message: "regex rule is missing 'pattern'".to_string(),
        })?;
    let replacement = rule.get("replacement").and_then(Value::as_str).unwrap_or("");
    let regex = Regex::new(pattern).map_err(Error::Regex)?;
    Ok(regex.replace_all(content, replacement).into_owned())
}

/// Strips trailing per-line whitespace and leading/trailing blank lines.
pub struct Trim;

impl SourceModifier for Trim {
    fn supports(&self, _content_type: &str) -> bool {
        true
    }

    fn modify(&self, content: &str, _context: &Mapping) -> Result<String> {
        let lines: Vec<&str> = content.lines().map(|l| l.trim_end()).collect();
        let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(0);
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        let mut trimmed = lines[start..end].join("\n");
        if !trimmed.is_empty() {
            trimmed.push('\n');
        }
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{ModifierSpec, ModifiersApplier};

    fn context(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_sanitizer_keyword_drops_lines() {
        let content = "fn main() {\n    let key = \"SECRET\";\n}\n";
        let ctx = context("rules:\n  - type: keyword\n    keywords: [SECRET]\n");
        let result = Sanitizer.modify(content, &ctx).unwrap();
        assert_eq!(result, "fn main() {\n}\n");
    }

    #[test]
    fn test_sanitizer_keyword_with_replacement() {
        let content = "a\npassword=123\nb";
        let ctx = context(
            "rules:\n  - type: keyword\n    keywords: [password]\n    replacement: '[REDACTED]'\n",
        );
        let result = Sanitizer.modify(content, &ctx).unwrap();
        assert_eq!(result, "a\n[REDACTED]\nb");
    }

    #[test]
    fn test_sanitizer_regex_rule() {
        let content = "token=abc123 token=def456";
        let ctx = context(
            "rules:\n  - type: regex\n    pattern: 'token=\\w+'\n    replacement: 'token=***'\n",
        );
        let result = Sanitizer.modify(content, &ctx).unwrap();
        assert_eq!(result, "token=*** token=***");
    }

    #[test]
    fn test_sanitizer_rules_apply_in_order() {
        let content = "alpha";
        let ctx = context(
            "rules:\n  - type: regex\n    pattern: alpha\n    replacement: beta\n  - type: regex\n    pattern: beta\n    replacement: gamma\n",
        );
        let result = Sanitizer.modify(content, &ctx).unwrap();
        assert_eq!(result, "gamma");
    }

    #[test]
    fn test_sanitizer_without_rules_is_passthrough() {
        assert_eq!(Sanitizer.modify("x", &Mapping::new()).unwrap(), "x");
    }

    #[test]
    fn test_sanitizer_unknown_rule_type_is_error() {
        let ctx = context("rules:\n  - type: rot13\n");
        let err = Sanitizer.modify("x", &ctx).unwrap_err();
        assert!(matches!(err, Error::Modifier { .. }));
    }

    #[test]
    fn test_sanitizer_invalid_regex_is_error() {
        let ctx = context("rules:\n  - type: regex\n    pattern: '([unclosed'\n");
        let err = Sanitizer.modify("x", &ctx).unwrap_err();
        assert!(matches!(err, Error::Regex(_)));
    }

    #[test]
    fn test_trim_strips_blank_edges_and_trailing_whitespace() {
        let content = "\n\n  code here   \nmore\t\n\n\n";
        let result = Trim.modify(content, &Mapping::new()).unwrap();
        assert_eq!(result, "  code here\nmore\n");
    }

    #[test]
    fn test_trim_all_blank_yields_empty() {
        assert_eq!(Trim.modify("\n  \n\n", &Mapping::new()).unwrap(), "");
    }

    #[test]
    fn test_builtins_registered_and_chainable() {
        let mut registry = SourceModifierRegistry::new();
        register_builtins(&mut registry);

        let sanitize = ModifierSpec::configured(
            "sanitizer",
            context("rules:\n  - type: keyword\n    keywords: [DROP]\n"),
        );
        let applier = ModifiersApplier::new(&registry)
            .with_modifiers(&[sanitize, ModifierSpec::named("trim")]);

        let result = applier
            .apply("\nkeep\nDROP me\n\n".to_string(), "rs")
            .unwrap();
        assert_eq!(result, "keep\n");
    }
}
