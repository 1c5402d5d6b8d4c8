//! Glob pattern compilation for import path matching.
//!
//! A [`PathMatcher`] is constructed from a pattern string. Patterns that are
//! already delimited regular expressions (e.g. `/^custom$/` or `#src/.*#i`)
//! are used verbatim as the match expression; anything else is compiled from
//! glob syntax to an anchored regex:
//!
//! - `*` matches any run of characters excluding `/`
//! - `**` matches any run of characters including `/`
//! - `?` matches exactly one non-`/` character
//! - `[...]` is passed through as a character class (`[!...]` negates)
//! - `{a,b,c}` becomes a non-capturing alternation
//! - `\x` escapes the following literal character
//! - remaining regex metacharacters are escaped so they match literally
//!
//! The regex-or-glob detection is heuristic and evaluated once at
//! construction, never per-character during glob translation. See DESIGN.md
//! for the discriminated-constructor alternative kept alongside it.

use regex::Regex;

use crate::error::{Error, Result};

/// Characters that mark a pattern as a glob rather than a literal path.
const WILDCARD_CHARS: [char; 4] = ['*', '?', '[', '{'];

/// Regex flags we can carry over to an inline `(?...)` group.
const SUPPORTED_FLAGS: &str = "imsxU";

/// Compiled matching predicate over file paths.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    pattern: String,
    regex: Regex,
}

impl PathMatcher {
    /// Compile a pattern, inferring whether it is a delimited regex or a
    /// glob from its shape.
    pub fn new(pattern: &str) -> Result<Self> {
        let expression = match parse_delimited_regex(pattern) {
            Some(expr) => expr,
            None => glob_to_regex(pattern),
        };
        let regex = Regex::new(&expression).map_err(|e| Error::ConfigLoad {
            message: format!("Invalid path pattern '{}': {}", pattern, e),
            hint: Some("Use glob syntax (*, **, ?, [...], {a,b}) or a delimited regex".to_string()),
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Compile a pattern as a glob, bypassing the delimited-regex heuristic.
    pub fn glob(pattern: &str) -> Result<Self> {
        let expression = glob_to_regex(pattern);
        let regex = Regex::new(&expression).map_err(|e| Error::ConfigLoad {
            message: format!("Invalid glob pattern '{}': {}", pattern, e),
            hint: None,
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Whether the compiled expression matches `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The raw pattern this matcher was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// True if the raw string contains any glob metacharacter.
pub fn contains_wildcard(s: &str) -> bool {
    s.chars().any(|c| WILDCARD_CHARS.contains(&c))
}

/// Recognize a delimited regular expression and extract its body.
///
/// A pattern counts as a delimited regex when it has a non-empty body
/// bounded by a paired delimiter from `{} () [] <>`, or by the same
/// non-alphanumeric, non-wildcard, non-backslash symbol at both ends,
/// optionally followed by supported flag letters (`imsxU`), carried over as
/// an inline `(?...)` group. Any other trailing character disqualifies the
/// string, and it falls back to glob translation; without this, glob
/// patterns whose last metacharacter is followed by letters (`{a,b}yaml`)
/// would be misread as regexes.
fn parse_delimited_regex(pattern: &str) -> Option<String> {
    let mut chars = pattern.chars();
    let start = chars.next()?;
    if start.is_alphanumeric() || start == '\\' || start == '*' || start == '?' {
        return None;
    }
    let end = match start {
        '{' => '}',
        '(' => ')',
        '[' => ']',
        '<' => '>',
        other => other,
    };
    if pattern.chars().count() < 3 {
        return None;
    }

    let end_idx = pattern.rfind(end)?;
    if end_idx < start.len_utf8() {
        return None;
    }
    let body = &pattern[start.len_utf8()..end_idx];
    if body.is_empty() {
        return None;
    }
    let flags = &pattern[end_idx + end.len_utf8()..];
    if !flags.chars().all(|c| SUPPORTED_FLAGS.contains(c)) {
        return None;
    }

    if flags.is_empty() {
        Some(body.to_string())
    } else {
        Some(format!("(?{}){}", flags, body))
    }
}

/// Character-by-character glob to regex translation, anchored at both ends.
fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');

    let mut chars = pattern.chars().peekable();
    let mut brace_depth = 0usize;

    while let Some(ch) = chars.next() {
        match ch {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    regex.push_str(".*");
                } else {
                    regex.push_str("[^/]*");
                }
            }
            '?' => regex.push_str("[^/]"),
            '[' => {
                let mut body = String::new();
                let negated = matches!(chars.peek(), Some('!') | Some('^'));
                if negated {
                    chars.next();
                }
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    body.push(c);
                }
                if closed && !body.is_empty() {
                    regex.push('[');
                    if negated {
                        regex.push('^');
                    }
                    regex.push_str(&body);
                    regex.push(']');
                } else {
                    // Unterminated class matches literally
                    regex.push_str(&regex::escape("["));
                    if negated {
                        regex.push_str(&regex::escape("!"));
                    }
                    regex.push_str(&regex::escape(&body));
                    if closed {
                        regex.push_str(&regex::escape("]"));
                    }
                }
            }
            '{' => {
                brace_depth += 1;
                regex.push_str("(?:");
            }
            '}' if brace_depth > 0 => {
                brace_depth -= 1;
                regex.push(')');
            }
            ',' if brace_depth > 0 => regex.push('|'),
            '\\' => {
                if let Some(next) = chars.next() {
                    regex.push_str(&regex::escape(&next.to_string()));
                } else {
                    regex.push_str(&regex::escape("\\"));
                }
            }
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }

    regex.push('$');
    regex
}
