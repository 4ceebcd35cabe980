//! # Path Expressions
//!
//! Rule paths are written in the Kubernetes jsonpath dialect behind a
//! namespace marker, e.g. `jsonpath::.spec.domain.machine.type`. The marker
//! tells a path query apart from a literal.
//!
//! [`PathExpr::parse`] strips the marker and normalizes the selector into
//! RFC 9535 form (`$.spec.domain.machine.type`) for the path evaluator:
//!
//! - an outer `{ ... }` template brace pair is removed;
//! - a selector starting with `.` or `[` is rooted with `$`;
//! - a bare selector (`spec.domain`) is rooted with `$.`;
//! - dot segments lose their `\.` escapes, and a member name that is not an
//!   RFC 9535 shorthand name moves into bracket form, so
//!   `.labels.kubevirt\.io/vm` becomes `['kubevirt.io/vm']`;
//! - bracket segments (indices, wildcards, filters) are copied verbatim.
//!
//! Only the shape of the expression is checked here. Full syntax checking is
//! the evaluator's job.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::RuleError;

/// Marker that prefixes every path query.
pub const JSONPATH_MARKER: &str = "jsonpath::";

/// A path expression with its marker stripped and its selector normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathExpr {
    raw: String,
    selector: String,
}

impl PathExpr {
    /// Parse a marker-prefixed path expression.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::PathSyntax`] when the marker is missing, the
    /// selector or one of its dot segments is empty, or a brace or bracket
    /// is left open.
    pub fn parse(raw: &str) -> Result<Self, RuleError> {
        let syntax = |reason: &str| RuleError::PathSyntax {
            path: raw.to_string(),
            reason: reason.to_string(),
        };

        let body = raw
            .strip_prefix(JSONPATH_MARKER)
            .ok_or_else(|| syntax("missing 'jsonpath::' marker"))?
            .trim();

        let body = match (body.strip_prefix('{'), body.ends_with('}')) {
            (Some(inner), true) => inner[..inner.len() - 1].trim(),
            (None, false) => body,
            _ => return Err(syntax("unbalanced template braces")),
        };

        if body.is_empty() {
            return Err(syntax("empty selector"));
        }

        let rest = match body.strip_prefix('$') {
            Some(rest) => rest.to_string(),
            None if body.starts_with('.') || body.starts_with('[') => body.to_string(),
            None => format!(".{body}"),
        };
        let selector = normalize_segments(&rest).map_err(syntax)?;

        Ok(Self {
            raw: raw.to_string(),
            selector,
        })
    }

    /// The expression as written, marker included.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The normalized RFC 9535 selector handed to the evaluator.
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Rewrite everything after the root `$` into RFC 9535 segments.
fn normalize_segments(rest: &str) -> Result<String, &'static str> {
    let mut out = String::with_capacity(rest.len() + 1);
    out.push('$');
    let mut chars = rest.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '[' => copy_bracket(&mut chars, &mut out)?,
            '.' => {
                let descendant = chars.next_if_eq(&'.').is_some();
                let name = read_member(&mut chars);
                if name.is_empty() {
                    // `..[0]` is a descendant segment with a bracket selector.
                    if descendant && chars.peek() == Some(&'[') {
                        out.push_str("..");
                        continue;
                    }
                    return Err("empty path segment");
                }
                if descendant {
                    out.push_str("..");
                    if name == "*" || is_shorthand(&name) {
                        out.push_str(&name);
                    } else {
                        push_bracketed(&mut out, &name);
                    }
                } else if name == "*" || is_shorthand(&name) {
                    out.push('.');
                    out.push_str(&name);
                } else {
                    push_bracketed(&mut out, &name);
                }
            }
            _ => return Err("expected '.' or '[' between segments"),
        }
    }
    Ok(out)
}

/// Read a dot-segment member name up to the next unescaped `.` or `[`.
fn read_member(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        match c {
            '.' | '[' => break,
            '\\' => {
                chars.next();
                if chars.next_if_eq(&'.').is_some() {
                    name.push('.');
                } else {
                    name.push('\\');
                }
            }
            _ => {
                name.push(c);
                chars.next();
            }
        }
    }
    name
}

/// Copy a bracket segment through its matching `]`. The opening `[` has
/// already been consumed.
fn copy_bracket(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), &'static str> {
    out.push('[');
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        out.push(c);
        match quote {
            Some(q) => {
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            },
        }
    }
    Err("unclosed '['")
}

/// RFC 9535 `member-name-shorthand`: a letter, `_` or non-ASCII character,
/// followed by those or digits.
fn is_shorthand(name: &str) -> bool {
    let name_first = |c: char| c.is_ascii_alphabetic() || c == '_' || !c.is_ascii();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if name_first(first) => chars.all(|c| name_first(c) || c.is_ascii_digit()),
        _ => false,
    }
}

/// Append `['name']` with quotes, backslashes and control characters escaped.
fn push_bracketed(out: &mut String, name: &str) {
    out.push_str("['");
    for c in name.chars() {
        match c {
            '\'' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push_str("']");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_selector_is_rooted() {
        let p = PathExpr::parse("jsonpath::.spec.domain.machine.type").unwrap();
        assert_eq!(p.selector(), "$.spec.domain.machine.type");
        assert_eq!(p.as_str(), "jsonpath::.spec.domain.machine.type");
    }

    #[test]
    fn wildcard_selector_is_kept() {
        let p = PathExpr::parse("jsonpath::.spec.domain.devices.disks[*].disk.bus").unwrap();
        assert_eq!(p.selector(), "$.spec.domain.devices.disks[*].disk.bus");
    }

    #[test]
    fn template_braces_are_removed() {
        let p = PathExpr::parse("jsonpath::{.spec.domain.cpu.cores}").unwrap();
        assert_eq!(p.selector(), "$.spec.domain.cpu.cores");
    }

    #[test]
    fn explicit_root_is_untouched() {
        let p = PathExpr::parse("jsonpath::$.metadata.name").unwrap();
        assert_eq!(p.selector(), "$.metadata.name");
    }

    #[test]
    fn bare_selector_gets_root_and_dot() {
        let p = PathExpr::parse("jsonpath::spec.running").unwrap();
        assert_eq!(p.selector(), "$.spec.running");
    }

    #[test]
    fn missing_marker_is_syntax_error() {
        let err = PathExpr::parse(".spec.domain.machine.type").unwrap_err();
        assert!(matches!(err, RuleError::PathSyntax { .. }));
    }

    #[test]
    fn empty_selector_is_syntax_error() {
        assert!(matches!(
            PathExpr::parse("jsonpath::").unwrap_err(),
            RuleError::PathSyntax { .. }
        ));
        assert!(matches!(
            PathExpr::parse("jsonpath::{ }").unwrap_err(),
            RuleError::PathSyntax { .. }
        ));
    }

    #[test]
    fn unbalanced_braces_are_syntax_error() {
        let err = PathExpr::parse("jsonpath::{.spec.domain").unwrap_err();
        match err {
            RuleError::PathSyntax { reason, .. } => assert!(reason.contains("brace")),
            other => panic!("expected PathSyntax, got: {other}"),
        }
    }

    #[test]
    fn hyphenated_member_moves_to_brackets() {
        let p = PathExpr::parse("jsonpath::.metadata.labels.os-type").unwrap();
        assert_eq!(p.selector(), "$.metadata.labels['os-type']");
    }

    #[test]
    fn escaped_dots_stay_in_one_member() {
        let p = PathExpr::parse(r"jsonpath::.metadata.labels.kubevirt\.io/vm").unwrap();
        assert_eq!(p.selector(), "$.metadata.labels['kubevirt.io/vm']");

        let p = PathExpr::parse(r"jsonpath::{.metadata.annotations.vm\.kubevirt\.io/flavor}").unwrap();
        assert_eq!(p.selector(), "$.metadata.annotations['vm.kubevirt.io/flavor']");
    }

    #[test]
    fn leading_digit_and_quotes_are_bracketed() {
        let p = PathExpr::parse("jsonpath::.data.0abc").unwrap();
        assert_eq!(p.selector(), "$.data['0abc']");

        let p = PathExpr::parse("jsonpath::.data.it's").unwrap();
        assert_eq!(p.selector(), r"$.data['it\'s']");
    }

    #[test]
    fn shorthand_names_and_wildcards_are_kept() {
        let p = PathExpr::parse("jsonpath::.spec.template.spec_2.*").unwrap();
        assert_eq!(p.selector(), "$.spec.template.spec_2.*");
    }

    #[test]
    fn descendant_segments_are_kept() {
        let p = PathExpr::parse("jsonpath::..bus").unwrap();
        assert_eq!(p.selector(), "$..bus");

        let p = PathExpr::parse("jsonpath::.spec..os-type").unwrap();
        assert_eq!(p.selector(), "$.spec..['os-type']");

        let p = PathExpr::parse("jsonpath::.spec..[0]").unwrap();
        assert_eq!(p.selector(), "$.spec..[0]");
    }

    #[test]
    fn bracket_segments_are_copied_verbatim() {
        let p = PathExpr::parse(r#"jsonpath::.spec.disks[?(@.name=="a.b]")].disk"#).unwrap();
        assert_eq!(p.selector(), r#"$.spec.disks[?(@.name=="a.b]")].disk"#);

        let p = PathExpr::parse("jsonpath::.metadata.labels['os-type']").unwrap();
        assert_eq!(p.selector(), "$.metadata.labels['os-type']");

        let p = PathExpr::parse("jsonpath::[0].name").unwrap();
        assert_eq!(p.selector(), "$[0].name");
    }

    #[test]
    fn empty_segment_is_syntax_error() {
        for raw in ["jsonpath::.spec.", "jsonpath::.spec...bus", "jsonpath::.spec.domain.."] {
            assert!(
                matches!(PathExpr::parse(raw).unwrap_err(), RuleError::PathSyntax { .. }),
                "{raw}"
            );
        }
    }

    #[test]
    fn unclosed_bracket_is_syntax_error() {
        let err = PathExpr::parse("jsonpath::.spec.domain[").unwrap_err();
        match err {
            RuleError::PathSyntax { reason, .. } => assert!(reason.contains('[')),
            other => panic!("expected PathSyntax, got: {other}"),
        }
    }
}
