//! # Error Types — Rule Error Taxonomy
//!
//! Every error here is scoped to a single rule. A batch evaluation records
//! the error against the rule that produced it and moves on to the next one.
//!
//! ## Design
//!
//! - Specialization-time errors (`Kind`, `PathSyntax`, `PatternSyntax`) are
//!   defects in the rule itself.
//! - Application-time errors (`EmptyValueSet`, `ValueType`) are caused by the
//!   document the rule was applied to.
//! - "Out of range", "not a member" and "no match" are never errors; they are
//!   `false` verdicts.

use thiserror::Error;

/// Error produced while specializing or applying a single rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule declares a kind outside the closed set.
    #[error("rule '{rule}' has unknown kind '{kind}' (expected one of: integer, string, enum, regex)")]
    Kind {
        /// Name of the offending rule.
        rule: String,
        /// The kind text as written by the author.
        kind: String,
    },

    /// The path expression is malformed.
    #[error("invalid path expression '{path}': {reason}")]
    PathSyntax {
        /// The path expression as written by the author.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The pattern of a regex rule does not compile.
    #[error("invalid pattern '{pattern}': {reason}")]
    PatternSyntax {
        /// The pattern as written by the author.
        pattern: String,
        /// Regex compiler diagnostic.
        reason: String,
    },

    /// The path is valid but matched nothing in either document.
    #[error("path '{path}' resolved to no values")]
    EmptyValueSet {
        /// The path expression that matched nothing.
        path: String,
    },

    /// A matched value cannot be read as the type the rule kind expects.
    #[error("value {value} at '{path}' cannot be read as {expected}")]
    ValueType {
        /// The path expression the value was resolved from.
        path: String,
        /// JSON rendering of the offending value.
        value: String,
        /// The type the rule kind expects.
        expected: &'static str,
    },
}

impl RuleError {
    /// Returns true when the error points at the rule rather than the document.
    ///
    /// Operators use this to tell "this validation rule is broken" apart from
    /// "the submitted template is invalid".
    pub fn is_rule_defect(&self) -> bool {
        match self {
            RuleError::Kind { .. } | RuleError::PathSyntax { .. } | RuleError::PatternSyntax { .. } => {
                true
            }
            RuleError::EmptyValueSet { .. } | RuleError::ValueType { .. } => false,
        }
    }
}
