//! # Rule Templates
//!
//! A [`Rule`] is the author-supplied validation statement: a path into the
//! VM template, a check kind, and the thresholds of that kind. It is
//! immutable once written and is specialized once per incoming document.
//!
//! The wire schema uses camelCase keys. Legacy keys written by older rule
//! authors are accepted as aliases: `rule` for `kind`, `valid` for
//! `validPath`, `regex` for `pattern`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// The closed set of check kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Numeric range over integer values.
    Integer,
    /// Length range over string values.
    String,
    /// Membership in a fixed set of strings.
    Enum,
    /// Unanchored regular-expression search.
    Regex,
}

impl RuleKind {
    /// All kinds, in declaration order.
    pub const ALL: [RuleKind; 4] = [RuleKind::Integer, RuleKind::String, RuleKind::Enum, RuleKind::Regex];

    /// The kind as written in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Integer => "integer",
            RuleKind::String => "string",
            RuleKind::Enum => "enum",
            RuleKind::Regex => "regex",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a [`RuleKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rule kind '{}'", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for RuleKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// An author-supplied rule template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Check kind as written; validated at specialization.
    #[serde(alias = "rule")]
    pub kind: String,
    /// Rule identifier used in reports.
    pub name: String,
    /// Marker-prefixed path expression, e.g. `jsonpath::.spec.domain.machine.type`.
    pub path: String,
    /// Rejection reason surfaced when the rule fails.
    #[serde(default)]
    pub message: String,
    /// Reserved secondary path. Carried through, never evaluated.
    #[serde(default, alias = "valid", skip_serializing_if = "Option::is_none")]
    pub valid_path: Option<String>,
    /// Inclusive lower bound (integer rules).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Inclusive upper bound (integer rules).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Inclusive lower bound on length (string rules).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    /// Inclusive upper bound on length (string rules).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    /// Accepted values (enum rules).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Regular expression searched for in each value (regex rules).
    #[serde(default, alias = "regex", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// A failing warning rule is reported but does not reject the document.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub just_warning: bool,
}

impl Rule {
    /// Create a rule with no thresholds.
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            path: path.into(),
            message: message.into(),
            valid_path: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            values: None,
            pattern: None,
            just_warning: false,
        }
    }

    /// Set the inclusive lower bound.
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the inclusive upper bound.
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the inclusive minimum length.
    pub fn with_min_length(mut self, min_length: i64) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Set the inclusive maximum length.
    pub fn with_max_length(mut self, max_length: i64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the accepted values.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the search pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the reserved secondary path.
    pub fn with_valid_path(mut self, valid_path: impl Into<String>) -> Self {
        self.valid_path = Some(valid_path.into());
        self
    }

    /// Mark the rule as warning-only.
    pub fn warning_only(mut self) -> Self {
        self.just_warning = true;
        self
    }

    /// Parse the declared kind.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Kind`] if the kind is outside the closed set.
    pub fn parse_kind(&self) -> Result<RuleKind, RuleError> {
        self.kind.parse().map_err(|UnknownKind(kind)| RuleError::Kind {
            rule: self.name.clone(),
            kind,
        })
    }
}
