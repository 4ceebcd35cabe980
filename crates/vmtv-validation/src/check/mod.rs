//! # Kind Validators
//!
//! One stateless predicate per rule kind. Each receives an already-resolved
//! [`ValueSet`] and its own thresholds; multiple values combine with logical
//! AND.
//!
//! [`Check`] is the closed union over the four validators. Binding a rule
//! to a `Check` is an exhaustive `match` on [`RuleKind`], so adding a kind is
//! a compile-time-checked change.

pub mod enumeration;
pub mod integer;
pub mod pattern;
pub mod string;

pub use enumeration::EnumMembership;
pub use integer::IntegerRange;
pub use pattern::PatternMatch;
pub use string::StringLength;

use vmtv_core::{Rule, RuleError, RuleKind, ValueSet};

/// A kind-specific predicate carrying only the parameters of its kind.
#[derive(Debug, Clone)]
pub enum Check {
    /// `min <= v <= max` for every integer value.
    IntegerRange(IntegerRange),
    /// `minLength <= len(v) <= maxLength` for every value.
    StringLength(StringLength),
    /// Every value is one of the accepted values.
    EnumMembership(EnumMembership),
    /// Every value contains a match of the pattern.
    PatternMatch(PatternMatch),
}

impl Check {
    /// Bind the parameters of `rule` relevant to `kind`; the rest are ignored.
    ///
    /// A missing `values` list accepts nothing; a missing pattern is the
    /// empty pattern and matches everything.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::PatternSyntax`] if a regex rule's pattern does
    /// not compile.
    pub fn bind(kind: RuleKind, rule: &Rule) -> Result<Self, RuleError> {
        Ok(match kind {
            RuleKind::Integer => Check::IntegerRange(IntegerRange::new(rule.min, rule.max)),
            RuleKind::String => Check::StringLength(StringLength::new(rule.min_length, rule.max_length)),
            RuleKind::Enum => Check::EnumMembership(EnumMembership::new(
                rule.values.iter().flatten().map(String::as_str),
            )),
            RuleKind::Regex => {
                Check::PatternMatch(PatternMatch::compile(rule.pattern.as_deref().unwrap_or(""))?)
            }
        })
    }

    /// The kind this check implements.
    pub fn kind(&self) -> RuleKind {
        match self {
            Check::IntegerRange(_) => RuleKind::Integer,
            Check::StringLength(_) => RuleKind::String,
            Check::EnumMembership(_) => RuleKind::Enum,
            Check::PatternMatch(_) => RuleKind::Regex,
        }
    }

    /// Evaluate the predicate.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptyValueSet`] if `values` is empty, and
    /// [`RuleError::ValueType`] if a value cannot be coerced.
    pub fn evaluate(&self, values: &ValueSet) -> Result<bool, RuleError> {
        values.require_non_empty()?;
        match self {
            Check::IntegerRange(c) => c.check(values),
            Check::StringLength(c) => c.check(values),
            Check::EnumMembership(c) => c.check(values),
            Check::PatternMatch(c) => c.check(values),
        }
    }
}
