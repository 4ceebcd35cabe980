//! # Rule Appliers
//!
//! A [`RuleApplier`] is a rule bound to the values of one document pair.
//! It is immutable: applying it any number of times, from any number of
//! threads, yields the same verdict.

use vmtv_core::{RuleError, RuleKind, ValueSet};

use crate::check::Check;

/// A specialized rule, ready to produce a verdict.
#[derive(Debug, Clone)]
pub struct RuleApplier {
    pub(crate) name: String,
    pub(crate) message: String,
    pub(crate) valid_path: Option<String>,
    pub(crate) check: Check,
    pub(crate) values: ValueSet,
}

impl RuleApplier {
    /// Name of the rule this applier was specialized from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rejection reason for a failing verdict.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The reserved secondary path, as written in the rule.
    pub fn valid_path(&self) -> Option<&str> {
        self.valid_path.as_deref()
    }

    /// The check kind.
    pub fn kind(&self) -> RuleKind {
        self.check.kind()
    }

    /// The bound predicate.
    pub fn check(&self) -> &Check {
        &self.check
    }

    /// The values captured at specialization.
    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    /// Produce the verdict.
    ///
    /// `Ok(false)` means the document violates the rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptyValueSet`] if the path matched nothing in
    /// either document, or [`RuleError::ValueType`] if a captured value
    /// cannot be read as the kind requires.
    pub fn apply(&self) -> Result<bool, RuleError> {
        self.check.evaluate(&self.values)
    }
}
