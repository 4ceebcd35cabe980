//! Enum membership check.

use std::collections::BTreeSet;

use vmtv_core::{RuleError, ValueSet};

/// Set of accepted values. Order and duplicates in the rule are irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumMembership {
    /// Accepted values.
    pub values: BTreeSet<String>,
}

impl EnumMembership {
    /// Create a membership check from the accepted values.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// True iff every value's string form is accepted.
    pub fn check(&self, values: &ValueSet) -> Result<bool, RuleError> {
        let texts = values.texts()?;
        Ok(texts.iter().all(|t| self.values.contains(&**t)))
    }
}
