//! Integer range check.

use vmtv_core::{RuleError, ValueSet};

/// Inclusive range over integer values; either bound may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerRange {
    /// Inclusive lower bound.
    pub min: Option<i64>,
    /// Inclusive upper bound.
    pub max: Option<i64>,
}

impl IntegerRange {
    /// Create a range from optional bounds.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Returns true if `value` lies within every set bound.
    pub fn contains(&self, value: i64) -> bool {
        self.min.map_or(true, |min| min <= value) && self.max.map_or(true, |max| max >= value)
    }

    /// True iff every value coerces to an integer within range.
    ///
    /// All values are coerced before any is compared, so an uncoercible
    /// value is an error even when an earlier value is already out of range.
    pub fn check(&self, values: &ValueSet) -> Result<bool, RuleError> {
        let integers = values.integers()?;
        Ok(integers.into_iter().all(|v| self.contains(v)))
    }
}
