//! String length check.

use vmtv_core::{RuleError, ValueSet};

/// Inclusive bounds on the length of each value's string form.
///
/// Length counts Unicode scalar values, not UTF-8 bytes: `"é"` has length 1
/// here where a byte count would give 2. Limits written for byte-counting
/// validators are therefore looser on non-ASCII values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringLength {
    /// Inclusive minimum length.
    pub min_length: Option<i64>,
    /// Inclusive maximum length.
    pub max_length: Option<i64>,
}

impl StringLength {
    /// Create length bounds.
    pub fn new(min_length: Option<i64>, max_length: Option<i64>) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Returns true if a string of `len` characters satisfies every set bound.
    pub fn accepts_len(&self, len: usize) -> bool {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        self.min_length.map_or(true, |min| min <= len) && self.max_length.map_or(true, |max| max >= len)
    }

    /// True iff every value's length lies within bounds.
    pub fn check(&self, values: &ValueSet) -> Result<bool, RuleError> {
        let texts = values.texts()?;
        Ok(texts.iter().all(|t| self.accepts_len(t.chars().count())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn machine_type(values: Vec<serde_json::Value>) -> ValueSet {
        ValueSet::new("jsonpath::.spec.domain.machine.type", values)
    }

    #[test]
    fn within_bounds() {
        let bounds = StringLength::new(Some(1), Some(32));
        assert!(bounds.check(&machine_type(vec![json!("q35")])).unwrap());
    }

    #[test]
    fn shorter_than_min() {
        let bounds = StringLength::new(Some(64), None);
        assert!(!bounds.check(&machine_type(vec![json!("q35")])).unwrap());
    }

    #[test]
    fn longer_than_max() {
        let bounds = StringLength::new(None, Some(1));
        assert!(!bounds.check(&machine_type(vec![json!("q35")])).unwrap());
    }

    #[test]
    fn length_counts_characters() {
        let bounds = StringLength::new(Some(3), Some(3));
        assert!(bounds.check(&machine_type(vec![json!("äöü")])).unwrap());
    }

    #[test]
    fn multibyte_character_counts_once() {
        let bounds = StringLength::new(None, Some(1));
        assert!(bounds.check(&machine_type(vec![json!("é")])).unwrap());
        assert!(!bounds.check(&machine_type(vec![json!("éé")])).unwrap());
    }

    #[test]
    fn every_value_must_fit() {
        let bounds = StringLength::new(Some(4), None);
        assert!(!bounds.check(&machine_type(vec![json!("virtio"), json!("sata"), json!("ide")])).unwrap());
    }

    #[test]
    fn numbers_use_their_text() {
        let bounds = StringLength::new(None, Some(2));
        assert!(bounds.check(&machine_type(vec![json!(42)])).unwrap());
        assert!(!bounds.check(&machine_type(vec![json!(420)])).unwrap());
    }

    #[test]
    fn objects_are_type_errors() {
        let bounds = StringLength::new(Some(1), None);
        let err = bounds.check(&machine_type(vec![json!({"type": "q35"})])).unwrap_err();
        assert!(matches!(err, RuleError::ValueType { .. }));
    }
}
