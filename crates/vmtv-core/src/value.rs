//! # Resolved Value Sets
//!
//! A [`ValueSet`] is the ordered list of values a path expression matched in
//! a document, together with the expression that produced it. It owns copies
//! of the matched values.
//!
//! Coercion helpers turn the raw JSON values into the form a check kind
//! needs. Every coercion failure is a [`RuleError::ValueType`] naming the
//! offending value and the path it came from.

use std::borrow::Cow;

use serde_json::Value;

use crate::error::RuleError;
use crate::quantity::parse_quantity;

/// Ordered, possibly empty sequence of values resolved from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSet {
    path: String,
    values: Vec<Value>,
}

impl ValueSet {
    /// Build a value set for the given path expression.
    pub fn new(path: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            path: path.into(),
            values,
        }
    }

    /// An empty value set for the given path expression.
    pub fn empty(path: impl Into<String>) -> Self {
        Self::new(path, Vec::new())
    }

    /// The path expression the values were resolved from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the path matched nothing.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a slice of all values, in match order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterate over the values in match order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Fails with [`RuleError::EmptyValueSet`] if nothing was matched.
    pub fn require_non_empty(&self) -> Result<(), RuleError> {
        if self.values.is_empty() {
            Err(RuleError::EmptyValueSet {
                path: self.path.clone(),
            })
        } else {
            Ok(())
        }
    }

    /// Coerce every value to an integer.
    ///
    /// Accepts JSON integers, floats with no fractional part, and strings
    /// holding an integer or a Kubernetes quantity (`"128Mi"`).
    pub fn integers(&self) -> Result<Vec<i64>, RuleError> {
        self.values
            .iter()
            .map(|v| as_integer(v).ok_or_else(|| self.type_error(v, "an integer")))
            .collect()
    }

    /// Coerce every value to its string form.
    ///
    /// Strings are taken as is; numbers and booleans use their JSON text.
    /// `null`, arrays and objects have no string form.
    pub fn texts(&self) -> Result<Vec<Cow<'_, str>>, RuleError> {
        self.values
            .iter()
            .map(|v| as_text(v).ok_or_else(|| self.type_error(v, "a string")))
            .collect()
    }

    fn type_error(&self, value: &Value, expected: &'static str) -> RuleError {
        RuleError::ValueType {
            path: self.path.clone(),
            value: value.to_string(),
            expected,
        }
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Integer view of a single JSON value.
pub fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
            if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Some(f as i64)
            } else {
                None
            }
        }
        Value::String(s) => parse_quantity(s),
        _ => None,
    }
}

/// String view of a single JSON value.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
