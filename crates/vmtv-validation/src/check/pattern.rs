//! Pattern match check.

use regex::Regex;
use vmtv_core::{RuleError, ValueSet};

/// Unanchored regular-expression search over each value's string form.
///
/// The pattern may match anywhere within the value; authors anchor with
/// `^...$` when they want a full match.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    regex: Regex,
}

impl PatternMatch {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::PatternSyntax`] if the pattern does not compile.
    pub fn compile(pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::PatternSyntax {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// True iff every value contains a match.
    pub fn check(&self, values: &ValueSet) -> Result<bool, RuleError> {
        let texts = values.texts()?;
        Ok(texts.iter().all(|t| self.regex.is_match(t)))
    }
}
