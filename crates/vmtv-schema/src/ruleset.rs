//! # Rule Sets
//!
//! A rule file is a JSON or YAML sequence of rule templates. Loading parses
//! the document, checks it against the rule authoring schema, then
//! deserializes it into [`Rule`]s in file order.

use std::path::Path;

use serde_json::Value;
use vmtv_core::Rule;

use crate::validate::{RuleSchemaValidator, RuleSetError};

/// An ordered collection of rule templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rules in file order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Load a rule set from JSON text.
    pub fn from_json_str(content: &str, source_name: &str) -> Result<Self, RuleSetError> {
        let value: Value = serde_json::from_str(content).map_err(|e| RuleSetError::DocumentLoadError {
            source_name: source_name.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::from_value(value, source_name)
    }

    /// Load a rule set from YAML text.
    pub fn from_yaml_str(content: &str, source_name: &str) -> Result<Self, RuleSetError> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| RuleSetError::DocumentLoadError {
            source_name: source_name.to_string(),
            reason: format!("invalid YAML: {e}"),
        })?;
        Self::from_value(value, source_name)
    }

    /// Load a rule set from a file.
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        let source_name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| RuleSetError::DocumentLoadError {
            source_name: source_name.clone(),
            reason: format!("cannot read file: {e}"),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yaml" | "yml" => Self::from_yaml_str(&content, &source_name),
            _ => Self::from_json_str(&content, &source_name),
        }
    }

    /// Schema-check a parsed document and decode it into rules.
    pub fn from_value(value: Value, source_name: &str) -> Result<Self, RuleSetError> {
        RuleSchemaValidator::new()?.validate_document(&value, source_name)?;

        let rules: Vec<Rule> = serde_json::from_value(value).map_err(|e| RuleSetError::DecodeError {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;

        tracing::debug!(source = source_name, rules = rules.len(), "loaded rule set");
        Ok(Self { rules })
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
