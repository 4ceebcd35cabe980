//! # Rule File Schema Validation
//!
//! Runtime validation of rule documents against the embedded rule authoring
//! schema (Draft 2020-12, `schemas/rule-set.schema.json`).
//!
//! ## Trust Boundary
//!
//! Rule files are written by humans. A malformed file is rejected as a whole
//! with structured violations (instance path, schema path, message) before
//! any rule is deserialized.
//!
//! The schema checks shape only. The rule kind is checked for being a
//! non-empty string, not for being a known kind: an unknown kind is a
//! per-rule error reported at specialization so that one bad rule does not
//! hide the verdicts of the others.

use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// The rule authoring schema, embedded at compile time.
pub const RULE_SET_SCHEMA: &str = include_str!("../schemas/rule-set.schema.json");

/// Schema name used in diagnostics.
pub const RULE_SET_SCHEMA_NAME: &str = "rule-set.schema.json";

/// Error while loading or validating a rule document.
#[derive(Error, Debug)]
pub enum RuleSetError {
    /// The document did not conform to the rule authoring schema.
    #[error("rule document '{source_name}' does not conform to {schema}:\n{violations}", schema = RULE_SET_SCHEMA_NAME)]
    ValidationFailed {
        /// File path or label of the rule document.
        source_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document could not be read or parsed.
    #[error("document load error for '{source_name}': {reason}")]
    DocumentLoadError {
        /// File path or label of the rule document.
        source_name: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The document conforms to the schema but does not deserialize into rules.
    #[error("rule decode error for '{source_name}': {reason}")]
    DecodeError {
        /// File path or label of the rule document.
        source_name: String,
        /// Deserializer diagnostic.
        reason: String,
    },

    /// The embedded schema could not be compiled.
    #[error("validator build error for schema '{schema}': {reason}", schema = RULE_SET_SCHEMA_NAME)]
    ValidatorBuildError {
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading a rule document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled validator for the rule authoring schema.
///
/// `Send + Sync`; compile once and share.
pub struct RuleSchemaValidator {
    validator: Validator,
}

impl fmt::Debug for RuleSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSchemaValidator")
            .field("schema", &RULE_SET_SCHEMA_NAME)
            .finish()
    }
}

impl RuleSchemaValidator {
    /// Compile the embedded rule authoring schema.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::ValidatorBuildError`] if the embedded schema
    /// is not valid JSON or not a valid Draft 2020-12 schema.
    pub fn new() -> Result<Self, RuleSetError> {
        let schema: Value = serde_json::from_str(RULE_SET_SCHEMA).map_err(|e| {
            RuleSetError::ValidatorBuildError {
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| RuleSetError::ValidatorBuildError {
                reason: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Validate a parsed rule document.
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError::ValidationFailed`] with every violation if
    /// the document does not conform.
    pub fn validate_document(&self, instance: &Value, source_name: &str) -> Result<(), RuleSetError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                source = source_name,
                count = violations.len(),
                "rule document rejected by schema"
            );
            Err(RuleSetError::ValidationFailed {
                source_name: source_name.to_string(),
                violations: ValidationViolations { violations },
            })
        }
    }
}
