//! # vmtv-schema — Rule File Loading
//!
//! Loads rule sets from JSON or YAML documents supplied by the caller.
//!
//! ## Schema Validation (`validate`)
//!
//! The [`validate`] module compiles the embedded rule authoring schema
//! (`schemas/rule-set.schema.json`) and reports structured violations for
//! malformed rule documents.
//!
//! ## Rule Sets (`ruleset`)
//!
//! [`RuleSet`] parses a document, runs it through the schema, and decodes it
//! into ordered [`vmtv_core::Rule`] templates.
//!
//! ## Crate Policy
//!
//! - Depends only on `vmtv-core` internally.
//! - Never fetches rules from cluster objects or remote stores; callers hand
//!   in the document text or a file path.

pub mod ruleset;
pub mod validate;

pub use ruleset::RuleSet;
pub use validate::{RuleSchemaValidator, RuleSetError, ValidationViolations, Violation, RULE_SET_SCHEMA};
