#![deny(missing_docs)]

//! # vmtv-core — Foundational Types for the VM Template Validator
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Rule templates are plain data.** [`Rule`] is exactly what an author
//!    writes in a rule file. The kind is kept as text so that an unknown kind
//!    is reported when the rule is specialized, not when the file is parsed.
//!
//! 2. **Closed kind set.** [`RuleKind`] has one variant per check kind.
//!    Adding a kind forces every `match` in the workspace to handle it.
//!
//! 3. **Explicit optionality.** `min`, `max`, `minLength` and `maxLength`
//!    are `Option<i64>`; zero is a real bound, never "unset".
//!
//! 4. **Owned value sets.** A [`ValueSet`] holds copies of the matched
//!    scalars, so nothing borrowed from a document outlives resolution.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vmtv-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod path;
pub mod quantity;
pub mod rule;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::RuleError;
pub use path::{PathExpr, JSONPATH_MARKER};
pub use quantity::parse_quantity;
pub use rule::{Rule, RuleKind};
pub use value::ValueSet;
