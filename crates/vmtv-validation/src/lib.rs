//! # vmtv-validation — Rule Specialization & Application
//!
//! The engine that decides whether a VM template satisfies a rule.
//!
//! ## Architecture
//!
//! - **Resolver** (`resolver.rs`): the [`PathResolver`] capability and the
//!   JSONPath implementation, including reference-document fallback.
//!
//! - **Checks** (`check/`): the four kind validators (integer range, string
//!   length, enum membership, pattern match) and the closed [`Check`] union.
//!
//! - **Specialization** (`specialize.rs`, `applier.rs`): binds a rule
//!   template to one document pair, producing a reusable [`RuleApplier`].
//!
//! - **Evaluation** (`evaluate.rs`): applies a rule collection and reports a
//!   pass / fail / error outcome per rule plus the admission decision.
//!
//! ## Crate Policy
//!
//! - Depends only on `vmtv-core` internally.
//! - No I/O and no shared mutable state; every operation is a bounded,
//!   side-effect-free computation over already-decoded documents.
//! - Kind dispatch uses exhaustive `match` on [`vmtv_core::RuleKind`].

pub mod applier;
pub mod check;
pub mod document;
pub mod evaluate;
pub mod resolver;
pub mod specialize;

pub use applier::RuleApplier;
pub use check::{Check, EnumMembership, IntegerRange, PatternMatch, StringLength};
pub use document::template_root;
pub use evaluate::{evaluate_rules, EvaluationReport, RuleOutcome, RuleReport};
pub use resolver::{JsonPathResolver, PathResolver, ValueSource};
pub use specialize::RuleSpecializer;
