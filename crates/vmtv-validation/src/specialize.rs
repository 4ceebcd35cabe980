//! # Rule Specialization
//!
//! [`RuleSpecializer::specialize`] turns a rule template and a document pair
//! into a [`RuleApplier`]:
//!
//! 1. Parse the kind. An unknown kind fails before any path is resolved.
//! 2. Resolve the path against the candidate, falling back to the reference.
//!    A syntax error aborts; an empty result does not.
//! 3. Bind the kind's parameters into a [`Check`].
//!
//! The template is never mutated and value content is never inspected here;
//! that happens in [`RuleApplier::apply`].

use vmtv_core::{Rule, RuleError};

use crate::applier::RuleApplier;
use crate::check::Check;
use crate::resolver::{JsonPathResolver, PathResolver};

/// Binds rule templates to documents through a [`PathResolver`].
///
/// Holds no mutable state; share it freely across threads when the
/// resolver allows.
#[derive(Debug, Clone, Default)]
pub struct RuleSpecializer<R = JsonPathResolver> {
    resolver: R,
}

impl RuleSpecializer<JsonPathResolver> {
    /// A specializer over JSON/YAML documents.
    pub fn new() -> Self {
        Self {
            resolver: JsonPathResolver,
        }
    }
}

impl<R: PathResolver> RuleSpecializer<R> {
    /// A specializer using a custom resolver.
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// The resolver in use.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Specialize `rule` against `candidate`, with `reference` as the
    /// source of default values.
    ///
    /// # Errors
    ///
    /// - [`RuleError::Kind`] if the rule kind is unknown.
    /// - [`RuleError::PathSyntax`] if the path expression is malformed.
    /// - [`RuleError::PatternSyntax`] if a regex rule's pattern does not compile.
    pub fn specialize(
        &self,
        rule: &Rule,
        candidate: &R::Document,
        reference: &R::Document,
    ) -> Result<RuleApplier, RuleError> {
        let kind = rule.parse_kind()?;
        let (values, source) = self
            .resolver
            .resolve_with_fallback(candidate, reference, &rule.path)?;
        let check = Check::bind(kind, rule)?;

        tracing::debug!(
            rule = %rule.name,
            %kind,
            path = %rule.path,
            resolved = values.len(),
            from_reference = source.is_reference(),
            "specialized rule"
        );

        Ok(RuleApplier {
            name: rule.name.clone(),
            message: rule.message.clone(),
            valid_path: rule.valid_path.clone(),
            check,
            values,
        })
    }
}
