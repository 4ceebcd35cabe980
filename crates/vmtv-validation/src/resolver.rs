//! # Path Resolution
//!
//! [`PathResolver`] is the seam between the engine and whatever evaluates
//! path queries. The engine only ever reads documents through it, so the
//! specializer and validators can be tested against deterministic fakes.
//!
//! [`JsonPathResolver`] is the production implementation over
//! `serde_json::Value` documents, delegating evaluation to `serde_json_path`.
//!
//! ## Effective Values
//!
//! [`PathResolver::resolve_with_fallback`] reads the candidate first and the
//! reference only when the candidate matched nothing. The value validated is
//! the one actually in force: the user's override if present, otherwise the
//! default.

use serde_json::Value;
use serde_json_path::JsonPath;
use vmtv_core::{PathExpr, RuleError, ValueSet};

/// Evaluates path expressions against documents.
pub trait PathResolver {
    /// The document type this resolver reads.
    type Document: ?Sized;

    /// Resolve a marker-prefixed path expression against one document.
    ///
    /// A well-formed expression that matches nothing yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::PathSyntax`] if the expression is malformed.
    fn resolve(&self, document: &Self::Document, path: &str) -> Result<ValueSet, RuleError>;

    /// Resolve against `candidate`, falling back to `reference` when the
    /// candidate yields no values. Also reports which document was read last.
    ///
    /// A syntax error from either resolution is returned immediately.
    fn resolve_with_fallback(
        &self,
        candidate: &Self::Document,
        reference: &Self::Document,
        path: &str,
    ) -> Result<(ValueSet, ValueSource), RuleError> {
        let values = self.resolve(candidate, path)?;
        if !values.is_empty() {
            return Ok((values, ValueSource::Candidate));
        }
        tracing::trace!(path, "candidate has no value, reading reference");
        Ok((self.resolve(reference, path)?, ValueSource::Reference))
    }
}

/// Which document an effective value set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// The candidate had at least one value.
    Candidate,
    /// The candidate had none, so the reference was read.
    Reference,
}

impl ValueSource {
    /// True when the values were read from the reference document.
    pub fn is_reference(self) -> bool {
        self == ValueSource::Reference
    }
}

/// JSONPath (RFC 9535) resolver over decoded JSON/YAML documents.
///
/// `null` matches are dropped: a field explicitly set to `null` is unset,
/// the same as an absent one, so it falls back to the reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathResolver;

impl JsonPathResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }
}

impl PathResolver for JsonPathResolver {
    type Document = Value;

    fn resolve(&self, document: &Value, path: &str) -> Result<ValueSet, RuleError> {
        let expr = PathExpr::parse(path)?;
        let query = JsonPath::parse(expr.selector()).map_err(|e| RuleError::PathSyntax {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let values: Vec<Value> = query
            .query(document)
            .all()
            .into_iter()
            .filter(|v| !v.is_null())
            .cloned()
            .collect();

        Ok(ValueSet::new(path, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const BUS: &str = "jsonpath::.spec.domain.devices.disks[*].disk.bus";

    fn template() -> Value {
        json!({
            "spec": {
                "domain": {
                    "machine": { "type": "q35" },
                    "devices": {
                        "disks": [
                            { "name": "containerdisk", "disk": { "bus": "virtio" } },
                            { "name": "cloudinitdisk", "disk": { "bus": "sata" } }
                        ]
                    }
                }
            }
        })
    }

    #[test]
    fn resolves_single_leaf() {
        let set = JsonPathResolver
            .resolve(&template(), "jsonpath::.spec.domain.machine.type")
            .unwrap();
        assert_eq!(set.values(), &[json!("q35")]);
        assert_eq!(set.path(), "jsonpath::.spec.domain.machine.type");
    }

    #[test]
    fn wildcard_resolves_in_document_order() {
        let set = JsonPathResolver.resolve(&template(), BUS).unwrap();
        assert_eq!(set.values(), &[json!("virtio"), json!("sata")]);
    }

    #[test]
    fn missing_path_is_empty_not_error() {
        let set = JsonPathResolver
            .resolve(&template(), "jsonpath::.spec.domain.this.path.does.not.exist")
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn empty_array_under_wildcard_is_empty() {
        let doc = json!({ "spec": { "domain": { "devices": { "disks": [] } } } });
        assert!(JsonPathResolver.resolve(&doc, BUS).unwrap().is_empty());
    }

    #[test]
    fn null_matches_are_dropped() {
        let doc = json!({ "spec": { "domain": { "machine": { "type": null } } } });
        let set = JsonPathResolver
            .resolve(&doc, "jsonpath::.spec.domain.machine.type")
            .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn label_keys_with_dashes_and_dots_resolve() {
        let doc = json!({
            "metadata": {
                "labels": { "os-type": "linux", "kubevirt.io/vm": "vm-cirros" }
            }
        });
        let set = JsonPathResolver
            .resolve(&doc, "jsonpath::.metadata.labels.os-type")
            .unwrap();
        assert_eq!(set.values(), &[json!("linux")]);

        let set = JsonPathResolver
            .resolve(&doc, r"jsonpath::.metadata.labels.kubevirt\.io/vm")
            .unwrap();
        assert_eq!(set.values(), &[json!("vm-cirros")]);
    }

    #[test]
    fn filter_and_index_selectors_resolve() {
        let set = JsonPathResolver
            .resolve(&template(), r#"jsonpath::.spec.domain.devices.disks[?(@.name=="cloudinitdisk")].disk.bus"#)
            .unwrap();
        assert_eq!(set.values(), &[json!("sata")]);

        let set = JsonPathResolver
            .resolve(&template(), "jsonpath::.spec.domain.devices.disks[0].name")
            .unwrap();
        assert_eq!(set.values(), &[json!("containerdisk")]);
    }

    #[test]
    fn malformed_selector_is_syntax_error() {
        let err = JsonPathResolver
            .resolve(&template(), "jsonpath::.spec.domain[")
            .unwrap_err();
        assert!(matches!(err, RuleError::PathSyntax { .. }), "got: {err}");
    }

    #[test]
    fn missing_marker_is_syntax_error() {
        let err = JsonPathResolver.resolve(&template(), ".spec.domain").unwrap_err();
        assert!(matches!(err, RuleError::PathSyntax { .. }));
    }

    #[test]
    fn fallback_prefers_candidate() {
        let reference = json!({ "spec": { "domain": { "machine": { "type": "pc-i440fx" } } } });
        let (set, source) = JsonPathResolver
            .resolve_with_fallback(&template(), &reference, "jsonpath::.spec.domain.machine.type")
            .unwrap();
        assert_eq!(set.values(), &[json!("q35")]);
        assert_eq!(source, ValueSource::Candidate);
    }

    #[test]
    fn fallback_reads_reference_when_candidate_is_empty() {
        let candidate = json!({ "spec": { "domain": {} } });
        let reference = json!({ "spec": { "domain": { "machine": { "type": "pc-i440fx" } } } });
        let (set, source) = JsonPathResolver
            .resolve_with_fallback(&candidate, &reference, "jsonpath::.spec.domain.machine.type")
            .unwrap();
        assert_eq!(set.values(), &[json!("pc-i440fx")]);
        assert!(source.is_reference());
    }

    #[test]
    fn fallback_may_be_empty_on_both_sides() {
        let (set, source) = JsonPathResolver
            .resolve_with_fallback(&json!({}), &json!({}), BUS)
            .unwrap();
        assert!(set.is_empty());
        assert_eq!(source, ValueSource::Reference);
    }

    /// Fake resolver keyed by (document name, path), recording every call.
    struct FakeResolver {
        answers: HashMap<(&'static str, &'static str), Result<Vec<Value>, RuleError>>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl PathResolver for FakeResolver {
        type Document = &'static str;

        fn resolve(&self, document: &&'static str, path: &str) -> Result<ValueSet, RuleError> {
            self.calls.borrow_mut().push(*document);
            let answer = self
                .answers
                .iter()
                .find(|((doc, p), _)| doc == document && *p == path)
                .map(|(_, answer)| answer);
            match answer {
                Some(Ok(values)) => Ok(ValueSet::new(path, values.clone())),
                Some(Err(e)) => Err(e.clone()),
                None => Ok(ValueSet::empty(path)),
            }
        }
    }

    #[test]
    fn candidate_syntax_error_skips_reference() {
        let err = RuleError::PathSyntax {
            path: "p".to_string(),
            reason: "bad".to_string(),
        };
        let fake = FakeResolver {
            answers: HashMap::from([(("candidate", "p"), Err(err.clone()))]),
            calls: RefCell::new(Vec::new()),
        };
        assert_eq!(
            fake.resolve_with_fallback(&"candidate", &"reference", "p").unwrap_err(),
            err
        );
        assert_eq!(*fake.calls.borrow(), vec!["candidate"]);
    }

    #[test]
    fn reference_syntax_error_propagates() {
        let err = RuleError::PathSyntax {
            path: "p".to_string(),
            reason: "bad".to_string(),
        };
        let fake = FakeResolver {
            answers: HashMap::from([(("reference", "p"), Err(err.clone()))]),
            calls: RefCell::new(Vec::new()),
        };
        assert_eq!(
            fake.resolve_with_fallback(&"candidate", &"reference", "p").unwrap_err(),
            err
        );
        assert_eq!(*fake.calls.borrow(), vec!["candidate", "reference"]);
    }

    #[test]
    fn non_empty_candidate_never_reads_reference() {
        let fake = FakeResolver {
            answers: HashMap::from([(("candidate", "p"), Ok(vec![json!(1)]))]),
            calls: RefCell::new(Vec::new()),
        };
        let (set, source) = fake.resolve_with_fallback(&"candidate", &"reference", "p").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(source, ValueSource::Candidate);
        assert_eq!(*fake.calls.borrow(), vec!["candidate"]);
    }
}
