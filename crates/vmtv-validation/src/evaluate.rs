//! # Rule Set Evaluation
//!
//! Applies a collection of rules to one document pair and records a
//! tri-state outcome per rule. An error in one rule never stops the others.
//!
//! ## Admission
//!
//! A document is admitted iff no rule errored and every failing rule is a
//! warning rule (`justWarning`). The report keeps failures and errors apart
//! so operators can tell an invalid template from a broken rule.

use serde::{Deserialize, Serialize};
use vmtv_core::Rule;

use crate::resolver::PathResolver;
use crate::specialize::RuleSpecializer;

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// The document satisfies the rule.
    Pass,
    /// The document violates the rule.
    Fail {
        /// The rule's rejection reason.
        message: String,
        /// True for warning rules, which do not reject the document.
        warning: bool,
    },
    /// The rule could not be evaluated.
    Error {
        /// Error description.
        details: String,
        /// True when the rule itself is broken rather than the document.
        rule_defect: bool,
    },
}

/// Outcome of one rule, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleReport {
    /// Rule name.
    pub name: String,
    /// What happened.
    #[serde(flatten)]
    pub outcome: RuleOutcome,
}

/// Per-rule outcomes for one document pair, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// One entry per rule.
    pub reports: Vec<RuleReport>,
}

impl EvaluationReport {
    /// True iff nothing errored and nothing but warnings failed.
    pub fn is_admitted(&self) -> bool {
        self.reports.iter().all(|r| match &r.outcome {
            RuleOutcome::Pass => true,
            RuleOutcome::Fail { warning, .. } => *warning,
            RuleOutcome::Error { .. } => false,
        })
    }

    /// Rules that passed.
    pub fn passed(&self) -> impl Iterator<Item = &RuleReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, RuleOutcome::Pass))
    }

    /// Non-warning rules that failed.
    pub fn failures(&self) -> impl Iterator<Item = &RuleReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, RuleOutcome::Fail { warning: false, .. }))
    }

    /// Warning rules that failed.
    pub fn warnings(&self) -> impl Iterator<Item = &RuleReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, RuleOutcome::Fail { warning: true, .. }))
    }

    /// Rules that could not be evaluated.
    pub fn errors(&self) -> impl Iterator<Item = &RuleReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, RuleOutcome::Error { .. }))
    }

    /// Look up the report for a rule by name.
    pub fn get(&self, name: &str) -> Option<&RuleReport> {
        self.reports.iter().find(|r| r.name == name)
    }
}

/// Evaluate every rule against `candidate`, falling back to `reference`.
pub fn evaluate_rules<'a, R, I>(
    specializer: &RuleSpecializer<R>,
    rules: I,
    candidate: &R::Document,
    reference: &R::Document,
) -> EvaluationReport
where
    R: PathResolver,
    I: IntoIterator<Item = &'a Rule>,
{
    let reports: Vec<RuleReport> = rules
        .into_iter()
        .map(|rule| RuleReport {
            name: rule.name.clone(),
            outcome: evaluate_rule(specializer, rule, candidate, reference),
        })
        .collect();

    let report = EvaluationReport { reports };
    tracing::info!(
        rules = report.reports.len(),
        passed = report.passed().count(),
        failed = report.failures().count(),
        warnings = report.warnings().count(),
        errors = report.errors().count(),
        admitted = report.is_admitted(),
        "evaluated rule set"
    );
    report
}

fn evaluate_rule<R: PathResolver>(
    specializer: &RuleSpecializer<R>,
    rule: &Rule,
    candidate: &R::Document,
    reference: &R::Document,
) -> RuleOutcome {
    let verdict = specializer
        .specialize(rule, candidate, reference)
        .and_then(|applier| applier.apply());

    match verdict {
        Ok(true) => RuleOutcome::Pass,
        Ok(false) => RuleOutcome::Fail {
            message: rule.message.clone(),
            warning: rule.just_warning,
        },
        Err(e) => {
            tracing::warn!(rule = %rule.name, error = %e, "rule could not be evaluated");
            RuleOutcome::Error {
                details: e.to_string(),
                rule_defect: e.is_rule_defect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> serde_json::Value {
        json!({
            "spec": {
                "domain": {
                    "machine": { "type": "q35" },
                    "resources": { "requests": { "memory": "128M" } }
                }
            }
        })
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::new("enum", "SupportedChipset", "jsonpath::.spec.domain.machine.type", "bad chipset")
                .with_values(["q35"]),
            Rule::new("integer", "SmallMemory", "jsonpath::.spec.domain.resources.requests.memory", "too much memory")
                .with_max(64 * 1024 * 1024),
            Rule::new("integer-value", "Bogus", "jsonpath::.spec", "never"),
            Rule::new("regex", "HasHostname", "jsonpath::.spec.hostname", "hostname missing").with_pattern("."),
        ]
    }

    #[test]
    fn one_outcome_per_rule_in_order() {
        let report = evaluate_rules(&RuleSpecializer::new(), &rules(), &template(), &json!({}));
        let names: Vec<&str> = report.reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["SupportedChipset", "SmallMemory", "Bogus", "HasHostname"]);

        assert_eq!(report.get("SupportedChipset").unwrap().outcome, RuleOutcome::Pass);
        assert_eq!(
            report.get("SmallMemory").unwrap().outcome,
            RuleOutcome::Fail {
                message: "too much memory".to_string(),
                warning: false
            }
        );
        assert!(matches!(
            report.get("Bogus").unwrap().outcome,
            RuleOutcome::Error { rule_defect: true, .. }
        ));
        assert!(matches!(
            report.get("HasHostname").unwrap().outcome,
            RuleOutcome::Error { rule_defect: false, .. }
        ));
        assert!(!report.is_admitted());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn warning_failures_do_not_reject() {
        let rules = vec![
            Rule::new("enum", "SupportedChipset", "jsonpath::.spec.domain.machine.type", "bad chipset")
                .with_values(["q35"]),
            Rule::new("integer", "SmallMemory", "jsonpath::.spec.domain.resources.requests.memory", "too much memory")
                .with_max(64 * 1024 * 1024)
                .warning_only(),
        ];
        let report = evaluate_rules(&RuleSpecializer::new(), &rules, &template(), &json!({}));
        assert!(report.is_admitted());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn empty_rule_set_admits() {
        let report = evaluate_rules(&RuleSpecializer::new(), &Vec::<Rule>::new(), &template(), &json!({}));
        assert!(report.reports.is_empty());
        assert!(report.is_admitted());
    }

    #[test]
    fn report_serializes_with_outcome_tag() {
        let report = EvaluationReport {
            reports: vec![
                RuleReport {
                    name: "a".to_string(),
                    outcome: RuleOutcome::Pass,
                },
                RuleReport {
                    name: "b".to_string(),
                    outcome: RuleOutcome::Fail {
                        message: "m".to_string(),
                        warning: false,
                    },
                },
            ],
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "reports": [
                    { "name": "a", "outcome": "pass" },
                    { "name": "b", "outcome": "fail", "message": "m", "warning": false }
                ]
            })
        );
    }
}
