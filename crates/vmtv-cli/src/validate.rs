//! # Validate Subcommand
//!
//! Evaluates a rule file against a candidate VM template, falling back to a
//! reference document for fields the candidate leaves unset.
//!
//! Both documents are narrowed to their instance template first, so a
//! `VirtualMachine` object and a bare template are handled the same way.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use vmtv_schema::RuleSet;
use vmtv_validation::{evaluate_rules, template_root, EvaluationReport, RuleOutcome, RuleSpecializer};

use crate::load_document;

/// Report format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per rule plus a summary.
    #[default]
    Text,
    /// The full evaluation report as JSON.
    Json,
}

/// Arguments for the `vmtv validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Rule file (JSON, or YAML with a .yaml/.yml extension).
    #[arg(long, value_name = "FILE")]
    pub rules: PathBuf,

    /// VM template to validate.
    #[arg(long, value_name = "FILE")]
    pub candidate: PathBuf,

    /// Document supplying defaults for fields the candidate leaves unset.
    #[arg(long, value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the candidate is admitted, 1 when it is
/// rejected. Operational errors are returned as `Err`.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let rules = RuleSet::from_path(&args.rules)
        .with_context(|| format!("failed to load rules from {}", args.rules.display()))?;
    tracing::info!(rules = rules.len(), path = %args.rules.display(), "loaded rule set");

    let candidate = load_document(&args.candidate)?;
    let reference = match &args.reference {
        Some(path) => load_document(path)?,
        None => Value::Object(Default::default()),
    };

    let report = evaluate_rules(
        &RuleSpecializer::new(),
        &rules,
        template_root(&candidate),
        template_root(&reference),
    );

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        ),
    }

    Ok(if report.is_admitted() { 0 } else { 1 })
}

/// Render a report as one line per rule followed by a summary line.
pub fn render_text(report: &EvaluationReport) -> String {
    let mut out: String = report
        .reports
        .iter()
        .map(|r| match &r.outcome {
            RuleOutcome::Pass => format!("PASS: {}\n", r.name),
            RuleOutcome::Fail { message, warning: false } => format!("FAIL: {}: {message}\n", r.name),
            RuleOutcome::Fail { message, warning: true } => format!("WARN: {}: {message}\n", r.name),
            RuleOutcome::Error { details, .. } => format!("ERROR: {}: {details}\n", r.name),
        })
        .collect();
    out.push_str(&format!(
        "\n{} rule(s): {} passed, {} failed, {} warning(s), {} error(s). {}\n",
        report.reports.len(),
        report.passed().count(),
        report.failures().count(),
        report.warnings().count(),
        report.errors().count(),
        if report.is_admitted() { "Admitted." } else { "Rejected." }
    ));
    out
}
