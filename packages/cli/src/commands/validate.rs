use super::open_document;
use crate::config::Config;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{DocumentStore, ElementId};
use pagesmith_registry::{Severity, ValidationIssue};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document JSON file to check
    pub document: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    elements: usize,
    unknown_types: BTreeMap<ElementId, String>,
    issues: BTreeMap<ElementId, Vec<ValidationIssue>>,
}

impl Report {
    fn of(store: &DocumentStore) -> Self {
        let unknown_types = store
            .tree()
            .ids()
            .filter_map(|id| {
                let node = store.get(id.as_str())?;
                (!store.registry().contains(&node.type_id))
                    .then(|| (id.clone(), node.type_id.clone()))
            })
            .collect();

        Self {
            elements: store.tree().len(),
            unknown_types,
            issues: store.validate_all(),
        }
    }

    fn error_count(&self) -> usize {
        self.issues
            .values()
            .flatten()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    fn warning_count(&self) -> usize {
        self.unknown_types.len()
            + self
                .issues
                .values()
                .flatten()
                .filter(|issue| issue.severity == Severity::Warning)
                .count()
    }
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = Arc::new(config.registry(cwd)?);
    let store = open_document(registry, config.editor, &cwd.join(&args.document))?;
    let report = Report::of(&store);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&args.document, &report),
        other => bail!("Unknown format: {}. Use: text or json", other),
    }

    let errors = report.error_count();
    if errors > 0 {
        bail!("{} invalid prop value(s)", errors);
    }
    Ok(())
}

fn print_text(document: &Path, report: &Report) {
    println!("🔍 {} {}", "Validating".green().bold(), document.display());
    println!();

    for (id, type_id) in &report.unknown_types {
        println!(
            "  {} {}: unknown component type \"{}\"",
            "⚠".yellow(),
            id,
            type_id
        );
    }
    for (id, issues) in &report.issues {
        for issue in issues {
            let marker = match issue.severity {
                Severity::Error => "✗".red(),
                Severity::Warning => "⚠".yellow(),
            };
            println!("  {} {}.{}: {}", marker, id, issue.prop, issue.message);
        }
    }

    let errors = report.error_count();
    let warnings = report.warning_count();
    println!();
    println!(
        "✨ {} {} elements checked",
        if errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        },
        report.elements
    );
    if errors > 0 {
        println!("   {} {}", "Errors:".red(), errors);
    }
    if warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), warnings);
    }
}
