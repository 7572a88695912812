//! Coverage command implementation.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Args;
use glossa::Resource;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use super::load_resource;
use crate::output::table::{format_coverage_table, ResourceCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source resource file (e.g., en.json).
    #[arg(long)]
    pub source: PathBuf,

    /// Translation resource files to compare against the source.
    #[arg(required = true)]
    pub translations: Vec<PathBuf>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    extra: Vec<String>,
}

/// Message ids of a resource in declaration order, without repeats.
fn unique_message_ids(resource: &Resource) -> Vec<String> {
    let mut seen = BTreeSet::new();
    resource
        .message_ids()
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Label for a translation file: its stem, or the whole path if it has none.
fn language_label(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |stem| stem.to_string_lossy().into_owned())
}

/// Compare one translation's message ids against the source ids.
fn compare(
    language: String,
    source_ids: &[String],
    translated_ids: &[String],
) -> ResourceCoverage {
    let source: BTreeSet<&str> = source_ids.iter().map(String::as_str).collect();
    let translated: BTreeSet<&str> = translated_ids.iter().map(String::as_str).collect();
    let missing: Vec<String> = source_ids
        .iter()
        .filter(|id| !translated.contains(id.as_str()))
        .cloned()
        .collect();
    let extra: Vec<String> = translated_ids
        .iter()
        .filter(|id| !source.contains(id.as_str()))
        .cloned()
        .collect();
    ResourceCoverage {
        language,
        translated: source_ids.len() - missing.len(),
        missing,
        extra,
    }
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let source_ids = unique_message_ids(&load_resource(&args.source)?);
    let source_count = source_ids.len();

    let mut coverage_data: Vec<ResourceCoverage> = Vec::new();
    for path in &args.translations {
        let translated_ids = unique_message_ids(&load_resource(path)?);
        coverage_data.push(compare(language_label(path), &source_ids, &translated_ids));
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .into_iter()
            .map(|c| CoverageJson {
                language: c.language,
                translated: c.translated,
                total: source_count,
                missing: c.missing,
                extra: c.extra,
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        for resource in &coverage_data {
            if !resource.missing.is_empty() {
                println!("\nMissing in {}:", resource.language);
                for id in &resource.missing {
                    println!("  - {}", id);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
