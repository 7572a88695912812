//! Implementation of the `glossa check` command.

use std::path::PathBuf;

use glossa::{check_references, Bundle};
use miette::{IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream::Stdout};
use serde::Serialize;

use super::load_resource;
use crate::output::{CollisionDiagnostic, ReferenceDiagnostic};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Resource files to check (.json), loaded into one bundle in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with non-zero code on warnings as well as errors
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one finding.
#[derive(Debug, Serialize)]
struct FindingJson {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suggestions: Vec<String>,
}

/// JSON output for the check command.
#[derive(Debug, Serialize)]
struct CheckJson {
    messages: usize,
    errors: Vec<FindingJson>,
    warnings: Vec<FindingJson>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut bundle = Bundle::default();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for path in &args.files {
        let resource = match load_resource(path) {
            Ok(resource) => resource,
            Err(report) => {
                errors.push((
                    FindingJson {
                        kind: "resource",
                        file: Some(path.display().to_string()),
                        entry: None,
                        message: report.to_string(),
                        suggestions: Vec::new(),
                    },
                    report,
                ));
                continue;
            }
        };
        for error in bundle.add_resource(resource) {
            let finding = FindingJson {
                kind: "collision",
                file: Some(path.display().to_string()),
                entry: None,
                message: error.to_string(),
                suggestions: Vec::new(),
            };
            warnings.push((finding, Report::new(CollisionDiagnostic::new(path, error))));
        }
    }

    for warning in check_references(&bundle) {
        let finding = FindingJson {
            kind: "reference",
            file: None,
            entry: Some(warning.entry().to_string()),
            message: warning.to_string(),
            suggestions: warning.suggestions().to_vec(),
        };
        warnings.push((finding, Report::new(ReferenceDiagnostic::from(warning))));
    }

    let message_count = bundle.message_ids().len();
    let failed = !errors.is_empty() || (args.strict && !warnings.is_empty());

    if args.json {
        let output = CheckJson {
            messages: message_count,
            errors: errors.into_iter().map(|(finding, _)| finding).collect(),
            warnings: warnings.into_iter().map(|(finding, _)| finding).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        for (_, report) in errors.iter().chain(&warnings) {
            eprintln!("{:?}", report);
        }
        if errors.is_empty() && warnings.is_empty() {
            println!(
                "{} {} messages in {} files",
                "ok:".if_supports_color(Stdout, |text| text.green()),
                message_count,
                args.files.len()
            );
        } else {
            println!(
                "{} errors, {} warnings",
                errors.len().if_supports_color(Stdout, |n| n.red()),
                warnings.len().if_supports_color(Stdout, |n| n.yellow())
            );
        }
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
