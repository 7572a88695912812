//! CLI command implementations.

mod check;
mod coverage;
mod eval;

use std::fs::read_to_string;
use std::path::Path;

use glossa::Resource;
use miette::miette;

use crate::output::ResourceDiagnostic;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use eval::{run_eval, EvalArgs};

/// Read and parse a JSON resource, pointing at the offending position when
/// the JSON does not describe a resource.
fn load_resource(path: &Path) -> miette::Result<Resource> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read resource file {}: {}", path.display(), e))?;
    Resource::from_json_str(&content)
        .map_err(|e| ResourceDiagnostic::from_json_error(path, &content, &e).into())
}
