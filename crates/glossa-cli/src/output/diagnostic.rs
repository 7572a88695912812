//! Miette diagnostics for resource files and bundle checks.

use std::path::Path;

use glossa::{BundleError, ReferenceWarning};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A resource file whose JSON does not describe a resource.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid resource: {message}")]
#[diagnostic(code(glossa::resource))]
pub struct ResourceDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl ResourceDiagnostic {
    /// Create a diagnostic from a JSON error with source context.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // Sum of (line_length + 1) for lines before the error line, plus column.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        ResourceDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, usize::from(offset < content.len())).into(),
            message: err.to_string(),
        }
    }
}

/// An entry rejected while loading resources into one bundle.
#[derive(Debug, Error, Diagnostic)]
#[error("{file}: {error}")]
#[diagnostic(code(glossa::collision), severity(Warning))]
pub struct CollisionDiagnostic {
    file: String,
    error: BundleError,
}

impl CollisionDiagnostic {
    pub fn new(file: &Path, error: BundleError) -> Self {
        CollisionDiagnostic {
            file: file.display().to_string(),
            error,
        }
    }
}

/// A reference that will fail at format time.
#[derive(Debug, Error, Diagnostic)]
#[error("{warning}")]
#[diagnostic(code(glossa::reference), severity(Warning))]
pub struct ReferenceDiagnostic {
    warning: ReferenceWarning,

    #[help]
    help: Option<String>,
}

impl From<ReferenceWarning> for ReferenceDiagnostic {
    fn from(warning: ReferenceWarning) -> Self {
        let help = match &warning {
            ReferenceWarning::InvalidDefaultVariant { .. } => {
                Some("the default variant index must point at an existing variant".to_string())
            }
            ReferenceWarning::UnknownFunction { suggestions, .. } if suggestions.is_empty() => {
                Some("register the function with Bundle::add_function".to_string())
            }
            _ => None,
        };
        ReferenceDiagnostic { warning, help }
    }
}
