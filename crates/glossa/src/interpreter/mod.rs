//! Resolution engine for translation entries.
//!
//! A [`Bundle`] owns registered messages and terms, the function registry
//! and the formatter cache. Each format call resolves a pattern inside a
//! fresh [`Scope`] that carries arguments, the error sink and the recursion
//! and cycle guards.

mod bundle;
mod context;
mod error;
mod evaluator;
mod functions;
mod intl;
mod lint;
mod registry;

pub use bundle::{Bundle, DEFAULT_MAX_DEPTH, TextTransform, ValueFormatter};
pub use context::{Args, Scope};
pub use error::{
    BundleError, EntryKind, FunctionError, LoadError, ResolverError, compute_suggestions,
};
pub use evaluator::{FSI, PDI, resolve_expression, resolve_pattern};
pub use functions::{Function, FunctionRegistry, NamedArgs};
pub use intl::IntlCache;
pub use lint::{ReferenceWarning, check_references};
