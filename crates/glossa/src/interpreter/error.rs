//! Error types for registration, loading and resolution.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur when reading a resource from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the resource.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not a valid JSON resource.
    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The table an entry or function is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Message,
    Term,
    Function,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Message => write!(f, "message"),
            EntryKind::Term => write!(f, "term"),
            EntryKind::Function => write!(f, "function"),
        }
    }
}

/// A registration-time error. Returned, never raised, by `add_resource`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    /// An entry with this id is already registered and overrides are off.
    #[error("attempt to override an existing {kind}: \"{id}\"")]
    Overriding { kind: EntryKind, id: String },

    /// A term entry was registered without a value.
    #[error("term \"{id}\" has no value")]
    MissingTermValue { id: String },
}

/// An error returned by a function implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("missing positional argument")]
    MissingArgument,

    #[error("expected {expected} argument, got {found}")]
    InvalidArgument {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0}")]
    Other(String),
}

/// An error that occurred while resolving a pattern.
///
/// With an error sink these are collected and resolution continues with a
/// fallback; without one the first is returned to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolverError {
    #[error("unknown variable: ${name}")]
    UnknownVariable { name: String },

    #[error("unknown message: {id}")]
    UnknownMessage { id: String },

    #[error("unknown attribute '{attribute}' on message {id}")]
    UnknownMessageAttribute { id: String, attribute: String },

    #[error("message {id} has no value")]
    MissingValue { id: String },

    #[error("unknown term: {id}")]
    UnknownTerm { id: String },

    #[error("unknown attribute '{attribute}' on term {id}")]
    UnknownTermAttribute { id: String, attribute: String },

    #[error("cyclic reference detected: {}", chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    #[error("unknown function: {name}()")]
    UnknownFunction { name: String },

    #[error("function {name}() failed: {source}")]
    FunctionInvocation {
        name: String,
        #[source]
        source: FunctionError,
    },

    #[error("default variant index {star} is out of range for {count} variants")]
    InvalidDefaultVariant { star: usize, count: usize },

    #[error("too much recursion: maximum depth of {max_depth} exceeded")]
    TooMuchRecursion { max_depth: usize },

    /// A locale formatter could not be constructed or applied.
    #[error("cannot format for locale '{locale}': {reason}")]
    Formatter { locale: String, reason: String },
}

/// Returns up to three names from `available` that are close to `key`,
/// closest first.
///
/// Keys of up to three characters accept an edit distance of 1; longer keys
/// accept 2.
pub fn compute_suggestions<S: AsRef<str>>(
    key: &str,
    available: impl IntoIterator<Item = S>,
) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, String)> = available
        .into_iter()
        .map(|candidate| candidate.as_ref().to_string())
        .filter(|candidate| candidate != key)
        .map(|candidate| (strsim::levenshtein(key, &candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    candidates.sort_unstable();
    candidates.dedup();
    candidates
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate)
        .collect()
}
