use std::fmt::Debug;

use crate::ast::Literal;
use crate::interpreter::Scope;

/// A host-defined value type.
///
/// Custom values render themselves within the active [`Scope`] and may take
/// part in select expression matching.
///
/// # Example
///
/// ```
/// use glossa::{CustomValue, Literal, Scope};
///
/// #[derive(Debug)]
/// struct Gender(&'static str);
///
/// impl CustomValue for Gender {
///     fn format(&self, _scope: &Scope<'_, '_>) -> String {
///         self.0.to_string()
///     }
///
///     fn matches(&self, key: &Literal, _scope: &Scope<'_, '_>) -> bool {
///         matches!(key, Literal::String(k) if k == self.0)
///     }
/// }
/// ```
pub trait CustomValue: Debug + Send + Sync {
    /// Render this value as text.
    fn format(&self, scope: &Scope<'_, '_>) -> String;

    /// Whether a variant key selects this value. Never matches by default.
    fn matches(&self, _key: &Literal, _scope: &Scope<'_, '_>) -> bool {
        false
    }
}
