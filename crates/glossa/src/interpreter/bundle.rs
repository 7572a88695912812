//! The bundle: registered entries, functions and formatters for one
//! ordered list of locales.

use std::borrow::Cow;
use std::collections::BTreeMap;

use bon::bon;
use icu_locale_core::{Locale, locale};
use tracing::{debug, warn};

use crate::ast::{Message, Pattern, PatternElement, Resource, Term};
use crate::interpreter::evaluator::resolve_pattern;
use crate::interpreter::registry::EntryRegistry;
use crate::interpreter::{
    Args, BundleError, EntryKind, Function, FunctionRegistry, IntlCache, ResolverError, Scope,
};
use crate::types::Value;

/// Default ceiling on nested expression resolution.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Hook applied to every literal text fragment before output.
pub type TextTransform = fn(&str) -> Cow<'_, str>;

/// Hook that may replace the default rendering of a value.
///
/// Returning `None` falls back to the built-in rendering.
pub type ValueFormatter = fn(&Value, &IntlCache) -> Option<String>;

/// A set of messages and terms for one locale, and the machinery to format
/// them.
///
/// Registration takes `&mut self` and formatting `&self`, so once entries
/// are installed a bundle can be shared across threads for formatting.
///
/// # Example
///
/// ```
/// use glossa::{Bundle, Entry, Expression, Pattern, Resource, args};
/// use icu_locale_core::locale;
///
/// let mut bundle = Bundle::builder()
///     .locales(vec![locale!("en-US")])
///     .use_isolating(false)
///     .build();
/// let greet = Pattern::from_elements(vec![
///     "Hello, ".into(),
///     Expression::variable("name").into(),
///     "!".into(),
/// ]);
/// let errors = bundle.add_resource(Resource::new(vec![Entry::new("greet", greet)]));
/// assert!(errors.is_empty());
///
/// let mut errors = Vec::new();
/// let text = bundle
///     .format_message("greet", Some(&args! { "name" => "Ada" }), Some(&mut errors))
///     .unwrap();
/// assert_eq!(text, "Hello, Ada!");
/// assert!(errors.is_empty());
/// ```
pub struct Bundle {
    locales: Vec<Locale>,
    entries: EntryRegistry,
    functions: FunctionRegistry,
    use_isolating: bool,
    transform: Option<TextTransform>,
    formatter: Option<ValueFormatter>,
    max_depth: usize,
    intls: IntlCache,
}

#[bon]
impl Bundle {
    /// Create a bundle.
    ///
    /// `functions` are merged over the built-in `NUMBER` and `DATETIME`,
    /// replacing them on a name clash. The formatter cache follows the first
    /// locale that has locale data; with no locales the root locale `und` is
    /// used.
    #[builder]
    pub fn new(
        #[builder(default = vec![locale!("und")])] locales: Vec<Locale>,
        #[builder(default)] functions: BTreeMap<String, Function>,
        #[builder(default = true)] use_isolating: bool,
        transform: Option<TextTransform>,
        formatter: Option<ValueFormatter>,
        #[builder(default = DEFAULT_MAX_DEPTH)] max_depth: usize,
    ) -> Self {
        let mut registry = FunctionRegistry::with_builtins();
        for (name, function) in functions {
            registry.replace(name, function);
        }
        let intls = IntlCache::negotiate(&locales);
        Self {
            locales,
            entries: EntryRegistry::new(),
            functions: registry,
            use_isolating,
            transform,
            formatter,
            max_depth,
            intls,
        }
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Bundle::builder().build()
    }
}

impl Bundle {
    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// Formatter cache for the negotiated locale.
    pub fn intls(&self) -> &IntlCache {
        &self.intls
    }

    pub fn use_isolating(&self) -> bool {
        self.use_isolating
    }

    pub fn set_use_isolating(&mut self, use_isolating: bool) {
        self.use_isolating = use_isolating;
    }

    pub fn set_transform(&mut self, transform: Option<TextTransform>) {
        self.transform = transform;
    }

    pub fn set_formatter(&mut self, formatter: Option<ValueFormatter>) {
        self.formatter = formatter;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn formatter(&self) -> Option<ValueFormatter> {
        self.formatter
    }

    pub(crate) fn transform_text<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.transform {
            Some(transform) => transform(text),
            None => Cow::Borrowed(text),
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Register a function under a name not yet in use.
    pub fn add_function(
        &mut self,
        name: impl Into<String>,
        function: Function,
    ) -> Result<(), BundleError> {
        let name = name.into();
        if self.functions.insert(name.as_str(), function).is_err() {
            warn!(id = %name, kind = %EntryKind::Function, "function already registered");
            return Err(BundleError::Overriding {
                kind: EntryKind::Function,
                id: name,
            });
        }
        debug!(id = %name, "registered function");
        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Registered function names in sorted order.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.names()
    }

    // =========================================================================
    // Entries
    // =========================================================================

    /// Install every entry of `resource`, keeping existing entries on an id
    /// clash.
    ///
    /// Each entry is handled independently: a rejected entry does not stop
    /// the rest. Returns one error per rejected entry.
    pub fn add_resource(&mut self, resource: Resource) -> Vec<BundleError> {
        self.insert_resource(resource, false)
    }

    /// Install every entry of `resource`, replacing existing entries on an
    /// id clash.
    pub fn add_resource_overriding(&mut self, resource: Resource) -> Vec<BundleError> {
        self.insert_resource(resource, true)
    }

    fn insert_resource(&mut self, resource: Resource, allow_overrides: bool) -> Vec<BundleError> {
        resource
            .body
            .into_iter()
            .filter_map(|entry| self.entries.insert(entry, allow_overrides).err())
            .collect()
    }

    pub fn has_message(&self, id: &str) -> bool {
        self.entries.message(id).is_some()
    }

    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.entries.message(id)
    }

    /// Message ids in sorted order.
    pub fn message_ids(&self) -> Vec<&str> {
        self.entries.message_ids()
    }

    pub(crate) fn get_term(&self, id: &str) -> Option<&Term> {
        self.entries.term(id)
    }

    pub(crate) fn term_ids(&self) -> Vec<&str> {
        self.entries.term_ids()
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Format a pattern.
    ///
    /// A pattern without placeables only goes through the text transform.
    /// Otherwise it is resolved in a fresh [`Scope`]. With `errors`, every
    /// resolution error is appended there and replaced by a fallback in the
    /// output; without it the first error is returned.
    pub fn format_pattern(
        &self,
        pattern: &Pattern,
        args: Option<&Args>,
        errors: Option<&mut Vec<ResolverError>>,
    ) -> Result<String, ResolverError> {
        match pattern {
            Pattern::Text(text) => Ok(self.transform_text(text).into_owned()),
            Pattern::Complex(elements) if pattern.is_plain() => Ok(elements
                .iter()
                .filter_map(|element| match element {
                    PatternElement::Text(text) => Some(self.transform_text(text)),
                    PatternElement::Placeable(_) => None,
                })
                .collect()),
            Pattern::Complex(_) => {
                let mut scope = Scope::new(self, args, errors);
                resolve_pattern(pattern, &mut scope)
            }
        }
    }

    /// Format the value of message `id`.
    ///
    /// A missing message or a message without a value is returned as an
    /// error regardless of `errors`.
    pub fn format_message(
        &self,
        id: &str,
        args: Option<&Args>,
        errors: Option<&mut Vec<ResolverError>>,
    ) -> Result<String, ResolverError> {
        let message = self
            .get_message(id)
            .ok_or_else(|| ResolverError::UnknownMessage { id: id.to_string() })?;
        let pattern = message
            .value()
            .ok_or_else(|| ResolverError::MissingValue { id: id.to_string() })?;
        self.format_pattern(pattern, args, errors)
    }

    /// Format attribute `attribute` of message `id`.
    pub fn format_attribute(
        &self,
        id: &str,
        attribute: &str,
        args: Option<&Args>,
        errors: Option<&mut Vec<ResolverError>>,
    ) -> Result<String, ResolverError> {
        let message = self
            .get_message(id)
            .ok_or_else(|| ResolverError::UnknownMessage { id: id.to_string() })?;
        let pattern = message.attribute(attribute).ok_or_else(|| {
            ResolverError::UnknownMessageAttribute {
                id: id.to_string(),
                attribute: attribute.to_string(),
            }
        })?;
        self.format_pattern(pattern, args, errors)
    }
}
