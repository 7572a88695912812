//! Per-call resolution scope.

use std::borrow::Cow;
use std::collections::HashMap;
use std::mem;

use tracing::debug;

use crate::interpreter::{Bundle, IntlCache, ResolverError};
use crate::types::{NumberValue, Value};

/// Caller-supplied arguments, by variable name.
pub type Args = HashMap<String, Value>;

/// State carried through one `format_pattern` call.
///
/// The scope tracks:
/// - External arguments, and the named arguments of the term being resolved
/// - The error sink, or its absence
/// - Recursion depth, bounded by the bundle's `max_depth`
/// - Entries on the active resolution path, for cycle detection
pub struct Scope<'a, 'e> {
    bundle: &'a Bundle,
    args: Option<&'a Args>,
    /// Named arguments of the innermost term call. `Some` while inside a term.
    local_args: Option<Args>,
    errors: Option<&'e mut Vec<ResolverError>>,
    /// Message and term references on the active resolution path.
    active: Vec<String>,
    depth: usize,
}

impl<'a, 'e> Scope<'a, 'e> {
    pub fn new(
        bundle: &'a Bundle,
        args: Option<&'a Args>,
        errors: Option<&'e mut Vec<ResolverError>>,
    ) -> Self {
        Self {
            bundle,
            args,
            local_args: None,
            errors,
            active: Vec::new(),
            depth: 0,
        }
    }

    pub fn bundle(&self) -> &'a Bundle {
        self.bundle
    }

    pub fn intls(&self) -> &'a IntlCache {
        self.bundle.intls()
    }

    /// Look up a variable: the term's named arguments inside a term body,
    /// external arguments otherwise.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        match &self.local_args {
            Some(local) => local.get(name),
            None => self.args.and_then(|args| args.get(name)),
        }
    }

    /// Returns true while resolving a term body.
    pub fn in_term(&self) -> bool {
        self.local_args.is_some()
    }

    /// Swap the term-local arguments, returning the previous ones.
    pub(crate) fn replace_local_args(&mut self, local_args: Option<Args>) -> Option<Args> {
        mem::replace(&mut self.local_args, local_args)
    }

    /// Record an error.
    ///
    /// Without an error sink the error is returned instead, aborting the
    /// format call.
    pub fn report(&mut self, error: ResolverError) -> Result<(), ResolverError> {
        match self.errors.as_deref_mut() {
            Some(errors) => {
                errors.push(error);
                Ok(())
            }
            None => Err(error),
        }
    }

    /// Enter a nested expression.
    ///
    /// Returns an error if the maximum depth is reached.
    pub fn descend(&mut self) -> Result<(), ResolverError> {
        let max_depth = self.bundle.max_depth();
        if self.depth >= max_depth {
            debug!(max_depth, "recursion limit reached");
            return Err(ResolverError::TooMuchRecursion { max_depth });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave a nested expression.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Push a message or term reference onto the active path.
    ///
    /// Returns an error if it is already being resolved.
    pub fn push_entry(&mut self, key: &str) -> Result<(), ResolverError> {
        if self.active.iter().any(|active| active == key) {
            let mut chain = self.active.clone();
            chain.push(key.to_string());
            debug!(chain = ?chain, "cyclic reference");
            return Err(ResolverError::CyclicReference { chain });
        }
        self.active.push(key.to_string());
        Ok(())
    }

    /// Pop the innermost reference from the active path.
    pub fn pop_entry(&mut self) {
        self.active.pop();
    }

    /// Apply the bundle's text transform.
    pub fn transform<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.bundle.transform_text(text)
    }

    pub fn use_isolating(&self) -> bool {
        self.bundle.use_isolating()
    }

    /// Render a value as text.
    ///
    /// Formatting failures are reported and replaced by an unlocalized
    /// rendering.
    pub fn render(&mut self, value: &Value) -> Result<String, ResolverError> {
        if let Some(formatter) = self.bundle.formatter() {
            if let Some(text) = formatter(value, self.intls()) {
                return Ok(text);
            }
        }
        match value {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => match self.intls().format_number(number) {
                Ok(text) => Ok(text),
                Err(error) => {
                    self.report(error)?;
                    Ok(number.value.to_string())
                }
            },
            Value::DateTime(datetime) => match self.intls().format_datetime(datetime) {
                Ok(text) => Ok(text),
                Err(error) => {
                    self.report(error)?;
                    Ok(datetime.epoch_millis.to_string())
                }
            },
            Value::None(none) => Ok(none.to_string()),
            Value::Custom(custom) => Ok(custom.format(self)),
        }
    }

    /// Plural category of a numeric selector, or `None` if the plural rules
    /// are unavailable.
    pub fn plural_category(
        &mut self,
        number: &NumberValue,
    ) -> Result<Option<&'static str>, ResolverError> {
        match self.intls().plural_category(number) {
            Ok(category) => Ok(Some(category)),
            Err(error) => {
                self.report(error)?;
                Ok(None)
            }
        }
    }
}
