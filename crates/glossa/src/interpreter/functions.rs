//! Function registry and the built-in `NUMBER` and `DATETIME` functions.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::interpreter::FunctionError;
use crate::types::{DateTimeValue, NumberValue, Value};

/// Named call options, sorted by name.
pub type NamedArgs = BTreeMap<String, Value>;

type FunctionImpl = dyn Fn(&[Value], &NamedArgs) -> Result<Value, FunctionError> + Send + Sync;

/// A pure function callable from patterns.
///
/// Receives resolved positional arguments and named options and returns a
/// value. Functions must not depend on anything but their inputs.
///
/// # Example
///
/// ```
/// use glossa::{Function, FunctionError, Value};
///
/// let upper = Function::new(|positional, _named| match positional.first() {
///     Some(Value::String(s)) => Ok(Value::String(s.to_uppercase())),
///     Some(other) => Err(FunctionError::InvalidArgument {
///         expected: "string",
///         found: other.kind(),
///     }),
///     None => Err(FunctionError::MissingArgument),
/// });
/// ```
#[derive(Clone)]
pub struct Function(Arc<FunctionImpl>);

impl Function {
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&[Value], &NamedArgs) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        Function(Arc::new(function))
    }

    pub fn call(&self, positional: &[Value], named: &NamedArgs) -> Result<Value, FunctionError> {
        (self.0)(positional, named)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Function")
    }
}

/// Registry of functions by case-sensitive name.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Function>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `NUMBER` and `DATETIME`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.replace("NUMBER", Function::new(number));
        registry.replace("DATETIME", Function::new(datetime));
        registry
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Register a function under a new name.
    ///
    /// Returns the function back if the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, function: Function) -> Result<(), Function> {
        let name = name.into();
        if self.functions.contains_key(&name) {
            return Err(function);
        }
        self.functions.insert(name, function);
        Ok(())
    }

    /// Register a function, replacing any existing one with the same name.
    pub fn replace(&mut self, name: impl Into<String>, function: Function) {
        self.functions.insert(name.into(), function);
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// `NUMBER($value, ...options)`
///
/// Numbers keep their options with the named options merged on top. A
/// date-time becomes its epoch milliseconds. A missing value passes through.
pub fn number(positional: &[Value], named: &NamedArgs) -> Result<Value, FunctionError> {
    let mut number = match positional.first() {
        Some(Value::Number(number)) => *number,
        Some(Value::DateTime(datetime)) => NumberValue::new(datetime.epoch_millis as f64),
        Some(Value::None(_)) => return Ok(Value::none_with("NUMBER()")),
        Some(other) => {
            return Err(FunctionError::InvalidArgument {
                expected: "number",
                found: other.kind(),
            });
        }
        None => return Err(FunctionError::MissingArgument),
    };
    number.options.merge(named);
    Ok(Value::Number(number))
}

/// `DATETIME($value, dateStyle: ..., timeStyle: ...)`
///
/// Date-times keep their options with the named options merged on top. A
/// number is read as epoch milliseconds. A missing value passes through.
pub fn datetime(positional: &[Value], named: &NamedArgs) -> Result<Value, FunctionError> {
    let mut datetime = match positional.first() {
        Some(Value::DateTime(datetime)) => *datetime,
        Some(Value::Number(number)) if number.value.is_finite() => {
            DateTimeValue::from_epoch_millis(number.value as i64)
        }
        Some(Value::None(_)) => return Ok(Value::none_with("DATETIME()")),
        Some(other) => {
            return Err(FunctionError::InvalidArgument {
                expected: "datetime",
                found: other.kind(),
            });
        }
        None => return Err(FunctionError::MissingArgument),
    };
    datetime.options.merge(named);
    Ok(Value::DateTime(datetime))
}
