pub mod ast;
pub mod interpreter;
pub mod types;

pub use ast::{
    CallArgument, Entry, Expression, Literal, Message, Pattern, PatternElement, Resource,
    SelectExpression, Term, TermReference, Variant,
};
pub use interpreter::{
    Args, Bundle, BundleError, DEFAULT_MAX_DEPTH, EntryKind, FSI, Function, FunctionError,
    FunctionRegistry, IntlCache, LoadError, NamedArgs, PDI, ReferenceWarning, ResolverError, Scope,
    TextTransform, ValueFormatter, check_references, compute_suggestions,
};
pub use types::{
    CustomValue, DateTimeOptions, DateTimeStyle, DateTimeValue, NoneValue, NumberOptions,
    NumberStyle, NumberValue, PluralType, Value,
};

/// Creates an [`Args`] map from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings and
/// date-times can be passed directly.
///
/// # Example
///
/// ```
/// use glossa::args;
///
/// let a = args! { "count" => 3, "name" => "Ada" };
/// assert_eq!(a.len(), 2);
/// assert_eq!(a["name"].as_string(), Some("Ada"));
/// ```
#[macro_export]
macro_rules! args {
    {} => {
        $crate::Args::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Args::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
