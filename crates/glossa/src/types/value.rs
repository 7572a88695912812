use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::{CustomValue, DateTimeValue, NumberValue};

/// A runtime value produced during resolution or passed as an argument.
///
/// # Example
///
/// ```
/// use glossa::Value;
///
/// let count: Value = 3.into();
/// let name: Value = "Ada".into();
/// assert_eq!(count.as_number().map(|n| n.value), Some(3.0));
/// assert_eq!(name.as_string(), Some("Ada"));
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// Already-rendered text.
    String(String),
    Number(NumberValue),
    DateTime(DateTimeValue),
    /// A missing value, rendered as its fallback in braces.
    None(NoneValue),
    /// A host-defined value.
    Custom(Arc<dyn CustomValue>),
}

/// Placeholder for a value that could not be resolved.
///
/// The fallback is the source form of the failed expression (`$name`,
/// `message.attr`, `-term`, `FUNC()`), shown as `{fallback}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoneValue {
    pub fallback: Option<String>,
}

impl fmt::Display for NoneValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fallback {
            Some(fallback) => write!(f, "{{{fallback}}}"),
            None => write!(f, "{{???}}"),
        }
    }
}

impl Value {
    /// A None value without fallback text.
    pub fn none() -> Self {
        Value::None(NoneValue::default())
    }

    /// A None value that renders as `{fallback}`.
    pub fn none_with(fallback: impl Into<String>) -> Self {
        Value::None(NoneValue {
            fallback: Some(fallback.into()),
        })
    }

    /// Wrap a host-defined value.
    pub fn custom(value: impl CustomValue + 'static) -> Self {
        Value::Custom(Arc::new(value))
    }

    /// Interpret `text` as a number if it is one, otherwise keep it as text.
    ///
    /// Written fraction digits are preserved, so `"1.50"` renders as `1.50`.
    pub fn try_number(text: &str) -> Self {
        match NumberValue::parse(text) {
            Some(number) => Value::Number(number),
            None => Value::String(text.to_string()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None(_))
    }

    pub fn as_number(&self) -> Option<&NumberValue> {
        match self {
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTimeValue> {
        match self {
            Value::DateTime(datetime) => Some(datetime),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(text) => Some(text),
            _ => None,
        }
    }

    /// Short name of this value's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::DateTime(_) => "datetime",
            Value::None(_) => "none",
            Value::Custom(_) => "custom",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::None(a), Value::None(b)) => a == b,
            (Value::Custom(a), Value::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(NumberValue::new(n as f64))
                }
            }
        )+
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(NumberValue::new(n))
    }
}

impl From<NumberValue> for Value {
    fn from(number: NumberValue) -> Self {
        Value::Number(number)
    }
}

impl From<DateTimeValue> for Value {
    fn from(datetime: DateTimeValue) -> Self {
        Value::DateTime(datetime)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(datetime: DateTime<Utc>) -> Self {
        Value::DateTime(datetime.into())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(datetime: NaiveDateTime) -> Self {
        Value::DateTime(datetime.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}
