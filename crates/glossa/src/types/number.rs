use bon::Builder;

use crate::interpreter::NamedArgs;
use crate::types::Value;

/// How a number is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    #[default]
    Decimal,
    /// The value is scaled by 100 and followed by `%`.
    Percent,
}

/// Which plural rules classify a number during selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PluralType {
    #[default]
    Cardinal,
    Ordinal,
}

/// Formatting options carried by a [`NumberValue`].
///
/// Named options passed to `NUMBER()` use the host naming convention
/// (`minimumFractionDigits`, `useGrouping`, ...). See [`NumberOptions::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Builder)]
pub struct NumberOptions {
    #[builder(default)]
    pub style: NumberStyle,
    #[builder(default)]
    pub plural_type: PluralType,
    #[builder(default = true)]
    pub use_grouping: bool,
    pub minimum_integer_digits: Option<usize>,
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
    pub minimum_significant_digits: Option<usize>,
    pub maximum_significant_digits: Option<usize>,
}

impl Default for NumberOptions {
    fn default() -> Self {
        NumberOptions::builder().build()
    }
}

impl NumberOptions {
    /// Apply named call options on top of these options.
    ///
    /// Unknown keys and values of the wrong shape are ignored.
    pub fn merge(&mut self, named: &NamedArgs) {
        for (key, value) in named {
            match (key.as_str(), value) {
                ("style", Value::String(style)) => match style.as_str() {
                    "decimal" => self.style = NumberStyle::Decimal,
                    "percent" => self.style = NumberStyle::Percent,
                    _ => {}
                },
                ("type", Value::String(kind)) => match kind.as_str() {
                    "cardinal" => self.plural_type = PluralType::Cardinal,
                    "ordinal" => self.plural_type = PluralType::Ordinal,
                    _ => {}
                },
                ("useGrouping", Value::String(flag)) => {
                    self.use_grouping = flag != "false";
                }
                ("minimumIntegerDigits", value) => {
                    self.minimum_integer_digits =
                        digit_count(value).or(self.minimum_integer_digits);
                }
                ("minimumFractionDigits", value) => {
                    self.minimum_fraction_digits =
                        digit_count(value).or(self.minimum_fraction_digits);
                }
                ("maximumFractionDigits", value) => {
                    self.maximum_fraction_digits =
                        digit_count(value).or(self.maximum_fraction_digits);
                }
                ("minimumSignificantDigits", value) => {
                    self.minimum_significant_digits =
                        digit_count(value).or(self.minimum_significant_digits);
                }
                ("maximumSignificantDigits", value) => {
                    self.maximum_significant_digits =
                        digit_count(value).or(self.maximum_significant_digits);
                }
                _ => {}
            }
        }
    }
}

fn digit_count(value: &Value) -> Option<usize> {
    match value {
        Value::Number(number) if number.value.is_finite() && number.value >= 0.0 => {
            Some(number.value as usize)
        }
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

/// A numeric value with its formatting options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberValue {
    pub value: f64,
    pub options: NumberOptions,
}

impl NumberValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            options: NumberOptions::default(),
        }
    }

    pub fn with_options(value: f64, options: NumberOptions) -> Self {
        Self { value, options }
    }

    /// Number written with `precision` fraction digits, as in a literal.
    pub fn with_precision(value: f64, precision: usize) -> Self {
        let options = NumberOptions {
            minimum_fraction_digits: (precision > 0).then_some(precision),
            ..NumberOptions::default()
        };
        Self { value, options }
    }

    /// Parse a decimal number, keeping its written fraction digits.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty()
            || !trimmed
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
        {
            return None;
        }
        let value = trimmed.parse::<f64>().ok()?;
        let precision = trimmed
            .split_once('.')
            .map_or(0, |(_, fraction)| fraction.len());
        Some(Self::with_precision(value, precision))
    }
}

impl From<f64> for NumberValue {
    fn from(value: f64) -> Self {
        NumberValue::new(value)
    }
}
