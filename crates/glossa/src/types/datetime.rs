use bon::Builder;
use chrono::{DateTime, NaiveDateTime, Utc};

use crate::interpreter::NamedArgs;
use crate::types::Value;

/// Length of the date or time part of a formatted date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeStyle {
    Full,
    Long,
    Medium,
    Short,
}

impl DateTimeStyle {
    /// Parse a host style name (`"full"`, `"long"`, `"medium"`, `"short"`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "full" => Some(Self::Full),
            "long" => Some(Self::Long),
            "medium" => Some(Self::Medium),
            "short" => Some(Self::Short),
            _ => None,
        }
    }
}

/// Formatting options carried by a [`DateTimeValue`].
///
/// With neither style set, only the date is rendered in the short style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Builder)]
pub struct DateTimeOptions {
    pub date_style: Option<DateTimeStyle>,
    pub time_style: Option<DateTimeStyle>,
}

impl DateTimeOptions {
    /// Apply `dateStyle` / `timeStyle` named options. Other keys are ignored.
    pub fn merge(&mut self, named: &NamedArgs) {
        for (key, value) in named {
            match (key.as_str(), value) {
                ("dateStyle", Value::String(style)) => {
                    self.date_style = DateTimeStyle::from_name(style).or(self.date_style);
                }
                ("timeStyle", Value::String(style)) => {
                    self.time_style = DateTimeStyle::from_name(style).or(self.time_style);
                }
                _ => {}
            }
        }
    }
}

/// A point in time, stored as milliseconds since the Unix epoch and
/// rendered in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeValue {
    pub epoch_millis: i64,
    pub options: DateTimeOptions,
}

impl DateTimeValue {
    pub fn from_epoch_millis(epoch_millis: i64) -> Self {
        Self {
            epoch_millis,
            options: DateTimeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DateTimeOptions) -> Self {
        self.options = options;
        self
    }

    /// The payload as a UTC timestamp, if it is within chrono's range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.epoch_millis)
    }
}

impl From<DateTime<Utc>> for DateTimeValue {
    fn from(value: DateTime<Utc>) -> Self {
        DateTimeValue::from_epoch_millis(value.timestamp_millis())
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(value: NaiveDateTime) -> Self {
        DateTimeValue::from_epoch_millis(value.and_utc().timestamp_millis())
    }
}
