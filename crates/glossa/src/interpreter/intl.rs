//! Locale-sensitive formatters and plural rules, memoized per bundle.
//!
//! Each bundle owns one [`IntlCache`] for its negotiated locale. Formatters are
//! built lazily on first use with a given set of options and shared for the
//! rest of the bundle's lifetime. Tables are guarded by mutexes so a bundle
//! can be formatted from several threads at once.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Datelike, Timelike};
use fixed_decimal::Decimal;
use icu_calendar::Date;
use icu_datetime::fieldsets::{YMD, YMDT};
use icu_datetime::{DateTimeFormatter, DateTimeFormatterPreferences};
use icu_decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu_decimal::{DecimalFormatter, DecimalFormatterPreferences};
use icu_locale_core::Locale;
use icu_plurals::provider::{Baked as PluralData, PluralsCardinalV1};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules, PluralRulesPreferences};
use icu_provider::{DataIdentifierBorrowed, DataLocale, DataMarker, DataProvider, DataRequest};
use icu_time::{DateTime as IsoDateTime, Time};
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::interpreter::ResolverError;
use crate::types::{
    DateTimeOptions, DateTimeStyle, DateTimeValue, NumberOptions, NumberStyle, NumberValue,
    PluralType,
};

/// Largest fraction digit count honored by number formatting.
const MAX_FRACTION_DIGITS: usize = 20;

/// Largest significant digit count honored by number formatting.
const MAX_SIGNIFICANT_DIGITS: usize = 21;

/// Largest integer digit count honored by number formatting.
const MAX_INTEGER_DIGITS: usize = 21;

/// A date-time formatter for one style combination.
enum DateTimeFormat {
    Date(DateTimeFormatter<YMD>),
    DateTime(DateTimeFormatter<YMDT>),
}

/// Memoized formatters for a single locale.
pub struct IntlCache {
    locale: Locale,
    plural_rules: Mutex<HashMap<PluralType, Arc<PluralRules>>>,
    decimal_formatters: Mutex<HashMap<bool, Arc<DecimalFormatter>>>,
    datetime_formatters: Mutex<HashMap<DateTimeOptions, Arc<DateTimeFormat>>>,
    constructed: AtomicUsize,
}

impl Debug for IntlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntlCache")
            .field("locale", &self.locale)
            .field("constructed", &self.constructed())
            .finish_non_exhaustive()
    }
}

impl IntlCache {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            plural_rules: Mutex::new(HashMap::new()),
            decimal_formatters: Mutex::new(HashMap::new()),
            datetime_formatters: Mutex::new(HashMap::new()),
            constructed: AtomicUsize::new(0),
        }
    }

    /// Create a cache for the first of `locales` with locale data.
    ///
    /// Locales that would only resolve to root data are skipped. When none
    /// has data the first locale is kept, and an empty list yields `und`.
    pub fn negotiate(locales: &[Locale]) -> Self {
        let supported = locales.iter().find(|locale| {
            let has_data = has_locale_data(locale);
            if !has_data {
                debug!(locale = %locale, "no locale data, trying next locale");
            }
            has_data
        });
        let locale = supported
            .or_else(|| locales.first())
            .cloned()
            .unwrap_or(Locale::UNKNOWN);
        Self::new(locale)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Number of underlying formatters built so far.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::Relaxed)
    }

    /// Plural rules of the given type for this locale.
    pub fn plural_rules(
        &self,
        plural_type: PluralType,
    ) -> Result<Arc<PluralRules>, ResolverError> {
        self.memoized(&self.plural_rules, plural_type, "plural rules", |locale| {
            let rule_type = match plural_type {
                PluralType::Cardinal => PluralRuleType::Cardinal,
                PluralType::Ordinal => PluralRuleType::Ordinal,
            };
            PluralRules::try_new(PluralRulesPreferences::from(locale), rule_type.into())
        })
    }

    /// Decimal formatter with or without digit grouping.
    pub fn decimal_formatter(
        &self,
        grouping: bool,
    ) -> Result<Arc<DecimalFormatter>, ResolverError> {
        self.memoized(&self.decimal_formatters, grouping, "decimal", |locale| {
            let mut options = DecimalFormatterOptions::default();
            options.grouping_strategy = Some(if grouping {
                GroupingStrategy::Auto
            } else {
                GroupingStrategy::Never
            });
            DecimalFormatter::try_new(DecimalFormatterPreferences::from(locale), options)
        })
    }

    fn datetime_formatter(
        &self,
        options: DateTimeOptions,
    ) -> Result<Arc<DateTimeFormat>, ResolverError> {
        self.memoized(&self.datetime_formatters, options, "datetime", |locale| {
            let prefs = DateTimeFormatterPreferences::from(locale);
            match (options.date_style, options.time_style) {
                (date, None) => {
                    let fields = date_fields(date.unwrap_or(DateTimeStyle::Short));
                    DateTimeFormatter::try_new(prefs, fields).map(DateTimeFormat::Date)
                }
                (date, Some(time)) => {
                    let fields = date_time_fields(date.unwrap_or(time));
                    DateTimeFormatter::try_new(prefs, fields).map(DateTimeFormat::DateTime)
                }
            }
        })
    }

    /// Render a number with its options.
    pub fn format_number(&self, number: &NumberValue) -> Result<String, ResolverError> {
        let options = &number.options;
        let value = match options.style {
            NumberStyle::Decimal => number.value,
            NumberStyle::Percent => number.value * 100.0,
        };
        let mut text = match non_finite(value) {
            Some(special) => special.to_string(),
            None => {
                let digits = format_digits(value, options);
                let decimal =
                    Decimal::try_from_str(&digits).map_err(|err| self.formatter_error(err))?;
                let formatter = self.decimal_formatter(options.use_grouping)?;
                formatter.format(&decimal).to_string()
            }
        };
        if options.style == NumberStyle::Percent {
            text.push('%');
        }
        Ok(text)
    }

    /// Render a date-time in UTC with its options.
    pub fn format_datetime(&self, datetime: &DateTimeValue) -> Result<String, ResolverError> {
        let utc = datetime
            .to_utc()
            .ok_or_else(|| self.formatter_error("timestamp out of range"))?;
        let date = Date::try_new_iso(utc.year(), utc.month() as u8, utc.day() as u8)
            .map_err(|err| self.formatter_error(err))?;
        let formatter = self.datetime_formatter(datetime.options)?;
        match formatter.as_ref() {
            DateTimeFormat::Date(formatter) => Ok(formatter.format(&date).to_string()),
            DateTimeFormat::DateTime(formatter) => {
                let (hour, minute, second) = (utc.hour(), utc.minute(), utc.second());
                let time = Time::try_new(hour as u8, minute as u8, second as u8, 0)
                    .map_err(|err| self.formatter_error(err))?;
                Ok(formatter.format(&IsoDateTime { date, time }).to_string())
            }
        }
    }

    /// CLDR plural category of a number, as used for variant keys.
    ///
    /// Classification sees the number's visible fraction digits, so `1`
    /// and `1.0` may fall into different categories.
    pub fn plural_category(&self, number: &NumberValue) -> Result<&'static str, ResolverError> {
        if non_finite(number.value).is_some() {
            return Ok("other");
        }
        let options = NumberOptions {
            style: NumberStyle::Decimal,
            ..number.options
        };
        let digits = format_digits(number.value, &options);
        let decimal = Decimal::try_from_str(&digits).map_err(|err| self.formatter_error(err))?;
        let rules = self.plural_rules(options.plural_type)?;
        Ok(category_str(rules.category_for(&decimal)))
    }

    fn memoized<K, V, E>(
        &self,
        table: &Mutex<HashMap<K, Arc<V>>>,
        key: K,
        kind: &'static str,
        construct: impl FnOnce(&Locale) -> Result<V, E>,
    ) -> Result<Arc<V>, ResolverError>
    where
        K: Eq + Hash + Debug,
        E: Display,
    {
        let mut table = table.lock();
        if let Some(existing) = table.get(&key) {
            trace!(locale = %self.locale, kind, ?key, "formatter cache hit");
            return Ok(Arc::clone(existing));
        }
        let value = Arc::new(construct(&self.locale).map_err(|err| self.formatter_error(err))?);
        self.constructed.fetch_add(1, Ordering::Relaxed);
        debug!(locale = %self.locale, kind, ?key, "constructed formatter");
        table.insert(key, Arc::clone(&value));
        Ok(value)
    }

    fn formatter_error(&self, reason: impl Display) -> ResolverError {
        ResolverError::Formatter {
            locale: self.locale.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Whether plural rules exist for `locale` itself or a non-root parent of it.
fn has_locale_data(locale: &Locale) -> bool {
    resolves_below_root::<PluralsCardinalV1>(&PluralData, &DataLocale::from(locale))
}

fn resolves_below_root<M: DataMarker>(
    provider: &impl DataProvider<M>,
    locale: &DataLocale,
) -> bool {
    let request = DataRequest {
        id: DataIdentifierBorrowed::for_locale(locale),
        ..Default::default()
    };
    match provider.load(request) {
        Ok(response) => response
            .metadata
            .locale
            .is_none_or(|resolved| !resolved.is_unknown()),
        Err(_) => false,
    }
}

fn date_fields(style: DateTimeStyle) -> YMD {
    match style {
        DateTimeStyle::Full | DateTimeStyle::Long => YMD::long(),
        DateTimeStyle::Medium => YMD::medium(),
        DateTimeStyle::Short => YMD::short(),
    }
}

fn date_time_fields(style: DateTimeStyle) -> YMDT {
    match style {
        DateTimeStyle::Full | DateTimeStyle::Long => YMDT::long(),
        DateTimeStyle::Medium => YMDT::medium(),
        DateTimeStyle::Short => YMDT::short(),
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("∞")
    } else if value == f64::NEG_INFINITY {
        Some("-∞")
    } else {
        None
    }
}

/// Plain digits of `value` after applying the digit options, without
/// grouping separators.
fn format_digits(value: f64, options: &NumberOptions) -> String {
    let text = if options.minimum_significant_digits.is_some()
        || options.maximum_significant_digits.is_some()
    {
        significant_digits(
            value,
            options.minimum_significant_digits.unwrap_or(1),
            options
                .maximum_significant_digits
                .unwrap_or(MAX_SIGNIFICANT_DIGITS),
        )
    } else {
        let minimum = options.minimum_fraction_digits.unwrap_or(0);
        let default_maximum = match options.style {
            NumberStyle::Decimal => 3,
            NumberStyle::Percent => 0,
        };
        let maximum = options
            .maximum_fraction_digits
            .unwrap_or(default_maximum)
            .max(minimum);
        fraction_digits(value, minimum, maximum)
    };
    let minimum_integer = options.minimum_integer_digits.unwrap_or(1);
    pad_integer(text, minimum_integer.min(MAX_INTEGER_DIGITS))
}

fn fraction_digits(value: f64, minimum: usize, maximum: usize) -> String {
    let maximum = maximum.min(MAX_FRACTION_DIGITS);
    let minimum = minimum.min(maximum);
    let mut text = format!("{value:.maximum$}");
    if let Some(dot) = text.find('.') {
        let keep = dot + 1 + minimum;
        while text.len() > keep && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

fn significant_digits(value: f64, minimum: usize, maximum: usize) -> String {
    let maximum = maximum.clamp(1, MAX_SIGNIFICANT_DIGITS);
    let minimum = minimum.clamp(1, maximum);
    let rounded = format!("{:.*e}", maximum - 1, value)
        .parse::<f64>()
        .unwrap_or(value);
    let mut text = rounded.to_string();
    let count = significant_count(&text);
    if count < minimum {
        if !text.contains('.') {
            text.push('.');
        }
        text.push_str(&"0".repeat(minimum - count));
    }
    text
}

fn significant_count(text: &str) -> usize {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        digits.len()
    } else {
        trimmed.len()
    }
}

fn pad_integer(text: String, minimum: usize) -> String {
    let sign_len = usize::from(text.starts_with('-'));
    let unsigned = &text[sign_len..];
    let integer_len = unsigned.find('.').unwrap_or(unsigned.len());
    if integer_len >= minimum {
        return text;
    }
    let mut padded = String::with_capacity(text.len() + minimum - integer_len);
    padded.push_str(&text[..sign_len]);
    padded.push_str(&"0".repeat(minimum - integer_len));
    padded.push_str(&text[sign_len..]);
    padded
}

/// Translate a `PluralCategory` to its variant key.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}
