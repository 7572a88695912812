//! Tests for error messages.

use glossa::{
    BundleError, DateTimeValue, EntryKind, FunctionError, IntlCache, LoadError, ResolverError,
    Resource,
};
use icu_locale_core::locale;
use insta::assert_snapshot;

// =========================================================================
// Registration Errors
// =========================================================================

#[test]
fn overriding_error_names_kind_and_id() {
    let message = BundleError::Overriding {
        kind: EntryKind::Message,
        id: "hello".to_string(),
    };
    let function = BundleError::Overriding {
        kind: EntryKind::Function,
        id: "NUMBER".to_string(),
    };
    assert_snapshot!(message.to_string(), @r#"attempt to override an existing message: "hello""#);
    assert_snapshot!(function.to_string(), @r#"attempt to override an existing function: "NUMBER""#);
}

#[test]
fn missing_term_value_error() {
    let error = BundleError::MissingTermValue {
        id: "-brand".to_string(),
    };
    assert_snapshot!(error.to_string(), @r#"term "-brand" has no value"#);
}

#[test]
fn load_error_names_path() {
    let error = Resource::load("/nonexistent/glossa.json").unwrap_err();
    assert!(matches!(error, LoadError::Io { .. }));
    assert!(error.to_string().starts_with("failed to read '/nonexistent/glossa.json'"));
}

// =========================================================================
// Resolver Errors
// =========================================================================

#[test]
fn reference_errors() {
    let variable = ResolverError::UnknownVariable {
        name: "name".to_string(),
    };
    let message = ResolverError::UnknownMessage {
        id: "hello".to_string(),
    };
    let attribute = ResolverError::UnknownMessageAttribute {
        id: "login".to_string(),
        attribute: "title".to_string(),
    };
    let missing = ResolverError::MissingValue {
        id: "menu".to_string(),
    };
    let term = ResolverError::UnknownTerm {
        id: "-brand".to_string(),
    };
    let term_attribute = ResolverError::UnknownTermAttribute {
        id: "-brand".to_string(),
        attribute: "case".to_string(),
    };
    assert_snapshot!(variable.to_string(), @"unknown variable: $name");
    assert_snapshot!(message.to_string(), @"unknown message: hello");
    assert_snapshot!(attribute.to_string(), @"unknown attribute 'title' on message login");
    assert_snapshot!(missing.to_string(), @"message menu has no value");
    assert_snapshot!(term.to_string(), @"unknown term: -brand");
    assert_snapshot!(term_attribute.to_string(), @"unknown attribute 'case' on term -brand");
}

#[test]
fn cycle_error_shows_chain() {
    let error = ResolverError::CyclicReference {
        chain: vec!["-a".to_string(), "-b".to_string(), "-a".to_string()],
    };
    assert_snapshot!(error.to_string(), @"cyclic reference detected: -a -> -b -> -a");
}

#[test]
fn function_errors() {
    let unknown = ResolverError::UnknownFunction {
        name: "CURRENCY".to_string(),
    };
    let invocation = ResolverError::FunctionInvocation {
        name: "NUMBER".to_string(),
        source: FunctionError::InvalidArgument {
            expected: "number",
            found: "string",
        },
    };
    let missing = ResolverError::FunctionInvocation {
        name: "DATETIME".to_string(),
        source: FunctionError::MissingArgument,
    };
    assert_snapshot!(unknown.to_string(), @"unknown function: CURRENCY()");
    assert_snapshot!(invocation.to_string(), @"function NUMBER() failed: expected number argument, got string");
    assert_snapshot!(missing.to_string(), @"function DATETIME() failed: missing positional argument");
}

#[test]
fn limit_errors() {
    let variant = ResolverError::InvalidDefaultVariant { star: 4, count: 2 };
    let recursion = ResolverError::TooMuchRecursion { max_depth: 64 };
    let formatter = ResolverError::Formatter {
        locale: "en".to_string(),
        reason: "timestamp out of range".to_string(),
    };
    assert_snapshot!(variant.to_string(), @"default variant index 4 is out of range for 2 variants");
    assert_snapshot!(recursion.to_string(), @"too much recursion: maximum depth of 64 exceeded");
    assert_snapshot!(formatter.to_string(), @"cannot format for locale 'en': timestamp out of range");
}

#[test]
fn datetime_out_of_range_is_a_formatter_error() {
    let intls = IntlCache::new(locale!("en"));
    let far = DateTimeValue::from_epoch_millis(i64::MAX);
    let error = intls.format_datetime(&far).unwrap_err();
    assert!(matches!(error, ResolverError::Formatter { .. }));
}
