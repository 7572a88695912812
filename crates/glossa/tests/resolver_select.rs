//! Tests for select expressions: exact keys, plural categories, defaults.

use glossa::{
    Bundle, CallArgument, CustomValue, Entry, Expression, Literal, Pattern, PatternElement,
    Resource, ResolverError, Scope, SelectExpression, TermReference, Value, Variant, args,
};
use icu_locale_core::{Locale, locale};

fn bundle_for(locale: Locale, entries: Vec<Entry>) -> Bundle {
    let mut bundle = Bundle::builder()
        .locales(vec![locale])
        .use_isolating(false)
        .build();
    assert!(bundle.add_resource(Resource::new(entries)).is_empty());
    bundle
}

fn select(selector: Expression, variants: Vec<Variant>, star: usize) -> Pattern {
    let select = SelectExpression {
        selector: Box::new(selector),
        variants,
        star,
    };
    Pattern::Complex(vec![PatternElement::Placeable(select.into())])
}

fn number_key(value: i64, text: &str) -> Variant {
    Variant::new(value, text)
}

fn emails() -> Entry {
    Entry::new(
        "emails",
        select(
            Expression::variable("count"),
            vec![
                Variant::new("one", "one email"),
                Variant::new("other", "many emails"),
            ],
            1,
        ),
    )
}

// =========================================================================
// Plural Categories
// =========================================================================

#[test]
fn english_one_selects_one_variant() {
    let bundle = bundle_for(locale!("en"), vec![emails()]);
    let text = bundle
        .format_message("emails", Some(&args! { "count" => 1 }), None)
        .unwrap();
    assert_eq!(text, "one email");
}

#[test]
fn english_five_selects_other_variant() {
    let bundle = bundle_for(locale!("en"), vec![emails()]);
    let text = bundle
        .format_message("emails", Some(&args! { "count" => 5 }), None)
        .unwrap();
    assert_eq!(text, "many emails");
}

#[test]
fn visible_fraction_digits_change_category() {
    let bundle = bundle_for(locale!("en"), vec![emails()]);
    let mut arguments = args! {};
    arguments.insert("count".to_string(), Value::try_number("1.0"));
    let text = bundle.format_message("emails", Some(&arguments), None).unwrap();
    assert_eq!(text, "many emails");
}

#[test]
fn russian_categories_are_selected() {
    let entry = Entry::new(
        "files",
        select(
            Expression::variable("n"),
            vec![
                Variant::new("one", "file"),
                Variant::new("few", "files-few"),
                Variant::new("many", "files-many"),
                Variant::new("other", "files-other"),
            ],
            3,
        ),
    );
    let bundle = bundle_for(locale!("ru"), vec![entry]);
    let cases = [(1, "file"), (3, "files-few"), (5, "files-many"), (21, "file")];
    for (n, expected) in cases {
        let text = bundle
            .format_message("files", Some(&args! { "n" => n }), None)
            .unwrap();
        assert_eq!(text, expected, "n = {n}");
    }
}

fn files_in(locales: Vec<Locale>) -> Bundle {
    let entry = Entry::new(
        "files",
        select(
            Expression::variable("n"),
            vec![
                Variant::new("few", "files-few"),
                Variant::new("other", "files-other"),
            ],
            1,
        ),
    );
    let mut bundle = Bundle::builder()
        .locales(locales)
        .use_isolating(false)
        .build();
    assert!(bundle.add_resource(Resource::new(vec![entry])).is_empty());
    bundle
}

#[test]
fn locale_without_data_falls_through_to_next_locale() {
    let bundle = files_in(vec![locale!("tlh"), locale!("ru")]);
    assert_eq!(bundle.intls().locale(), &locale!("ru"));
    let mut errors = Vec::new();
    let text = bundle
        .format_message("files", Some(&args! { "n" => 2 }), Some(&mut errors))
        .unwrap();
    assert_eq!(text, "files-few");
    assert!(errors.is_empty());
}

#[test]
fn first_supported_locale_wins() {
    let bundle = files_in(vec![locale!("de"), locale!("ru")]);
    assert_eq!(bundle.intls().locale(), &locale!("de"));
    let text = bundle
        .format_message("files", Some(&args! { "n" => 2 }), None)
        .unwrap();
    assert_eq!(text, "files-other");
}

#[test]
fn no_supported_locale_keeps_the_first() {
    let bundle = files_in(vec![locale!("tlh"), locale!("qaa")]);
    assert_eq!(bundle.intls().locale(), &locale!("tlh"));
}

#[test]
fn ordinal_type_uses_ordinal_rules() {
    let entry = Entry::new(
        "place",
        select(
            Expression::function(
                "NUMBER",
                vec![
                    Expression::variable("pos").into(),
                    CallArgument::named("type", "ordinal"),
                ],
            ),
            vec![
                Variant::new("one", "st"),
                Variant::new("two", "nd"),
                Variant::new("few", "rd"),
                Variant::new("other", "th"),
            ],
            3,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let cases = [(1, "st"), (2, "nd"), (3, "rd"), (4, "th"), (11, "th"), (22, "nd")];
    for (pos, expected) in cases {
        let text = bundle
            .format_message("place", Some(&args! { "pos" => pos }), None)
            .unwrap();
        assert_eq!(text, expected, "pos = {pos}");
    }
}

// =========================================================================
// Exact Keys
// =========================================================================

#[test]
fn exact_number_key_beats_plural_category() {
    let entry = Entry::new(
        "items",
        select(
            Expression::variable("count"),
            vec![
                Variant::new("one", "one item"),
                number_key(1, "exactly one"),
                Variant::new("other", "items"),
            ],
            2,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let text = bundle
        .format_message("items", Some(&args! { "count" => 1 }), None)
        .unwrap();
    assert_eq!(text, "exactly one");
}

#[test]
fn number_key_matches_by_value() {
    let entry = Entry::new(
        "zero",
        select(
            Expression::variable("count"),
            vec![number_key(0, "none"), Variant::new("other", "some")],
            1,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let text = bundle
        .format_message("zero", Some(&args! { "count" => 0.0 }), None)
        .unwrap();
    assert_eq!(text, "none");
}

#[test]
fn string_selector_matches_string_key() {
    let entry = Entry::new(
        "pronoun",
        select(
            Expression::variable("gender"),
            vec![
                Variant::new("masculine", "he"),
                Variant::new("feminine", "she"),
                Variant::new("other", "they"),
            ],
            2,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let she = bundle
        .format_message("pronoun", Some(&args! { "gender" => "feminine" }), None)
        .unwrap();
    let other = bundle
        .format_message("pronoun", Some(&args! { "gender" => "unknown" }), None)
        .unwrap();
    assert_eq!(she, "she");
    assert_eq!(other, "they");
}

#[test]
fn string_selector_does_not_match_plural_category() {
    let entry = Entry::new(
        "plural",
        select(
            Expression::variable("count"),
            vec![Variant::new("one", "one"), Variant::new("other", "other")],
            1,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let text = bundle
        .format_message("plural", Some(&args! { "count" => "1" }), None)
        .unwrap();
    assert_eq!(text, "other");
}

#[test]
fn term_attribute_selects_variant() {
    let entry = Entry::new("-brand", "Firefly").with_attribute("gender", "feminine");
    let message = Entry::new(
        "about",
        select(
            Expression::Term(TermReference::new("brand").with_attribute("gender")),
            vec![
                Variant::new("masculine", "his"),
                Variant::new("feminine", "her"),
                Variant::new("other", "its"),
            ],
            2,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry, message]);
    assert_eq!(bundle.format_message("about", None, None).unwrap(), "her");
}

// =========================================================================
// Defaults
// =========================================================================

#[test]
fn missing_selector_uses_default_variant() {
    let bundle = bundle_for(locale!("en"), vec![emails()]);
    let mut errors = Vec::new();
    let text = bundle
        .format_message("emails", None, Some(&mut errors))
        .unwrap();
    assert_eq!(text, "many emails");
    assert_eq!(
        errors,
        vec![ResolverError::UnknownVariable {
            name: "count".to_string()
        }]
    );
}

#[test]
fn default_variant_out_of_range_reports_error() {
    let entry = Entry::new(
        "broken",
        select(
            Expression::variable("count"),
            vec![Variant::new("one", "one"), Variant::new("two", "two")],
            5,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let mut errors = Vec::new();
    let text = bundle
        .format_message("broken", Some(&args! { "count" => 7 }), Some(&mut errors))
        .unwrap();
    assert_eq!(text, "{???}");
    assert_eq!(
        errors,
        vec![ResolverError::InvalidDefaultVariant { star: 5, count: 2 }]
    );
}

#[test]
fn matched_variant_ignores_bad_default() {
    let entry = Entry::new(
        "broken",
        select(
            Expression::variable("count"),
            vec![Variant::new("one", "one")],
            9,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let mut errors = Vec::new();
    let text = bundle
        .format_message("broken", Some(&args! { "count" => 1 }), Some(&mut errors))
        .unwrap();
    assert_eq!(text, "one");
    assert!(errors.is_empty());
}

#[test]
fn variant_patterns_resolve_placeables() {
    let entry = Entry::new(
        "unread",
        select(
            Expression::variable("count"),
            vec![
                Variant::new("one", "one message"),
                Variant::new(
                    "other",
                    Pattern::from_elements(vec![
                        Expression::variable("count").into(),
                        " messages".into(),
                    ]),
                ),
            ],
            1,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let text = bundle
        .format_message("unread", Some(&args! { "count" => 1500 }), None)
        .unwrap();
    assert_eq!(text, "1,500 messages");
}

// =========================================================================
// Custom Values
// =========================================================================

#[derive(Debug)]
struct Gender(&'static str);

impl CustomValue for Gender {
    fn format(&self, _scope: &Scope<'_, '_>) -> String {
        format!("<{}>", self.0)
    }

    fn matches(&self, key: &Literal, _scope: &Scope<'_, '_>) -> bool {
        matches!(key, Literal::String(key) if key == self.0)
    }
}

#[test]
fn custom_value_matches_its_key() {
    let entry = Entry::new(
        "greeting",
        select(
            Expression::variable("who"),
            vec![
                Variant::new("feminine", "Dear madam"),
                Variant::new("other", "Dear reader"),
            ],
            1,
        ),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let mut arguments = args! {};
    arguments.insert("who".to_string(), Value::custom(Gender("feminine")));
    let text = bundle.format_message("greeting", Some(&arguments), None).unwrap();
    assert_eq!(text, "Dear madam");
}

#[test]
fn custom_value_renders_itself() {
    let entry = Entry::new(
        "show",
        Pattern::from_elements(vec!["[".into(), Expression::variable("who").into(), "]".into()]),
    );
    let bundle = bundle_for(locale!("en"), vec![entry]);
    let mut arguments = args! {};
    arguments.insert("who".to_string(), Value::custom(Gender("neuter")));
    let text = bundle.format_message("show", Some(&arguments), None).unwrap();
    assert_eq!(text, "[<neuter>]");
}
