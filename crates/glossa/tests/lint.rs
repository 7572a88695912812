//! Tests for static reference checking and name suggestions.

use glossa::{
    Bundle, Entry, Expression, Pattern, PatternElement, ReferenceWarning, Resource,
    SelectExpression, TermReference, Variant, check_references, compute_suggestions,
};

fn bundle_with(entries: Vec<Entry>) -> Bundle {
    let mut bundle = Bundle::default();
    assert!(bundle.add_resource(Resource::new(entries)).is_empty());
    bundle
}

fn placeable(expression: Expression) -> Pattern {
    Pattern::Complex(vec![PatternElement::Placeable(expression)])
}

// =========================================================================
// Suggestions
// =========================================================================

#[test]
fn compute_suggestions_finds_close_names() {
    let available = vec!["hello".to_string(), "help".to_string(), "goodbye".to_string()];
    assert_eq!(compute_suggestions("helo", &available), vec!["hello", "help"]);
}

#[test]
fn compute_suggestions_limits_short_keys_to_one_edit() {
    let available = vec!["cat", "cut", "dog", "cast"];
    assert_eq!(compute_suggestions("cap", available), vec!["cat"]);
}

#[test]
fn compute_suggestions_returns_at_most_three() {
    let available = vec!["abcd", "abce", "abcf", "abcg", "abch"];
    assert_eq!(compute_suggestions("abcx", available).len(), 3);
}

#[test]
fn compute_suggestions_orders_by_distance() {
    let available = vec!["greeting", "greetings", "greetingz"];
    let suggestions = compute_suggestions("greetin", available);
    assert_eq!(suggestions[0], "greeting");
}

#[test]
fn compute_suggestions_excludes_exact_match() {
    let available = vec!["hello", "hallo"];
    assert_eq!(compute_suggestions("hello", available), vec!["hallo"]);
}

#[test]
fn compute_suggestions_empty_when_nothing_close() {
    let available = vec!["alpha", "beta"];
    assert!(compute_suggestions("zzzzzz", available).is_empty());
}

// =========================================================================
// Reference Checks
// =========================================================================

#[test]
fn clean_bundle_has_no_warnings() {
    let bundle = bundle_with(vec![
        Entry::new("-brand", "Firefly"),
        Entry::new("hello", "Hello"),
        Entry::new(
            "about",
            Pattern::from_elements(vec![
                Expression::message("hello").into(),
                Expression::term("brand").into(),
                Expression::function("NUMBER", vec![Expression::variable("n").into()]).into(),
            ]),
        ),
    ]);
    assert!(check_references(&bundle).is_empty());
}

#[test]
fn unknown_message_is_reported_with_suggestion() {
    let bundle = bundle_with(vec![
        Entry::new("hello", "Hello"),
        Entry::new("greet", placeable(Expression::message("helo"))),
    ]);
    let warnings = check_references(&bundle);
    assert_eq!(
        warnings,
        vec![ReferenceWarning::UnknownMessage {
            entry: "greet".to_string(),
            id: "helo".to_string(),
            suggestions: vec!["hello".to_string()],
        }]
    );
    assert_eq!(
        warnings[0].to_string(),
        "greet: unknown message 'helo', did you mean: hello?"
    );
}

#[test]
fn unknown_term_is_reported_with_suggestion() {
    let bundle = bundle_with(vec![
        Entry::new("-brand", "Firefly"),
        Entry::new("about", placeable(Expression::term("brnd"))),
    ]);
    let warnings = check_references(&bundle);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].entry(), "about");
    assert_eq!(warnings[0].suggestions(), ["-brand".to_string()]);
    assert_eq!(
        warnings[0].to_string(),
        "about: unknown term '-brnd', did you mean: -brand?"
    );
}

#[test]
fn unknown_function_is_reported_with_suggestion() {
    let bundle = bundle_with(vec![Entry::new(
        "price",
        placeable(Expression::function(
            "NUMBR",
            vec![Expression::variable("n").into()],
        )),
    )]);
    let warnings = check_references(&bundle);
    assert!(matches!(
        warnings.as_slice(),
        [ReferenceWarning::UnknownFunction { name, suggestions, .. }]
            if name == "NUMBR" && suggestions == &["NUMBER".to_string()]
    ));
}

#[test]
fn unknown_attributes_are_reported() {
    let bundle = bundle_with(vec![
        Entry::new("login", "Log in"),
        Entry::new("-brand", "Firefly"),
        Entry::new(
            "hint",
            Pattern::from_elements(vec![
                Expression::message_attribute("login", "title").into(),
                Expression::Term(TermReference::new("brand").with_attribute("case")).into(),
            ]),
        ),
    ]);
    let warnings = check_references(&bundle);
    assert_eq!(
        warnings,
        vec![
            ReferenceWarning::UnknownMessageAttribute {
                entry: "hint".to_string(),
                id: "login".to_string(),
                attribute: "title".to_string(),
            },
            ReferenceWarning::UnknownTermAttribute {
                entry: "hint".to_string(),
                id: "-brand".to_string(),
                attribute: "case".to_string(),
            },
        ]
    );
}

#[test]
fn references_inside_select_and_attributes_are_checked() {
    let select = SelectExpression {
        selector: Box::new(Expression::message("missing-selector")),
        variants: vec![Variant::new(
            "other",
            placeable(Expression::message("missing-variant")),
        )],
        star: 3,
    };
    let bundle = bundle_with(vec![
        Entry::without_value("menu").with_attribute("label", placeable(select.into())),
        Entry::new("-term", placeable(Expression::message("missing-in-term"))),
    ]);
    let warnings = check_references(&bundle);
    let entries: Vec<&str> = warnings.iter().map(ReferenceWarning::entry).collect();
    assert_eq!(entries, vec!["menu.label", "menu.label", "menu.label", "-term"]);
    assert!(matches!(
        warnings[1],
        ReferenceWarning::InvalidDefaultVariant { star: 3, count: 1, .. }
    ));
}

#[test]
fn term_call_positional_arguments_are_checked() {
    let bundle = bundle_with(vec![
        Entry::new("-brand", "Firefly"),
        Entry::new(
            "about",
            placeable(Expression::Term(
                TermReference::new("brand")
                    .with_arguments(vec![Expression::message("nowhere").into()]),
            )),
        ),
    ]);
    let warnings = check_references(&bundle);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        &warnings[0],
        ReferenceWarning::UnknownMessage { id, .. } if id == "nowhere"
    ));
}
