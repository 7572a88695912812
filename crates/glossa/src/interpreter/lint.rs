//! Static reference checks over registered entries.
//!
//! Walks every message and term pattern without formatting anything and
//! reports references that would fail at format time.

use thiserror::Error;

use crate::ast::{CallArgument, Expression, Pattern, PatternElement};
use crate::interpreter::Bundle;
use crate::interpreter::error::compute_suggestions;

/// A reference that cannot resolve, found without formatting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceWarning {
    #[error("{entry}: unknown message '{id}'{}", did_you_mean(suggestions))]
    UnknownMessage {
        entry: String,
        id: String,
        suggestions: Vec<String>,
    },

    #[error("{entry}: unknown attribute '{attribute}' on message '{id}'")]
    UnknownMessageAttribute {
        entry: String,
        id: String,
        attribute: String,
    },

    #[error("{entry}: unknown term '{id}'{}", did_you_mean(suggestions))]
    UnknownTerm {
        entry: String,
        id: String,
        suggestions: Vec<String>,
    },

    #[error("{entry}: unknown attribute '{attribute}' on term '{id}'")]
    UnknownTermAttribute {
        entry: String,
        id: String,
        attribute: String,
    },

    #[error("{entry}: unknown function '{name}'{}", did_you_mean(suggestions))]
    UnknownFunction {
        entry: String,
        name: String,
        suggestions: Vec<String>,
    },

    #[error("{entry}: default variant index {star} is out of range for {count} variants")]
    InvalidDefaultVariant {
        entry: String,
        star: usize,
        count: usize,
    },
}

impl ReferenceWarning {
    /// The entry (`id` or `id.attribute`) containing the reference.
    pub fn entry(&self) -> &str {
        match self {
            ReferenceWarning::UnknownMessage { entry, .. }
            | ReferenceWarning::UnknownMessageAttribute { entry, .. }
            | ReferenceWarning::UnknownTerm { entry, .. }
            | ReferenceWarning::UnknownTermAttribute { entry, .. }
            | ReferenceWarning::UnknownFunction { entry, .. }
            | ReferenceWarning::InvalidDefaultVariant { entry, .. } => entry,
        }
    }

    /// Close matches for the unknown name, if any.
    pub fn suggestions(&self) -> &[String] {
        match self {
            ReferenceWarning::UnknownMessage { suggestions, .. }
            | ReferenceWarning::UnknownTerm { suggestions, .. }
            | ReferenceWarning::UnknownFunction { suggestions, .. } => suggestions,
            ReferenceWarning::UnknownMessageAttribute { .. }
            | ReferenceWarning::UnknownTermAttribute { .. }
            | ReferenceWarning::InvalidDefaultVariant { .. } => &[],
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Check every registered message and term for references that cannot
/// resolve. Warnings are ordered by entry: messages first, then terms, each
/// by id.
pub fn check_references(bundle: &Bundle) -> Vec<ReferenceWarning> {
    let mut warnings = Vec::new();
    for id in bundle.message_ids() {
        let Some(message) = bundle.get_message(id) else {
            continue;
        };
        if let Some(value) = message.value() {
            check_pattern(bundle, id, value, &mut warnings);
        }
        for (attribute, pattern) in message.attributes() {
            check_pattern(bundle, &format!("{id}.{attribute}"), pattern, &mut warnings);
        }
    }
    for id in bundle.term_ids() {
        let Some(term) = bundle.get_term(id) else {
            continue;
        };
        check_pattern(bundle, id, term.value(), &mut warnings);
        for (attribute, pattern) in term.attributes() {
            check_pattern(bundle, &format!("{id}.{attribute}"), pattern, &mut warnings);
        }
    }
    warnings
}

fn check_pattern(
    bundle: &Bundle,
    entry: &str,
    pattern: &Pattern,
    warnings: &mut Vec<ReferenceWarning>,
) {
    let Pattern::Complex(elements) = pattern else {
        return;
    };
    for element in elements {
        if let PatternElement::Placeable(expression) = element {
            check_expression(bundle, entry, expression, warnings);
        }
    }
}

fn check_expression(
    bundle: &Bundle,
    entry: &str,
    expression: &Expression,
    warnings: &mut Vec<ReferenceWarning>,
) {
    match expression {
        Expression::Literal(_) | Expression::Variable { .. } => {}
        Expression::Message { id, attribute } => match bundle.get_message(id) {
            None => warnings.push(ReferenceWarning::UnknownMessage {
                entry: entry.to_string(),
                id: id.clone(),
                suggestions: compute_suggestions(id, bundle.message_ids()),
            }),
            Some(message) => {
                if let Some(attribute) = attribute {
                    if message.attribute(attribute).is_none() {
                        warnings.push(ReferenceWarning::UnknownMessageAttribute {
                            entry: entry.to_string(),
                            id: id.clone(),
                            attribute: attribute.clone(),
                        });
                    }
                }
            }
        },
        Expression::Term(reference) => {
            let id = reference.id();
            match bundle.get_term(&id) {
                None => warnings.push(ReferenceWarning::UnknownTerm {
                    entry: entry.to_string(),
                    suggestions: compute_suggestions(&id, bundle.term_ids()),
                    id,
                }),
                Some(term) => {
                    if let Some(attribute) = &reference.attribute {
                        if term.attribute(attribute).is_none() {
                            warnings.push(ReferenceWarning::UnknownTermAttribute {
                                entry: entry.to_string(),
                                id,
                                attribute: attribute.clone(),
                            });
                        }
                    }
                }
            }
            if let Some(arguments) = &reference.arguments {
                check_arguments(bundle, entry, arguments, warnings);
            }
        }
        Expression::Function { name, arguments } => {
            if bundle.function(name).is_none() {
                warnings.push(ReferenceWarning::UnknownFunction {
                    entry: entry.to_string(),
                    name: name.clone(),
                    suggestions: compute_suggestions(name, bundle.function_names()),
                });
            }
            check_arguments(bundle, entry, arguments, warnings);
        }
        Expression::Select(select) => {
            check_expression(bundle, entry, &select.selector, warnings);
            if select.star >= select.variants.len() {
                warnings.push(ReferenceWarning::InvalidDefaultVariant {
                    entry: entry.to_string(),
                    star: select.star,
                    count: select.variants.len(),
                });
            }
            for variant in &select.variants {
                check_pattern(bundle, entry, &variant.value, warnings);
            }
        }
    }
}

fn check_arguments(
    bundle: &Bundle,
    entry: &str,
    arguments: &[CallArgument],
    warnings: &mut Vec<ReferenceWarning>,
) {
    for argument in arguments {
        if let CallArgument::Positional(expression) = argument {
            check_expression(bundle, entry, expression, warnings);
        }
    }
}
