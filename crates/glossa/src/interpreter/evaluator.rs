//! Pattern resolution.
//!
//! Walks a pattern, resolving each placeable to a [`Value`] and rendering it
//! through the [`Scope`]. Every failure is reported to the scope and replaced
//! by a fallback value, so the rest of the pattern still renders when an
//! error sink is present.

use crate::ast::{
    CallArgument, Expression, Literal, Pattern, PatternElement, SelectExpression, TermReference,
    Variant,
};
use crate::interpreter::{Args, NamedArgs, ResolverError, Scope};
use crate::types::{NumberValue, Value};

/// First strong isolate: opens an isolated run of text.
pub const FSI: char = '\u{2068}';

/// Pop directional isolate: closes the run opened by [`FSI`].
pub const PDI: char = '\u{2069}';

/// Resolve a pattern to text.
///
/// Text fragments pass through the bundle's transform. With isolation on,
/// placeables are wrapped in [`FSI`]/[`PDI`] unless the pattern is a single
/// placeable.
///
/// # Errors
///
/// Returns the first error encountered when the scope has no error sink.
pub fn resolve_pattern(
    pattern: &Pattern,
    scope: &mut Scope<'_, '_>,
) -> Result<String, ResolverError> {
    let elements = match pattern {
        Pattern::Text(text) => return Ok(scope.transform(text).into_owned()),
        Pattern::Complex(elements) => elements,
    };
    let isolate = scope.use_isolating() && elements.len() > 1;
    let mut output = String::new();
    for element in elements {
        match element {
            PatternElement::Text(text) => output.push_str(&scope.transform(text)),
            PatternElement::Placeable(expression) => {
                let value = resolve_expression(expression, scope)?;
                let text = scope.render(&value)?;
                if isolate {
                    output.push(FSI);
                    output.push_str(&text);
                    output.push(PDI);
                } else {
                    output.push_str(&text);
                }
            }
        }
    }
    Ok(output)
}

/// Resolve one expression to a value, bounded by the scope's depth limit.
pub fn resolve_expression(
    expression: &Expression,
    scope: &mut Scope<'_, '_>,
) -> Result<Value, ResolverError> {
    if let Err(error) = scope.descend() {
        scope.report(error)?;
        return Ok(Value::none());
    }
    let result = match expression {
        Expression::Literal(literal) => Ok(resolve_literal(literal)),
        Expression::Variable { name } => resolve_variable(name, scope),
        Expression::Message { id, attribute } => {
            resolve_message_reference(id, attribute.as_deref(), scope)
        }
        Expression::Term(reference) => resolve_term_reference(reference, scope),
        Expression::Function { name, arguments } => {
            resolve_function_reference(name, arguments, scope)
        }
        Expression::Select(select) => resolve_select(select, scope),
    };
    scope.ascend();
    result
}

fn resolve_literal(literal: &Literal) -> Value {
    match literal {
        Literal::String(text) => Value::String(text.clone()),
        Literal::Number { value, precision } => {
            Value::Number(NumberValue::with_precision(*value, *precision))
        }
    }
}

fn resolve_variable(name: &str, scope: &mut Scope<'_, '_>) -> Result<Value, ResolverError> {
    if let Some(value) = scope.arg(name) {
        return Ok(value.clone());
    }
    // Term parameters are optional.
    if !scope.in_term() {
        scope.report(ResolverError::UnknownVariable {
            name: name.to_string(),
        })?;
    }
    Ok(Value::none_with(format!("${name}")))
}

fn resolve_message_reference(
    id: &str,
    attribute: Option<&str>,
    scope: &mut Scope<'_, '_>,
) -> Result<Value, ResolverError> {
    let fallback = match attribute {
        Some(attribute) => format!("{id}.{attribute}"),
        None => id.to_string(),
    };
    let Some(message) = scope.bundle().get_message(id) else {
        scope.report(ResolverError::UnknownMessage { id: id.to_string() })?;
        return Ok(Value::none_with(fallback));
    };
    let pattern = match attribute {
        Some(attribute) => match message.attribute(attribute) {
            Some(pattern) => pattern,
            None => {
                scope.report(ResolverError::UnknownMessageAttribute {
                    id: id.to_string(),
                    attribute: attribute.to_string(),
                })?;
                return Ok(Value::none_with(fallback));
            }
        },
        None => match message.value() {
            Some(pattern) => pattern,
            None => {
                scope.report(ResolverError::MissingValue { id: id.to_string() })?;
                return Ok(Value::none_with(fallback));
            }
        },
    };
    // Messages see the caller's arguments, never a term's.
    let local_args = scope.replace_local_args(None);
    let result = resolve_entry_pattern(&fallback, pattern, scope);
    scope.replace_local_args(local_args);
    result
}

fn resolve_term_reference(
    reference: &TermReference,
    scope: &mut Scope<'_, '_>,
) -> Result<Value, ResolverError> {
    let id = reference.id();
    let fallback = match &reference.attribute {
        Some(attribute) => format!("{id}.{attribute}"),
        None => id.clone(),
    };
    let Some(term) = scope.bundle().get_term(&id) else {
        scope.report(ResolverError::UnknownTerm { id })?;
        return Ok(Value::none_with(fallback));
    };
    let pattern = match &reference.attribute {
        Some(attribute) => match term.attribute(attribute) {
            Some(pattern) => pattern,
            None => {
                scope.report(ResolverError::UnknownTermAttribute {
                    id,
                    attribute: attribute.clone(),
                })?;
                return Ok(Value::none_with(fallback));
            }
        },
        None => term.value(),
    };
    let named = match &reference.arguments {
        Some(arguments) => resolve_named_arguments(arguments),
        None => Args::new(),
    };
    let caller_args = scope.replace_local_args(Some(named));
    let result = resolve_entry_pattern(&fallback, pattern, scope);
    scope.replace_local_args(caller_args);
    result
}

/// Resolve the pattern of a referenced entry under the cycle guard.
fn resolve_entry_pattern(
    key: &str,
    pattern: &Pattern,
    scope: &mut Scope<'_, '_>,
) -> Result<Value, ResolverError> {
    if let Err(error) = scope.push_entry(key) {
        scope.report(error)?;
        return Ok(Value::none_with(key));
    }
    let result = resolve_pattern(pattern, scope);
    scope.pop_entry();
    result.map(Value::String)
}

/// Term calls only see their named arguments; positional ones are ignored.
fn resolve_named_arguments(arguments: &[CallArgument]) -> Args {
    arguments
        .iter()
        .filter_map(|argument| match argument {
            CallArgument::Named { name, value } => Some((name.clone(), resolve_literal(value))),
            CallArgument::Positional(_) => None,
        })
        .collect()
}

fn resolve_function_reference(
    name: &str,
    arguments: &[CallArgument],
    scope: &mut Scope<'_, '_>,
) -> Result<Value, ResolverError> {
    let Some(function) = scope.bundle().function(name) else {
        scope.report(ResolverError::UnknownFunction {
            name: name.to_string(),
        })?;
        return Ok(Value::none_with(format!("{name}()")));
    };
    let mut positional = Vec::new();
    let mut named = NamedArgs::new();
    for argument in arguments {
        match argument {
            CallArgument::Positional(expression) => {
                positional.push(resolve_expression(expression, scope)?);
            }
            CallArgument::Named { name, value } => {
                named.insert(name.clone(), resolve_literal(value));
            }
        }
    }
    match function.call(&positional, &named) {
        Ok(value) => Ok(value),
        Err(source) => {
            scope.report(ResolverError::FunctionInvocation {
                name: name.to_string(),
                source,
            })?;
            Ok(Value::none_with(format!("{name}()")))
        }
    }
}

fn resolve_select(
    select: &SelectExpression,
    scope: &mut Scope<'_, '_>,
) -> Result<Value, ResolverError> {
    let selector = resolve_expression(&select.selector, scope)?;
    if !selector.is_none() {
        if let Some(variant) = select_variant(&selector, &select.variants, scope)? {
            return resolve_pattern(&variant.value, scope).map(Value::String);
        }
    }
    match select.variants.get(select.star) {
        Some(variant) => resolve_pattern(&variant.value, scope).map(Value::String),
        None => {
            scope.report(ResolverError::InvalidDefaultVariant {
                star: select.star,
                count: select.variants.len(),
            })?;
            Ok(Value::none())
        }
    }
}

/// Find the variant a selector picks, if any.
///
/// Exact key matches win over plural category matches; within each pass
/// the first variant in declaration order wins.
fn select_variant<'v>(
    selector: &Value,
    variants: &'v [Variant],
    scope: &mut Scope<'_, '_>,
) -> Result<Option<&'v Variant>, ResolverError> {
    if let Some(variant) = variants
        .iter()
        .find(|variant| matches_exactly(selector, &variant.key, scope))
    {
        return Ok(Some(variant));
    }
    let Value::Number(number) = selector else {
        return Ok(None);
    };
    let Some(category) = scope.plural_category(number)? else {
        return Ok(None);
    };
    Ok(variants
        .iter()
        .find(|variant| matches!(&variant.key, Literal::String(key) if key == category)))
}

fn matches_exactly(selector: &Value, key: &Literal, scope: &Scope<'_, '_>) -> bool {
    match (selector, key) {
        (Value::String(text), Literal::String(key)) => text == key,
        (Value::Number(number), Literal::Number { value, .. }) => number.value == *value,
        (Value::Custom(custom), key) => custom.matches(key, scope),
        _ => false,
    }
}
