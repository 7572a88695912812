//! Translation unit tree consumed by the resolver.
//!
//! These types describe already-parsed translation entries. Nothing in this
//! crate parses source syntax; trees are built by hand or deserialized from
//! JSON (see [`Resource`]).

mod repr;
mod resource;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use resource::{Entry, Resource};

/// A translatable unit of text.
///
/// A pattern without placeables is stored as [`Pattern::Text`] and never
/// reaches the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pattern {
    /// Plain text with no placeables.
    Text(String),
    /// Text fragments interleaved with placeables.
    Complex(Vec<PatternElement>),
}

impl Pattern {
    /// Create a plain-text pattern.
    pub fn text(text: impl Into<String>) -> Self {
        Pattern::Text(text.into())
    }

    /// Create a pattern from elements, collapsing all-text sequences into
    /// a single [`Pattern::Text`].
    pub fn from_elements(elements: Vec<PatternElement>) -> Self {
        if elements
            .iter()
            .all(|element| matches!(element, PatternElement::Text(_)))
        {
            let text = elements
                .into_iter()
                .filter_map(|element| match element {
                    PatternElement::Text(text) => Some(text),
                    PatternElement::Placeable(_) => None,
                })
                .collect();
            return Pattern::Text(text);
        }
        Pattern::Complex(elements)
    }

    /// Returns the text of a pattern with no placeables.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Pattern::Text(text) => Some(text),
            Pattern::Complex(_) => None,
        }
    }

    /// Returns true if no element of this pattern is a placeable.
    pub fn is_plain(&self) -> bool {
        match self {
            Pattern::Text(_) => true,
            Pattern::Complex(elements) => elements
                .iter()
                .all(|element| matches!(element, PatternElement::Text(_))),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Pattern::text(text)
    }
}

/// One element of a complex pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternElement {
    /// Literal text, copied to the output after the bundle's transform.
    Text(String),
    /// An expression resolved and rendered at format time.
    Placeable(Expression),
}

impl From<&str> for PatternElement {
    fn from(text: &str) -> Self {
        PatternElement::Text(text.to_string())
    }
}

impl From<Expression> for PatternElement {
    fn from(expression: Expression) -> Self {
        PatternElement::Placeable(expression)
    }
}

/// A literal value: a string or a number with its declared precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "repr::NodeRepr", into = "repr::NodeRepr")]
pub enum Literal {
    String(String),
    /// A number literal; `precision` is the count of written fraction digits.
    Number { value: f64, precision: usize },
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Literal::String(text.to_string())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Number {
            value: value as f64,
            precision: 0,
        }
    }
}

/// An expression inside a placeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "repr::NodeRepr", into = "repr::NodeRepr")]
pub enum Expression {
    Literal(Literal),
    /// `$name`
    Variable { name: String },
    /// `message` or `message.attr`
    Message {
        id: String,
        attribute: Option<String>,
    },
    /// `-term`, `-term.attr` or `-term(name: value)`
    Term(TermReference),
    /// `FUNCTION(args)`
    Function {
        name: String,
        arguments: Vec<CallArgument>,
    },
    Select(SelectExpression),
}

impl Expression {
    /// Reference to an external or term-local variable.
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable { name: name.into() }
    }

    /// Reference to a message value.
    pub fn message(id: impl Into<String>) -> Self {
        Expression::Message {
            id: id.into(),
            attribute: None,
        }
    }

    /// Reference to a message attribute.
    pub fn message_attribute(id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Expression::Message {
            id: id.into(),
            attribute: Some(attribute.into()),
        }
    }

    /// Reference to a term value. `name` excludes the leading `-`.
    pub fn term(name: impl Into<String>) -> Self {
        Expression::Term(TermReference::new(name))
    }

    /// Call of a registered function.
    pub fn function(name: impl Into<String>, arguments: Vec<CallArgument>) -> Self {
        Expression::Function {
            name: name.into(),
            arguments,
        }
    }

    /// String literal.
    pub fn string(text: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(text.into()))
    }

    /// Number literal with explicit precision.
    pub fn number(value: f64, precision: usize) -> Self {
        Expression::Literal(Literal::Number { value, precision })
    }
}

/// A reference to a term, optionally to one of its attributes, optionally
/// with call arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TermReference {
    /// Term name without the leading `-`.
    pub name: String,
    pub attribute: Option<String>,
    pub arguments: Option<Vec<CallArgument>>,
}

impl TermReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: None,
            arguments: None,
        }
    }

    /// Identifier under which the term is registered.
    pub fn id(&self) -> String {
        format!("-{}", self.name)
    }

    /// Attach an attribute accessor.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Attach call arguments.
    pub fn with_arguments(mut self, arguments: Vec<CallArgument>) -> Self {
        self.arguments = Some(arguments);
        self
    }
}

impl From<TermReference> for Expression {
    fn from(reference: TermReference) -> Self {
        Expression::Term(reference)
    }
}

/// One argument of a term or function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "repr::NodeRepr", into = "repr::NodeRepr")]
pub enum CallArgument {
    Positional(Expression),
    /// `name: literal`. Names are unique within one call.
    Named { name: String, value: Literal },
}

impl CallArgument {
    pub fn named(name: impl Into<String>, value: impl Into<Literal>) -> Self {
        CallArgument::Named {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<Expression> for CallArgument {
    fn from(expression: Expression) -> Self {
        CallArgument::Positional(expression)
    }
}

/// Chooses one of several patterns by matching a selector value.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectExpression {
    pub selector: Box<Expression>,
    pub variants: Vec<Variant>,
    /// Index of the default variant.
    pub star: usize,
}

impl From<SelectExpression> for Expression {
    fn from(select: SelectExpression) -> Self {
        Expression::Select(select)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub key: Literal,
    pub value: Pattern,
}

impl Variant {
    pub fn new(key: impl Into<Literal>, value: impl Into<Pattern>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A public entry, retrievable by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: String,
    value: Option<Pattern>,
    attributes: BTreeMap<String, Pattern>,
}

impl Message {
    pub(crate) fn new(
        id: String,
        value: Option<Pattern>,
        attributes: BTreeMap<String, Pattern>,
    ) -> Self {
        Self {
            id,
            value,
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> Option<&Pattern> {
        self.value.as_ref()
    }

    pub fn attribute(&self, name: &str) -> Option<&Pattern> {
        self.attributes.get(name)
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.attributes
            .iter()
            .map(|(name, pattern)| (name.as_str(), pattern))
    }
}

/// A private entry, reachable only through a [`TermReference`].
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    id: String,
    value: Pattern,
    attributes: BTreeMap<String, Pattern>,
}

impl Term {
    pub(crate) fn new(id: String, value: Pattern, attributes: BTreeMap<String, Pattern>) -> Self {
        Self {
            id,
            value,
            attributes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &Pattern {
        &self.value
    }

    pub fn attribute(&self, name: &str) -> Option<&Pattern> {
        self.attributes.get(name)
    }

    /// Attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.attributes
            .iter()
            .map(|(name, pattern)| (name.as_str(), pattern))
    }
}
