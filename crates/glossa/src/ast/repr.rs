//! JSON node shape shared by literals, expressions and call arguments.

use serde::{Deserialize, Serialize};

use crate::ast::{CallArgument, Expression, Literal, SelectExpression, TermReference, Variant};

/// Serialized form of every expression-like node, tagged by `"type"`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(super) enum NodeRepr {
    Str {
        value: String,
    },
    Num {
        value: f64,
        #[serde(default)]
        precision: usize,
    },
    Var {
        name: String,
    },
    Mesg {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attr: Option<String>,
    },
    Term {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attr: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        args: Option<Vec<CallArgument>>,
    },
    Func {
        name: String,
        #[serde(default)]
        args: Vec<CallArgument>,
    },
    Select {
        selector: Box<Expression>,
        variants: Vec<Variant>,
        star: usize,
    },
    Narg {
        name: String,
        value: Literal,
    },
}

impl TryFrom<NodeRepr> for Literal {
    type Error = &'static str;

    fn try_from(node: NodeRepr) -> Result<Self, Self::Error> {
        match node {
            NodeRepr::Str { value } => Ok(Literal::String(value)),
            NodeRepr::Num { value, precision } => Ok(Literal::Number { value, precision }),
            _ => Err("expected a string or number literal"),
        }
    }
}

impl From<Literal> for NodeRepr {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::String(value) => NodeRepr::Str { value },
            Literal::Number { value, precision } => NodeRepr::Num { value, precision },
        }
    }
}

impl TryFrom<NodeRepr> for Expression {
    type Error = &'static str;

    fn try_from(node: NodeRepr) -> Result<Self, Self::Error> {
        Ok(match node {
            NodeRepr::Str { value } => Expression::Literal(Literal::String(value)),
            NodeRepr::Num { value, precision } => {
                Expression::Literal(Literal::Number { value, precision })
            }
            NodeRepr::Var { name } => Expression::Variable { name },
            NodeRepr::Mesg { name, attr } => Expression::Message {
                id: name,
                attribute: attr,
            },
            NodeRepr::Term { name, attr, args } => Expression::Term(TermReference {
                name,
                attribute: attr,
                arguments: args,
            }),
            NodeRepr::Func { name, args } => Expression::Function {
                name,
                arguments: args,
            },
            NodeRepr::Select {
                selector,
                variants,
                star,
            } => Expression::Select(SelectExpression {
                selector,
                variants,
                star,
            }),
            NodeRepr::Narg { .. } => return Err("named argument outside of a call"),
        })
    }
}

impl From<Expression> for NodeRepr {
    fn from(expression: Expression) -> Self {
        match expression {
            Expression::Literal(literal) => literal.into(),
            Expression::Variable { name } => NodeRepr::Var { name },
            Expression::Message { id, attribute } => NodeRepr::Mesg {
                name: id,
                attr: attribute,
            },
            Expression::Term(reference) => NodeRepr::Term {
                name: reference.name,
                attr: reference.attribute,
                args: reference.arguments,
            },
            Expression::Function { name, arguments } => NodeRepr::Func {
                name,
                args: arguments,
            },
            Expression::Select(select) => NodeRepr::Select {
                selector: select.selector,
                variants: select.variants,
                star: select.star,
            },
        }
    }
}

impl TryFrom<NodeRepr> for CallArgument {
    type Error = &'static str;

    fn try_from(node: NodeRepr) -> Result<Self, Self::Error> {
        match node {
            NodeRepr::Narg { name, value } => Ok(CallArgument::Named { name, value }),
            other => Expression::try_from(other).map(CallArgument::Positional),
        }
    }
}

impl From<CallArgument> for NodeRepr {
    fn from(argument: CallArgument) -> Self {
        match argument {
            CallArgument::Positional(expression) => expression.into(),
            CallArgument::Named { name, value } => NodeRepr::Narg { name, value },
        }
    }
}
