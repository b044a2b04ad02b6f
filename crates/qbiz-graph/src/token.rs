//! Tokens: values that may only be known after realization
//!
//! A [`Token`] is either a plain literal or a deferred value: an attribute
//! emitted by another declaration, a deployment pseudo parameter, or a
//! concatenation of those. Tokens serialize to the engine's intrinsic
//! function form (`Ref`, `Fn::GetAtt`, `Fn::Join`).

use crate::types::{Attribute, LogicalId, Pseudo};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// A literal or deferred string value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Value known at build time
    Literal(String),
    /// Attribute emitted by another declaration
    Attr { id: LogicalId, attribute: Attribute },
    /// Deployment context value
    Pseudo(Pseudo),
    /// Concatenation of parts without separator
    Join(Vec<Token>),
}

impl Token {
    /// Literal token
    #[inline]
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Attribute of another declaration
    #[inline]
    #[must_use]
    pub fn attr(id: LogicalId, attribute: Attribute) -> Self {
        Self::Attr { id, attribute }
    }

    /// Concatenate parts
    ///
    /// Nested joins are flattened, empty literals dropped and adjacent
    /// literals merged, so a join of literals collapses to one literal.
    #[must_use]
    pub fn join<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        let mut out: Vec<Token> = Vec::new();
        for part in parts {
            let flattened = match part {
                Token::Join(inner) => inner,
                other => vec![other],
            };
            for piece in flattened {
                if let Token::Literal(next) = &piece {
                    if next.is_empty() {
                        continue;
                    }
                    if let Some(Token::Literal(prev)) = out.last_mut() {
                        prev.push_str(next);
                        continue;
                    }
                }
                out.push(piece);
            }
        }

        match out.len() {
            0 => Token::Literal(String::new()),
            1 => out.remove(0),
            _ => Token::Join(out),
        }
    }

    /// Resolved value when nothing is deferred
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Token::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Whether any part is only known after realization
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        !matches!(self, Token::Literal(_))
    }

    /// Every declaration attribute this token depends on, in order
    #[must_use]
    pub fn references(&self) -> Vec<(&LogicalId, Attribute)> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<(&'a LogicalId, Attribute)>) {
        match self {
            Token::Attr { id, attribute } => out.push((id, *attribute)),
            Token::Join(parts) => {
                for part in parts {
                    part.collect_references(out);
                }
            }
            Token::Literal(_) | Token::Pseudo(_) => {}
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(value) => f.write_str(value),
            Token::Attr {
                id,
                attribute: Attribute::Ref,
            } => write!(f, "${{{id}}}"),
            Token::Attr { id, attribute } => write!(f, "${{{id}.{attribute}}}"),
            Token::Pseudo(pseudo) => write!(f, "${{{}}}", pseudo.as_str()),
            Token::Join(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
        }
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Token::Literal(value) => serializer.serialize_str(value),
            Token::Attr {
                id,
                attribute: Attribute::Ref,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id.as_str())?;
                map.end()
            }
            Token::Attr { id, attribute } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[id.as_str(), attribute.as_str()])?;
                map.end()
            }
            Token::Pseudo(pseudo) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", pseudo.as_str())?;
                map.end()
            }
            Token::Join(parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &("", parts))?;
                map.end()
            }
        }
    }
}
