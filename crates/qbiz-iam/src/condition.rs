//! Condition predicates over request context keys

use indexmap::IndexMap;
use qbiz_graph::Token;
use serde::Serialize;

/// Condition operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionOperator {
    /// Exact string match
    StringEquals,
    /// Wildcard string match
    StringLike,
    /// Exact ARN match
    ArnEquals,
    /// Wildcard ARN match
    ArnLike,
}

impl ConditionOperator {
    /// Whether the operator compares ARNs
    #[must_use]
    pub const fn is_arn(self) -> bool {
        matches!(self, Self::ArnEquals | Self::ArnLike)
    }
}

/// Right-hand side of a condition
///
/// A set matches when the context value matches any member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// One value
    Single(Token),
    /// Set membership
    Set(Vec<Token>),
}

impl ConditionValue {
    /// Build a set-membership value
    pub fn set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        Self::Set(values.into_iter().map(Into::into).collect())
    }

    /// Tokens in the value
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        match self {
            Self::Single(token) => vec![token],
            Self::Set(tokens) => tokens.iter().collect(),
        }
    }
}

impl From<Token> for ConditionValue {
    fn from(value: Token) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        Self::Single(Token::literal(value))
    }
}

/// Ordered map of operator → key → value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conditions(IndexMap<ConditionOperator, IndexMap<String, ConditionValue>>);

impl Conditions {
    /// Empty condition block
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the value for `key` under `operator`
    pub fn insert(
        &mut self,
        operator: ConditionOperator,
        key: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) {
        self.0
            .entry(operator)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Value for `key` under `operator`
    #[must_use]
    pub fn get(&self, operator: ConditionOperator, key: &str) -> Option<&ConditionValue> {
        self.0.get(&operator).and_then(|entries| entries.get(key))
    }

    /// Whether `key` appears under `operator`
    #[must_use]
    pub fn has(&self, operator: ConditionOperator, key: &str) -> bool {
        self.get(operator, key).is_some()
    }

    /// Whether there are no conditions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (operator, key, value) triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ConditionOperator, &str, &ConditionValue)> + '_ {
        self.0.iter().flat_map(|(operator, entries)| {
            entries
                .iter()
                .map(move |(key, value)| (*operator, key.as_str(), value))
        })
    }

    /// Tokens in all values
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        self.iter().flat_map(|(_, _, value)| value.tokens()).collect()
    }
}
