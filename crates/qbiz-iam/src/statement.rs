//! Policy statements

use crate::condition::{ConditionOperator, ConditionValue, Conditions};
use crate::error::PolicyError;
use crate::keys;
use qbiz_graph::Token;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Statement purpose identifier
///
/// Non-empty ASCII alphanumeric; stable across graph revisions so that
/// statements can be audited and diffed individually.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Sid(String);

impl Sid {
    /// Validate and wrap a statement id
    ///
    /// # Errors
    /// `PolicyError::InvalidSid` if empty or not ASCII alphanumeric.
    pub fn new(sid: impl Into<String>) -> Result<Self, PolicyError> {
        let sid = sid.into();
        if sid.is_empty() {
            return Err(PolicyError::InvalidSid {
                sid,
                reason: "empty",
            });
        }
        if !sid.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PolicyError::InvalidSid {
                sid,
                reason: "only ASCII letters and digits are allowed",
            });
        }
        Ok(Self(sid))
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Statement effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Effect {
    /// Grant
    #[default]
    Allow,
    /// Explicit denial
    Deny,
}

/// Principal of a resource-based or trust statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Service principal such as `qbusiness.amazonaws.com`
    Service(String),
    /// Account or IAM principal ARN
    Aws(Token),
}

impl Principal {
    /// The account root principal, `arn:aws:iam::{account}:root`
    #[must_use]
    pub fn account_root(account: &Token) -> Self {
        Self::Aws(Token::join([
            Token::literal("arn:aws:iam::"),
            account.clone(),
            Token::literal(":root"),
        ]))
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Service(service) => map.serialize_entry("Service", service)?,
            Self::Aws(arn) => map.serialize_entry("AWS", arn)?,
        }
        map.end()
    }
}

/// A single policy statement
///
/// Binds a narrow action set to a narrow resource set (or, in a trust
/// document, to a principal), optionally gated by conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    sid: Sid,
    effect: Effect,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<Principal>,
    #[serde(rename = "Action")]
    actions: Vec<String>,
    #[serde(rename = "Resource", skip_serializing_if = "Vec::is_empty")]
    resources: Vec<Token>,
    #[serde(rename = "Condition", skip_serializing_if = "Conditions::is_empty")]
    conditions: Conditions,
}

impl PolicyStatement {
    /// Start an `Allow` statement with the given purpose id
    #[must_use]
    pub fn builder(sid: impl Into<String>) -> StatementBuilder {
        StatementBuilder {
            sid: sid.into(),
            effect: Effect::Allow,
            principal: None,
            actions: Vec::new(),
            resources: Vec::new(),
            conditions: Conditions::new(),
        }
    }

    /// Purpose id
    #[inline]
    #[must_use]
    pub fn sid(&self) -> &Sid {
        &self.sid
    }

    /// Effect
    #[inline]
    #[must_use]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// Principal, for trust statements
    #[inline]
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Actions in declaration order
    #[inline]
    #[must_use]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Resources
    #[inline]
    #[must_use]
    pub fn resources(&self) -> &[Token] {
        &self.resources
    }

    /// Conditions
    #[inline]
    #[must_use]
    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Tokens in resources and condition values
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        let principal = match &self.principal {
            Some(Principal::Aws(arn)) => Some(arn),
            _ => None,
        };
        principal
            .into_iter()
            .chain(&self.resources)
            .chain(self.conditions.tokens())
            .collect()
    }

    /// Whether a `StringEquals` condition pins the caller's account
    #[must_use]
    pub fn is_account_scoped(&self) -> bool {
        keys::ACCOUNT_SCOPE_KEYS
            .iter()
            .any(|key| self.conditions.has(ConditionOperator::StringEquals, key))
    }

    /// Whether an `ArnEquals`/`ArnLike` condition pins the source ARN
    #[must_use]
    pub fn is_resource_scoped(&self) -> bool {
        self.conditions.has(ConditionOperator::ArnEquals, keys::SOURCE_ARN)
            || self.conditions.has(ConditionOperator::ArnLike, keys::SOURCE_ARN)
    }
}

/// Fluent builder for [`PolicyStatement`]
#[derive(Debug, Clone)]
#[must_use]
pub struct StatementBuilder {
    sid: String,
    effect: Effect,
    principal: Option<Principal>,
    actions: Vec<String>,
    resources: Vec<Token>,
    conditions: Conditions,
}

impl StatementBuilder {
    /// Set the effect
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Set the principal
    pub fn principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Add an action; repeated actions are kept once
    pub fn action(mut self, action: impl Into<String>) -> Self {
        let action = action.into();
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    /// Add several actions
    pub fn actions<I, A>(self, actions: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        actions
            .into_iter()
            .fold(self, |builder, action| builder.action(action))
    }

    /// Add a resource
    pub fn resource(mut self, resource: impl Into<Token>) -> Self {
        self.resources.push(resource.into());
        self
    }

    /// Add several resources
    pub fn resources<I, T>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.resources.extend(resources.into_iter().map(Into::into));
        self
    }

    /// Add a condition
    pub fn condition(
        mut self,
        operator: ConditionOperator,
        key: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.conditions.insert(operator, key, value);
        self
    }

    /// Finish the statement
    ///
    /// # Errors
    /// - `PolicyError::InvalidSid` for a malformed purpose id
    /// - `PolicyError::NoActions` if no action was added
    /// - `PolicyError::NoTarget` if neither resources nor a principal were set
    pub fn build(self) -> Result<PolicyStatement, PolicyError> {
        let sid = Sid::new(self.sid)?;
        if self.actions.is_empty() {
            return Err(PolicyError::NoActions { sid });
        }
        if self.resources.is_empty() && self.principal.is_none() {
            return Err(PolicyError::NoTarget { sid });
        }
        Ok(PolicyStatement {
            sid,
            effect: self.effect,
            principal: self.principal,
            actions: self.actions,
            resources: self.resources,
            conditions: self.conditions,
        })
    }
}
