//! Core identifier types

use crate::error::GraphError;
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest logical id the provisioning engine accepts
pub const MAX_LOGICAL_ID_LEN: usize = 255;

/// Stable identity of a declaration within one graph
///
/// Non-empty, ASCII alphanumeric, at most [`MAX_LOGICAL_ID_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LogicalId(String);

impl LogicalId {
    /// Validate and wrap a logical id
    ///
    /// # Errors
    /// `GraphError::InvalidLogicalId` when the id is empty, too long or
    /// contains anything other than ASCII letters and digits.
    pub fn new(id: impl Into<String>) -> Result<Self, GraphError> {
        let id = id.into();
        let reason = if id.is_empty() {
            Some("empty".to_string())
        } else if id.len() > MAX_LOGICAL_ID_LEN {
            Some(format!("longer than {MAX_LOGICAL_ID_LEN} characters"))
        } else if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some("only ASCII letters and digits are allowed".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(GraphError::InvalidLogicalId { id, reason }),
            None => Ok(Self(id)),
        }
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LogicalId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LogicalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier a declaration emits once it is realized
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// Primary reference (`Ref`); an ARN or physical id depending on type
    Ref,
    /// ARN of the realized resource
    Arn,
    /// Application id
    ApplicationId,
    /// Application ARN
    ApplicationArn,
    /// Index id
    IndexId,
    /// Index ARN
    IndexArn,
    /// Retriever id
    RetrieverId,
    /// Web experience id
    WebExperienceId,
    /// Data source id
    DataSourceId,
}

impl Attribute {
    /// Engine attribute name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ref => "Ref",
            Self::Arn => "Arn",
            Self::ApplicationId => "ApplicationId",
            Self::ApplicationArn => "ApplicationArn",
            Self::IndexId => "IndexId",
            Self::IndexArn => "IndexArn",
            Self::RetrieverId => "RetrieverId",
            Self::WebExperienceId => "WebExperienceId",
            Self::DataSourceId => "DataSourceId",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment-context values the engine supplies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pseudo {
    /// Account the stack deploys into (`AWS::AccountId`)
    AccountId,
    /// Region the stack deploys into (`AWS::Region`)
    Region,
}

impl Pseudo {
    /// Engine pseudo parameter name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccountId => "AWS::AccountId",
            Self::Region => "AWS::Region",
        }
    }
}

/// Caller account and region, injected into the builder
///
/// Either explicit literals or deferred pseudo parameters. Never read from
/// the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    account: Token,
    region: Token,
}

impl Environment {
    /// ARN partition used for every constructed ARN
    pub const PARTITION: &'static str = "aws";

    /// Explicit account and region
    #[must_use]
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: Token::literal(account),
            region: Token::literal(region),
        }
    }

    /// Account and region left for the engine to resolve at deploy time
    #[must_use]
    pub fn deploy_time() -> Self {
        Self {
            account: Token::Pseudo(Pseudo::AccountId),
            region: Token::Pseudo(Pseudo::Region),
        }
    }

    /// Account token
    #[inline]
    #[must_use]
    pub fn account(&self) -> &Token {
        &self.account
    }

    /// Region token
    #[inline]
    #[must_use]
    pub fn region(&self) -> &Token {
        &self.region
    }

    /// `arn:aws:{service}:{region}:{account}:{resource}`
    #[must_use]
    pub fn arn(&self, service: &str, resource: &str) -> Token {
        Token::join([
            Token::literal(format!("arn:{}:{service}:", Self::PARTITION)),
            self.region.clone(),
            Token::literal(":"),
            self.account.clone(),
            Token::literal(format!(":{resource}")),
        ])
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::deploy_time()
    }
}
