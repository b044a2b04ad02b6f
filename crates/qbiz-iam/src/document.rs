//! Policy documents: ordered statement bundles with unique purpose ids

use crate::error::PolicyError;
use crate::statement::{PolicyStatement, Sid};
use qbiz_graph::Token;
use serde::Serialize;

/// Policy language version
pub const POLICY_VERSION: &str = "2012-10-17";

/// Ordered list of statements
///
/// No two statements share a [`Sid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    version: &'static str,
    #[serde(rename = "Statement")]
    statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Empty document
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: POLICY_VERSION,
            statements: Vec::new(),
        }
    }

    /// Document from statements, in order
    ///
    /// # Errors
    /// `PolicyError::DuplicateSid` if two statements share a purpose id.
    pub fn from_statements<I>(statements: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = PolicyStatement>,
    {
        let mut document = Self::new();
        for statement in statements {
            document.push(statement)?;
        }
        Ok(document)
    }

    /// Append a statement
    ///
    /// # Errors
    /// `PolicyError::DuplicateSid` if the purpose id is already present.
    pub fn push(&mut self, statement: PolicyStatement) -> Result<(), PolicyError> {
        if self.find(statement.sid()).is_some() {
            return Err(PolicyError::DuplicateSid(statement.sid().clone()));
        }
        self.statements.push(statement);
        Ok(())
    }

    /// Statement with the given purpose id
    #[must_use]
    pub fn find(&self, sid: &Sid) -> Option<&PolicyStatement> {
        self.statements.iter().find(|s| s.sid() == sid)
    }

    /// Statement with the given purpose id string
    #[must_use]
    pub fn find_str(&self, sid: &str) -> Option<&PolicyStatement> {
        self.statements.iter().find(|s| s.sid().as_str() == sid)
    }

    /// Statements in order
    #[inline]
    #[must_use]
    pub fn statements(&self) -> &[PolicyStatement] {
        &self.statements
    }

    /// Purpose ids in order
    pub fn sids(&self) -> impl Iterator<Item = &Sid> + '_ {
        self.statements.iter().map(PolicyStatement::sid)
    }

    /// Number of statements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether there are no statements
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Reject empty documents
    ///
    /// # Errors
    /// `PolicyError::EmptyDocument`.
    pub fn ensure_non_empty(&self) -> Result<(), PolicyError> {
        if self.is_empty() {
            return Err(PolicyError::EmptyDocument);
        }
        Ok(())
    }

    /// Tokens referenced by all statements
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        self.statements
            .iter()
            .flat_map(PolicyStatement::tokens)
            .collect()
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}
