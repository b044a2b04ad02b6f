//! Managed policies and service roles

use qbiz_graph::{Attribute, Resource, Token};
use qbiz_iam::PolicyDocument;
use serde::Serialize;

/// Standalone permission policy attached to one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagedPolicy {
    policy_document: PolicyDocument,
}

impl ManagedPolicy {
    /// Wrap a permission document
    #[must_use]
    pub fn new(policy_document: PolicyDocument) -> Self {
        Self { policy_document }
    }

    /// Permission document
    #[must_use]
    pub fn document(&self) -> &PolicyDocument {
        &self.policy_document
    }
}

impl Resource for ManagedPolicy {
    fn resource_type(&self) -> &'static str {
        "AWS::IAM::ManagedPolicy"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::Ref]
    }

    fn tokens(&self) -> Vec<&Token> {
        self.policy_document.tokens()
    }
}

/// Role assumable by one service principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Role {
    assume_role_policy_document: PolicyDocument,
    managed_policy_arns: Vec<Token>,
}

impl Role {
    /// Role with a trust document and the policies attached to it
    #[must_use]
    pub fn new(trust: PolicyDocument, managed_policy_arns: Vec<Token>) -> Self {
        Self {
            assume_role_policy_document: trust,
            managed_policy_arns,
        }
    }

    /// Trust document
    #[must_use]
    pub fn trust(&self) -> &PolicyDocument {
        &self.assume_role_policy_document
    }

    /// Attached policies
    #[must_use]
    pub fn managed_policy_arns(&self) -> &[Token] {
        &self.managed_policy_arns
    }
}

impl Resource for Role {
    fn resource_type(&self) -> &'static str {
        "AWS::IAM::Role"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::Ref, Attribute::Arn]
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut tokens = self.assume_role_policy_document.tokens();
        tokens.extend(&self.managed_policy_arns);
        tokens
    }
}
