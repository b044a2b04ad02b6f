//! Service trust documents
//!
//! A trust document says which service may assume a role. Every statement
//! built here carries two conditions: the caller's account
//! (`StringEquals aws:SourceAccount`) and the calling resource
//! (`ArnEquals` or `ArnLike` on `aws:SourceArn`). There is no way to build
//! an open trust grant through this module.

use crate::condition::ConditionOperator;
use crate::document::PolicyDocument;
use crate::error::{PolicyError, ScopeKind};
use crate::keys;
use crate::statement::{PolicyStatement, Principal};
use qbiz_graph::Token;

/// Restriction on the calling resource's ARN
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceArnCondition {
    /// One specific resource instance
    Equals(Token),
    /// Resources matching a wildcard pattern
    Like(Token),
}

impl SourceArnCondition {
    fn operator(&self) -> ConditionOperator {
        match self {
            Self::Equals(_) => ConditionOperator::ArnEquals,
            Self::Like(_) => ConditionOperator::ArnLike,
        }
    }

    fn value(&self) -> &Token {
        match self {
            Self::Equals(token) | Self::Like(token) => token,
        }
    }
}

/// Service principal restricted to one account and one source resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedServicePrincipal {
    service: String,
    account: Token,
    source_arn: SourceArnCondition,
}

impl ScopedServicePrincipal {
    /// Scope `service` to `account` and `source_arn`
    #[must_use]
    pub fn new(service: impl Into<String>, account: Token, source_arn: SourceArnCondition) -> Self {
        Self {
            service: service.into(),
            account,
            source_arn,
        }
    }

    /// Service name
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// A statement granting `action` to the principal under both conditions
    ///
    /// # Errors
    /// `PolicyError::InvalidSid` for a malformed purpose id.
    pub fn statement(&self, sid: &str, action: &str) -> Result<PolicyStatement, PolicyError> {
        PolicyStatement::builder(sid)
            .action(action)
            .principal(Principal::Service(self.service.clone()))
            .condition(
                ConditionOperator::StringEquals,
                keys::SOURCE_ACCOUNT,
                self.account.clone(),
            )
            .condition(
                self.source_arn.operator(),
                keys::SOURCE_ARN,
                self.source_arn.value().clone(),
            )
            .build()
    }

    /// Trust document with one statement per `(sid, action)` grant
    ///
    /// # Errors
    /// `PolicyError::EmptyDocument` if `grants` is empty,
    /// `PolicyError::DuplicateSid` / `PolicyError::InvalidSid` for bad ids.
    pub fn trust_document(&self, grants: &[(&str, &str)]) -> Result<PolicyDocument, PolicyError> {
        let document = PolicyDocument::from_statements(
            grants
                .iter()
                .map(|(sid, action)| self.statement(sid, action))
                .collect::<Result<Vec<_>, _>>()?,
        )?;
        document.ensure_non_empty()?;
        Ok(document)
    }

    /// Trust document granting only `sts:AssumeRole`
    ///
    /// # Errors
    /// `PolicyError::InvalidSid` for a malformed purpose id.
    pub fn assume_role_document(&self, sid: &str) -> Result<PolicyDocument, PolicyError> {
        self.trust_document(&[(sid, keys::STS_ASSUME_ROLE)])
    }
}

/// Check that a trust document grants nothing without full scoping
///
/// # Errors
/// - `PolicyError::EmptyDocument` if there are no statements
/// - `PolicyError::UnscopedTrust` naming the first statement lacking a
///   principal, an account condition, or a source ARN condition
pub fn validate_trust(document: &PolicyDocument) -> Result<(), PolicyError> {
    document.ensure_non_empty()?;

    for statement in document.statements() {
        let missing = if statement.principal().is_none() {
            Some(ScopeKind::Principal)
        } else if !statement.is_account_scoped() {
            Some(ScopeKind::Account)
        } else if !statement.is_resource_scoped() {
            Some(ScopeKind::Resource)
        } else {
            None
        };

        if let Some(missing) = missing {
            return Err(PolicyError::UnscopedTrust {
                sid: statement.sid().clone(),
                missing,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use qbiz_graph::{Attribute, LogicalId};
    use serde_json::json;

    fn application_arn() -> Token {
        Token::attr(LogicalId::new("Application").unwrap(), Attribute::ApplicationArn)
    }

    #[test]
    fn scoped_trust_validates() {
        let principal = ScopedServicePrincipal::new(
            keys::QBUSINESS_APPLICATION_SERVICE,
            Token::literal("111122223333"),
            SourceArnCondition::Equals(application_arn()),
        );
        let document = principal
            .trust_document(&[
                ("AssumeRole", keys::STS_ASSUME_ROLE),
                ("SetContext", keys::STS_SET_CONTEXT),
            ])
            .unwrap();

        assert_eq!(document.len(), 2);
        assert!(validate_trust(&document).is_ok());
        assert_eq!(document.tokens().len(), 4);

        assert_eq!(
            serde_json::to_value(&document.statements()[1]).unwrap(),
            json!({
                "Sid": "SetContext",
                "Effect": "Allow",
                "Principal": {"Service": "application.qbusiness.amazonaws.com"},
                "Action": ["sts:SetContext"],
                "Condition": {
                    "StringEquals": {"aws:SourceAccount": "111122223333"},
                    "ArnEquals": {"aws:SourceArn": {"Fn::GetAtt": ["Application", "ApplicationArn"]}}
                }
            })
        );
    }

    #[test]
    fn wildcard_source_is_resource_scoped() {
        let principal = ScopedServicePrincipal::new(
            keys::QBUSINESS_SERVICE,
            Token::literal("111122223333"),
            SourceArnCondition::Like(Token::literal(
                "arn:aws:qbusiness:us-east-1:111122223333:application/*",
            )),
        );
        let document = principal.assume_role_document("AssumeRole").unwrap();
        assert!(validate_trust(&document).is_ok());
        assert!(document.statements()[0]
            .conditions()
            .has(ConditionOperator::ArnLike, keys::SOURCE_ARN));
    }

    #[test]
    fn rejects_unscoped_trust() {
        let open = PolicyStatement::builder("Open")
            .action(keys::STS_ASSUME_ROLE)
            .principal(Principal::Service(keys::QBUSINESS_SERVICE.to_string()))
            .condition(ConditionOperator::StringEquals, keys::SOURCE_ACCOUNT, "1")
            .build()
            .unwrap();
        let document = PolicyDocument::from_statements([open]).unwrap();
        assert!(matches!(
            validate_trust(&document),
            Err(PolicyError::UnscopedTrust {
                missing: ScopeKind::Resource,
                ..
            })
        ));

        let identity = PolicyStatement::builder("Identity")
            .action("s3:GetObject")
            .resource("*")
            .build()
            .unwrap();
        let document = PolicyDocument::from_statements([identity]).unwrap();
        assert!(matches!(
            validate_trust(&document),
            Err(PolicyError::UnscopedTrust {
                missing: ScopeKind::Principal,
                ..
            })
        ));
    }

    #[test]
    fn empty_grants_rejected() {
        let principal = ScopedServicePrincipal::new(
            keys::QBUSINESS_SERVICE,
            Token::literal("1"),
            SourceArnCondition::Equals(application_arn()),
        );
        assert_eq!(principal.trust_document(&[]), Err(PolicyError::EmptyDocument));
    }
}
