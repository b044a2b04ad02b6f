//! Customer-managed encryption key

use qbiz_graph::{Attribute, Resource, Token};
use qbiz_iam::PolicyDocument;
use serde::{Deserialize, Serialize};

/// Teardown behavior for a resource when the stack is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalPolicy {
    /// Delete the resource with the stack
    #[default]
    #[serde(rename = "Delete", alias = "Destroy", alias = "destroy")]
    Destroy,
    /// Leave the resource behind
    #[serde(alias = "retain")]
    Retain,
}

impl RemovalPolicy {
    /// Engine deletion policy name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Destroy => "Delete",
            Self::Retain => "Retain",
        }
    }
}

/// Symmetric key protecting the connector secret
///
/// The alias and removal policy are not engine properties; template
/// synthesis renders them as a separate alias resource and as deletion
/// policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EncryptionKey {
    #[serde(skip)]
    alias: String,
    #[serde(skip)]
    removal_policy: RemovalPolicy,
    key_policy: PolicyDocument,
    pending_window_in_days: u8,
}

impl EncryptionKey {
    /// Key administered by `key_policy`
    #[must_use]
    pub fn new(
        alias: impl Into<String>,
        key_policy: PolicyDocument,
        pending_window_in_days: u8,
        removal_policy: RemovalPolicy,
    ) -> Self {
        Self {
            alias: alias.into(),
            removal_policy,
            key_policy,
            pending_window_in_days,
        }
    }

    /// Alias without the `alias/` prefix
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Full alias name, `alias/{alias}`
    #[must_use]
    pub fn alias_name(&self) -> String {
        format!("alias/{}", self.alias)
    }

    /// Teardown behavior
    #[must_use]
    pub fn removal_policy(&self) -> RemovalPolicy {
        self.removal_policy
    }

    /// Resource policy on the key
    #[must_use]
    pub fn key_policy(&self) -> &PolicyDocument {
        &self.key_policy
    }

    /// Days between deletion request and destruction
    #[must_use]
    pub fn pending_window_in_days(&self) -> u8 {
        self.pending_window_in_days
    }
}

impl Resource for EncryptionKey {
    fn resource_type(&self) -> &'static str {
        "AWS::KMS::Key"
    }

    fn emits(&self) -> &'static [Attribute] {
        &[Attribute::Ref, Attribute::Arn]
    }

    fn tokens(&self) -> Vec<&Token> {
        self.key_policy.tokens()
    }
}
