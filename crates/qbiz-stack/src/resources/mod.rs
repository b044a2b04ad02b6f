//! Resource declarations
//!
//! One struct per engine resource type, each implementing
//! [`qbiz_graph::Resource`]. [`StackResource`] is the closed set the stack
//! graph holds.

pub mod iam;
pub mod kms;
pub mod qbusiness;
pub mod secrets;

pub use iam::{ManagedPolicy, Role};
pub use kms::{EncryptionKey, RemovalPolicy};
pub use qbusiness::{Application, DataSource, Index, IndexType, Retriever, RetrieverType, WebExperience};
pub use secrets::{Secret, SecretFields, PLACEHOLDER_VALUE};

use qbiz_graph::{Attribute, LogicalId, Resource, Token};
use serde::Serialize;

/// Any resource the stack declares
///
/// Serializes as the wrapped resource's engine properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StackResource {
    /// `AWS::KMS::Key`
    EncryptionKey(EncryptionKey),
    /// `AWS::SecretsManager::Secret`
    Secret(Secret),
    /// `AWS::IAM::ManagedPolicy`
    ManagedPolicy(ManagedPolicy),
    /// `AWS::IAM::Role`
    Role(Role),
    /// `AWS::QBusiness::Application`
    Application(Application),
    /// `AWS::QBusiness::Index`
    Index(Index),
    /// `AWS::QBusiness::Retriever`
    Retriever(Retriever),
    /// `AWS::QBusiness::WebExperience`
    WebExperience(WebExperience),
    /// `AWS::QBusiness::DataSource`
    DataSource(DataSource),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            StackResource::EncryptionKey($inner) => $body,
            StackResource::Secret($inner) => $body,
            StackResource::ManagedPolicy($inner) => $body,
            StackResource::Role($inner) => $body,
            StackResource::Application($inner) => $body,
            StackResource::Index($inner) => $body,
            StackResource::Retriever($inner) => $body,
            StackResource::WebExperience($inner) => $body,
            StackResource::DataSource($inner) => $body,
        }
    };
}

impl Resource for StackResource {
    fn resource_type(&self) -> &'static str {
        dispatch!(self, r => r.resource_type())
    }

    fn emits(&self) -> &'static [Attribute] {
        dispatch!(self, r => r.emits())
    }

    fn tokens(&self) -> Vec<&Token> {
        dispatch!(self, r => r.tokens())
    }

    fn explicit_dependencies(&self) -> Vec<&LogicalId> {
        dispatch!(self, r => r.explicit_dependencies())
    }
}

macro_rules! variant_accessor {
    ($name:ident, $variant:ident, $ty:ty) => {
        #[doc = concat!("The wrapped [`", stringify!($ty), "`], if this is one")]
        #[must_use]
        pub fn $name(&self) -> Option<&$ty> {
            match self {
                Self::$variant(inner) => Some(inner),
                _ => None,
            }
        }
    };
}

impl StackResource {
    variant_accessor!(as_encryption_key, EncryptionKey, EncryptionKey);
    variant_accessor!(as_secret, Secret, Secret);
    variant_accessor!(as_managed_policy, ManagedPolicy, ManagedPolicy);
    variant_accessor!(as_role, Role, Role);
    variant_accessor!(as_application, Application, Application);
    variant_accessor!(as_index, Index, Index);
    variant_accessor!(as_retriever, Retriever, Retriever);
    variant_accessor!(as_web_experience, WebExperience, WebExperience);
    variant_accessor!(as_data_source, DataSource, DataSource);
}

macro_rules! impl_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for StackResource {
                fn from(resource: $variant) -> Self {
                    Self::$variant(resource)
                }
            }
        )*
    };
}

impl_from!(
    EncryptionKey,
    Secret,
    ManagedPolicy,
    Role,
    Application,
    Index,
    Retriever,
    WebExperience,
    DataSource,
);
