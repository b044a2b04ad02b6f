//! QBiz IAM - policy statement assembly
//!
//! Builds identity policies and service trust documents whose values may
//! reference identifiers emitted elsewhere in a resource graph.
//!
//! # Core Rules
//!
//! - Every statement names its purpose with a [`Sid`]; a [`PolicyDocument`]
//!   refuses a second statement with the same sid.
//! - Trust documents are produced by [`ScopedServicePrincipal`], which always
//!   attaches an account condition and a source-ARN condition.
//!   [`validate_trust`] re-checks any document against that rule.
//!
//! # Example
//!
//! ```rust,ignore
//! use qbiz_iam::prelude::*;
//!
//! let statement = PolicyStatement::builder("AllowsAmazonQToGetSecret")
//!     .action("secretsmanager:GetSecretValue")
//!     .resource(secret.attr(Attribute::Ref))
//!     .build()?;
//! let document = PolicyDocument::from_statements([statement])?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod condition;
pub mod document;
pub mod error;
pub mod keys;
pub mod statement;
pub mod trust;

pub use condition::{ConditionOperator, ConditionValue, Conditions};
pub use document::PolicyDocument;
pub use error::{PolicyError, ScopeKind};
pub use statement::{Effect, PolicyStatement, Principal, Sid, StatementBuilder};
pub use trust::{validate_trust, ScopedServicePrincipal, SourceArnCondition};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for assembling policies
    pub use crate::condition::{ConditionOperator, ConditionValue};
    pub use crate::document::PolicyDocument;
    pub use crate::error::PolicyError;
    pub use crate::statement::{Effect, PolicyStatement, Principal, Sid};
    pub use crate::trust::{validate_trust, ScopedServicePrincipal, SourceArnCondition};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
