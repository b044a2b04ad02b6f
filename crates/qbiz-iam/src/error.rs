//! Error types for policy assembly

use crate::statement::Sid;
use std::fmt;

/// Which scoping condition a trust statement lacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Principal to trust
    Principal,
    /// `StringEquals` on a source/resource account key
    Account,
    /// `ArnEquals` or `ArnLike` on the source ARN
    Resource,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Principal => f.write_str("principal"),
            Self::Account => f.write_str("account condition"),
            Self::Resource => f.write_str("source ARN condition"),
        }
    }
}

/// Errors assembling statements and documents
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    /// Statement id breaks the naming rule
    #[error("invalid statement id '{sid}': {reason}")]
    InvalidSid {
        /// Offending id
        sid: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Two statements in one document share an id
    #[error("duplicate statement id: {0}")]
    DuplicateSid(Sid),

    /// Statement grants no action
    #[error("statement {sid} has no actions")]
    NoActions {
        /// Statement id
        sid: Sid,
    },

    /// Statement names neither a resource nor a principal
    #[error("statement {sid} has neither resources nor a principal")]
    NoTarget {
        /// Statement id
        sid: Sid,
    },

    /// Document has no statements
    #[error("policy document has no statements")]
    EmptyDocument,

    /// Trust statement lacks a required scoping condition
    #[error("trust statement {sid} is missing its {missing}")]
    UnscopedTrust {
        /// Statement id
        sid: Sid,
        /// Missing scope
        missing: ScopeKind,
    },
}
