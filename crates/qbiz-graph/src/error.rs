//! Error types for graph construction and validation

use crate::types::{Attribute, LogicalId};

/// Errors raised while declaring or validating a resource graph
///
/// With the exception of [`GraphError::InvalidLogicalId`], every variant
/// describes a wiring defect in the code that assembles the graph rather
/// than a condition a caller can recover from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Logical id does not satisfy the naming rule
    #[error("invalid logical id '{id}': {reason}")]
    InvalidLogicalId {
        /// Rejected id text
        id: String,
        /// Rule that was broken
        reason: String,
    },

    /// A declaration with this logical id already exists
    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(LogicalId),

    /// A token names a declaration that has not been declared yet
    #[error("{from} references {to}.{attribute} before {to} is declared")]
    UnresolvedReference {
        /// Referencing declaration
        from: LogicalId,
        /// Referenced declaration
        to: LogicalId,
        /// Referenced attribute
        attribute: Attribute,
    },

    /// The referenced declaration exists but never emits the attribute
    #[error("{from} references {to}.{attribute} but {to} does not emit it")]
    AttributeNotEmitted {
        /// Referencing declaration
        from: LogicalId,
        /// Referenced declaration
        to: LogicalId,
        /// Referenced attribute
        attribute: Attribute,
    },

    /// An explicit ordering dependency names an undeclared id
    #[error("{from} depends on undeclared {to}")]
    UnresolvedDependency {
        /// Dependent declaration
        from: LogicalId,
        /// Missing dependency
        to: LogicalId,
    },

    /// The dependency edges contain a cycle
    #[error("dependency cycle through {at}")]
    CycleDetected {
        /// A declaration on the cycle
        at: LogicalId,
    },

    /// A dependency is positioned after its dependent
    #[error("{from} is declared before its dependency {to}")]
    OrderViolation {
        /// Dependent declaration
        from: LogicalId,
        /// Dependency positioned after it
        to: LogicalId,
    },

    /// Declaration properties could not be canonicalized for fingerprinting
    #[error("fingerprint failed: {0}")]
    Fingerprint(String),
}

impl GraphError {
    /// Whether the error indicates a defect in the assembling code
    ///
    /// Such errors are not recoverable by supplying different inputs.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, Self::InvalidLogicalId { .. })
    }
}
