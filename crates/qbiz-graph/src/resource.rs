//! The contract a declaration type fulfils to live in a graph

use crate::token::Token;
use crate::types::{Attribute, LogicalId};
use serde::Serialize;

/// A declarable resource
///
/// Implementors expose every token embedded in their properties so the
/// builder can derive dependency edges without inspecting the properties
/// themselves. Serialization must be deterministic (no hash-ordered maps);
/// it feeds the graph fingerprint.
pub trait Resource: Serialize {
    /// Engine type name, e.g. `AWS::KMS::Key`
    fn resource_type(&self) -> &'static str;

    /// Attributes this resource emits once realized
    fn emits(&self) -> &'static [Attribute];

    /// Every token appearing in the properties
    fn tokens(&self) -> Vec<&Token>;

    /// Ordering dependencies that no token expresses
    fn explicit_dependencies(&self) -> Vec<&LogicalId> {
        Vec::new()
    }
}
