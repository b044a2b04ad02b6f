//! Validated Graph - Proof-Carrying Type
//!
//! `ValidatedGraph` can ONLY be constructed through the construction phase
//! (`GraphBuilder::validate()`), so every graph handed to a provisioning
//! engine has passed reference resolution and the order check. It has no
//! mutating methods.

use crate::construction::validator::wave_numbers;
use crate::declaration::Declaration;
use crate::error::GraphError;
use crate::resource::Resource;
use crate::types::LogicalId;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// An immutable, fully linked declaration graph
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGraph<R> {
    declarations: Vec<Declaration<R>>,
    positions: HashMap<LogicalId, usize>,
    topological_order: Vec<LogicalId>,
    fingerprint: String,
}

impl<R: Resource> ValidatedGraph<R> {
    /// Only called from `GraphBuilder::validate()` after all checks pass
    pub(crate) fn construct(
        declarations: Vec<Declaration<R>>,
        positions: HashMap<LogicalId, usize>,
        topological_order: Vec<LogicalId>,
        fingerprint: String,
    ) -> Self {
        Self {
            declarations,
            positions,
            topological_order,
            fingerprint,
        }
    }

    /// Number of declarations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether the graph is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of dependency edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.declarations
            .iter()
            .map(|declaration| declaration.dependencies.len())
            .sum()
    }

    /// Declarations in declaration order
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration<R>> + '_ {
        self.declarations.iter()
    }

    /// Logical ids in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &LogicalId> + '_ {
        self.declarations.iter().map(|declaration| &declaration.id)
    }

    /// Look up a declaration
    #[must_use]
    pub fn get(&self, id: &LogicalId) -> Option<&Declaration<R>> {
        self.positions
            .get(id)
            .map(|&position| &self.declarations[position])
    }

    /// Look up a declaration by id string
    #[must_use]
    pub fn get_str(&self, id: &str) -> Option<&Declaration<R>> {
        self.declarations
            .iter()
            .find(|declaration| declaration.id.as_str() == id)
    }

    /// Position of a declaration in declaration order
    #[must_use]
    pub fn position(&self, id: &LogicalId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Direct dependencies of a declaration
    #[must_use]
    pub fn dependencies(&self, id: &LogicalId) -> Option<&[LogicalId]> {
        self.get(id).map(Declaration::dependencies)
    }

    /// Declarations that depend directly on `id`, in declaration order
    #[must_use]
    pub fn dependents(&self, id: &LogicalId) -> Vec<&LogicalId> {
        self.declarations
            .iter()
            .filter(|declaration| declaration.depends_on(id))
            .map(|declaration| &declaration.id)
            .collect()
    }

    /// All edges as (dependency, dependent), in declaration order
    #[must_use]
    pub fn edges(&self) -> Vec<(&LogicalId, &LogicalId)> {
        self.declarations
            .iter()
            .flat_map(|declaration| {
                declaration
                    .dependencies
                    .iter()
                    .map(move |dependency| (dependency, &declaration.id))
            })
            .collect()
    }

    /// Dependencies-first order computed by topological sort
    #[must_use]
    pub fn topological_order(&self) -> &[LogicalId] {
        &self.topological_order
    }

    /// Groups of declarations that can be realized concurrently
    ///
    /// Every declaration's dependencies lie in strictly earlier waves.
    /// Within a wave, declaration order is preserved.
    #[must_use]
    pub fn realization_waves(&self) -> Vec<Vec<&LogicalId>> {
        let numbers = wave_numbers(&self.declarations);
        let mut waves: Vec<Vec<&LogicalId>> =
            vec![Vec::new(); numbers.iter().max().map_or(0, |deepest| deepest + 1)];
        for (declaration, wave) in self.declarations.iter().zip(numbers) {
            waves[wave].push(&declaration.id);
        }
        waves
    }

    /// Hex SHA-256 over the graph structure and properties
    ///
    /// Identical inputs give identical fingerprints.
    #[inline]
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Compute the structural fingerprint of a declaration sequence
///
/// Covers ids, resource types, canonical JSON properties and dependency
/// edges, in declaration order.
pub(crate) fn compute_fingerprint<R: Resource>(
    declarations: &[Declaration<R>],
) -> Result<String, GraphError> {
    let mut hasher = Sha256::new();

    for declaration in declarations {
        hasher.update(declaration.id.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(declaration.resource.resource_type().as_bytes());
        hasher.update([0u8]);

        let properties = serde_json::to_vec(&declaration.resource)
            .map_err(|e| GraphError::Fingerprint(format!("{}: {e}", declaration.id)))?;
        hasher.update(&properties);
        hasher.update([0u8]);

        for dependency in &declaration.dependencies {
            hasher.update(dependency.as_str().as_bytes());
            hasher.update([0u8]);
        }
        hasher.update([0xffu8]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::GraphBuilder;
    use crate::test_support::{id, Node};
    use crate::token::Token;
    use crate::types::Attribute;

    fn diamond() -> ValidatedGraph<Node> {
        let mut builder = GraphBuilder::new();
        let root = builder.declare("Root", Node::leaf()).unwrap();
        let left = builder
            .declare("Left", Node::using([root.attr(Attribute::Arn)]))
            .unwrap();
        let right = builder
            .declare("Right", Node::using([root.attr(Attribute::Ref)]))
            .unwrap();
        builder
            .declare(
                "Join",
                Node::using([left.attr(Attribute::Arn), right.attr(Attribute::Arn)]),
            )
            .unwrap();
        builder.validate().unwrap()
    }

    #[test]
    fn lookup_and_edges() {
        let graph = diamond();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.position(&id("Right")), Some(2));
        assert_eq!(graph.get_str("Join").unwrap().resource_type(), "Test::Node");
        assert_eq!(graph.dependents(&id("Root")), vec![&id("Left"), &id("Right")]);
        assert_eq!(graph.edges()[0], (&id("Root"), &id("Left")));
    }

    #[test]
    fn realization_waves() {
        let graph = diamond();
        let waves = graph.realization_waves();
        assert_eq!(waves.len(), 3);
        assert_eq!(waves[0], vec![&id("Root")]);
        assert_eq!(waves[1], vec![&id("Left"), &id("Right")]);
        assert_eq!(waves[2], vec![&id("Join")]);
    }

    #[test]
    fn topological_order_respects_edges() {
        let graph = diamond();
        let order = graph.topological_order();
        let at = |name: &str| order.iter().position(|i| i.as_str() == name).unwrap();
        assert!(at("Root") < at("Left"));
        assert!(at("Root") < at("Right"));
        assert!(at("Left") < at("Join"));
        assert!(at("Right") < at("Join"));
    }

    #[test]
    fn fingerprint_deterministic() {
        assert_eq!(diamond().fingerprint(), diamond().fingerprint());
        assert_eq!(diamond(), diamond());
        assert_eq!(diamond().fingerprint().len(), 64);
    }

    #[test]
    fn fingerprint_tracks_properties() {
        let mut builder = GraphBuilder::new();
        builder
            .declare("Root", Node::using([Token::literal("changed")]))
            .unwrap();
        let changed = builder.validate().unwrap();

        let mut builder = GraphBuilder::new();
        builder.declare("Root", Node::leaf()).unwrap();
        let original = builder.validate().unwrap();

        assert_ne!(changed.fingerprint(), original.fingerprint());
    }
}
