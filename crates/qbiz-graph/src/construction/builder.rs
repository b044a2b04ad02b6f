//! Graph Builder
//!
//! The primary interface for the construction phase.
//! Declares resources in dependency order and validates the result,
//! producing a `ValidatedGraph`.

use crate::construction::validator::check_structure;
use crate::declaration::Declaration;
use crate::error::GraphError;
use crate::resource::Resource;
use crate::token::Token;
use crate::types::{Attribute, LogicalId};
use crate::validated_graph::{compute_fingerprint, ValidatedGraph};
use std::collections::HashMap;

/// Handle to a declaration, used to reference its emitted attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declared {
    id: LogicalId,
    emits: &'static [Attribute],
}

impl Declared {
    /// Logical id of the declaration
    #[inline]
    #[must_use]
    pub fn id(&self) -> &LogicalId {
        &self.id
    }

    /// Token for one of the declaration's emitted attributes
    ///
    /// Attributes the declaration does not emit are rejected when the
    /// token is embedded in a later declaration.
    #[must_use]
    pub fn attr(&self, attribute: Attribute) -> Token {
        Token::attr(self.id.clone(), attribute)
    }

    /// Whether the declaration emits `attribute`
    #[must_use]
    pub fn emits(&self, attribute: Attribute) -> bool {
        self.emits.contains(&attribute)
    }
}

/// Builder for validated resource graphs
///
/// Usage:
/// ```rust,ignore
/// let mut builder = GraphBuilder::new();
/// let key = builder.declare("Key", key)?;
/// builder.declare("Secret", secret_encrypted_with(key.attr(Attribute::Arn)))?;
/// let graph = builder.validate()?;
/// ```
#[derive(Debug)]
pub struct GraphBuilder<R> {
    declarations: Vec<Declaration<R>>,
    positions: HashMap<LogicalId, usize>,
}

impl<R: Resource> GraphBuilder<R> {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty builder sized for `capacity` declarations
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            declarations: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Number of declarations so far
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether nothing has been declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Whether `id` has been declared
    #[must_use]
    pub fn contains(&self, id: &LogicalId) -> bool {
        self.positions.contains_key(id)
    }

    /// Declare a resource
    ///
    /// Every token the resource embeds must reference an attribute emitted
    /// by a declaration that already exists.
    ///
    /// # Errors
    /// - `GraphError::InvalidLogicalId` if `id` breaks the naming rule
    /// - `GraphError::DuplicateLogicalId` if `id` is taken
    /// - `GraphError::UnresolvedReference` on a forward reference
    /// - `GraphError::AttributeNotEmitted` if the target lacks the attribute
    /// - `GraphError::UnresolvedDependency` for an undeclared explicit dependency
    pub fn declare(&mut self, id: &str, resource: R) -> Result<Declared, GraphError> {
        let id = LogicalId::new(id)?;
        if self.positions.contains_key(&id) {
            return Err(GraphError::DuplicateLogicalId(id));
        }

        let mut dependencies: Vec<LogicalId> = Vec::new();

        for token in resource.tokens() {
            for (target, attribute) in token.references() {
                let Some(&position) = self.positions.get(target) else {
                    return Err(GraphError::UnresolvedReference {
                        from: id,
                        to: target.clone(),
                        attribute,
                    });
                };
                if !self.declarations[position]
                    .resource
                    .emits()
                    .contains(&attribute)
                {
                    return Err(GraphError::AttributeNotEmitted {
                        from: id,
                        to: target.clone(),
                        attribute,
                    });
                }
                if !dependencies.contains(target) {
                    dependencies.push(target.clone());
                }
            }
        }

        for target in resource.explicit_dependencies() {
            if !self.positions.contains_key(target) {
                return Err(GraphError::UnresolvedDependency {
                    from: id,
                    to: target.clone(),
                });
            }
            if !dependencies.contains(target) {
                dependencies.push(target.clone());
            }
        }

        let emits = resource.emits();
        tracing::debug!(
            id = %id,
            resource_type = resource.resource_type(),
            dependencies = dependencies.len(),
            "declared resource"
        );

        self.positions.insert(id.clone(), self.declarations.len());
        self.declarations.push(Declaration {
            id: id.clone(),
            resource,
            dependencies,
        });

        Ok(Declared { id, emits })
    }

    /// Validate the graph and seal it
    ///
    /// Once validated, the graph cannot be modified.
    ///
    /// # Errors
    /// - `GraphError::CycleDetected` / `GraphError::OrderViolation` if the
    ///   edge set is inconsistent with declaration order
    /// - `GraphError::Fingerprint` if a resource fails to serialize
    pub fn validate(self) -> Result<ValidatedGraph<R>, GraphError> {
        let report = check_structure(&self.declarations)?;
        let fingerprint = compute_fingerprint(&self.declarations)?;

        tracing::info!(
            declarations = report.node_count,
            edges = report.edge_count,
            waves = report.wave_count,
            fingerprint = %fingerprint,
            "resource graph validated"
        );

        Ok(ValidatedGraph::construct(
            self.declarations,
            self.positions,
            report.topological_order,
            fingerprint,
        ))
    }
}

impl<R: Resource> Default for GraphBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
