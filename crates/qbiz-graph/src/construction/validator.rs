//! Structural validation
//!
//! Rebuilds the dependency edges as an explicit adjacency structure and
//! checks them independently of how the builder recorded them: the edge set
//! must be acyclic and every edge must point to an earlier declaration.

use crate::declaration::Declaration;
use crate::error::GraphError;
use crate::resource::Resource;
use crate::types::LogicalId;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Outcome of a successful structural check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    /// Declarations checked
    pub node_count: usize,
    /// Dependency edges checked
    pub edge_count: usize,
    /// Number of realization waves (longest dependency chain)
    pub wave_count: usize,
    /// Dependencies before dependents
    pub topological_order: Vec<LogicalId>,
}

/// Check a declaration sequence
///
/// # Errors
/// - `GraphError::UnresolvedDependency` if an edge names an unknown id
/// - `GraphError::CycleDetected` if the edges contain a cycle
/// - `GraphError::OrderViolation` if a dependency is positioned after its dependent
pub fn check_structure<R: Resource>(
    declarations: &[Declaration<R>],
) -> Result<StructureReport, GraphError> {
    // Edges run dependency -> dependent
    let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(declarations.len(), 0);
    let mut indices: HashMap<&LogicalId, NodeIndex> = HashMap::with_capacity(declarations.len());

    for (position, declaration) in declarations.iter().enumerate() {
        let index = graph.add_node(position);
        indices.insert(&declaration.id, index);
    }

    for declaration in declarations {
        let to = indices[&declaration.id];
        for dependency in &declaration.dependencies {
            let Some(&from) = indices.get(dependency) else {
                return Err(GraphError::UnresolvedDependency {
                    from: declaration.id.clone(),
                    to: dependency.clone(),
                });
            };
            graph.update_edge(from, to, ());
        }
    }

    let sorted = toposort(&graph, None).map_err(|cycle| GraphError::CycleDetected {
        at: declarations[graph[cycle.node_id()]].id.clone(),
    })?;

    for edge in graph.raw_edges() {
        let dependency = graph[edge.source()];
        let dependent = graph[edge.target()];
        if dependency >= dependent {
            return Err(GraphError::OrderViolation {
                from: declarations[dependent].id.clone(),
                to: declarations[dependency].id.clone(),
            });
        }
    }

    Ok(StructureReport {
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        wave_count: wave_numbers(declarations)
            .into_iter()
            .max()
            .map_or(0, |deepest| deepest + 1),
        topological_order: sorted
            .into_iter()
            .map(|index| declarations[graph[index]].id.clone())
            .collect(),
    })
}

/// Wave number per declaration position
///
/// A declaration without dependencies is in wave 0; otherwise one past the
/// deepest of its dependencies. Requires dependencies to precede dependents.
pub(crate) fn wave_numbers<R>(declarations: &[Declaration<R>]) -> Vec<usize> {
    let positions: HashMap<&LogicalId, usize> = declarations
        .iter()
        .enumerate()
        .map(|(position, declaration)| (&declaration.id, position))
        .collect();

    let mut waves: Vec<usize> = Vec::with_capacity(declarations.len());
    for declaration in declarations {
        let wave = declaration
            .dependencies
            .iter()
            .filter_map(|dependency| positions.get(dependency))
            .filter_map(|&position| waves.get(position))
            .map(|wave| wave + 1)
            .max()
            .unwrap_or(0);
        waves.push(wave);
    }
    waves
}
