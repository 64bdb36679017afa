//! Dependency graph of registered resources using `petgraph`.
//!
//! Edges point from a dependency to its dependent so a topological sort
//! yields dependencies first.

use std::collections::HashMap;

use cumulus_sdk::Urn;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::engine::Registration;
use crate::error::ProvisionerError;

#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<Urn, ()>,
    nodes: HashMap<Urn, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a registration log. Every dependency must itself have
    /// been registered.
    pub fn from_registrations(registrations: &[Registration]) -> Result<Self, ProvisionerError> {
        let mut graph = Self::new();
        for registration in registrations {
            graph.add_resource(registration.urn.clone());
        }
        for registration in registrations {
            for dependency in &registration.dependencies {
                graph.add_dependency(&registration.urn, dependency)?;
            }
        }
        Ok(graph)
    }

    /// Adding the same URN twice returns the existing node.
    pub fn add_resource(&mut self, urn: Urn) -> NodeIndex {
        if let Some(idx) = self.nodes.get(&urn) {
            return *idx;
        }
        let idx = self.graph.add_node(urn.clone());
        self.nodes.insert(urn, idx);
        idx
    }

    /// `dependent` depends on `dependency`.
    pub fn add_dependency(&mut self, dependent: &Urn, dependency: &Urn) -> Result<(), ProvisionerError> {
        let unknown = |urn: &Urn| ProvisionerError::UnknownDependency {
            urn: dependent.to_string(),
            dependency: urn.to_string(),
        };
        let from = *self.nodes.get(dependency).ok_or_else(|| unknown(dependency))?;
        let to = *self.nodes.get(dependent).ok_or_else(|| unknown(dependent))?;
        self.graph.update_edge(from, to, ());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Dependencies before dependents.
    pub fn resolve_order(&self) -> Result<Vec<Urn>, ProvisionerError> {
        let indices = petgraph::algo::toposort(&self.graph, None).map_err(|_| ProvisionerError::Cycle)?;
        Ok(indices
            .into_iter()
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect())
    }

    /// Dependents before dependencies, the order a teardown must follow.
    pub fn destroy_order(&self) -> Result<Vec<Urn>, ProvisionerError> {
        let mut order = self.resolve_order()?;
        order.reverse();
        Ok(order)
    }

    /// Resources that directly depend on `urn`.
    pub fn dependents_of(&self, urn: &Urn) -> Vec<Urn> {
        self.neighbors(urn, Direction::Outgoing)
    }

    /// Resources `urn` directly depends on.
    pub fn dependencies_of(&self, urn: &Urn) -> Vec<Urn> {
        self.neighbors(urn, Direction::Incoming)
    }

    fn neighbors(&self, urn: &Urn, direction: Direction) -> Vec<Urn> {
        let Some(idx) = self.nodes.get(urn) else {
            return Vec::new();
        };
        let mut out: Vec<Urn> = self
            .graph
            .neighbors_directed(*idx, direction)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect();
        out.sort();
        out
    }
}
