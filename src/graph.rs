//! Evolution graph module.
//!
//! Provides the `EvolutionGraph` type, which represents evolution chains as
//! a directed graph: one node per weapon, one edge from each base weapon to
//! the weapon it evolves into. Used to sanity-check formula data and to
//! walk a weapon's lineage.

use crate::error::EvolutionError;
use crate::ident::Identity;
use crate::index::FormulaIndex;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};

/// A directed graph of base → evolved weapon edges.
///
/// # Examples
///
/// ```rust
/// use evoformula::graph::EvolutionGraph;
/// use evoformula::Identity;
///
/// let mut graph = EvolutionGraph::new();
/// graph.add_edge(Identity::new("WHIP"), Identity::new("BLOODY_TEAR"));
///
/// assert!(graph.detect_cycles().is_ok());
/// assert_eq!(graph.lineage("bloody_tear").len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvolutionGraph {
    graph: DiGraph<Identity, ()>,
    node_map: HashMap<Identity, NodeIndex>,
}

impl EvolutionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from every formula in `index`.
    ///
    /// Formulas whose result weapon is unknown contribute only their base
    /// weapon node.
    pub fn from_index(index: &FormulaIndex) -> Self {
        let mut graph = Self::new();
        for formula in index.formulas() {
            let base = formula.base_identity();
            match formula.evolved_identity() {
                Some(evolved) => graph.add_edge(base, evolved),
                None => {
                    graph.add_node(base);
                }
            }
        }
        tracing::debug!(
            weapons = graph.graph.node_count(),
            evolutions = graph.graph.edge_count(),
            "built evolution graph"
        );
        graph
    }

    /// Add a node if it doesn't exist, returning its index.
    pub fn add_node(&mut self, id: Identity) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(&id) {
            idx
        } else {
            let idx = self.graph.add_node(id.clone());
            self.node_map.insert(id, idx);
            idx
        }
    }

    /// Record that `base` evolves into `evolved`.
    pub fn add_edge(&mut self, base: Identity, evolved: Identity) {
        let base_idx = self.add_node(base);
        let evolved_idx = self.add_node(evolved);
        self.graph.add_edge(base_idx, evolved_idx, ());
    }

    /// Whether `id` is a node of the graph.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node_map.contains_key(&Identity::new(id))
    }

    /// Number of distinct weapons in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Detect weapons that eventually evolve back into themselves.
    ///
    /// # Errors
    ///
    /// `EvolutionError::Cycle` with the offending chain, first weapon
    /// repeated at the end.
    pub fn detect_cycles(&self) -> Result<(), EvolutionError> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();

        for node_idx in self.graph.node_indices() {
            if !visited.contains(&node_idx) {
                let mut path = Vec::new();
                if let Some(cycle) =
                    self.dfs_cycle_detect(node_idx, &mut visited, &mut on_stack, &mut path)
                {
                    tracing::warn!(%cycle, "evolution data contains a cycle");
                    return Err(cycle);
                }
            }
        }

        Ok(())
    }

    fn dfs_cycle_detect(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_stack: &mut HashSet<NodeIndex>,
        path: &mut Vec<Identity>,
    ) -> Option<EvolutionError> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(self.graph[node].clone());

        for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
            if !visited.contains(&next) {
                if let Some(cycle) = self.dfs_cycle_detect(next, visited, on_stack, path) {
                    return Some(cycle);
                }
            } else if on_stack.contains(&next) {
                let repeated = self.graph[next].clone();
                let start = path.iter().position(|id| id == &repeated).unwrap_or(0);
                let mut cycle: Vec<Identity> = path[start..].to_vec();
                cycle.push(repeated);
                return Some(EvolutionError::Cycle { path: cycle });
            }
        }

        on_stack.remove(&node);
        path.pop();
        None
    }

    /// The full evolution chain `id` belongs to, root base weapon first.
    ///
    /// Returns an empty vector for unknown weapons. Stops at the first
    /// repeated weapon, so corrupt cyclic data still terminates.
    pub fn lineage(&self, id: &str) -> Vec<Identity> {
        let Some(&start) = self.node_map.get(&Identity::new(id)) else {
            return Vec::new();
        };

        let mut seen = HashSet::from([start]);
        let mut root = start;
        while let Some(prev) = self
            .graph
            .neighbors_directed(root, Direction::Incoming)
            .next()
        {
            if !seen.insert(prev) {
                break;
            }
            root = prev;
        }

        let mut chain = vec![self.graph[root].clone()];
        let mut walked = HashSet::from([root]);
        let mut current = root;
        while let Some(next) = self
            .graph
            .neighbors_directed(current, Direction::Outgoing)
            .next()
        {
            if !walked.insert(next) {
                break;
            }
            chain.push(self.graph[next].clone());
            current = next;
        }
        chain
    }
}
