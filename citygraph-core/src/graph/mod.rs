//! Graph storage for the dropout pipeline.
//!
//! [`Graph`] keeps nodes and edge records in insertion order. No index is
//! maintained incrementally: adjacency is derived on demand through
//! [`AdjacencyIndex`] so every query reflects the current edge list.

mod direction;
mod edge;

use std::{collections::HashSet, fmt, hash::Hash};

use crate::{
    adjacency::AdjacencyIndex,
    error::{GraphError, Result},
};

pub use self::{direction::Direction, edge::Edge};

/// Values usable as graph nodes.
///
/// Nodes are opaque labels compared by value. The blanket implementation
/// covers every cloneable, hashable type with a `Debug` rendering, which is
/// used when reporting unknown nodes.
pub trait NodeLabel: Clone + Eq + Hash + fmt::Debug {}

impl<T> NodeLabel for T where T: Clone + Eq + Hash + fmt::Debug {}

/// Ordered node sequence plus ordered edge-record sequence.
///
/// Duplicate node values are permitted; connectivity and dropout reasoning is
/// defined over the set of distinct values.
///
/// # Examples
/// ```
/// use citygraph_core::{Direction, Graph};
///
/// let mut graph = Graph::new();
/// graph.add_nodes(["a", "b", "c"]);
/// graph.add_edge("a", "b", Some(1.5), None, Direction::Undirected)?;
/// graph.add_edge("b", "c", None, None, Direction::Directed)?;
///
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.degree(&"b")?, 2);
/// # Ok::<(), citygraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graph<N> {
    nodes: Vec<N>,
    edges: Vec<Edge<N>>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<N: NodeLabel> Graph<N> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the complete seed graph over `nodes`.
    ///
    /// Every node is added in iteration order. One edge (or reciprocal pair
    /// when `direction` is [`Direction::Undirected`]) is then added for each
    /// unordered pair of distinct node values, in first-occurrence order.
    /// Repeated values never produce self loops.
    ///
    /// # Examples
    /// ```
    /// use citygraph_core::{Direction, Graph};
    ///
    /// let graph = Graph::complete(["a", "b", "c", "d"], Direction::Undirected);
    /// assert_eq!(graph.node_count(), 4);
    /// assert_eq!(graph.edge_count(), 12);
    /// ```
    #[must_use]
    pub fn complete<I>(nodes: I, direction: Direction) -> Self
    where
        I: IntoIterator<Item = N>,
    {
        let mut graph = Self::new();
        graph.add_nodes(nodes);

        let distinct: Vec<N> = {
            let mut seen = HashSet::new();
            graph
                .nodes
                .iter()
                .filter(|node| seen.insert(*node))
                .cloned()
                .collect()
        };

        for (offset, source) in distinct.iter().enumerate() {
            for target in distinct.iter().skip(offset + 1) {
                graph.push_edge(source.clone(), target.clone(), None, None, direction);
            }
        }
        graph
    }

    /// Appends `node` to the node sequence without a uniqueness check.
    pub fn add_node(&mut self, node: N) {
        self.nodes.push(node);
    }

    /// Appends every node yielded by `nodes` in iteration order.
    pub fn add_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        self.nodes.extend(nodes);
    }

    /// Adds an edge between `source` and `target`.
    ///
    /// A directed edge appends one record; an undirected edge appends
    /// `(source, target)` followed by `(target, source)`, both carrying the
    /// same payload.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNode`] when either endpoint has not been
    /// added to the graph.
    pub fn add_edge(
        &mut self,
        source: N,
        target: N,
        cost: Option<f64>,
        heuristic: Option<f64>,
        direction: Direction,
    ) -> Result<()> {
        self.ensure_node(&source)?;
        self.ensure_node(&target)?;
        self.push_edge(source, target, cost, heuristic, direction);
        Ok(())
    }

    pub(crate) fn push_edge(
        &mut self,
        source: N,
        target: N,
        cost: Option<f64>,
        heuristic: Option<f64>,
        direction: Direction,
    ) {
        match direction {
            Direction::Directed => {
                self.edges.push(Edge::new(source, target, cost, heuristic));
            }
            Direction::Undirected => {
                self.edges.push(Edge::new(
                    source.clone(),
                    target.clone(),
                    cost,
                    heuristic,
                ));
                self.edges.push(Edge::new(target, source, cost, heuristic));
            }
        }
    }

    /// Returns the node sequence in insertion order, duplicates included.
    #[must_use]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns the edge records, payloads included, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    /// Returns `(source, target)` for every edge record in edge order.
    #[must_use]
    pub fn edge_pairs(&self) -> Vec<(&N, &N)> {
        self.edges
            .iter()
            .map(|edge| (edge.source(), edge.target()))
            .collect()
    }

    /// Returns the number of stored node entries, duplicates included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct node values.
    #[must_use]
    pub fn distinct_node_count(&self) -> usize {
        self.nodes.iter().collect::<HashSet<_>>().len()
    }

    /// Returns the number of edge records.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` when `node` has been added to the graph.
    #[must_use]
    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains(node)
    }

    /// Removes every record joining `left` and `right` in either direction.
    ///
    /// Returns the number of records deleted, which counts parallel
    /// duplicates as well as both halves of an undirected edge. Records not
    /// touching the unordered pair are left in place and keep their order.
    ///
    /// # Examples
    /// ```
    /// use citygraph_core::{Direction, Graph};
    ///
    /// let mut graph = Graph::complete([1, 2, 3], Direction::Undirected);
    /// assert_eq!(graph.remove_edge_pair(&2, &1), 2);
    /// assert_eq!(graph.edge_count(), 4);
    /// assert_eq!(graph.remove_edge_pair(&1, &2), 0);
    /// ```
    pub fn remove_edge_pair(&mut self, left: &N, right: &N) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| !edge.joins(left, right));
        before - self.edges.len()
    }

    /// Returns the forward degree of `node` under the current edge list.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidNode`] when `node` is not in the graph.
    pub fn degree(&self, node: &N) -> Result<usize> {
        self.ensure_node(node)?;
        Ok(self.adjacency().degree(node))
    }

    /// Derives the forward adjacency index for the current edge list.
    #[must_use]
    pub fn adjacency(&self) -> AdjacencyIndex<'_, N> {
        AdjacencyIndex::build(self)
    }

    /// Returns the largest fraction of edge records that can be dropped while
    /// a spanning tree (`distinct nodes - 1` edges) still fits.
    ///
    /// Returns `None` when the graph has no edges, as the ratio is undefined.
    ///
    /// # Examples
    /// ```
    /// use citygraph_core::{Direction, Graph};
    ///
    /// let graph = Graph::complete(["a", "b", "c"], Direction::Undirected);
    /// let maximum = graph.maximum_dropout().expect("graph has edges");
    /// assert!((maximum - 2.0 / 3.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn maximum_dropout(&self) -> Option<f64> {
        if self.edges.is_empty() {
            return None;
        }
        let tree_edges = self.distinct_node_count().saturating_sub(1);
        Some(1.0 - tree_edges as f64 / self.edges.len() as f64)
    }

    /// Returns an independent deep copy used to trial a mutation.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    fn ensure_node(&self, node: &N) -> Result<()> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(GraphError::invalid_node(node))
        }
    }
}

#[cfg(test)]
mod tests;
