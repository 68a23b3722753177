//! Forward adjacency derived from a graph's edge list.
//!
//! The index is rebuilt from scratch on every call so it always reflects the
//! edge list at build time. It borrows node values from the graph rather than
//! cloning them.

use std::collections::HashMap;

use crate::graph::{Graph, NodeLabel};

/// A reachable neighbour together with the cost of the record leading to it.
pub type Neighbour<'g, N> = (&'g N, Option<f64>);

/// Mapping from each node to the ordered targets of its outgoing records.
///
/// Every node in the graph has an entry, isolated nodes included. Targets
/// appear in edge-list order, which fixes the depth-first visitation order.
///
/// # Examples
/// ```
/// use citygraph_core::{AdjacencyIndex, Direction, Graph};
///
/// let mut graph = Graph::new();
/// graph.add_nodes(["a", "b", "c"]);
/// graph.add_edge("a", "b", Some(2.0), None, Direction::Directed)?;
/// graph.add_edge("a", "c", None, None, Direction::Directed)?;
///
/// let index = AdjacencyIndex::build(&graph);
/// assert_eq!(index.neighbours(&"a"), [(&"b", Some(2.0)), (&"c", None)]);
/// assert_eq!(index.degree(&"c"), 0);
/// # Ok::<(), citygraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct AdjacencyIndex<'g, N> {
    entries: HashMap<&'g N, Vec<Neighbour<'g, N>>>,
}

impl<'g, N: NodeLabel> AdjacencyIndex<'g, N> {
    /// Builds the index with a single pass over the edge list.
    #[must_use]
    pub fn build(graph: &'g Graph<N>) -> Self {
        let mut entries: HashMap<&'g N, Vec<Neighbour<'g, N>>> =
            HashMap::with_capacity(graph.node_count());
        for node in graph.nodes() {
            entries.entry(node).or_default();
        }
        for edge in graph.edges() {
            entries
                .entry(edge.source())
                .or_default()
                .push((edge.target(), edge.cost()));
        }
        Self { entries }
    }

    /// Returns the outgoing neighbours of `node` in edge order.
    ///
    /// Unknown nodes yield an empty slice.
    #[must_use]
    pub fn neighbours(&self, node: &N) -> &[Neighbour<'g, N>] {
        self.entries
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of outgoing records of `node`.
    #[must_use]
    pub fn degree(&self, node: &N) -> usize {
        self.neighbours(node).len()
    }

    /// Returns `true` when `node` has an entry in the index.
    #[must_use]
    pub fn contains(&self, node: &N) -> bool {
        self.entries.contains_key(node)
    }

    /// Returns the number of distinct nodes with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the index holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(node, neighbours)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&'g N, &[Neighbour<'g, N>])> + '_ {
        self.entries
            .iter()
            .map(|(node, neighbours)| (*node, neighbours.as_slice()))
    }
}
