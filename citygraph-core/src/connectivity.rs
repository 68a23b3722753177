//! Depth-first connectivity checks over the forward adjacency index.
//!
//! Traversal follows edge records in their stored direction, so an undirected
//! connection is only walkable both ways while both of its records exist. The
//! walk uses an explicit stack but visits nodes in the same order as the
//! recursive formulation: neighbours are pushed in reverse so the first
//! neighbour is expanded first.
use std::collections::HashSet;

use crate::{
    adjacency::AdjacencyIndex,
    error::{GraphError, Result},
    graph::{Graph, NodeLabel},
};

/// Returns `true` when every distinct node is reachable from the first node in
/// the graph's node sequence.
///
/// # Errors
/// Returns [`GraphError::EmptyGraph`] when the graph has no nodes.
///
/// # Examples
/// ```
/// use citygraph_core::{Direction, Graph, is_connected};
///
/// let mut graph = Graph::complete(["a", "b", "c"], Direction::Undirected);
/// assert!(is_connected(&graph)?);
///
/// graph.remove_edge_pair(&"a", &"c");
/// graph.remove_edge_pair(&"b", &"c");
/// assert!(!is_connected(&graph)?);
/// # Ok::<(), citygraph_core::GraphError>(())
/// ```
pub fn is_connected<N: NodeLabel>(graph: &Graph<N>) -> Result<bool> {
    let start = graph.nodes().first().ok_or(GraphError::EmptyGraph)?;
    let index = AdjacencyIndex::build(graph);
    let visited = depth_first(&index, start);
    Ok(visited.len() == graph.distinct_node_count())
}

/// Returns the nodes reachable from `start` in depth-first visitation order.
///
/// Each distinct node appears once; `start` is always first.
///
/// # Errors
/// Returns [`GraphError::InvalidNode`] when `start` is not in the graph.
///
/// # Examples
/// ```
/// use citygraph_core::{Direction, Graph, reachable_from};
///
/// let mut graph = Graph::new();
/// graph.add_nodes([1, 2, 3, 4]);
/// graph.add_edge(1, 2, None, None, Direction::Directed)?;
/// graph.add_edge(2, 3, None, None, Direction::Directed)?;
/// graph.add_edge(1, 4, None, None, Direction::Directed)?;
///
/// assert_eq!(reachable_from(&graph, &1)?, [&1, &2, &3, &4]);
/// assert_eq!(reachable_from(&graph, &3)?, [&3]);
/// # Ok::<(), citygraph_core::GraphError>(())
/// ```
pub fn reachable_from<'g, N: NodeLabel>(graph: &'g Graph<N>, start: &N) -> Result<Vec<&'g N>> {
    let start = graph
        .nodes()
        .iter()
        .find(|node| *node == start)
        .ok_or_else(|| GraphError::invalid_node(start))?;
    let index = AdjacencyIndex::build(graph);
    Ok(depth_first(&index, start))
}

fn depth_first<'g, N: NodeLabel>(index: &AdjacencyIndex<'g, N>, start: &'g N) -> Vec<&'g N> {
    let mut context = DfsContext::new(index.len());
    context.stack.push(start);
    while let Some(node) = context.stack.pop() {
        if !context.visit(node) {
            continue;
        }
        for &(target, _) in index.neighbours(node).iter().rev() {
            if !context.visited.contains(target) {
                context.stack.push(target);
            }
        }
    }
    context.order
}

struct DfsContext<'g, N> {
    visited: HashSet<&'g N>,
    order: Vec<&'g N>,
    stack: Vec<&'g N>,
}

impl<'g, N: NodeLabel> DfsContext<'g, N> {
    fn new(capacity: usize) -> Self {
        Self {
            visited: HashSet::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            stack: Vec::new(),
        }
    }

    /// Marks `node` visited, returning `false` when it already was.
    fn visit(&mut self, node: &'g N) -> bool {
        if !self.visited.insert(node) {
            return false;
        }
        self.order.push(node);
        true
    }
}
