//! Edge records stored by [`super::Graph`].

/// A single forward edge record with optional cost and heuristic payloads.
///
/// Undirected edges are stored as two independent records, one per
/// direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<N> {
    source: N,
    target: N,
    cost: Option<f64>,
    heuristic: Option<f64>,
}

impl<N> Edge<N> {
    /// Creates an edge record from `source` to `target`.
    #[must_use]
    pub const fn new(source: N, target: N, cost: Option<f64>, heuristic: Option<f64>) -> Self {
        Self {
            source,
            target,
            cost,
            heuristic,
        }
    }

    /// Returns the node the record leaves from.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> &N { &self.source }

    /// Returns the node the record points to.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> &N { &self.target }

    /// Returns the traversal cost, when one was supplied.
    #[must_use]
    #[rustfmt::skip]
    pub const fn cost(&self) -> Option<f64> { self.cost }

    /// Returns the heuristic estimate, when one was supplied.
    #[must_use]
    #[rustfmt::skip]
    pub const fn heuristic(&self) -> Option<f64> { self.heuristic }
}

impl<N: PartialEq> Edge<N> {
    /// Returns `true` when the record connects the unordered pair
    /// `{left, right}` in either direction.
    #[must_use]
    pub fn joins(&self, left: &N, right: &N) -> bool {
        (self.source == *left && self.target == *right)
            || (self.source == *right && self.target == *left)
    }
}
