//! Unit tests for graph storage and its bookkeeping queries.

use rstest::{fixture, rstest};

use super::{Direction, Edge, Graph};
use crate::error::GraphError;

#[fixture]
fn triangle() -> Graph<&'static str> {
    Graph::complete(["A", "B", "C"], Direction::Undirected)
}

#[test]
fn undirected_edges_append_both_records_in_order() {
    let mut graph = Graph::new();
    graph.add_nodes(["u", "v"]);
    graph
        .add_edge("u", "v", Some(3.0), Some(1.0), Direction::Undirected)
        .expect("endpoints exist");
    assert_eq!(
        graph.edges(),
        [
            Edge::new("u", "v", Some(3.0), Some(1.0)),
            Edge::new("v", "u", Some(3.0), Some(1.0)),
        ]
    );
}

#[test]
fn directed_edges_append_one_record() {
    let mut graph = Graph::new();
    graph.add_nodes(["u", "v"]);
    graph
        .add_edge("u", "v", None, None, Direction::Directed)
        .expect("endpoints exist");
    assert_eq!(graph.edge_pairs(), [(&"u", &"v")]);
}

#[rstest]
#[case("ghost", "v")]
#[case("u", "ghost")]
fn add_edge_rejects_unknown_endpoints(#[case] source: &'static str, #[case] target: &'static str) {
    let mut graph = Graph::new();
    graph.add_nodes(["u", "v"]);
    let err = graph
        .add_edge(source, target, None, None, Direction::Directed)
        .expect_err("unknown endpoint must be rejected");
    assert_eq!(
        err,
        GraphError::InvalidNode {
            node: "\"ghost\"".to_owned()
        }
    );
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn duplicate_nodes_are_kept_but_counted_once() {
    let mut graph = Graph::new();
    graph.add_node(7);
    graph.add_nodes([7, 8, 7]);
    assert_eq!(graph.nodes(), [7, 7, 8, 7]);
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.distinct_node_count(), 2);
}

#[rstest]
fn edge_pairs_follow_edge_order(triangle: Graph<&'static str>) {
    let pairs: Vec<(&str, &str)> = triangle
        .edge_pairs()
        .into_iter()
        .map(|(source, target)| (*source, *target))
        .collect();
    assert_eq!(
        pairs,
        [
            ("A", "B"),
            ("B", "A"),
            ("A", "C"),
            ("C", "A"),
            ("B", "C"),
            ("C", "B"),
        ]
    );
}

#[rstest]
fn remove_edge_pair_removes_both_directions_only(mut triangle: Graph<&'static str>) {
    let removed = triangle.remove_edge_pair(&"C", &"A");
    assert_eq!(removed, 2);
    assert!(
        triangle
            .edges()
            .iter()
            .all(|edge| !edge.joins(&"A", &"C"))
    );
    assert_eq!(triangle.edge_count(), 4);
}

#[test]
fn remove_edge_pair_removes_parallel_duplicates() {
    let mut graph = Graph::new();
    graph.add_nodes([1, 2, 3]);
    for _ in 0..2 {
        graph
            .add_edge(1, 2, None, None, Direction::Undirected)
            .expect("nodes exist");
    }
    graph
        .add_edge(2, 3, None, None, Direction::Directed)
        .expect("nodes exist");
    assert_eq!(graph.remove_edge_pair(&1, &2), 4);
    assert_eq!(graph.edge_pairs(), [(&2, &3)]);
}

#[rstest]
fn remove_edge_pair_ignores_absent_pairs(mut triangle: Graph<&'static str>) {
    let before = triangle.clone();
    assert_eq!(triangle.remove_edge_pair(&"A", &"Z"), 0);
    assert_eq!(triangle, before);
}

#[rstest]
fn degree_tracks_current_edges(mut triangle: Graph<&'static str>) {
    assert_eq!(triangle.degree(&"A"), Ok(2));
    triangle.remove_edge_pair(&"A", &"B");
    assert_eq!(triangle.degree(&"A"), Ok(1));
    assert_eq!(triangle.degree(&"B"), Ok(1));
}

#[rstest]
fn degree_rejects_unknown_nodes(triangle: Graph<&'static str>) {
    assert!(matches!(
        triangle.degree(&"Z"),
        Err(GraphError::InvalidNode { .. })
    ));
}

#[rstest]
#[case::triangle(3, Direction::Undirected, 6)]
#[case::directed_triangle(3, Direction::Directed, 3)]
#[case::square(4, Direction::Undirected, 12)]
#[case::single(1, Direction::Undirected, 0)]
fn complete_graph_has_expected_records(
    #[case] nodes: usize,
    #[case] direction: Direction,
    #[case] expected: usize,
) {
    let graph = Graph::complete(0..nodes, direction);
    assert_eq!(graph.node_count(), nodes);
    assert_eq!(graph.edge_count(), expected);
}

#[test]
fn complete_graph_skips_duplicate_values() {
    let graph = Graph::complete(["x", "y", "x"], Direction::Undirected);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_pairs(), [(&"x", &"y"), (&"y", &"x")]);
}

#[rstest]
fn maximum_dropout_matches_spanning_tree_ratio(triangle: Graph<&'static str>) {
    let maximum = triangle.maximum_dropout().expect("triangle has edges");
    assert!((maximum - (1.0 - 2.0 / 6.0)).abs() < f64::EPSILON);
}

#[test]
fn maximum_dropout_is_undefined_without_edges() {
    let mut graph = Graph::new();
    graph.add_node("alone");
    assert_eq!(graph.maximum_dropout(), None);
}

#[rstest]
fn snapshot_is_independent(triangle: Graph<&'static str>) {
    let mut snapshot = triangle.snapshot();
    snapshot.remove_edge_pair(&"A", &"B");
    assert_eq!(triangle.edge_count(), 6);
    assert_eq!(snapshot.edge_count(), 4);
}
