//! Property-based tests for dropout runs and paired edge removal.
//!
//! Seed graphs are complete graphs over a sampled node count, optionally
//! with a sprinkling of extra directed records so parallel and one-way edges
//! are exercised too. Every run accepts partial results so the properties
//! also hold for graphs whose target cannot be met.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::{
    DropoutConfig, DropoutEngine, DropoutObserver, DropoutOutcome, DropoutProgress, StallPolicy,
};
use crate::{
    connectivity::is_connected,
    graph::{Direction, Graph},
    test_utils::suite_proptest_config,
};

const MIN_NODES: u16 = 2;
const MAX_NODES: u16 = 12;

#[derive(Clone, Debug)]
struct SeedGraph {
    graph: Graph<u16>,
    dropout_share: f64,
    seed: u64,
}

fn seed_graph_strategy() -> impl Strategy<Value = SeedGraph> {
    (MIN_NODES..=MAX_NODES, 0_usize..6, 0.0_f64..=1.0, any::<u64>()).prop_map(
        |(nodes, extra, dropout_share, seed)| {
            let mut graph = Graph::complete(0..nodes, Direction::Undirected);
            let mut rng = SmallRng::seed_from_u64(seed);
            for _ in 0..extra {
                let source = rng.gen_range(0..nodes);
                let target = rng.gen_range(0..nodes);
                if source != target {
                    graph.push_edge(source, target, Some(1.0), None, Direction::Directed);
                }
            }
            SeedGraph {
                graph,
                dropout_share,
                seed,
            }
        },
    )
}

#[derive(Default)]
struct ConnectivityAudit {
    commits: usize,
    failures: usize,
}

impl DropoutObserver<u16> for ConnectivityAudit {
    fn on_commit(&mut self, progress: &DropoutProgress<'_, u16>) {
        self.commits += 1;
        if is_connected(progress.graph) != Ok(true) {
            self.failures += 1;
        }
    }
}

fn run_seed(
    fixture: &SeedGraph,
) -> Result<(DropoutOutcome<u16>, ConnectivityAudit), TestCaseError> {
    let maximum = fixture
        .graph
        .maximum_dropout()
        .ok_or_else(|| TestCaseError::fail("complete seed graphs always have edges"))?;
    let config = DropoutConfig::new(maximum.max(0.0) * fixture.dropout_share)
        .map_err(|err| TestCaseError::fail(format!("invalid dropout: {err}")))?
        .with_max_consecutive_rejections(32)
        .with_stall_policy(StallPolicy::AcceptPartial);
    let mut audit = ConnectivityAudit::default();
    let mut rng = SmallRng::seed_from_u64(fixture.seed);
    let outcome = DropoutEngine::new(config)
        .run_with_rng(fixture.graph.clone(), &mut rng, &mut audit)
        .map_err(|err| TestCaseError::fail(format!("run failed: {err}")))?;
    Ok((outcome, audit))
}

proptest! {
    #![proptest_config(suite_proptest_config(64))]

    #[test]
    fn every_committed_state_is_connected(fixture in seed_graph_strategy()) {
        let (outcome, audit) = run_seed(&fixture)?;
        prop_assert_eq!(audit.failures, 0);
        prop_assert_eq!(is_connected(outcome.graph()), Ok(true));
        if outcome.is_complete() {
            prop_assert!(outcome.removed() >= outcome.target_removals());
        }
    }

    #[test]
    fn thinned_edges_are_an_ordered_subsequence(fixture in seed_graph_strategy()) {
        let (outcome, _) = run_seed(&fixture)?;
        let original = fixture.graph.edges();
        let thinned = outcome.graph().edges();
        prop_assert_eq!(outcome.removed(), original.len() - thinned.len());
        let mut remaining = original.iter();
        for edge in thinned {
            prop_assert!(remaining.any(|candidate| candidate == edge));
        }
        prop_assert_eq!(outcome.graph().nodes(), fixture.graph.nodes());
    }

    #[test]
    fn identical_seeds_give_identical_graphs(fixture in seed_graph_strategy()) {
        let (first, _) = run_seed(&fixture)?;
        let (second, _) = run_seed(&fixture)?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn remove_edge_pair_removes_exactly_the_matching_records(
        fixture in seed_graph_strategy(),
        left in 0..MAX_NODES,
        right in 0..MAX_NODES,
    ) {
        let mut graph = fixture.graph.clone();
        let expected: Vec<_> = graph
            .edges()
            .iter()
            .filter(|edge| !edge.joins(&left, &right))
            .cloned()
            .collect();
        let removed = graph.remove_edge_pair(&left, &right);
        prop_assert_eq!(removed, fixture.graph.edge_count() - expected.len());
        prop_assert_eq!(graph.edges(), expected.as_slice());
    }
}
