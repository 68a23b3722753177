//! Randomized, connectivity-preserving edge dropout.
//!
//! The engine repeatedly proposes a uniformly random edge record, removes the
//! record's unordered pair from a snapshot of the working graph and promotes
//! the snapshot only when it is still connected. Proposals continue until the
//! requested number of records has been removed.
//!
//! A run that keeps rejecting proposals scans every remaining pair once its
//! rejection budget is spent. When no pair can be removed without
//! disconnecting the graph the run stalls and is reported according to the
//! configured [`StallPolicy`].

mod config;
mod observer;

use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, info, instrument, warn};

use crate::{
    connectivity::is_connected,
    error::{GraphError, Result},
    graph::{Graph, NodeLabel},
};

pub use self::{
    config::{DEFAULT_MAX_CONSECUTIVE_REJECTIONS, DEFAULT_RNG_SEED, DropoutConfig, StallPolicy},
    observer::{DropoutObserver, DropoutProgress},
};

/// Thins graphs by dropping edge pairs while keeping them connected.
///
/// # Examples
/// ```
/// use citygraph_core::{Direction, DropoutConfig, DropoutEngine, Graph, is_connected};
///
/// let graph = Graph::complete(0..8_u32, Direction::Undirected);
/// let engine = DropoutEngine::new(DropoutConfig::new(0.5)?.with_rng_seed(42));
/// let outcome = engine.run(graph)?;
///
/// assert!(outcome.is_complete());
/// assert!(outcome.removed() >= outcome.target_removals());
/// assert!(is_connected(outcome.graph())?);
/// # Ok::<(), citygraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DropoutEngine {
    config: DropoutConfig,
}

impl DropoutEngine {
    /// Creates an engine for `config`.
    #[must_use]
    pub fn new(config: DropoutConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    #[must_use]
    pub fn config(&self) -> &DropoutConfig {
        &self.config
    }

    /// Thins `graph` using a [`SmallRng`] seeded from the configuration.
    ///
    /// # Errors
    /// See [`DropoutEngine::run_with_rng`].
    pub fn run<N: NodeLabel>(&self, graph: Graph<N>) -> Result<DropoutOutcome<N>> {
        let mut rng = SmallRng::seed_from_u64(self.config.rng_seed());
        self.run_with_rng(graph, &mut rng, &mut ())
    }

    /// Thins `graph` drawing proposals from `rng` and reporting each commit
    /// to `observer`.
    ///
    /// The graph is consumed and the thinned graph is returned in the
    /// outcome. Every committed state is connected; a graph that starts
    /// disconnected therefore never accepts a removal.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidDropout`] when the graph has no edges or
    /// the configured dropout exceeds [`Graph::maximum_dropout`],
    /// [`GraphError::EmptyGraph`] when the graph has no nodes, and
    /// [`GraphError::NoFeasibleReduction`] when the run stalls under
    /// [`StallPolicy::Fail`].
    #[instrument(
        name = "dropout.run",
        err,
        skip(self, graph, rng, observer),
        fields(
            nodes = graph.distinct_node_count(),
            edges = graph.edge_count(),
            dropout = self.config.dropout(),
        ),
    )]
    pub fn run_with_rng<N, R, O>(
        &self,
        graph: Graph<N>,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<DropoutOutcome<N>>
    where
        N: NodeLabel,
        R: Rng + ?Sized,
        O: DropoutObserver<N> + ?Sized,
    {
        let target_removals = self.target_removals(&graph)?;
        let initial_edges = graph.edge_count();
        let floor = initial_edges - target_removals;
        let budget = self.config.max_consecutive_rejections();

        let mut run = RunState::new(graph, target_removals);
        let mut rejections_in_row = 0_usize;

        while run.working.edge_count() > floor {
            if rejections_in_row >= budget {
                if !has_removable_pair(&run.working)? {
                    return self.stall(run);
                }
                debug!(
                    rejections = rejections_in_row,
                    "rejection budget spent but a removable pair exists; continuing"
                );
                rejections_in_row = 0;
            }

            let Some(candidate) = run.working.edges().choose(rng) else {
                break;
            };
            let source = candidate.source().clone();
            let target = candidate.target().clone();
            run.proposals += 1;

            let mut snapshot = run.working.snapshot();
            let records_removed = snapshot.remove_edge_pair(&source, &target);
            if is_connected(&snapshot)? {
                run.working = snapshot;
                run.removed += records_removed;
                rejections_in_row = 0;
                debug!(
                    source = ?source,
                    target = ?target,
                    records_removed,
                    total_removed = run.removed,
                    target_removals,
                    "committed edge removal"
                );
                observer.on_commit(&DropoutProgress {
                    removed_pair: (&source, &target),
                    records_removed,
                    total_removed: run.removed,
                    target_removals,
                    graph: &run.working,
                });
            } else {
                run.rejections += 1;
                rejections_in_row += 1;
                debug!(
                    source = ?source,
                    target = ?target,
                    "rejected removal that would disconnect the graph"
                );
            }
        }

        info!(
            removed = run.removed,
            target_removals,
            proposals = run.proposals,
            rejections = run.rejections,
            remaining_edges = run.working.edge_count(),
            "dropout completed"
        );
        Ok(run.finish(true))
    }

    fn target_removals<N: NodeLabel>(&self, graph: &Graph<N>) -> Result<usize> {
        let requested = self.config.dropout();
        let maximum = graph
            .maximum_dropout()
            .ok_or_else(|| GraphError::InvalidDropout {
                requested,
                reason: "the graph has no edges".into(),
            })?;
        if requested > maximum {
            return Err(GraphError::InvalidDropout {
                requested,
                reason: format!("dropout can't be more than maximum dropout {maximum}"),
            });
        }
        let edges = graph.edge_count();
        let target = (requested * edges as f64).floor() as usize;
        Ok(target.min(edges))
    }

    fn stall<N: NodeLabel>(&self, run: RunState<N>) -> Result<DropoutOutcome<N>> {
        warn!(
            committed_removals = run.removed,
            target_removals = run.target_removals,
            remaining_edges = run.working.edge_count(),
            policy = ?self.config.stall_policy(),
            "no edge pair can be removed without disconnecting the graph"
        );
        match self.config.stall_policy() {
            StallPolicy::Fail => Err(GraphError::NoFeasibleReduction {
                committed_removals: run.removed,
                target_removals: run.target_removals,
            }),
            StallPolicy::AcceptPartial => Ok(run.finish(false)),
        }
    }
}

/// Returns `true` when at least one distinct endpoint pair can be removed
/// while keeping the graph connected.
fn has_removable_pair<N: NodeLabel>(graph: &Graph<N>) -> Result<bool> {
    let mut tried: HashSet<(&N, &N)> = HashSet::new();
    for edge in graph.edges() {
        let (source, target) = (edge.source(), edge.target());
        if tried.contains(&(target, source)) || !tried.insert((source, target)) {
            continue;
        }
        let mut snapshot = graph.snapshot();
        snapshot.remove_edge_pair(source, target);
        if is_connected(&snapshot)? {
            return Ok(true);
        }
    }
    Ok(false)
}

struct RunState<N> {
    working: Graph<N>,
    target_removals: usize,
    removed: usize,
    proposals: usize,
    rejections: usize,
}

impl<N> RunState<N> {
    fn new(working: Graph<N>, target_removals: usize) -> Self {
        Self {
            working,
            target_removals,
            removed: 0,
            proposals: 0,
            rejections: 0,
        }
    }

    fn finish(self, complete: bool) -> DropoutOutcome<N> {
        DropoutOutcome {
            graph: self.working,
            target_removals: self.target_removals,
            removed: self.removed,
            proposals: self.proposals,
            rejections: self.rejections,
            complete,
        }
    }
}

/// Result of a dropout run: the thinned graph plus run statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct DropoutOutcome<N> {
    graph: Graph<N>,
    target_removals: usize,
    removed: usize,
    proposals: usize,
    rejections: usize,
    complete: bool,
}

impl<N> DropoutOutcome<N> {
    /// Returns the thinned graph.
    #[must_use]
    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }

    /// Consumes the outcome, returning the thinned graph.
    #[must_use]
    pub fn into_graph(self) -> Graph<N> {
        self.graph
    }

    /// Returns the number of edge records the run was asked to remove.
    #[must_use]
    pub fn target_removals(&self) -> usize {
        self.target_removals
    }

    /// Returns the number of edge records actually removed.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Returns the number of proposals drawn.
    #[must_use]
    pub fn proposals(&self) -> usize {
        self.proposals
    }

    /// Returns the number of proposals rejected to keep the graph connected.
    #[must_use]
    pub fn rejections(&self) -> usize {
        self.rejections
    }

    /// Returns `false` when a stalled run was accepted partway.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod property;
