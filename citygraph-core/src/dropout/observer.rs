//! Progress reporting hooks for dropout runs.

use crate::graph::Graph;

/// Snapshot of a run's progress, emitted after each committed removal.
#[derive(Debug)]
pub struct DropoutProgress<'a, N> {
    /// Endpoints of the removed pair, in the order they were proposed.
    pub removed_pair: (&'a N, &'a N),
    /// Records deleted by this commit.
    pub records_removed: usize,
    /// Records deleted since the run started.
    pub total_removed: usize,
    /// Records the run was asked to delete.
    pub target_removals: usize,
    /// The newly committed working graph.
    pub graph: &'a Graph<N>,
}

/// Observes committed removals. Implementations must not affect the run.
///
/// `()` is the no-op observer.
pub trait DropoutObserver<N> {
    /// Called once per committed removal.
    fn on_commit(&mut self, progress: &DropoutProgress<'_, N>);
}

impl<N> DropoutObserver<N> for () {
    fn on_commit(&mut self, _progress: &DropoutProgress<'_, N>) {}
}
