//! Configuration for dropout runs.

use crate::error::{GraphError, Result};

/// Consecutive rejected proposals tolerated before the engine scans for any
/// removable pair.
pub const DEFAULT_MAX_CONSECUTIVE_REJECTIONS: usize = 1_000;

/// Seed used when the caller does not provide one.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_CAFE;

/// How a run reacts when no remaining edge pair can be removed before the
/// target is reached.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StallPolicy {
    /// Fail with [`GraphError::NoFeasibleReduction`].
    #[default]
    Fail,
    /// Return the thinned graph reached so far, marked incomplete.
    AcceptPartial,
}

/// Parameters for a [`crate::DropoutEngine`] run.
///
/// # Examples
/// ```
/// use citygraph_core::{DropoutConfig, StallPolicy};
///
/// let config = DropoutConfig::new(0.25)?
///     .with_rng_seed(7)
///     .with_stall_policy(StallPolicy::AcceptPartial);
/// assert_eq!(config.dropout(), 0.25);
/// assert_eq!(config.rng_seed(), 7);
/// assert!(DropoutConfig::new(-0.1).is_err());
/// # Ok::<(), citygraph_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DropoutConfig {
    dropout: f64,
    max_consecutive_rejections: usize,
    stall_policy: StallPolicy,
    rng_seed: u64,
}

impl DropoutConfig {
    /// Creates a configuration removing `dropout` of the edge records.
    ///
    /// The upper bound depends on the graph and is checked when the run
    /// starts.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidDropout`] when `dropout` is negative or not
    /// finite.
    pub fn new(dropout: f64) -> Result<Self> {
        if !dropout.is_finite() {
            return Err(GraphError::InvalidDropout {
                requested: dropout,
                reason: "dropout must be a finite number".into(),
            });
        }
        if dropout < 0.0 {
            return Err(GraphError::InvalidDropout {
                requested: dropout,
                reason: "dropout can't be less than 0".into(),
            });
        }
        Ok(Self {
            dropout,
            max_consecutive_rejections: DEFAULT_MAX_CONSECUTIVE_REJECTIONS,
            stall_policy: StallPolicy::default(),
            rng_seed: DEFAULT_RNG_SEED,
        })
    }

    /// Overrides the rejection budget; values below one are raised to one.
    #[must_use]
    pub fn with_max_consecutive_rejections(mut self, budget: usize) -> Self {
        self.max_consecutive_rejections = budget.max(1);
        self
    }

    /// Chooses how a stalled run is reported.
    #[must_use]
    pub fn with_stall_policy(mut self, policy: StallPolicy) -> Self {
        self.stall_policy = policy;
        self
    }

    /// Seeds the RNG used by [`crate::DropoutEngine::run`].
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Returns the requested fraction of edge records to drop.
    #[must_use]
    pub fn dropout(&self) -> f64 {
        self.dropout
    }

    /// Returns the consecutive-rejection budget.
    #[must_use]
    pub fn max_consecutive_rejections(&self) -> usize {
        self.max_consecutive_rejections
    }

    /// Returns the stall policy.
    #[must_use]
    pub fn stall_policy(&self) -> StallPolicy {
        self.stall_policy
    }

    /// Returns the RNG seed.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}
