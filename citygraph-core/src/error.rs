//! Error types for the citygraph core library.
//!
//! Defines the error enum exposed by the public API, its stable error codes and
//! a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced by graph construction, queries and dropout runs.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
    /// A query or edge referenced a node that is not part of the graph.
    #[error("node `{node}` does not exist in the graph")]
    InvalidNode {
        /// Debug rendering of the missing node value.
        node: String,
    },
    /// A textual direction flag could not be interpreted as a boolean.
    #[error("direction flag `{provided}` must be a boolean or `directed`/`undirected`")]
    InvalidDirectionFlag {
        /// Raw flag supplied by the caller.
        provided: String,
    },
    /// The requested dropout fraction is negative, non-finite, above the
    /// graph's maximum dropout, or the graph has no edges to drop.
    #[error("dropout {requested} is invalid: {reason}")]
    InvalidDropout {
        /// Fraction requested by the caller.
        requested: f64,
        /// Human-readable explanation of the rejection.
        reason: String,
    },
    /// A connectivity check was invoked on a graph with no nodes.
    #[error("connectivity is undefined for a graph with no nodes")]
    EmptyGraph,
    /// Every remaining candidate removal disconnects the graph.
    #[error(
        "no feasible reduction: committed {committed_removals} of {target_removals} edge removals"
    )]
    NoFeasibleReduction {
        /// Number of edge records removed before the run stalled.
        committed_removals: usize,
        /// Number of edge records the run was asked to remove.
        target_removals: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// A query or edge referenced a node that is not part of the graph.
        InvalidNode => InvalidNode { .. } => "GRAPH_INVALID_NODE",
        /// A textual direction flag could not be interpreted as a boolean.
        InvalidDirectionFlag => InvalidDirectionFlag { .. } => "GRAPH_INVALID_DIRECTION_FLAG",
        /// The requested dropout fraction cannot be honoured.
        InvalidDropout => InvalidDropout { .. } => "GRAPH_INVALID_DROPOUT",
        /// A connectivity check was invoked on a graph with no nodes.
        EmptyGraph => EmptyGraph => "GRAPH_EMPTY",
        /// Every remaining candidate removal disconnects the graph.
        NoFeasibleReduction => NoFeasibleReduction { .. } => "GRAPH_NO_FEASIBLE_REDUCTION",
    }
}

impl GraphError {
    pub(crate) fn invalid_node<N: fmt::Debug>(node: &N) -> Self {
        Self::InvalidNode {
            node: format!("{node:?}"),
        }
    }

    /// Returns the number of edge records committed before a run stalled.
    #[must_use]
    pub const fn committed_removals(&self) -> Option<usize> {
        match self {
            Self::NoFeasibleReduction {
                committed_removals, ..
            } => Some(*committed_removals),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
