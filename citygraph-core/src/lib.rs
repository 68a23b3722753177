//! Citygraph core library.
//!
//! Stores small road-network style graphs, answers depth-first connectivity
//! queries and thins graphs by randomly dropping edge pairs while keeping
//! every node reachable.

mod adjacency;
mod connectivity;
mod dropout;
mod error;
mod graph;

#[cfg(test)]
mod test_utils;

pub use crate::{
    adjacency::{AdjacencyIndex, Neighbour},
    connectivity::{is_connected, reachable_from},
    dropout::{
        DEFAULT_MAX_CONSECUTIVE_REJECTIONS, DEFAULT_RNG_SEED, DropoutConfig, DropoutEngine,
        DropoutObserver, DropoutOutcome, DropoutProgress, StallPolicy,
    },
    error::{GraphError, GraphErrorCode, Result},
    graph::{Direction, Edge, Graph, NodeLabel},
};
