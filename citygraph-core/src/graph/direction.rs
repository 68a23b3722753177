//! Edge directedness and its textual flag parsing.

use std::str::FromStr;

use crate::error::GraphError;

/// Whether an inserted edge yields one record or a reciprocal pair.
///
/// # Examples
/// ```
/// use citygraph_core::Direction;
///
/// assert_eq!("false".parse::<Direction>()?, Direction::Undirected);
/// assert_eq!(Direction::from(true), Direction::Directed);
/// assert!("sideways".parse::<Direction>().is_err());
/// # Ok::<(), citygraph_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Direction {
    /// One record from source to target.
    #[default]
    Directed,
    /// Two records, one in each direction.
    Undirected,
}

impl Direction {
    /// Returns `true` for [`Direction::Directed`].
    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Self::Directed)
    }
}

impl From<bool> for Direction {
    fn from(directed: bool) -> Self {
        if directed {
            Self::Directed
        } else {
            Self::Undirected
        }
    }
}

impl FromStr for Direction {
    type Err = GraphError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "directed" => Ok(Self::Directed),
            "false" | "0" | "undirected" => Ok(Self::Undirected),
            _ => Err(GraphError::InvalidDirectionFlag {
                provided: raw.to_owned(),
            }),
        }
    }
}
