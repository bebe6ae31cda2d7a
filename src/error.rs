//! Errors reported by the collections

use thiserror::Error;

/// Failures of graph set operations and capped searches
///
/// Lookups never fail: an absent key is reported as `None`. These variants cover the few
/// operations that can be asked to do something impossible or too expensive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A directed and an undirected graph were combined
    #[error("cannot combine a directed graph with an undirected graph")]
    DirectednessMismatch,

    /// A capped search found more results than it was allowed to return
    #[error("search produced more than {limit} results")]
    ResultLimit {
        /// The configured maximum number of results
        limit: usize,
    },

    /// A capped search descended deeper than it was allowed to
    #[error("search exceeded the depth limit of {limit}")]
    DepthLimit {
        /// The configured maximum depth
        limit: usize,
    },
}

/// Result alias for fallible collection operations
pub type Result<T> = core::result::Result<T, Error>;
