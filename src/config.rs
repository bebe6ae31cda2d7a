//! Limits for searches whose cost can grow exponentially

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Caps applied to exhaustive searches
///
/// Enumerating every simple path of a graph, or expanding `*` wildcards against a trie, can take
/// exponential time. The `*_limited` variants of those searches stop with an error as soon as
/// either cap is crossed instead of running to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLimits {
    /// Maximum number of results a search may produce
    pub max_results: usize,
    /// Maximum depth a search may descend to (edges for graphs, characters for tries)
    pub max_depth: usize,
}

impl SearchLimits {
    /// Limits that never trigger
    pub const fn unbounded() -> Self {
        SearchLimits {
            max_results: usize::MAX,
            max_depth: usize::MAX,
        }
    }

    /// Replace the result cap
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Replace the depth cap
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_results: 10_000,
            max_depth: 1_024,
        }
    }
}

#[test]
// Builders replace one cap at a time
fn test_limits_0() {
    let limits = SearchLimits::default().with_max_results(3);
    assert_eq!(limits.max_results, 3);
    assert_eq!(limits.max_depth, 1_024);

    let limits = SearchLimits::unbounded().with_max_depth(2);
    assert_eq!(limits.max_results, usize::MAX);
    assert_eq!(limits.max_depth, 2);
}
