//! ## Introduction
//!
//! This crate implements a small family of classic collections: binary search trees, ordered
//! maps, prefix tries and adjacency-list graphs. The trees are deliberately *not* self-balancing.
//! Their shape follows insertion order, and they report their own height and balance so callers
//! can see when an adversarial order has degraded them towards a list.
//!
//! ## Benefits
//!
//! - Keys do not need to be hashable. `Bst` and `TreeMap` sort by `Ord`, or by any strict
//!   less-than function supplied with `new_by`.
//! - Keys and values are stored in a single array and moved only when inserted or when the array
//!   grows. The shape of the tree is kept apart from the data, and freed slots are recycled.
//! - Every tree algorithm is iterative, so a tree that has degenerated into a long chain cannot
//!   overflow the stack.
//! - Exponential searches (`Graph::all_paths`, `Trie::words_with_pattern`) have `*_limited`
//!   variants that stop at a configurable `SearchLimits`.
//! - The crate is `#![no_std]` and only needs `alloc`.
//!
//! ## Contents
//!
//! <center>
//!
//! | Type          | Stores         | Sorts By        | Iterator    |
//! |:--------------|:---------------|:----------------|-------------|
//! | `Bst`         | Key            | Ord or function | `Traversal` |
//! | `TreeMap`     | Key/Value      | Ord or function | `Traversal` |
//! | `Trie`        | Word/Value     | Character       | -           |
//! | `Graph`       | Node/Neighbour | Ord             | -           |
//!
//! </center>
//!
//! The crate exposes an additional type `util::Tree` that provides the foundation of `Bst` and
//! `TreeMap`. It manages the shape of a binary search tree over a set of `usize` indices into an
//! external vector of data, without storing the vector itself.
//!
//! ## Logging
//!
//! Structural events are emitted through `tracing` at `trace` and `debug` level, and aborted
//! searches at `warn` level. The crate never installs a subscriber.

#![no_std]
#![warn(missing_docs)]

mod bst;
mod config;
mod error;
mod graph;
mod treemap;
mod trie;
pub mod util;

pub use bst::{Bst, Less};
pub use config::SearchLimits;
pub use error::{Error, Result};
pub use graph::Graph;
pub use treemap::TreeMap;
pub use trie::{edit_distance, Trie};
pub use util::{InOrder, LevelOrder, PostOrder, PreOrder, Traversal};
