//! Radix tree keyed by strings
//!
//! This implements a compressed trie where:
//! - Edges are labeled by a single character and kept sorted
//! - Each node stores the run of characters unique to its subtree
//! - No node other than the root is ever a pass-through (one edge, no value)
//!
//! Sorted edges make in-order traversal lexicographic, which the prefix and
//! ordering queries rely on.

mod bulk;
mod node;
mod query;
mod tree;
mod walk;

pub use tree::RadixTree;
pub use walk::Iter;

#[cfg(test)]
pub(crate) use node::check::assert_invariants;
