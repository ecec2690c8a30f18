//! # radixmap
//!
//! A string-keyed map stored as a radix tree (compressed trie).
//!
//! Keys are compared one character at a time, so common prefixes are stored
//! once and prefix questions are cheap: longest-prefix match, enumeration of
//! every key under a prefix, and ordered first/last retrieval.
//!
//! ## Core Concepts
//!
//! - **Edges**: labeled by a single character, kept sorted per node
//! - **Nodes**: hold the character run unique to their subtree
//! - **Leaves**: the stored key-value pairs, attached where a key ends
//!
//! ## Example
//!
//! ```
//! use radixmap::RadixTree;
//!
//! let mut tree = RadixTree::new();
//! tree.insert("/api", "api");
//! tree.insert("/api/v2", "v2");
//!
//! assert_eq!(tree.get("/api"), Some(&"api"));
//! assert_eq!(tree.longest_match("/api/v2/users"), Some(("/api/v2", &"v2")));
//! assert_eq!(tree.collect_keys("/api"), vec!["/api", "/api/v2"]);
//! ```

pub mod logging;
pub mod mapping;
pub mod route;
pub mod trie;

mod error;

pub use error::{Error, Result};
pub use route::{Prefix, RouteTable};
pub use trie::{Iter, RadixTree};

#[cfg(test)]
mod proptests;
