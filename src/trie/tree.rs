//! Radix tree container: construction, insertion, deletion and exact lookup

use super::node::{common_prefix_len, Leaf, Node};
use std::fmt;
use tracing::trace;

/// A map from strings to values stored as a radix tree
///
/// Keys are compared character by character (Unicode scalar values), so
/// multi-byte characters split and sort as single units. The empty string is
/// a valid key and lives on the root.
#[derive(Clone)]
pub struct RadixTree<V> {
    pub(crate) root: Node<V>,
    pub(crate) size: usize,
}

impl<V> RadixTree<V> {
    /// Create a new empty tree
    pub fn new() -> Self {
        RadixTree {
            root: Node::new(Vec::new()),
            size: 0,
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Insert a key-value pair
    ///
    /// Returns true if the key is new, false if an existing value was
    /// overwritten.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        let chars: Vec<char> = key.chars().collect();
        let mut rest = chars.as_slice();
        let mut node = &mut self.root;

        loop {
            let Some(&label) = rest.first() else {
                // Key ends exactly here
                return match node.leaf.as_mut() {
                    Some(leaf) => {
                        leaf.key = key.to_owned();
                        leaf.value = value;
                        false
                    }
                    None => {
                        node.leaf = Some(Leaf::new(key, value));
                        self.size += 1;
                        true
                    }
                };
            };

            let Some(idx) = node.edge_index(label) else {
                // New branch
                let child = Node::with_leaf(rest.to_vec(), Leaf::new(key, value));
                node.add_edge(label, Box::new(child));
                self.size += 1;
                return true;
            };

            let child_prefix = &node.edges[idx].node.prefix;
            let common = common_prefix_len(rest, child_prefix);
            if common == child_prefix.len() {
                rest = &rest[common..];
                node = node.edges[idx].node.as_mut();
                continue;
            }

            // Key diverges inside the child's prefix:
            //   before: node -(label)- child
            //   after:  node -(label)- split -+- child (tail of its prefix)
            //                                 +- new leaf (or leaf on split)
            trace!(label = %label, shared = common, "splitting node");
            let remaining = &rest[common..];
            let leaf = Leaf::new(key, value);
            node.replace_edge(label, |mut child| {
                let tail = child.prefix.split_off(common);
                let shared = std::mem::replace(&mut child.prefix, tail);
                let mut split = Node::new(shared);
                split.add_edge(child.prefix[0], Box::new(child));
                match remaining.first() {
                    None => split.leaf = Some(leaf),
                    Some(&next) => {
                        let fresh = Node::with_leaf(remaining.to_vec(), leaf);
                        split.add_edge(next, Box::new(fresh));
                    }
                }
                split
            });
            self.size += 1;
            return true;
        }
    }

    /// Remove a key, returning its value if it was present
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let chars: Vec<char> = key.chars().collect();
        let path = self.edge_path(&chars)?;

        let removed = match path.split_last() {
            // The root is never pruned or merged
            None => self.root.leaf.take().map(|leaf| leaf.value),
            Some((&label, above)) => {
                let mut parent = &mut self.root;
                for &step in above {
                    parent = parent.child_mut(step)?;
                }
                remove_at(parent, label, above.is_empty())
            }
        };

        if removed.is_some() {
            self.size -= 1;
        }
        removed
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find_node(key)
            .and_then(|node| node.leaf.as_ref())
            .map(|leaf| &leaf.value)
    }

    /// Get a mutable reference to a value by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let chars: Vec<char> = key.chars().collect();
        let mut rest = chars.as_slice();
        let mut node = &mut self.root;

        while let Some(&label) = rest.first() {
            let idx = node.edge_index(label)?;
            let prefix_len = node.edges[idx].node.prefix.len();
            if !rest.starts_with(&node.edges[idx].node.prefix) {
                return None;
            }
            rest = &rest[prefix_len..];
            node = node.edges[idx].node.as_mut();
        }

        node.leaf.as_mut().map(|leaf| &mut leaf.value)
    }

    /// Check if a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Edge labels followed from the root to the node where `chars` ends
    fn edge_path(&self, chars: &[char]) -> Option<Vec<char>> {
        let mut rest = chars;
        let mut node = &self.root;
        let mut path = Vec::new();

        while let Some(&label) = rest.first() {
            let child = node.child(label)?;
            if !rest.starts_with(&child.prefix) {
                return None;
            }
            rest = &rest[child.prefix.len()..];
            path.push(label);
            node = child;
        }

        Some(path)
    }

    /// Find the node where `key` terminates, whether or not it holds a leaf
    fn find_node(&self, key: &str) -> Option<&Node<V>> {
        let chars: Vec<char> = key.chars().collect();
        let mut rest = chars.as_slice();
        let mut node = &self.root;

        while let Some(&label) = rest.first() {
            let child = node.child(label)?;
            if !rest.starts_with(&child.prefix) {
                return None;
            }
            rest = &rest[child.prefix.len()..];
            node = child;
        }

        Some(node)
    }
}

/// Take the leaf of `parent`'s child behind `label`, then restore the
/// compression invariant on that child and on `parent`.
fn remove_at<V>(parent: &mut Node<V>, label: char, parent_is_root: bool) -> Option<V> {
    let node = parent.child_mut(label)?;
    let leaf = node.leaf.take()?;

    // Drop the node if nothing hangs below it, or fold it into its only child
    match node.edges.len() {
        0 => {
            parent.remove_edge(label);
            trace!(label = %label, "pruned empty node");
        }
        1 => {
            node.merge_child();
            trace!(label = %label, "merged node into its only child");
        }
        _ => {}
    }

    // Pruning may leave the parent as a pass-through node
    if !parent_is_root && parent.leaf.is_none() && parent.edges.len() == 1 {
        parent.merge_child();
        trace!("merged parent into its only child");
    }

    Some(leaf.value)
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for RadixTree<V> {
    fn drop(&mut self) {
        // Detach children before they are dropped so teardown never
        // recurses once per level
        let mut pending: Vec<Box<Node<V>>> =
            self.root.edges.drain(..).map(|e| e.node).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.edges.drain(..).map(|e| e.node));
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
