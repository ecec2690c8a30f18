//! Depth-first traversal
//!
//! Both the callback walk and the iterator visit nodes pre-order: a node's
//! own leaf first, then its children in ascending edge-label order. Because
//! edges are sorted and a key always sorts before its extensions, this is
//! lexicographic key order.

use super::node::Node;
use super::RadixTree;

impl<V> RadixTree<V> {
    /// Visit every entry in key order until `visit` returns true
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a str, &'a V) -> bool,
    {
        walk_node(&self.root, &mut visit);
    }

    /// Iterate over all entries in key order
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.root, self.size)
    }

    /// Iterate over all keys in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate over all values in key order
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

/// Walk the subtree rooted at `node`. Returns true if the walk was stopped.
pub(crate) fn walk_node<'a, V, F>(node: &'a Node<V>, visit: &mut F) -> bool
where
    F: FnMut(&'a str, &'a V) -> bool,
{
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        if let Some(leaf) = &node.leaf {
            if visit(&leaf.key, &leaf.value) {
                return true;
            }
        }
        stack.extend(node.edges.iter().rev().map(|e| e.node.as_ref()));
    }
    false
}

/// Lazy pre-order iterator over a tree's entries
pub struct Iter<'a, V> {
    stack: Vec<&'a Node<V>>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: &'a Node<V>, len: usize) -> Self {
        Iter {
            stack: vec![root],
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Push in reverse so the smallest label is popped first
            self.stack
                .extend(node.edges.iter().rev().map(|e| e.node.as_ref()));

            if let Some(leaf) = &node.leaf {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((leaf.key.as_str(), &leaf.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> std::iter::FusedIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
