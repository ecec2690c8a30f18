//! Prefix and ordering queries

use super::node::Node;
use super::walk::walk_node;
use super::RadixTree;

impl<V> RadixTree<V> {
    /// Find the longest stored key that is a prefix of `key`
    ///
    /// Returns the matched key and its value. The empty key, if stored,
    /// matches everything.
    pub fn longest_match(&self, key: &str) -> Option<(&str, &V)> {
        let chars: Vec<char> = key.chars().collect();
        let mut rest = chars.as_slice();
        let mut node = &self.root;
        let mut last = node.leaf.as_ref();

        while let Some(&label) = rest.first() {
            let Some(child) = node.child(label) else {
                break;
            };
            if !rest.starts_with(&child.prefix) {
                break;
            }
            rest = &rest[child.prefix.len()..];
            node = child;
            if node.leaf.is_some() {
                last = node.leaf.as_ref();
            }
        }

        last.map(|leaf| (leaf.key.as_str(), &leaf.value))
    }

    /// All entries whose key starts with `prefix`, in key order
    pub fn collect(&self, prefix: &str) -> Vec<(&str, &V)> {
        let mut entries = Vec::new();
        if let Some(node) = self.prefix_root(prefix) {
            walk_node(node, &mut |k, v| {
                entries.push((k, v));
                false
            });
        }
        entries
    }

    /// All keys starting with `prefix`, in key order
    pub fn collect_keys(&self, prefix: &str) -> Vec<&str> {
        self.collect(prefix).into_iter().map(|(k, _)| k).collect()
    }

    /// The lexicographically smallest entry
    pub fn top(&self) -> Option<(&str, &V)> {
        let mut node = &self.root;
        loop {
            // A key sorts before all of its continuations
            if let Some(leaf) = &node.leaf {
                return Some((leaf.key.as_str(), &leaf.value));
            }
            node = node.first_child()?;
        }
    }

    /// The lexicographically largest entry
    pub fn bottom(&self) -> Option<(&str, &V)> {
        let mut node = &self.root;
        // Any continuation sorts after the key itself, so only stop at a
        // node with nothing below it
        while let Some(child) = node.last_child() {
            node = child;
        }
        node.leaf
            .as_ref()
            .map(|leaf| (leaf.key.as_str(), &leaf.value))
    }

    /// Locate the subtree holding every key that starts with `prefix`.
    ///
    /// The prefix may end in the middle of a compressed edge, in which case
    /// the node below that edge is the answer.
    fn prefix_root(&self, prefix: &str) -> Option<&Node<V>> {
        let chars: Vec<char> = prefix.chars().collect();
        let mut rest = chars.as_slice();
        let mut node = &self.root;

        while let Some(&label) = rest.first() {
            let child = node.child(label)?;
            if rest.starts_with(&child.prefix) {
                rest = &rest[child.prefix.len()..];
                node = child;
            } else if child.prefix.starts_with(rest) {
                return Some(child);
            } else {
                return None;
            }
        }

        Some(node)
    }
}
