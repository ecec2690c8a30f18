//! Trie node types

/// A stored key-value pair
///
/// Lives on the node where its key terminates. The node may still have
/// edges below it, so a leaf is not necessarily a structural leaf.
#[derive(Clone, Debug)]
pub(crate) struct Leaf<V> {
    /// The full, undecomposed key
    pub key: String,
    /// The payload
    pub value: V,
}

impl<V> Leaf<V> {
    pub fn new(key: &str, value: V) -> Self {
        Leaf {
            key: key.to_owned(),
            value,
        }
    }
}

/// A labeled link to an owned child node
#[derive(Clone, Debug)]
pub(crate) struct Edge<V> {
    /// First character of the child's prefix
    pub label: char,
    pub node: Box<Node<V>>,
}

/// A node in the radix tree
///
/// We use a compressed trie where:
/// - `prefix` holds the characters consumed on the way into this node, past
///   the branch point above it (empty only at the root)
/// - `edges` is kept sorted by label so lookups are binary searches and
///   traversal order is lexicographic
#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    pub prefix: Vec<char>,
    pub leaf: Option<Leaf<V>>,
    pub edges: Vec<Edge<V>>,
}

impl<V> Node<V> {
    /// Create a node with the given prefix and nothing below it
    pub fn new(prefix: Vec<char>) -> Self {
        Node {
            prefix,
            leaf: None,
            edges: Vec::new(),
        }
    }

    /// Create a node that terminates a key
    pub fn with_leaf(prefix: Vec<char>, leaf: Leaf<V>) -> Self {
        Node {
            prefix,
            leaf: Some(leaf),
            edges: Vec::new(),
        }
    }

    /// Position of the edge labeled `label`, if any
    pub fn edge_index(&self, label: char) -> Option<usize> {
        self.edges.binary_search_by_key(&label, |e| e.label).ok()
    }

    /// Attach a child under `label`, keeping the edge table sorted.
    ///
    /// The label must not already be present.
    pub fn add_edge(&mut self, label: char, node: Box<Node<V>>) {
        let idx = self.edges.partition_point(|e| e.label < label);
        debug_assert!(
            self.edges.get(idx).map_or(true, |e| e.label != label),
            "duplicate edge label {label:?}"
        );
        self.edges.insert(idx, Edge { label, node });
    }

    /// Get the child behind `label`
    pub fn child(&self, label: char) -> Option<&Node<V>> {
        self.edge_index(label).map(|idx| self.edges[idx].node.as_ref())
    }

    /// Get the child behind `label` mutably
    pub fn child_mut(&mut self, label: char) -> Option<&mut Node<V>> {
        let idx = self.edge_index(label)?;
        Some(self.edges[idx].node.as_mut())
    }

    /// Swap the child behind `label` for whatever `f` builds from it.
    ///
    /// The child is handed over by value, so `f` may re-parent it. Returns
    /// false (and never calls `f`) if no such edge exists.
    pub fn replace_edge(&mut self, label: char, f: impl FnOnce(Node<V>) -> Node<V>) -> bool {
        let Some(idx) = self.edge_index(label) else {
            return false;
        };
        let slot = self.edges[idx].node.as_mut();
        let old = std::mem::replace(slot, Node::new(Vec::new()));
        *slot = f(old);
        true
    }

    /// Detach the edge labeled `label`, returning its child
    pub fn remove_edge(&mut self, label: char) -> Option<Box<Node<V>>> {
        let idx = self.edge_index(label)?;
        Some(self.edges.remove(idx).node)
    }

    /// Collapse this node into its only child.
    ///
    /// The child's prefix is appended to ours and we adopt its leaf and
    /// edges. No-op unless there is exactly one edge.
    pub fn merge_child(&mut self) {
        if self.edges.len() != 1 {
            return;
        }
        if let Some(edge) = self.edges.pop() {
            let child = *edge.node;
            self.prefix.extend(child.prefix);
            self.leaf = child.leaf;
            self.edges = child.edges;
        }
    }

    /// Smallest-labeled child
    pub fn first_child(&self) -> Option<&Node<V>> {
        self.edges.first().map(|e| e.node.as_ref())
    }

    /// Largest-labeled child
    pub fn last_child(&self) -> Option<&Node<V>> {
        self.edges.last().map(|e| e.node.as_ref())
    }
}

/// Number of leading characters `a` and `b` share
pub(crate) fn common_prefix_len(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}
