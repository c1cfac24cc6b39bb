use std::collections::VecDeque;

use crate::node::{NodeId, NodeRef, NodeStore};
use crate::tree::RadixTree;

/// Breadth-first walk over every node, the implicit root first.
///
/// A node's first child is queued ahead of its next sibling, so a whole sibling chain is not
/// necessarily contiguous in the output; every node is visited exactly once.
pub struct Bfs<'a, V> {
    store: &'a NodeStore<V>,
    root: NodeId,
    queue: VecDeque<NodeId>,
}

impl<'a, V> Bfs<'a, V> {
    pub(crate) fn new(store: &'a NodeStore<V>, root: NodeId) -> Self {
        Self {
            store,
            root,
            queue: VecDeque::from([root]),
        }
    }
}

impl<'a, V> Iterator for Bfs<'a, V> {
    type Item = NodeRef<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        let node = &self.store[id];
        if let Some(child) = node.first_child() {
            self.queue.push_back(child);
        }
        if let Some(next) = node.next {
            self.queue.push_back(next);
        }
        Some(NodeRef::new(self.store, id, id == self.root))
    }
}

/// Every `(key, value)` pair in pre-order: a key comes before the keys it is a prefix of, and
/// siblings follow their chain order.
pub struct Iter<'a, V> {
    store: &'a NodeStore<V>,
    // Each entry is a node and the full key of its parent.
    stack: Vec<(NodeId, String)>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(store: &'a NodeStore<V>, root: NodeId) -> Self {
        let stack = store[root]
            .first_child()
            .map(|head| vec![(head, String::new())])
            .unwrap_or_default();
        Self { store, stack }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, mut key) = self.stack.pop()?;
            let node = &self.store[id];
            if let Some(next) = node.next {
                self.stack.push((next, key.clone()));
            }
            key.push_str(node.segment.as_str());
            if let Some(child) = node.first_child() {
                self.stack.push((child, key.clone()));
            }
            if let Some(value) = node.value.as_ref() {
                return Some((key, value));
            }
        }
    }
}

impl<V> RadixTree<V> {
    /// Walk every node breadth first.
    ///
    /// ```rust
    /// use runetree::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("ab", 1).unwrap();
    /// tree.insert("ac", 2).unwrap();
    /// let segments: Vec<&str> = tree.bfs().map(|n| n.segment()).collect();
    /// assert_eq!(segments, ["", "a", "b", "c"]);
    /// ```
    pub fn bfs(&self) -> Bfs<'_, V> {
        Bfs::new(&self.store, self.root)
    }

    /// Hand every node, breadth first, to `visit`.
    pub fn walk_bfs<F>(&self, mut visit: F)
    where
        F: FnMut(NodeRef<'_, V>),
    {
        for node in self.bfs() {
            visit(node);
        }
    }

    /// Iterate over all entries in pre-order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.store, self.root)
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Values in the same order as [`keys`](Self::keys).
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
