//! Prefix queries: every stored prefix of a key, the longest of them, and stored keys that
//! extend a key.

use std::collections::{BTreeMap, VecDeque};

use crate::node::NodeId;
use crate::partials::Partial;
use crate::tree::{Located, RadixTree};

impl<V> RadixTree<V> {
    /// Every stored key that is a prefix of `key` (including `key` itself), with its value.
    ///
    /// All results are prefixes of the same string, so no two have the same length, and the map's
    /// ordering runs from shortest to longest.
    ///
    /// ```rust
    /// use runetree::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// for key in ["a", "ab", "abc"] {
    ///     tree.insert(key, key).unwrap();
    /// }
    /// let matches = tree.get_all_prefix_matches("abc");
    /// assert_eq!(matches.keys().collect::<Vec<_>>(), ["a", "ab", "abc"]);
    /// ```
    pub fn get_all_prefix_matches(&self, key: &str) -> BTreeMap<String, &V> {
        let mut matches = BTreeMap::new();
        let mut parent = self.root;
        let mut consumed = 0;
        while consumed < key.len() {
            let suffix = &key[consumed..];
            let Some(first) = suffix.chars().next() else {
                break;
            };
            let Some(child) = self.store.seek_child(parent, first) else {
                break;
            };
            let node = &self.store[child];
            let matched = node.segment.prefix_length_str(suffix);
            if matched < node.segment.len() {
                break;
            }
            consumed += matched;
            if let Some(value) = node.value.as_ref() {
                matches.insert(key[..consumed].to_string(), value);
            }
            parent = child;
        }
        matches
    }

    /// The longest stored key that is a prefix of `key`, with its value.
    pub fn get_best_match(&self, key: &str) -> Option<(String, &V)> {
        self.get_all_prefix_matches(key)
            .into_iter()
            .max_by_key(|(prefix, _)| prefix.len())
    }

    /// Stored keys strictly longer than `key` that start with it, found breadth first from the
    /// place `key` leads to. Collection stops as soon as more than `limit` keys are found, so the
    /// result holds at most `limit + 1` entries. An empty `key` starts from the root.
    ///
    /// `key` need not end on a segment boundary: a key ending partway through a node's segment
    /// matches that node and its whole subtree, where a strict lookup would find nothing.
    ///
    /// Which keys survive a cut-off follows the breadth-first order: shallower branches first,
    /// and chain order within a level.
    pub fn get_longer_matches(&self, key: &str, limit: usize) -> BTreeMap<String, &V> {
        let mut matches = BTreeMap::new();
        let mut queue: VecDeque<(NodeId, String)> = VecDeque::new();

        let located = if key.is_empty() {
            Located::Exact {
                node: self.root,
                parent: self.root,
            }
        } else {
            self.locate(key)
        };
        match located {
            Located::Exact { node, .. } => self.enqueue_children(&mut queue, node, key),
            Located::Inside { node, consumed } => {
                let mut full = key[..consumed].to_string();
                full.push_str(self.store[node].segment.as_str());
                queue.push_back((node, full));
            }
            Located::Miss => {}
        }

        while let Some((id, full_key)) = queue.pop_front() {
            self.enqueue_children(&mut queue, id, &full_key);
            if let Some(value) = self.store[id].value.as_ref() {
                matches.insert(full_key, value);
                if matches.len() > limit {
                    break;
                }
            }
        }
        matches
    }

    fn enqueue_children(&self, queue: &mut VecDeque<(NodeId, String)>, id: NodeId, key: &str) {
        let mut cursor = self.store[id].first_child();
        while let Some(child) = cursor {
            let node = &self.store[child];
            let mut full = String::with_capacity(key.len() + node.segment.len());
            full.push_str(key);
            full.push_str(node.segment.as_str());
            queue.push_back((child, full));
            cursor = node.next;
        }
    }
}
