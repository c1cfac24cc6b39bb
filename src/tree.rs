//! Radix tree keyed by strings.
//!
//! This module contains the main [`RadixTree`] implementation: lookup, insertion and removal,
//! together with the node splitting and merging that keep the tree compact.

use crate::config::Config;
use crate::error::TreeError;
use crate::node::{NodeId, NodeRef, NodeStore};
use crate::partials::segment::Segment;
use crate::partials::Partial;

/// A radix tree mapping non-empty strings to values.
///
/// Keys are compared code point by code point. Every node stores a segment of a key; the key a
/// value is stored under is the concatenation of the segments from the root down to its node.
/// The children of each node form a sibling chain whose first code points are pairwise
/// distinct, and an index on that first code point picks the right branch at each level without
/// scanning the chain.
///
/// ## Examples
///
/// ```rust
/// use runetree::RadixTree;
///
/// let mut tree = RadixTree::new();
/// assert_eq!(tree.insert("apple", "fruit").unwrap(), None);
/// assert_eq!(tree.insert("application", "software").unwrap(), None);
///
/// assert_eq!(tree.get("apple"), Ok(&"fruit"));
/// assert!(tree.get("app").is_err());
///
/// let (prefix, value) = tree.get_best_match("applesauce").unwrap();
/// assert_eq!(prefix, "apple");
/// assert_eq!(*value, "fruit");
///
/// assert!(tree.remove("apple"));
/// assert_eq!(tree.size(), 1);
/// ```
///
/// For access from several threads, wrap it in a [`SyncRadixTree`](crate::sync::SyncRadixTree).
pub struct RadixTree<V> {
    pub(crate) store: NodeStore<V>,
    pub(crate) root: NodeId,
    size: usize,
}

/// Where the descent for a key ended.
pub(crate) enum Located {
    /// The key ends exactly at the end of `node`'s segment. `parent` owns `node`'s level.
    Exact { node: NodeId, parent: NodeId },
    /// The key ends strictly inside `node`'s segment, after `consumed` bytes of the key that
    /// belong to `node`'s ancestors.
    Inside { node: NodeId, consumed: usize },
    Miss,
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RadixTree<V> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut store = NodeStore::new(config.initial_capacity, config.keyed_index_width);
        let root = store.new_node(Segment::default(), None);
        Self {
            store,
            root,
            size: 0,
        }
    }

    /// Number of keys with a value.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every entry, keeping the configuration.
    pub fn clear(&mut self) {
        self.store.clear();
        self.root = self.store.new_node(Segment::default(), None);
        self.size = 0;
    }

    /// The implicit root node, for structural inspection.
    pub fn root(&self) -> NodeRef<'_, V> {
        NodeRef::new(&self.store, self.root, true)
    }

    /// Get the value stored under exactly `key`.
    pub fn get(&self, key: &str) -> Result<&V, TreeError> {
        if key.is_empty() {
            return Err(TreeError::EmptyKey);
        }
        let Located::Exact { node, .. } = self.locate(key) else {
            return Err(TreeError::NotFound);
        };
        self.store[node].value.as_ref().ok_or(TreeError::NotFound)
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut V, TreeError> {
        if key.is_empty() {
            return Err(TreeError::EmptyKey);
        }
        let Located::Exact { node, .. } = self.locate(key) else {
            return Err(TreeError::NotFound);
        };
        self.store[node].value.as_mut().ok_or(TreeError::NotFound)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    /// Insert a value under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(old_value))` if a previous value was replaced
    /// - `Ok(None)` if this was a new key
    /// - `Err(TreeError::EmptyKey)` for an empty key; the tree is left untouched
    ///
    /// # Examples
    ///
    /// ```rust
    /// use runetree::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// assert_eq!(tree.insert("key1", 100), Ok(None));
    /// assert_eq!(tree.insert("key1", 200), Ok(Some(100)));
    /// assert_eq!(tree.get("key1"), Ok(&200));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, TreeError> {
        if key.is_empty() {
            return Err(TreeError::EmptyKey);
        }

        let mut parent = self.root;
        let mut suffix = key;
        loop {
            let Some(first) = suffix.chars().next() else {
                unreachable!("the suffix is never empty while descending");
            };

            // No branch at this level starts with our code point; the rest of the key becomes a
            // new leaf at the end of the chain.
            let Some(child) = self.store.seek_child(parent, first) else {
                let leaf = self.store.new_node(Segment::from(suffix), Some(value));
                self.store.append_child(parent, leaf);
                self.size += 1;
                return Ok(None);
            };

            let segment = &self.store[child].segment;
            let segment_len = segment.len();
            let matched = segment.prefix_length_str(suffix);

            // The key leaves this node's segment partway through. Break the segment at the point
            // of divergence; the new value either lands on the upper half or becomes a sibling
            // of the lower half.
            if matched < segment_len {
                self.store.split(child, matched)?;
                if matched == suffix.len() {
                    self.store[child].value = Some(value);
                } else {
                    let leaf = self
                        .store
                        .new_node(Segment::from(&suffix[matched..]), Some(value));
                    self.store.append_child(child, leaf);
                }
                self.size += 1;
                return Ok(None);
            }

            // Segment fully matched, key continues: descend.
            if matched < suffix.len() {
                parent = child;
                suffix = &suffix[matched..];
                continue;
            }

            // Exact match: update in place.
            let prior = self.store[child].value.replace(value);
            if prior.is_none() {
                self.size += 1;
            }
            return Ok(prior);
        }
    }

    /// Remove the value stored under `key`. Returns whether anything was removed; removing a
    /// missing key, or a key that only exists as a prefix of others, changes nothing.
    ///
    /// A value-less node left with a single child is folded into that child even when it has
    /// siblings, so the serialized record shape after a removal can be flatter than a tree that
    /// only collapses sibling-less nodes. The stored key set is the same either way.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Remove the value stored under `key` and hand it back.
    pub fn take(&mut self, key: &str) -> Option<V> {
        if key.is_empty() {
            return None;
        }
        let Located::Exact { node, parent } = self.locate(key) else {
            return None;
        };
        let value = self.store[node].value.take()?;
        self.size -= 1;

        if self.store[node].children.is_some() {
            // Still a branch; fold it into its child if that is now the only thing it carries.
            self.store.merge_with_only_child(node);
        } else {
            // A bare leaf: drop it, then see whether its parent has become a pass-through.
            self.store.unlink_child(parent, node);
            if parent != self.root {
                self.store.merge_with_only_child(parent);
            }
        }
        Some(value)
    }

    /// Descend towards `key`, following the index at each level.
    pub(crate) fn locate(&self, key: &str) -> Located {
        let mut parent = self.root;
        let mut consumed = 0;
        loop {
            let suffix = &key[consumed..];
            let Some(first) = suffix.chars().next() else {
                return Located::Miss;
            };
            let Some(child) = self.store.seek_child(parent, first) else {
                return Located::Miss;
            };

            let segment = &self.store[child].segment;
            let matched = segment.prefix_length_str(suffix);
            if matched < segment.len() {
                // A match that stops short of the segment's end is a miss, unless it is the key
                // that ran out.
                return if matched == suffix.len() {
                    Located::Inside {
                        node: child,
                        consumed,
                    }
                } else {
                    Located::Miss
                };
            }
            if matched == suffix.len() {
                return Located::Exact {
                    node: child,
                    parent,
                };
            }
            consumed += matched;
            parent = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::seq::IndexedRandom;
    use rand::{rng, Rng};

    use crate::config::Config;
    use crate::error::TreeError;
    use crate::tree::RadixTree;

    #[test]
    fn test_insert_get() {
        let mut tree = RadixTree::new();
        let cases = ["a", "b", "ab", "中", "中文"];
        for key in cases {
            assert_eq!(tree.insert(key, key.to_string()), Ok(None));
            assert_eq!(tree.get(key), Ok(&key.to_string()));
        }
        assert_eq!(tree.size(), cases.len());
        for key in cases {
            assert_eq!(tree.get(key), Ok(&key.to_string()));
        }
    }

    #[test]
    fn test_multibyte_keys_match_by_code_point() {
        let mut tree = RadixTree::new();
        tree.insert("中", "中").unwrap();
        tree.insert("中文", "中文").unwrap();
        // Shares a lead byte with '中' but is a different code point.
        tree.insert("丰", "丰").unwrap();
        assert_eq!(tree.get("中"), Ok(&"中"));
        assert_eq!(tree.get("中文"), Ok(&"中文"));
        assert_eq!(tree.get("丰"), Ok(&"丰"));
        assert_eq!(tree.get("文"), Err(TreeError::NotFound));
        assert_eq!(tree.root().num_children(), 2);
    }

    #[test]
    fn test_empty_key() {
        let mut tree = RadixTree::<u32>::new();
        assert_eq!(tree.get(""), Err(TreeError::EmptyKey));
        assert_eq!(tree.insert("", 1), Err(TreeError::EmptyKey));
        assert!(!tree.remove(""));
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.root().num_children(), 0);
    }

    #[test]
    fn test_insert_returns_replaced_value() {
        let mut tree = RadixTree::new();

        assert_eq!(tree.insert("key1", 100), Ok(None));
        assert_eq!(tree.get("key1"), Ok(&100));

        assert_eq!(tree.insert("key1", 200), Ok(Some(100)));
        assert_eq!(tree.get("key1"), Ok(&200));
        assert_eq!(tree.size(), 1);

        assert_eq!(tree.insert("key2", 400), Ok(None));
        assert_eq!(tree.get("key1"), Ok(&200));
        assert_eq!(tree.size(), 2);
    }

    #[test]
    fn test_partial_segment_is_a_miss() {
        let mut tree = RadixTree::new();
        tree.insert("romane", 1).unwrap();
        tree.insert("romanus", 2).unwrap();
        // "roman" is now a pure branch; "rom" ends inside it.
        assert_eq!(tree.get("roman"), Err(TreeError::NotFound));
        assert_eq!(tree.get("rom"), Err(TreeError::NotFound));
        assert_eq!(tree.get("romanes"), Err(TreeError::NotFound));
        assert!(!tree.remove("roman"));
        assert_eq!(tree.size(), 2);

        // Inserting at the branch point stores on the existing branch.
        assert_eq!(tree.insert("roman", 3), Ok(None));
        assert_eq!(tree.get("roman"), Ok(&3));
        assert_eq!(tree.size(), 3);
    }

    #[test]
    fn test_split_carries_value_and_children() {
        let mut tree = RadixTree::new();
        tree.insert("abcd", 1).unwrap();
        tree.insert("abcdef", 2).unwrap();
        // Splits "abcd" at "ab", pushing the value and the "ef" child down.
        tree.insert("ab", 3).unwrap();
        assert_eq!(tree.get("abcd"), Ok(&1));
        assert_eq!(tree.get("abcdef"), Ok(&2));
        assert_eq!(tree.get("ab"), Ok(&3));

        let top = tree.root().first_child().unwrap();
        assert_eq!(top.segment(), "ab");
        assert_eq!(top.first_child().unwrap().segment(), "cd");
        assert_eq!(
            top.first_child().unwrap().first_child().unwrap().segment(),
            "ef"
        );
    }

    #[test]
    fn test_remove_merges_siblings() {
        let mut tree = RadixTree::new();
        tree.insert("aa", "aa").unwrap();
        tree.insert("ab", "ab").unwrap();
        assert!(tree.remove("aa"));
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.get("ab"), Ok(&"ab"));

        let root = tree.root();
        assert_eq!(root.num_children(), 1);
        let only = root.first_child().unwrap();
        assert_eq!(only.segment(), "ab");
        assert_eq!(only.num_children(), 0);
    }

    #[test]
    fn test_remove_branch_value_merges_down() {
        let mut tree = RadixTree::new();
        tree.insert("ab", 1).unwrap();
        tree.insert("abc", 2).unwrap();
        assert!(tree.remove("ab"));
        let only = tree.root().first_child().unwrap();
        assert_eq!(only.segment(), "abc");
        assert_eq!(only.value(), Some(&2));
        assert_eq!(tree.get("abc"), Ok(&2));
        assert_eq!(tree.stats().num_nodes, 2);
    }

    #[test]
    fn test_remove_folds_branch_that_has_siblings() {
        let mut tree = RadixTree::new();
        for key in ["ab", "abc", "x"] {
            tree.insert(key, key).unwrap();
        }
        assert!(tree.remove("ab"));
        assert_eq!(
            tree.serialize().collect::<Vec<_>>(),
            ["abc\t=abc", "x\t=x"]
        );
        assert_eq!(tree.get("abc"), Ok(&"abc"));
        assert_eq!(tree.stats().redundant_branches, 0);
    }

    #[test]
    fn test_huge_index_width() {
        let mut tree = RadixTree::with_config(Config {
            initial_capacity: 4,
            keyed_index_width: usize::MAX,
        });
        for c in 'a'..='z' {
            tree.insert(&c.to_string(), c).unwrap();
        }
        assert_eq!(tree.size(), 26);
        assert_eq!(tree.get("q"), Ok(&'q'));
        assert_eq!(tree.stats().hashed_indexes, 0);
    }

    #[test]
    fn test_remove_keeps_branch_with_many_children() {
        let mut tree = RadixTree::new();
        for key in ["ab", "abc", "abd"] {
            tree.insert(key, key).unwrap();
        }
        assert!(tree.remove("ab"));
        let top = tree.root().first_child().unwrap();
        assert_eq!(top.segment(), "ab");
        assert_eq!(top.value(), None);
        assert_eq!(top.num_children(), 2);

        assert!(tree.remove("abc"));
        let top = tree.root().first_child().unwrap();
        assert_eq!(top.segment(), "abd");
        assert_eq!(top.num_children(), 0);
    }

    #[test]
    fn test_remove() {
        let mut tree = RadixTree::new();
        let values = [
            "a", "b", "aa", "ba", "bb", "ca", "cb", "caa", "da", "db", "daa", "dba",
        ];
        let removed = ["aa", "ba", "ca", "db"];

        for v in values {
            tree.insert(v, v).unwrap();
        }
        for r in removed {
            assert!(tree.remove(r), "key {r} was not removed");
            assert!(!tree.remove(r));
        }
        assert_eq!(tree.size(), values.len() - removed.len());
        for v in values {
            assert_eq!(tree.get(v).is_ok(), !removed.contains(&v), "key {v}");
        }
        let stats = tree.stats();
        assert_eq!(stats.redundant_branches, 0);
        assert_eq!(stats.index_mismatches, 0);
    }

    #[test]
    fn test_remove_everything_leaves_empty_root() {
        let mut tree = RadixTree::new();
        let keys = ["x", "xy", "xyz", "xz", "y", "中", "中文"];
        for k in keys {
            tree.insert(k, ()).unwrap();
        }
        for k in keys.iter().rev() {
            assert!(tree.remove(k));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root().num_children(), 0);
        assert_eq!(tree.stats().num_nodes, 1);
    }

    #[test]
    fn test_take_and_get_mut() {
        let mut tree = RadixTree::new();
        tree.insert("counter", 1).unwrap();
        *tree.get_mut("counter").unwrap() += 41;
        assert_eq!(tree.take("counter"), Some(42));
        assert_eq!(tree.take("counter"), None);
        assert!(tree.get_mut("").is_err());
    }

    #[test]
    fn test_clear() {
        let mut tree = RadixTree::new();
        tree.insert("a", 1).unwrap();
        tree.insert("b", 2).unwrap();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.get("a"), Err(TreeError::NotFound));
        tree.insert("a", 3).unwrap();
        assert_eq!(tree.get("a"), Ok(&3));
    }

    #[test]
    fn test_wide_level_uses_hashed_index() {
        let mut tree = RadixTree::with_config(Config {
            initial_capacity: 16,
            keyed_index_width: 2,
        });
        let keys: Vec<String> = ('a'..='z').map(|c| format!("{c}{c}")).collect();
        for k in &keys {
            tree.insert(k, k.clone()).unwrap();
        }
        assert_eq!(tree.stats().hashed_indexes, 1);
        for k in &keys {
            assert_eq!(tree.get(k), Ok(k));
        }
        for k in &keys[..25] {
            assert!(tree.remove(k));
        }
        assert_eq!(tree.stats().hashed_indexes, 0);
        assert_eq!(tree.get("zz"), Ok(&"zz".to_string()));
    }

    #[test]
    fn test_random_insert_remove_against_btree() {
        // Keys grown from shared stems so that splits and merges actually happen.
        let mut rng = rng();
        let alphabet: Vec<char> = "abcxyz中文".chars().collect();
        let mut keys = vec![];
        for _ in 0..300 {
            let len = rng.random_range(1..6);
            let key: String = (0..len)
                .map(|_| *alphabet.choose(&mut rng).unwrap())
                .collect();
            keys.push(key);
        }

        let mut tree = RadixTree::new();
        let mut btree = BTreeMap::new();
        for i in 0..5_000 {
            let key = keys.choose(&mut rng).unwrap();
            if rng.random_range(0..100) < 60 {
                assert_eq!(tree.insert(key, i).unwrap(), btree.insert(key.clone(), i));
            } else {
                assert_eq!(tree.remove(key), btree.remove(key).is_some());
            }
            assert_eq!(tree.size(), btree.len());
        }

        for key in &keys {
            assert_eq!(tree.get(key).ok(), btree.get(key));
        }
        let stats = tree.stats();
        assert_eq!(stats.num_values, btree.len());
        assert_eq!(stats.leaked_nodes, 0);
        assert_eq!(stats.redundant_branches, 0);
        assert_eq!(stats.index_mismatches, 0);
    }
}
