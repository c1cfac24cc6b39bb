use std::collections::BTreeMap;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::Config;
use crate::error::{FormatError, TreeError};
use crate::tree::RadixTree;

/// A [`RadixTree`] behind a reader/writer lock, shareable between threads.
///
/// Queries take the shared lock and mutations the exclusive one, each for the whole operation.
/// Results are cloned out of the tree before the lock is released; callers that need to borrow
/// (lazy serialization, node inspection) take a guard with [`read`](Self::read).
///
/// ```rust
/// use std::sync::Arc;
/// use runetree::SyncRadixTree;
///
/// let tree = Arc::new(SyncRadixTree::new());
/// let writer = {
///     let tree = Arc::clone(&tree);
///     std::thread::spawn(move || tree.insert("key", 1).unwrap())
/// };
/// writer.join().unwrap();
/// assert_eq!(tree.get("key"), Ok(1));
/// ```
pub struct SyncRadixTree<V> {
    inner: RwLock<RadixTree<V>>,
}

impl<V> SyncRadixTree<V> {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            inner: RwLock::new(RadixTree::with_config(config)),
        }
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn insert(&self, key: &str, value: V) -> Result<Option<V>, TreeError> {
        self.inner.write().insert(key, value)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.inner.write().remove(key)
    }

    pub fn take(&self, key: &str) -> Option<V> {
        self.inner.write().take(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Shared access to the tree for as long as the guard lives.
    pub fn read(&self) -> RwLockReadGuard<'_, RadixTree<V>> {
        self.inner.read()
    }

    /// Exclusive access to the tree for as long as the guard lives.
    pub fn write(&self) -> RwLockWriteGuard<'_, RadixTree<V>> {
        self.inner.write()
    }

    pub fn into_inner(self) -> RadixTree<V> {
        self.inner.into_inner()
    }
}

impl<V: Clone> SyncRadixTree<V> {
    pub fn get(&self, key: &str) -> Result<V, TreeError> {
        self.inner.read().get(key).cloned()
    }

    pub fn get_all_prefix_matches(&self, key: &str) -> BTreeMap<String, V> {
        let tree = self.inner.read();
        tree.get_all_prefix_matches(key)
            .into_iter()
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }

    pub fn get_best_match(&self, key: &str) -> Option<(String, V)> {
        let tree = self.inner.read();
        tree.get_best_match(key).map(|(k, v)| (k, v.clone()))
    }

    pub fn get_longer_matches(&self, key: &str, limit: usize) -> BTreeMap<String, V> {
        let tree = self.inner.read();
        tree.get_longer_matches(key, limit)
            .into_iter()
            .map(|(k, v)| (k, v.clone()))
            .collect()
    }
}

impl<V: AsRef<str>> SyncRadixTree<V> {
    /// Encode the tree while holding the shared lock. For lazy encoding use
    /// `self.read().serialize()`.
    pub fn serialize(&self) -> Vec<String> {
        self.inner.read().serialize().collect()
    }
}

impl<V: From<String>> SyncRadixTree<V> {
    pub fn deserialize<I, S>(records: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        RadixTree::<V>::deserialize(records).map(Self::from)
    }
}

impl<V> From<RadixTree<V>> for SyncRadixTree<V> {
    fn from(tree: RadixTree<V>) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }
}

impl<V> Default for SyncRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}
