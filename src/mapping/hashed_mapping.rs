use rustc_hash::FxHashMap;

use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;

/// Maps a key to a node through a hash table, for levels too wide for a linear scan.
pub struct HashedMapping<N> {
    children: FxHashMap<char, N>,
}

impl<N> HashedMapping<N> {
    pub(crate) fn from_keyed(km: &mut KeyedMapping<N>) -> Self {
        let mut children =
            FxHashMap::with_capacity_and_hasher(km.num_children() * 2, Default::default());
        children.extend(km.drain());
        Self { children }
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (char, N)> + '_ {
        self.children.drain()
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (char, &N)> {
        self.children.iter().map(|(k, v)| (*k, v))
    }
}

impl<N> NodeMapping<N> for HashedMapping<N> {
    fn add_child(&mut self, key: char, node: N) {
        let prior = self.children.insert(key, node);
        debug_assert!(prior.is_none());
    }

    #[inline]
    fn seek_child(&self, key: char) -> Option<&N> {
        self.children.get(&key)
    }

    fn delete_child(&mut self, key: char) -> Option<N> {
        self.children.remove(&key)
    }

    #[inline]
    fn num_children(&self) -> usize {
        self.children.len()
    }

    fn width(&self) -> usize {
        usize::MAX
    }
}
