use crate::mapping::hashed_mapping::HashedMapping;
use crate::mapping::NodeMapping;

// Levels rarely hold more than a few branches; wider ones grow on demand.
const PREALLOCATED_SLOTS: usize = 8;

/// Maps a key to a node, using an unsorted array of keys and a corresponding array of nodes.
/// Presence of a key at a position means there is a node at the same position in children.
/// The keys are kept unsorted, so a linear search is used to find the key, which for the handful
/// of branches most levels have beats hashing.
/// Deletes swap the last entry into the hole, so the arrays stay dense.
pub struct KeyedMapping<N> {
    pub(crate) keys: Vec<char>,
    pub(crate) children: Vec<N>,
    width: usize,
}

impl<N> KeyedMapping<N> {
    #[inline]
    pub fn new(width: usize) -> Self {
        Self {
            keys: Vec::with_capacity(width.min(PREALLOCATED_SLOTS)),
            children: Vec::with_capacity(width.min(PREALLOCATED_SLOTS)),
            width,
        }
    }

    pub(crate) fn from_hashed(hm: &mut HashedMapping<N>, width: usize) -> Self {
        assert!(hm.num_children() <= width);
        let mut new = KeyedMapping::new(width);
        for (key, child) in hm.drain() {
            new.keys.push(key);
            new.children.push(child);
        }
        new
    }

    #[inline]
    fn position(&self, key: char) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (char, N)> + '_ {
        self.keys.drain(..).zip(self.children.drain(..))
    }

    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (char, &N)> {
        self.keys.iter().copied().zip(self.children.iter())
    }
}

impl<N> NodeMapping<N> for KeyedMapping<N> {
    #[inline]
    fn add_child(&mut self, key: char, node: N) {
        assert!(self.keys.len() < self.width, "add_child: no space left");
        debug_assert!(self.position(key).is_none());
        self.keys.push(key);
        self.children.push(node);
    }

    fn seek_child(&self, key: char) -> Option<&N> {
        let idx = self.position(key)?;
        Some(&self.children[idx])
    }

    fn delete_child(&mut self, key: char) -> Option<N> {
        let idx = self.position(key)?;
        self.keys.swap_remove(idx);
        Some(self.children.swap_remove(idx))
    }

    #[inline(always)]
    fn num_children(&self) -> usize {
        self.keys.len()
    }

    #[inline(always)]
    fn width(&self) -> usize {
        self.width
    }
}
