use crate::mapping::hashed_mapping::HashedMapping;
use crate::mapping::keyed_mapping::KeyedMapping;
use crate::mapping::NodeMapping;

/// Per-level index from the first code point of each branch to the branch.
///
/// Starts as a small linear-scan [`KeyedMapping`] and grows into a [`HashedMapping`] once the
/// level is wider than the configured width; shrinks back once the level falls to half of it.
pub enum RuneIndex<N> {
    Keyed(KeyedMapping<N>),
    Hashed(HashedMapping<N>, usize),
}

impl<N> RuneIndex<N> {
    pub fn new(width: usize) -> Self {
        RuneIndex::Keyed(KeyedMapping::new(width.max(1)))
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, RuneIndex::Hashed(..))
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = (char, &N)> + '_> {
        match self {
            RuneIndex::Keyed(km) => Box::new(km.iter()),
            RuneIndex::Hashed(hm, _) => Box::new(hm.iter()),
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        match self {
            RuneIndex::Keyed(km) => km.num_children() >= km.width(),
            RuneIndex::Hashed(..) => false,
        }
    }

    fn grow(&mut self) {
        if let RuneIndex::Keyed(km) = self {
            let width = km.width();
            *self = RuneIndex::Hashed(HashedMapping::from_keyed(km), width);
            #[cfg(feature = "tracing")]
            tracing::trace!(width, "rune index promoted to hashed mapping");
        }
    }

    fn shrink(&mut self) {
        if let RuneIndex::Hashed(hm, width) = self {
            let width = *width;
            *self = RuneIndex::Keyed(KeyedMapping::from_hashed(hm, width));
        }
    }
}

impl<N> NodeMapping<N> for RuneIndex<N> {
    fn add_child(&mut self, key: char, node: N) {
        if self.is_full() {
            self.grow();
        }
        match self {
            RuneIndex::Keyed(km) => km.add_child(key, node),
            RuneIndex::Hashed(hm, _) => hm.add_child(key, node),
        }
    }

    fn seek_child(&self, key: char) -> Option<&N> {
        match self {
            RuneIndex::Keyed(km) => km.seek_child(key),
            RuneIndex::Hashed(hm, _) => hm.seek_child(key),
        }
    }

    fn delete_child(&mut self, key: char) -> Option<N> {
        match self {
            RuneIndex::Keyed(km) => km.delete_child(key),
            RuneIndex::Hashed(hm, width) => {
                let node = hm.delete_child(key);
                if hm.num_children() <= *width / 2 {
                    self.shrink();
                }
                node
            }
        }
    }

    fn num_children(&self) -> usize {
        match self {
            RuneIndex::Keyed(km) => km.num_children(),
            RuneIndex::Hashed(hm, _) => hm.num_children(),
        }
    }

    fn width(&self) -> usize {
        match self {
            RuneIndex::Keyed(km) => km.width(),
            RuneIndex::Hashed(hm, _) => hm.width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::mapping::rune_index::RuneIndex;
    use crate::mapping::NodeMapping;

    #[test]
    fn test_grow_and_shrink() {
        let mut idx = RuneIndex::new(4);
        let keys: Vec<char> = "abcdefghij".chars().collect();
        for (i, k) in keys.iter().enumerate() {
            idx.add_child(*k, i);
        }
        assert!(idx.is_hashed());
        assert_eq!(idx.num_children(), keys.len());
        for (i, k) in keys.iter().enumerate() {
            assert_eq!(idx.seek_child(*k), Some(&i));
        }

        for k in &keys[..8] {
            assert!(idx.delete_child(*k).is_some());
        }
        assert!(!idx.is_hashed());
        assert_eq!(idx.num_children(), 2);
        assert_eq!(idx.seek_child('i'), Some(&8));
        assert_eq!(idx.seek_child('j'), Some(&9));
        assert_eq!(idx.seek_child('a'), None);

        // Refilling the keyed mapping after a shrink grows it again.
        for (i, k) in "klmn".chars().enumerate() {
            idx.add_child(k, 100 + i);
        }
        assert!(idx.is_hashed());
        assert_eq!(idx.seek_child('n'), Some(&103));
    }

    #[test]
    fn test_iter_covers_all() {
        let mut idx = RuneIndex::new(2);
        idx.add_child('x', 1);
        idx.add_child('y', 2);
        idx.add_child('z', 3);
        let mut seen: Vec<(char, i32)> = idx.iter().map(|(k, v)| (k, *v)).collect();
        seen.sort();
        assert_eq!(seen, vec![('x', 1), ('y', 2), ('z', 3)]);
    }
}
