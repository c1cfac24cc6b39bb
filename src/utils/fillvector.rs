use std::ops::{Index, IndexMut};

// We use a u32 here instead of usize under the assumption there simply won't be that many nodes
// and so that we can save some bytes in the nodes that link to each other by index.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct FVIndex(pub u32);

impl FVIndex {
    #[inline]
    fn slot(self) -> usize {
        self.0 as usize
    }
}

/// A place to store (owned) values that can be accessed by an index, with holes being re-used.
/// Maintains a separate free list. A poor man's slot map or arena, really.
///
/// Freed slots hold `None`, so checking whether an index is live is O(1).
pub struct FillVector<V> {
    values: Vec<Option<V>>,
    free_list: Vec<u32>,
    size: usize,
}

impl<V> FillVector<V> {
    pub fn new() -> Self {
        Self {
            values: vec![],
            free_list: Vec::with_capacity(16),
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            free_list: Default::default(),
            size: 0,
        }
    }

    pub fn add<F: FnOnce(FVIndex) -> V>(&mut self, f: F) -> FVIndex {
        let id = match self.free_list.pop() {
            None => {
                let id = FVIndex(self.values.len() as u32);
                self.values.push(Some(f(id)));
                id
            }
            Some(idx) => {
                let id = FVIndex(idx);
                self.values[id.slot()] = Some(f(id));
                id
            }
        };
        self.size += 1;
        id
    }

    /// Frees the slot and hands back what was in it. Returns `None` if it was already free.
    pub fn free(&mut self, id: FVIndex) -> Option<V> {
        let value = self.values.get_mut(id.slot())?.take()?;
        self.free_list.push(id.0);
        self.size -= 1;
        Some(value)
    }

    pub fn get(&self, id: FVIndex) -> Option<&V> {
        self.values.get(id.slot())?.as_ref()
    }

    pub fn get_mut(&mut self, id: FVIndex) -> Option<&mut V> {
        self.values.get_mut(id.slot())?.as_mut()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.free_list.clear();
        self.size = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl<V> Index<FVIndex> for FillVector<V> {
    type Output = V;

    fn index(&self, index: FVIndex) -> &Self::Output {
        match self.get(index) {
            Some(v) => v,
            None => panic!("FillVector: index {} is not live", index.0),
        }
    }
}

impl<V> IndexMut<FVIndex> for FillVector<V> {
    fn index_mut(&mut self, index: FVIndex) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(v) => v,
            None => panic!("FillVector: index {} is not live", index.0),
        }
    }
}

impl<V> Default for FillVector<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::fillvector::{FVIndex, FillVector};

    #[test]
    fn test_add_free_reuse() {
        let mut fv = FillVector::new();
        let a = fv.add(|_| "a");
        let b = fv.add(|_| "b");
        assert_eq!(fv.size(), 2);
        assert_eq!(fv[a], "a");
        assert_eq!(fv[b], "b");

        assert_eq!(fv.free(a), Some("a"));
        assert_eq!(fv.free(a), None);
        assert!(fv.get(a).is_none());
        assert_eq!(fv.size(), 1);

        // The hole left by `a` is handed out again.
        let c = fv.add(|id| {
            assert_eq!(id, a);
            "c"
        });
        assert_eq!(c, a);
        assert_eq!(fv[c], "c");
        assert_eq!(fv.size(), 2);
    }

    #[test]
    fn test_out_of_range() {
        let fv = FillVector::<u8>::new();
        assert!(fv.get(FVIndex(7)).is_none());
        assert!(fv.is_empty());
    }
}
