/// Configuration for a [`RadixTree`](crate::tree::RadixTree).
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial capacity hint for the node arena.
    pub initial_capacity: usize,
    /// How many branches a level holds in its linear-scan index before the index is promoted to
    /// a hash table. Values below 1 are treated as 1.
    pub keyed_index_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            keyed_index_width: 8,
        }
    }
}
