pub mod hashed_mapping;
pub mod keyed_mapping;
pub mod rune_index;

/// A mapping from the first code point of a branch to that branch.
pub trait NodeMapping<N> {
    fn add_child(&mut self, key: char, node: N);
    fn seek_child(&self, key: char) -> Option<&N>;
    fn delete_child(&mut self, key: char) -> Option<N>;
    fn num_children(&self) -> usize;
    fn width(&self) -> usize;
}
