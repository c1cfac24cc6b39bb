pub mod segment;

/// A run of code points stored on a single node.
///
/// All offsets and lengths are in bytes of the UTF-8 encoding, but every offset handed out or
/// accepted by a `Partial` lies on a `char` boundary: matching walks code points, never raw bytes.
pub trait Partial: AsRef<str> {
    /// Returns a partial up to `length` bytes.
    fn partial_before(&self, length: usize) -> Self;
    /// Returns a partial from `start` onwards.
    fn partial_after(&self, start: usize) -> Self;
    /// Extends the partial with another partial.
    fn partial_extended_with(&self, other: &Self) -> Self;
    /// Returns the first code point, which is what a node is indexed by in its level.
    fn first(&self) -> Option<char>;
    /// Returns the length of the partial in bytes.
    fn len(&self) -> usize;
    /// Returns true if the partial is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the length of the common prefix between `self` and `key`, counted in whole code
    /// points. Zero means not even the first code point matched.
    fn prefix_length_str(&self, key: &str) -> usize;
}

/// Offset of the last matched unit of `a` against `b`, or `None` when even the first code point
/// differs. A full match of equal strings gives `len - 1`; containment gives the shorter
/// length minus one.
///
/// The tree itself works with the exclusive form, [`Partial::prefix_length_str`], where 0 means
/// no match; this is the same walk reported inclusively.
pub fn last_match_offset(a: &str, b: &str) -> Option<usize> {
    common_prefix_len(a, b).checked_sub(1)
}

/// Length in bytes of the longest common prefix of `a` and `b`, on a `char` boundary.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()))
}
