use std::fmt::{Debug, Display, Formatter};

use crate::partials::{common_prefix_len, Partial};

#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Segment {
    data: Box<str>,
}

impl Segment {
    pub fn new(src: &str) -> Self {
        Self { data: Box::from(src) }
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }
}

impl From<&str> for Segment {
    fn from(src: &str) -> Self {
        Self::new(src)
    }
}

impl From<String> for Segment {
    fn from(src: String) -> Self {
        Self {
            data: src.into_boxed_str(),
        }
    }
}

impl AsRef<str> for Segment {
    fn as_ref(&self) -> &str {
        &self.data
    }
}

impl Debug for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.data, f)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.data)
    }
}

impl Partial for Segment {
    fn partial_before(&self, length: usize) -> Self {
        assert!(self.data.is_char_boundary(length));
        Segment::new(&self.data[..length])
    }

    fn partial_after(&self, start: usize) -> Self {
        assert!(self.data.is_char_boundary(start));
        Segment::new(&self.data[start..])
    }

    fn partial_extended_with(&self, other: &Self) -> Self {
        let mut joined = String::with_capacity(self.data.len() + other.data.len());
        joined.push_str(&self.data);
        joined.push_str(&other.data);
        joined.into()
    }

    #[inline]
    fn first(&self) -> Option<char> {
        self.data.chars().next()
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.data.len()
    }

    fn prefix_length_str(&self, key: &str) -> usize {
        common_prefix_len(&self.data, key)
    }
}
