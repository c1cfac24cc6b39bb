use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TreeError {
    /// The key has zero length. Rejected before any change to the tree.
    EmptyKey,

    /// No value is stored under the key.
    NotFound,

    /// A split offset fell outside the node's segment, or inside a code point. Never produced by
    /// a well-formed tree.
    InvalidSplit { offset: usize, len: usize },
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::EmptyKey => write!(f, "EmptyKey"),
            TreeError::NotFound => write!(f, "NotFound"),
            TreeError::InvalidSplit { offset, len } => {
                write!(f, "InvalidSplit(offset: {}, segment length: {})", offset, len)
            }
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormatErrorKind {
    /// The record is indented more than one level below the previous record.
    IndentJump { expected_at_most: usize, found: usize },

    MissingSeparator,

    /// A backslash followed by something other than a known escape, or a dangling backslash.
    BadEscape(char),

    /// The same full key was described by two records.
    DuplicateKey(String),
}

/// A record stream that does not match the serializer's output. `line` is 1-based.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FormatError {
    pub line: usize,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub(crate) fn new(line: usize, kind: FormatErrorKind) -> Self {
        Self { line, kind }
    }
}

impl Display for FormatErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatErrorKind::IndentJump {
                expected_at_most,
                found,
            } => write!(
                f,
                "IndentJump(expected at most: {}, found: {})",
                expected_at_most, found
            ),
            FormatErrorKind::MissingSeparator => write!(f, "MissingSeparator"),
            FormatErrorKind::BadEscape(c) => write!(f, "BadEscape({:?})", c),
            FormatErrorKind::DuplicateKey(key) => write!(f, "DuplicateKey({:?})", key),
        }
    }
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {}: {}", self.line, self.kind)
    }
}

impl std::error::Error for FormatError {}
