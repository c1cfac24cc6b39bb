//! Line-oriented text encoding of a tree.
//!
//! Each node becomes one record: a tab per level of depth, the node's segment, the separator
//! `"\t="`, and the node's value (empty when the node holds none). Backslash, tab, newline and
//! carriage return inside segments and values are escaped as `\\`, `\t`, `\n` and `\r`; a value
//! that is present but empty is written as `\0`. Records come out in pre-order: a node, then its
//! children, then its next sibling. The implicit root is not written.
//!
//! ```text
//! ab\t=
//! \tc\t=abc
//! \td\t=abd
//! x\t=x
//! ```

use crate::config::Config;
use crate::error::{FormatError, FormatErrorKind};
use crate::node::{NodeId, NodeStore};
use crate::tree::RadixTree;

const INDENT: char = '\t';
const SEPARATOR: &str = "\t=";
const EMPTY_VALUE: &str = "\\0";

/// Lazily produced records for a tree, see the [module docs](self).
pub struct Records<'a, V> {
    store: &'a NodeStore<V>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a, V> Records<'a, V> {
    pub(crate) fn new(store: &'a NodeStore<V>, root: NodeId) -> Self {
        let stack = store[root]
            .first_child()
            .map(|head| vec![(head, 0)])
            .unwrap_or_default();
        Self { store, stack }
    }
}

impl<V: AsRef<str>> Iterator for Records<'_, V> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = &self.store[id];

        // Sibling goes under the first child so the child's subtree comes out first.
        if let Some(next) = node.next {
            self.stack.push((next, depth));
        }
        if let Some(child) = node.first_child() {
            self.stack.push((child, depth + 1));
        }

        let mut record = String::with_capacity(depth + node.segment.as_str().len() + 8);
        for _ in 0..depth {
            record.push(INDENT);
        }
        escape_into(&mut record, node.segment.as_str());
        record.push_str(SEPARATOR);
        match node.value.as_ref().map(|v| <V as AsRef<str>>::as_ref(v)) {
            None => {}
            Some("") => record.push_str(EMPTY_VALUE),
            Some(value) => escape_into(&mut record, value),
        }
        Some(record)
    }
}

fn escape_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

fn unescape(field: &str) -> Result<String, FormatErrorKind> {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => return Err(FormatErrorKind::BadEscape(other)),
            None => return Err(FormatErrorKind::BadEscape('\\')),
        }
    }
    Ok(out)
}

/// One decoded record.
struct Record {
    depth: usize,
    segment: String,
    value: Option<String>,
}

fn parse_record(raw: &str) -> Result<Record, FormatErrorKind> {
    let body = raw.trim_start_matches(INDENT);
    let depth = raw.len() - body.len();

    // Escaped fields hold no raw tabs, so the first tab left is the separator.
    let Some(split) = body.find(INDENT) else {
        return Err(FormatErrorKind::MissingSeparator);
    };
    let (segment, rest) = body.split_at(split);
    let Some(value) = rest.strip_prefix(SEPARATOR) else {
        return Err(FormatErrorKind::MissingSeparator);
    };
    let value = match value {
        "" => None,
        EMPTY_VALUE => Some(String::new()),
        escaped => Some(unescape(escaped)?),
    };
    Ok(Record {
        depth,
        segment: unescape(segment)?,
        value,
    })
}

impl<V: AsRef<str>> RadixTree<V> {
    /// Encode the tree as records, produced lazily in pre-order.
    ///
    /// ```rust
    /// use runetree::RadixTree;
    ///
    /// let mut tree = RadixTree::new();
    /// tree.insert("abc", "1").unwrap();
    /// tree.insert("abd", "2").unwrap();
    /// let records: Vec<String> = tree.serialize().collect();
    /// assert_eq!(records, ["ab\t=", "\tc\t=1", "\td\t=2"]);
    ///
    /// let copy = RadixTree::<String>::deserialize(&records).unwrap();
    /// assert_eq!(copy.get("abd").unwrap(), "2");
    /// ```
    pub fn serialize(&self) -> Records<'_, V> {
        Records::new(&self.store, self.root)
    }
}

impl<V: From<String>> RadixTree<V> {
    /// Rebuild a tree from records in the order [`serialize`](RadixTree::serialize) writes them.
    ///
    /// Ancestry is recovered from the indentation: a stack holds the full key of every open
    /// ancestor, a record at depth `d` becomes a child of the entry at depth `d - 1`, and a
    /// record more than one level deeper than the one before it is an error.
    pub fn deserialize<I, S>(records: I) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::deserialize_with_config(records, Config::default())
    }

    pub fn deserialize_with_config<I, S>(records: I, config: Config) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = RadixTree::with_config(config);
        let mut ancestors: Vec<String> = vec![];

        for (line, raw) in records.into_iter().enumerate() {
            let line = line + 1;
            let record = parse_record(raw.as_ref()).map_err(|kind| fail(line, kind))?;
            if record.depth > ancestors.len() {
                return Err(fail(
                    line,
                    FormatErrorKind::IndentJump {
                        expected_at_most: ancestors.len(),
                        found: record.depth,
                    },
                ));
            }
            ancestors.truncate(record.depth);

            let mut key = ancestors.last().cloned().unwrap_or_default();
            key.push_str(&record.segment);
            if let Some(value) = record.value {
                match tree.insert(&key, V::from(value)) {
                    Ok(None) => {}
                    Ok(Some(_)) => return Err(fail(line, FormatErrorKind::DuplicateKey(key))),
                    Err(e) => unreachable!("non-empty key rejected on decode: {e}"),
                }
            }
            ancestors.push(key);
        }
        Ok(tree)
    }
}

fn fail(line: usize, kind: FormatErrorKind) -> FormatError {
    #[cfg(feature = "tracing")]
    tracing::debug!(line, error = %kind, "rejecting serialized tree");
    FormatError::new(line, kind)
}
