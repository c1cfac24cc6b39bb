use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

use crate::error::TreeError;
use crate::mapping::rune_index::RuneIndex;
use crate::mapping::NodeMapping;
use crate::partials::segment::Segment;
use crate::partials::Partial;
use crate::utils::fillvector::{FVIndex, FillVector};

pub type NodeId = FVIndex;

/// The children of one node: the head and tail of their sibling chain, and the index from first
/// code point to sibling. The index always holds exactly the nodes reachable along the chain.
pub(crate) struct Level {
    pub(crate) head: NodeId,
    pub(crate) tail: NodeId,
    pub(crate) index: RuneIndex<NodeId>,
}

pub(crate) struct Node<V> {
    pub(crate) segment: Segment,
    pub(crate) value: Option<V>,
    pub(crate) children: Option<Level>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new(segment: Segment, value: Option<V>) -> Self {
        Self {
            segment,
            value,
            children: None,
            prev: None,
            next: None,
        }
    }

    pub(crate) fn first_child(&self) -> Option<NodeId> {
        self.children.as_ref().map(|level| level.head)
    }

    pub fn num_children(&self) -> usize {
        self.children
            .as_ref()
            .map_or(0, |level| level.index.num_children())
    }
}

/// Owns every node of a tree and keeps sibling chains and their indexes in step.
pub(crate) struct NodeStore<V> {
    nodes: FillVector<Node<V>>,
    index_width: usize,
}

impl<V> NodeStore<V> {
    pub(crate) fn new(capacity: usize, index_width: usize) -> Self {
        Self {
            nodes: FillVector::with_capacity(capacity),
            index_width,
        }
    }

    pub(crate) fn new_node(&mut self, segment: Segment, value: Option<V>) -> NodeId {
        self.nodes.add(|_| Node::new(segment, value))
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.size()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Finds the child of `parent` whose segment begins with `key`.
    #[inline]
    pub(crate) fn seek_child(&self, parent: NodeId, key: char) -> Option<NodeId> {
        let level = self.nodes[parent].children.as_ref()?;
        level.index.seek_child(key).copied()
    }

    /// Appends `child` to the end of `parent`'s sibling chain and indexes it.
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(key) = self.nodes[child].segment.first() else {
            unreachable!("child nodes never have an empty segment");
        };
        let width = self.index_width;
        match self.nodes[parent].children.as_mut() {
            None => {
                let mut index = RuneIndex::new(width);
                index.add_child(key, child);
                self.nodes[parent].children = Some(Level {
                    head: child,
                    tail: child,
                    index,
                });
            }
            Some(level) => {
                debug_assert!(level.index.seek_child(key).is_none());
                level.index.add_child(key, child);
                let old_tail = std::mem::replace(&mut level.tail, child);
                self.nodes[old_tail].next = Some(child);
                self.nodes[child].prev = Some(old_tail);
            }
        }
    }

    /// Unlinks `child` from `parent`'s sibling chain, drops its index entry, and frees it.
    /// `parent` loses its level entirely when `child` was the only one.
    pub(crate) fn unlink_child(&mut self, parent: NodeId, child: NodeId) -> Option<Node<V>> {
        let key = self.nodes[child].segment.first()?;
        let (prev, next) = {
            let node = &self.nodes[child];
            (node.prev, node.next)
        };

        if let Some(prev) = prev {
            self.nodes[prev].next = next;
        }
        if let Some(next) = next {
            self.nodes[next].prev = prev;
        }

        let level = self.nodes[parent].children.as_mut()?;
        let removed = level.index.delete_child(key);
        debug_assert_eq!(removed, Some(child));
        match (prev, next) {
            (None, None) => self.nodes[parent].children = None,
            (None, Some(next)) => level.head = next,
            (Some(prev), None) => level.tail = prev,
            (Some(_), Some(_)) => {}
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(node = child.0, parent = parent.0, "unlinked node");

        self.nodes.free(child)
    }

    /// Splits `id` so that it keeps the first `offset` bytes of its segment, and hands everything
    /// else (the rest of the segment, its value and its children) to a new sole child.
    /// Returns the new child.
    pub(crate) fn split(&mut self, id: NodeId, offset: usize) -> Result<NodeId, TreeError> {
        let segment = &self.nodes[id].segment;
        if offset == 0 || offset >= segment.len() || !segment.as_str().is_char_boundary(offset) {
            return Err(TreeError::InvalidSplit {
                offset,
                len: segment.len(),
            });
        }

        let tail_segment = segment.partial_after(offset);
        let head_segment = segment.partial_before(offset);

        let node = &mut self.nodes[id];
        node.segment = head_segment;
        let value = node.value.take();
        let children = node.children.take();

        let tail = self.nodes.add(|_| Node {
            segment: tail_segment,
            value,
            children,
            prev: None,
            next: None,
        });
        self.append_child(id, tail);

        #[cfg(feature = "tracing")]
        tracing::trace!(node = id.0, child = tail.0, offset, "split node");

        Ok(tail)
    }

    /// Collapses `id` with its only child, if `id` holds no value and has exactly one child.
    /// The merged node keeps `id`'s slot and first code point, so `id`'s own level index is
    /// unaffected. Returns whether a merge happened.
    pub(crate) fn merge_with_only_child(&mut self, id: NodeId) -> bool {
        let node = &self.nodes[id];
        if node.value.is_some() || node.num_children() != 1 {
            return false;
        }
        let Some(child_id) = node.first_child() else {
            return false;
        };
        let Some(child) = self.nodes.free(child_id) else {
            return false;
        };

        let node = &mut self.nodes[id];
        node.segment = node.segment.partial_extended_with(&child.segment);
        node.value = child.value;
        node.children = child.children;

        #[cfg(feature = "tracing")]
        tracing::trace!(node = id.0, child = child_id.0, "merged node with only child");

        true
    }
}

impl<V> Index<NodeId> for NodeStore<V> {
    type Output = Node<V>;

    #[inline]
    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<V> IndexMut<NodeId> for NodeStore<V> {
    #[inline]
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        &mut self.nodes[index]
    }
}

/// A read-only view of one node, for walking the tree's structure from outside.
///
/// Views borrow the tree, so they can only exist while the tree (or a read guard over it) is
/// held.
pub struct NodeRef<'a, V> {
    store: &'a NodeStore<V>,
    id: NodeId,
    is_root: bool,
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(store: &'a NodeStore<V>, id: NodeId, is_root: bool) -> Self {
        Self { store, id, is_root }
    }

    fn node(&self) -> &'a Node<V> {
        &self.store[self.id]
    }

    fn view(&self, id: NodeId) -> NodeRef<'a, V> {
        NodeRef::new(self.store, id, false)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// True for the implicit root, the only node with an empty segment.
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn segment(&self) -> &'a str {
        self.node().segment.as_str()
    }

    pub fn value(&self) -> Option<&'a V> {
        self.node().value.as_ref()
    }

    pub fn first_child(&self) -> Option<NodeRef<'a, V>> {
        self.node().first_child().map(|id| self.view(id))
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'a, V>> {
        self.node().next.map(|id| self.view(id))
    }

    pub fn num_children(&self) -> usize {
        self.node().num_children()
    }

    /// Walks the sibling chain of this node's children, in chain order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, V>> + 'a {
        let store = self.store;
        let mut cursor = self.node().first_child();
        std::iter::from_fn(move || {
            let id = cursor?;
            cursor = store[id].next;
            Some(NodeRef::new(store, id, false))
        })
    }

    /// The index over this node's children, keyed by first code point. Iteration order is
    /// unspecified.
    pub fn index(&self) -> Vec<(char, NodeRef<'a, V>)> {
        match self.node().children.as_ref() {
            None => vec![],
            Some(level) => level
                .index
                .iter()
                .map(|(key, id)| (key, self.view(*id)))
                .collect(),
        }
    }
}

impl<V> Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[prefix: {:?}]", self.segment())?;
        if let Some(child) = self.first_child() {
            write!(f, " [child: {:?}]", child.segment())?;
        }
        if let Some(next) = self.next_sibling() {
            write!(f, " [next: {:?}]", next.segment())?;
        }
        if self.value().is_some() {
            write!(f, " [value]")?;
        }
        let mut index = self.index();
        if !index.is_empty() {
            index.sort_by_key(|(key, _)| *key);
            write!(f, " [idx:")?;
            for (key, node) in index {
                write!(f, " ({}->{:?})", key, node.segment())?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
