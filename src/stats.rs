//! Structural statistics for a tree.
//!
//! Besides sizing information, the walk counts violations of the tree's structural rules, which
//! makes it useful as a consistency check in tests.

use crate::mapping::NodeMapping;
use crate::node::NodeId;
use crate::partials::Partial;
use crate::tree::RadixTree;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TreeStats {
    /// Every live node, the root included.
    pub num_nodes: usize,
    pub num_values: usize,
    /// Nodes that have children.
    pub num_branches: usize,
    /// Non-root nodes without a value and with fewer than two children. Always 0 for a tree only
    /// changed through its public operations.
    pub redundant_branches: usize,
    /// Levels whose index disagrees with their sibling chain.
    pub index_mismatches: usize,
    /// Arena slots still live but not reachable from the root.
    pub leaked_nodes: usize,
    pub hashed_indexes: usize,
    pub keyed_indexes: usize,
    /// Depth of the deepest node, the root being at depth 0.
    pub max_height: usize,
    pub segment_bytes: usize,
}

impl<V> TreeStatsTrait for RadixTree<V> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut stack: Vec<(NodeId, usize)> = vec![(self.root, 0)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.store[id];
            stats.num_nodes += 1;
            stats.max_height = stats.max_height.max(depth);
            stats.segment_bytes += node.segment.len();
            if node.value.is_some() {
                stats.num_values += 1;
            }
            if id != self.root && node.value.is_none() && node.num_children() < 2 {
                stats.redundant_branches += 1;
            }

            let Some(level) = node.children.as_ref() else {
                continue;
            };
            stats.num_branches += 1;
            if level.index.is_hashed() {
                stats.hashed_indexes += 1;
            } else {
                stats.keyed_indexes += 1;
            }

            let mut chain_len = 0;
            let mut consistent = true;
            let mut last = None;
            let mut cursor = Some(level.head);
            while let Some(child) = cursor {
                let child_node = &self.store[child];
                chain_len += 1;
                let indexed = child_node
                    .segment
                    .first()
                    .and_then(|key| level.index.seek_child(key));
                consistent &= indexed == Some(&child);
                stack.push((child, depth + 1));
                last = Some(child);
                cursor = child_node.next;
            }
            consistent &= chain_len == level.index.num_children() && last == Some(level.tail);
            if !consistent {
                stats.index_mismatches += 1;
            }
        }
        stats.leaked_nodes = self.store.len().saturating_sub(stats.num_nodes);
        stats
    }
}

impl<V> RadixTree<V> {
    /// Walk the whole tree and gather [`TreeStats`].
    pub fn stats(&self) -> TreeStats {
        self.get_tree_stats()
    }
}
