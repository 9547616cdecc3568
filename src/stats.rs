use conv::ConvUtil;

use crate::node::Node;

/// Shape of an [`MTree`](crate::MTree), as reported by
/// [`MTree::stats`](crate::MTree::stats).
///
/// Inserts never split leaves, so `overflowing_leaves` and `largest_leaf` grow
/// with skewed workloads until the next [`rebuild`](crate::MTree::rebuild).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub height: usize,
    pub values: usize,
    pub largest_leaf: usize,
    /// Leaves holding more than `branching_factor - 1` values.
    pub overflowing_leaves: usize,
    /// Stored values over the nominal leaf capacity (`leaves * (branching_factor - 1)`).
    pub fill_ratio: f64,
}

impl TreeStats {
    pub(crate) fn of<T>(root: &Node<T>, branching_factor: usize) -> TreeStats {
        let mut stats = TreeStats {
            nodes: 0,
            leaves: 0,
            height: 0,
            values: 0,
            largest_leaf: 0,
            overflowing_leaves: 0,
            fill_ratio: 0.0,
        };

        let leaf_capacity = branching_factor - 1;
        let mut queue = vec![(root, 1)];
        while let Some((node, depth)) = queue.pop() {
            stats.nodes += 1;
            stats.height = stats.height.max(depth);
            if node.is_leaf() {
                let len = node.keys.len();
                stats.leaves += 1;
                stats.values += len;
                stats.largest_leaf = stats.largest_leaf.max(len);
                if len > leaf_capacity {
                    stats.overflowing_leaves += 1;
                }
                continue;
            }
            for child in &node.children {
                queue.push((child, depth + 1));
            }
        }

        // Rounded to the nearest f64; large counts only lose precision.
        let capacity = stats
            .leaves
            .saturating_mul(leaf_capacity)
            .approx_as::<f64>()
            .unwrap_or(f64::MAX);
        let values = stats.values.approx_as::<f64>().unwrap_or(f64::MAX);
        stats.fill_ratio = values / capacity;
        stats
    }
}
