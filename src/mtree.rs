use std::fmt::{self, Debug, Display, Formatter};

use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::{
    error::Error,
    node::{Iter, Node},
    stats::TreeStats,
};

pub const DEFAULT_BRANCHING_FACTOR: usize = 3;

/// An M-tree over `f64` values.
pub type FloatMTree = MTree<OrderedFloat<f64>>;

/// A multiway search tree storing a set of unique values.
///
/// Every internal node holds up to `branching_factor - 1` separators and one
/// child per separator plus a rightmost child. Inserts and removals only touch
/// a single leaf and never rebalance: leaves may grow past their capacity
/// until [`MTree::rebuild`] redistributes every value.
pub struct MTree<T> {
    branching_factor: usize,
    root: Node<T>,
}

impl<T: Ord + Clone> MTree<T> {
    /// Creates an empty tree, or `None` if `branching_factor < 2`.
    #[must_use]
    pub fn new(branching_factor: usize) -> Option<Self> {
        MTree::build(Vec::new(), branching_factor)
    }

    /// Builds a tree over `values`, which must be sorted and free of duplicates.
    ///
    /// Returns `None` if `branching_factor < 2`.
    #[must_use]
    pub fn build(values: Vec<T>, branching_factor: usize) -> Option<Self> {
        if branching_factor < 2 {
            return None;
        }
        debug_assert!(
            values.windows(2).all(|pair| pair[0] < pair[1]),
            "values must be sorted and unique"
        );
        let tree = MTree {
            branching_factor,
            root: Node::build(&values, branching_factor),
        };
        debug!(
            values = values.len(),
            branching_factor,
            height = tree.height(),
            "built tree"
        );
        Some(tree)
    }

    /// Inserts `value` into its leaf.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateValue`] if the tree already holds `value`.
    pub fn insert(&mut self, value: T) -> Result<(), Error> {
        let result = self.root.insert(value);
        trace!(?result, "insert");
        result
    }

    /// Removes `value` from its leaf. Separators are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValueNotFound`] if the tree does not hold `value`.
    pub fn remove(&mut self, value: &T) -> Result<(), Error> {
        let result = self.root.remove(value);
        trace!(?result, "remove");
        result
    }

    #[must_use]
    pub fn find(&self, value: &T) -> bool {
        self.root.find(value)
    }

    /// Rebuilds the whole tree from its values, restoring leaf capacities.
    pub fn rebuild(&mut self) {
        let mut values = Vec::new();
        std::mem::take(&mut self.root).drain_into(&mut values);
        let collected = values.len();
        values.sort();
        values.dedup();

        self.root = Node::build(&values, self.branching_factor);
        debug!(
            collected,
            values = values.len(),
            height = self.height(),
            "rebuilt tree"
        );
    }

    /// Returns the values of the tree in ascending order.
    #[must_use]
    pub fn collect(&self) -> Vec<T> {
        let mut values = Vec::new();
        self.root.collect_into(&mut values);
        values
    }
}

impl<T> MTree<T> {
    #[must_use]
    pub fn branching_factor(&self) -> usize {
        self.branching_factor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of levels of the tree. A lone leaf, even an empty one, is 1.
    #[must_use]
    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats::of(&self.root, self.branching_factor)
    }
}

impl<T> Default for MTree<T> {
    fn default() -> Self {
        MTree {
            branching_factor: DEFAULT_BRANCHING_FACTOR,
            root: Node::default(),
        }
    }
}

impl<'a, T> IntoIterator for &'a MTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Debug> Display for MTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.root.fmt_depth(f, 0)
    }
}
