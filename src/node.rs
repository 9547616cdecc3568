use std::fmt::{self, Debug, Formatter};

use crate::error::Error;

/// A node of the tree.
///
/// Leaves keep their values in `keys` and have no children. Internal nodes keep
/// their separators in `keys` and own exactly `keys.len() + 1` children, where
/// `children[i]` holds the values `<= keys[i]` (and `> keys[i - 1]`).
pub struct Node<T> {
    pub keys: Vec<T>,
    pub children: Vec<Node<T>>,
}

impl<T> Node<T> {
    #[must_use]
    pub fn leaf(values: Vec<T>) -> Node<T> {
        Node {
            keys: values,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn internal(separators: Vec<T>, children: Vec<Node<T>>) -> Node<T> {
        debug_assert_eq!(separators.len() + 1, children.len());
        Node {
            keys: separators,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below and including this node.
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .fold(0, |max, child| max.max(child.height()))
            + 1
    }

    /// Number of values stored in the leaves of this subtree.
    pub fn len(&self) -> usize {
        if self.is_leaf() {
            return self.keys.len();
        }
        self.children.iter().map(Node::len).sum()
    }

    // Moves the leaf values of this subtree into `out`, left to right.
    pub fn drain_into(self, out: &mut Vec<T>) {
        if self.children.is_empty() {
            out.extend(self.keys);
            return;
        }
        for child in self.children {
            child.drain_into(out);
        }
    }
}

impl<T: Ord + Clone> Node<T> {
    /// Builds a subtree over sorted, duplicate-free `values`.
    ///
    /// Up to `branching_factor - 1` values fit in a single leaf. Larger inputs
    /// are cut into `branching_factor` contiguous slices of `len / branching_factor`
    /// values, the last slice taking the remainder. The last value of every
    /// slice but the final one becomes a separator, and stays in its slice.
    #[must_use]
    pub fn build(values: &[T], branching_factor: usize) -> Node<T> {
        if values.len() < branching_factor {
            return Node::leaf(values.to_vec());
        }

        let slice_len = values.len() / branching_factor;
        let mut separators = Vec::with_capacity(branching_factor - 1);
        let mut children = Vec::with_capacity(branching_factor);
        for i in 0..branching_factor {
            let start = slice_len * i;
            let end = if i == branching_factor - 1 {
                values.len() - 1
            } else {
                start + slice_len - 1
            };
            if i < branching_factor - 1 {
                separators.push(values[end].clone());
            }
            children.push(Node::build(&values[start..=end], branching_factor));
        }
        Node::internal(separators, children)
    }

    // Index of the child responsible for `value`: the first separator not
    // smaller than the value, or the rightmost child.
    fn route(&self, value: &T) -> usize {
        self.keys
            .iter()
            .position(|separator| value <= separator)
            .unwrap_or(self.keys.len())
    }

    pub fn insert(&mut self, value: T) -> Result<(), Error> {
        if self.is_leaf() {
            return match self.keys.binary_search(&value) {
                Ok(_) => Err(Error::DuplicateValue),
                Err(pos) => {
                    self.keys.insert(pos, value);
                    Ok(())
                }
            };
        }
        let child = self.route(&value);
        self.children[child].insert(value)
    }

    pub fn remove(&mut self, value: &T) -> Result<(), Error> {
        if self.is_leaf() {
            return match self.keys.binary_search(value) {
                Ok(pos) => {
                    self.keys.remove(pos);
                    Ok(())
                }
                Err(_) => Err(Error::ValueNotFound),
            };
        }
        let child = self.route(value);
        self.children[child].remove(value)
    }

    pub fn find(&self, value: &T) -> bool {
        if self.is_leaf() {
            return self.keys.binary_search(value).is_ok();
        }
        self.children[self.route(value)].find(value)
    }

    pub fn collect_into(&self, out: &mut Vec<T>) {
        if self.is_leaf() {
            out.extend_from_slice(&self.keys);
            return;
        }
        for child in &self.children {
            child.collect_into(out);
        }
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node::leaf(Vec::new())
    }
}

impl<T: Debug> Node<T> {
    pub fn fmt_depth(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        f.write_str(&"  ".repeat(depth))?;
        if self.is_leaf() {
            return writeln!(f, "values: {:?}", self.keys);
        }
        writeln!(f, "separators: {:?}", self.keys)?;
        for child in &self.children {
            child.fmt_depth(f, depth + 1)?;
        }
        Ok(())
    }
}

/// In-order iterator over the values of an [`MTree`](crate::MTree).
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: std::slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Node<T>) -> Self {
        let empty: &'a [T] = &[];
        Iter {
            stack: vec![root],
            current: empty.iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(value) = self.current.next() {
                return Some(value);
            }
            let node = self.stack.pop()?;
            if node.is_leaf() {
                self.current = node.keys.iter();
            } else {
                self.stack.extend(node.children.iter().rev());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::error::Error;

    fn leaves(node: &Node<i32>) -> Vec<Vec<i32>> {
        if node.is_leaf() {
            return vec![node.keys.clone()];
        }
        node.children.iter().flat_map(leaves).collect()
    }

    #[test]
    fn build_small_input_is_a_leaf() {
        let node = Node::build(&[1, 2], 3);
        assert!(node.is_leaf());
        assert_eq!(node.keys, vec![1, 2]);
        assert_eq!(node.height(), 1);
    }

    #[test]
    fn build_slices() {
        // 9 values with a branching factor of 3: D = 3, and every 3-value slice
        // is still too large for a leaf, so it is split once more
        let values: Vec<i32> = (1..=9).collect();
        let node = Node::build(&values, 3);
        assert_eq!(node.keys, vec![3, 6]);
        assert_eq!(node.children[0].keys, vec![1, 2]);
        assert_eq!(node.children[1].keys, vec![4, 5]);
        assert_eq!(node.children[2].keys, vec![7, 8]);
        assert_eq!(leaves(&node), values.iter().map(|&v| vec![v]).collect::<Vec<_>>());
        assert_eq!(node.height(), 3);

        // 10 values: the last slice absorbs the remainder
        let values: Vec<i32> = (1..=10).collect();
        let node = Node::build(&values, 3);
        assert_eq!(node.keys, vec![3, 6]);
        assert_eq!(node.children.len(), 3);
        assert_eq!(node.children[2].keys, vec![7, 8]);
        assert_eq!(leaves(&node).last(), Some(&vec![9, 10]));

        // 4 values fit in the leaves of a branching factor of 5
        let node = Node::build(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10], 5);
        assert_eq!(node.keys, vec![2, 4, 6, 8]);
        assert_eq!(
            leaves(&node),
            vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8], vec![9, 10]]
        );
        assert_eq!(node.height(), 2);
    }

    #[test]
    fn build_degenerate_slices() {
        // size == M gives single-value slices
        let node = Node::build(&[10, 20, 30, 40], 4);
        assert_eq!(node.keys, vec![10, 20, 30]);
        assert_eq!(leaves(&node), vec![vec![10], vec![20], vec![30], vec![40]]);

        // Branching factor 2 always splits in halves (last half larger)
        let node = Node::build(&[1, 2, 3, 4, 5], 2);
        assert_eq!(node.keys, vec![2]);
        assert_eq!(node.children[1].keys, vec![3]);
        assert_eq!(leaves(&node), vec![vec![1], vec![2], vec![3], vec![4], vec![5]]);
    }

    #[test]
    fn route_separator_values_to_their_own_child() {
        let values: Vec<i32> = (1..=10).collect();
        let mut node = Node::build(&values, 5);

        // 2 and 4 are separators, but also live in the first and second leaf
        assert!(node.find(&2));
        assert_eq!(node.insert(2), Err(Error::DuplicateValue));
        assert_eq!(node.remove(&4), Ok(()));
        assert!(!node.find(&4));
        assert_eq!(node.remove(&4), Err(Error::ValueNotFound));
        assert_eq!(node.keys, vec![2, 4, 6, 8]);
        assert_eq!(leaves(&node)[1], vec![3]);

        // The stale separator still bounds its child
        assert_eq!(node.insert(4), Ok(()));
        assert_eq!(leaves(&node)[1], vec![3, 4]);

        // Values above the last separator go to the rightmost leaf
        assert_eq!(node.insert(42), Ok(()));
        assert_eq!(leaves(&node)[4], vec![9, 10, 42]);
    }

    #[test]
    fn len_and_drain() {
        let values: Vec<i32> = (0..50).collect();
        let node = Node::build(&values, 4);
        assert_eq!(node.len(), 50);

        let mut out = Vec::new();
        node.drain_into(&mut out);
        assert_eq!(out, values);
    }
}
