//! An M-ary search tree over ordered values.
//!
//! The tree is built from a sorted sequence, accepts ordered inserts and
//! removals that each touch a single leaf, and is rebalanced only through an
//! explicit [`MTree::rebuild`].
//!
//! ```
//! use mtree::{Error, MTree};
//!
//! let mut tree = MTree::build((1..=9).collect(), 3).expect("Invalid fanout");
//! tree.insert(10).unwrap();
//! assert_eq!(tree.insert(10), Err(Error::DuplicateValue));
//! tree.remove(&5).unwrap();
//! assert!(!tree.find(&5));
//! tree.rebuild();
//! assert_eq!(tree.collect(), vec![1, 2, 3, 4, 6, 7, 8, 9, 10]);
//! ```

mod error;
#[allow(clippy::module_name_repetitions)]
mod mtree;
mod node;
mod stats;

pub use error::Error;
pub use mtree::{FloatMTree, MTree, DEFAULT_BRANCHING_FACTOR};
pub use node::Iter;
pub use ordered_float::OrderedFloat;
pub use stats::TreeStats;
