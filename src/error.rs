use crate::generic::node::Key;
use thiserror::Error;

/// Error returned by the fallible operations of the tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum Error {
	/// The node pool reached its configured limit.
	#[error("node pool exhausted ({limit} nodes)")]
	Exhausted { limit: usize },
}

/// Invariant violation found by [`RbTree::validate`](crate::generic::RbTree::validate).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum ValidityError {
	#[error("root node {0} is red")]
	RedRoot(Key),

	#[error("red node {parent} has a red child {child}")]
	ConsecutiveReds { parent: Key, child: Key },

	#[error("unbalanced black heights under node {key}: left {left}, right {right}")]
	UnbalancedBlacks { key: Key, left: usize, right: usize },

	#[error("node {key} is out of order")]
	Unsorted { key: Key },

	#[error("node {0} is vacant")]
	Vacant(usize),
}
