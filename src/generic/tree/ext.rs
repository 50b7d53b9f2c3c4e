use crate::{
	generic::node::{Color, Key, Node, Side, NIL},
	Error, ValidityError,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::cmp::Ordering;

use super::RbTree;

/// Extended API.
///
/// Low-level read-only access to the nodes of a tree, addressed by their
/// identifier in the underlying slab. [`NIL`] is accepted wherever a node
/// identifier is expected and stands for an empty subtree.
pub trait RbTreeExt<V> {
	/// Identifier of the root node, or [`NIL`] if the tree is empty.
	fn root_id(&self) -> usize;

	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is [`NIL`] or out of bounds.
	fn node(&self, id: usize) -> &Node<V>;

	/// Color of the given node. The sentinel is black.
	#[inline]
	fn color(&self, id: usize) -> Color {
		if id == NIL {
			Color::Black
		} else {
			self.node(id).color()
		}
	}

	#[inline]
	fn is_red(&self, id: usize) -> bool {
		self.color(id) == Color::Red
	}

	#[inline]
	fn is_black(&self, id: usize) -> bool {
		self.color(id) == Color::Black
	}

	#[inline]
	fn child(&self, id: usize, side: Side) -> usize {
		self.node(id).child(side)
	}

	/// Identifier of the node holding `key` in the subtree `id`, or [`NIL`].
	fn address_in(&self, key: Key, id: usize) -> usize;

	/// Identifier of the node with the smallest key of the subtree `id`.
	fn min_in(&self, id: usize) -> usize;

	/// Identifier of the node with the greatest key of the subtree `id`.
	fn max_in(&self, id: usize) -> usize;

	/// Identifier of the node with the smallest key greater than `key` in the subtree `id`.
	fn next_in(&self, key: Key, id: usize) -> usize;

	/// Identifier of the node with the greatest key smaller than `key` in the subtree `id`.
	fn prev_in(&self, key: Key, id: usize) -> usize;

	/// Number of nodes in the subtree `id`.
	fn size_in(&self, id: usize) -> usize;

	/// Validate the given subtree, whose keys must lie strictly between `min` and `max`.
	///
	/// Returns the number of black nodes on each path from `id` to a sentinel.
	fn validate_node(&self, id: usize, min: Option<Key>, max: Option<Key>) -> Result<usize, ValidityError>;
}

pub trait RbTreeExtMut<V> {
	fn set_root_id(&mut self, id: usize);

	/// Get the node associated to the given `id` mutabily.
	///
	/// Panics if `id` is [`NIL`] or out of bounds.
	fn node_mut(&mut self, id: usize) -> &mut Node<V>;

	/// Allocate a node from the pool.
	fn allocate_node(&mut self, node: Node<V>) -> Result<usize, Error>;

	/// Give the node back to the pool and return the value it was holding.
	fn release_node(&mut self, id: usize) -> Option<V>;
}

impl<V, C: Slab<Node<V>>> RbTreeExt<V> for RbTree<V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn root_id(&self) -> usize {
		self.root
	}

	#[inline]
	fn node(&self, id: usize) -> &Node<V> {
		self.pool.node(id)
	}

	fn address_in(&self, key: Key, mut id: usize) -> usize {
		while id != NIL {
			let node = self.node(id);
			id = match key.cmp(&node.key()) {
				Ordering::Less => node.left(),
				Ordering::Greater => node.right(),
				Ordering::Equal => break,
			}
		}

		id
	}

	fn min_in(&self, mut id: usize) -> usize {
		if id != NIL {
			loop {
				match self.node(id).left() {
					NIL => break,
					left => id = left,
				}
			}
		}

		id
	}

	fn max_in(&self, mut id: usize) -> usize {
		if id != NIL {
			loop {
				match self.node(id).right() {
					NIL => break,
					right => id = right,
				}
			}
		}

		id
	}

	fn next_in(&self, key: Key, mut id: usize) -> usize {
		// last node where the search went left.
		let mut candidate = NIL;

		while id != NIL {
			let node = self.node(id);
			match key.cmp(&node.key()) {
				Ordering::Less => {
					candidate = id;
					id = node.left()
				}
				Ordering::Greater => id = node.right(),
				Ordering::Equal => {
					if node.right() != NIL {
						return self.min_in(node.right());
					}

					break;
				}
			}
		}

		candidate
	}

	fn prev_in(&self, key: Key, mut id: usize) -> usize {
		// last node where the search went right.
		let mut candidate = NIL;

		while id != NIL {
			let node = self.node(id);
			match key.cmp(&node.key()) {
				Ordering::Greater => {
					candidate = id;
					id = node.right()
				}
				Ordering::Less => id = node.left(),
				Ordering::Equal => {
					if node.left() != NIL {
						return self.max_in(node.left());
					}

					break;
				}
			}
		}

		candidate
	}

	fn size_in(&self, id: usize) -> usize {
		if id == NIL {
			0
		} else {
			let node = self.node(id);
			1 + self.size_in(node.left()) + self.size_in(node.right())
		}
	}

	fn validate_node(&self, id: usize, min: Option<Key>, max: Option<Key>) -> Result<usize, ValidityError> {
		if id == NIL {
			return Ok(0);
		}

		let node = self.node(id);
		if node.is_vacant() {
			return Err(ValidityError::Vacant(id));
		}

		let key = node.key();
		if min.map_or(false, |min| key <= min) || max.map_or(false, |max| key >= max) {
			return Err(ValidityError::Unsorted { key });
		}

		if node.is_red() {
			for child in [node.left(), node.right()] {
				if self.is_red(child) {
					return Err(ValidityError::ConsecutiveReds {
						parent: key,
						child: self.node(child).key(),
					});
				}
			}
		}

		let left = self.validate_node(node.left(), min, Some(key))?;
		let right = self.validate_node(node.right(), Some(key), max)?;
		if left != right {
			return Err(ValidityError::UnbalancedBlacks { key, left, right });
		}

		Ok(if node.is_black() { left + 1 } else { left })
	}
}

impl<V, C: SlabMut<Node<V>>> RbTreeExtMut<V> for RbTree<V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn set_root_id(&mut self, id: usize) {
		self.root = id
	}

	#[inline]
	fn node_mut(&mut self, id: usize) -> &mut Node<V> {
		self.pool.node_mut(id)
	}

	#[inline]
	fn allocate_node(&mut self, node: Node<V>) -> Result<usize, Error> {
		self.pool.allocate(node)
	}

	#[inline]
	fn release_node(&mut self, id: usize) -> Option<V> {
		self.pool.free(id)
	}
}
