//! Insertion and deletion with red-black restoration.
//!
//! Both operations descend recursively and return the new root of each
//! visited subtree, so that restructuring is done bottom-up, one level at a
//! time, while the recursion unwinds. The only primitive mutations are
//! rotations and color flips.
use crate::{
	generic::node::{Color, Key, Node, Side, NIL},
	Error,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, SlabMut};
use std::cmp::Ordering;

use super::{RbTree, RbTreeExt, RbTreeExtMut};

/// Outcome of a removal in a subtree.
pub(super) struct Removal<V> {
	/// New root of the subtree.
	pub root: usize,

	/// The subtree lost one black node on every path.
	pub defect: bool,

	/// Removed value.
	pub value: Option<V>,
}

impl<V> Removal<V> {
	#[inline]
	fn none() -> Removal<V> {
		Removal {
			root: NIL,
			defect: false,
			value: None,
		}
	}
}

impl<V, C: SlabMut<Node<V>>> RbTree<V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Insert `key` in the subtree `id`.
	///
	/// Returns the new root of the subtree and the value previously associated to `key`.
	pub(super) fn insert_in(&mut self, id: usize, key: Key, value: V) -> Result<(usize, Option<V>), Error> {
		if id == NIL {
			let id = self.allocate_node(Node::new(key, value, NIL, NIL, Color::Red))?;
			return Ok((id, None));
		}

		let node = self.node_mut(id);
		let side = match key.cmp(&node.key()) {
			Ordering::Less => Side::Left,
			Ordering::Greater => Side::Right,
			Ordering::Equal => return Ok((id, node.value_slot().replace(value))),
		};

		let child = self.child(id, side);
		let (child, old_value) = self.insert_in(child, key, value)?;
		self.set_child(id, side, child);

		match old_value {
			Some(old_value) => Ok((id, Some(old_value))),
			None => Ok((self.insert_restore(id, key), None)),
		}
	}

	/// Restore the color invariants at `v` after the insertion of `key` under it.
	fn insert_restore(&mut self, mut v: usize, key: Key) -> usize {
		if self.is_red(v) {
			return v;
		}

		let side = side_of(key, self.node(v).key());
		let w = self.child(v, side);
		if self.is_red(w) {
			let inner = side_of(key, self.node(w).key());
			if self.is_red(self.child(w, inner)) {
				if self.is_red(self.child(v, side.opposite())) {
					// red uncle: push the violation up.
					self.flip_both(v)
				} else {
					if inner != side {
						let w = self.rotate(w, side);
						self.set_child(v, side, w)
					}

					self.flip_child(v, side);
					v = self.rotate(v, side.opposite())
				}
			}
		}

		v
	}

	/// Remove `key` from the subtree `v`.
	pub(super) fn delete_in(&mut self, v: usize, key: Key) -> Removal<V> {
		if v == NIL {
			return Removal::none();
		}

		let node = self.node(v);
		let (left, right) = (node.left(), node.right());
		match key.cmp(&node.key()) {
			Ordering::Equal => {
				if left == NIL {
					self.delete_basis(v, right)
				} else if right == NIL {
					self.delete_basis(v, left)
				} else {
					let removal = self.delete_min(right, v);
					self.set_child(v, Side::Right, removal.root);
					self.delete_restore(v, Side::Right, removal)
				}
			}
			ordering => {
				let (side, child) = if ordering == Ordering::Less {
					(Side::Left, left)
				} else {
					(Side::Right, right)
				};

				let removal = self.delete_in(child, key);
				self.set_child(v, side, removal.root);
				self.delete_restore(v, side, removal)
			}
		}
	}

	/// Remove the minimum of the subtree `w`, moving its entry into `target`.
	///
	/// The value of `target` is the one returned by the removal.
	fn delete_min(&mut self, w: usize, target: usize) -> Removal<V> {
		let left = self.child(w, Side::Left);
		if left != NIL {
			let removal = self.delete_min(left, target);
			self.set_child(w, Side::Left, removal.root);
			return self.delete_restore(w, Side::Left, removal);
		}

		let key = self.node(w).key();
		let value = self.node_mut(w).value_slot().take();

		let target_node = self.node_mut(target);
		target_node.set_key(key);
		let target_value = std::mem::replace(target_node.value_slot(), value);
		*self.node_mut(w).value_slot() = target_value;

		let right = self.child(w, Side::Right);
		self.delete_basis(w, right)
	}

	/// Splice out `v`, which has at most one child `w`.
	fn delete_basis(&mut self, v: usize, w: usize) -> Removal<V> {
		let defect = if self.is_red(v) {
			false
		} else if self.is_black(w) {
			true
		} else {
			self.flip(w);
			false
		};

		Removal {
			root: w,
			defect,
			value: self.release_node(v),
		}
	}

	/// Repair the defect, if any, left by a removal in the `side` subtree of `v`.
	fn delete_restore(&mut self, v: usize, side: Side, removal: Removal<V>) -> Removal<V> {
		let (root, defect) = if removal.defect {
			self.repair(v, side)
		} else {
			(v, false)
		};

		Removal {
			root,
			defect,
			value: removal.value,
		}
	}

	/// Repair a missing black node on the `side` subtree of `v`.
	///
	/// Returns the new root of the subtree and whether the defect is passed on to the parent.
	fn repair(&mut self, mut v: usize, side: Side) -> (usize, bool) {
		let w = self.child(v, side);
		if self.is_red(w) {
			self.flip(w);
			return (v, false);
		}

		let other = side.opposite();
		let u = self.child(v, other);
		if self.is_red(u) {
			// turn the red sibling into the parent, then repair one level down
			// where the sibling is black.
			self.flip_child(v, other);
			v = self.rotate(v, side);

			let inner = self.child(v, side);
			let (inner, defect) = self.repair(inner, side);
			self.set_child(v, side, inner);
			if defect {
				self.flip(inner)
			}

			return (v, false);
		}

		if self.is_black(self.child(u, Side::Left)) && self.is_black(self.child(u, Side::Right)) {
			self.flip(u);
			return (v, true);
		}

		if self.is_red(self.child(u, side)) {
			let u = self.rotate(u, other);
			self.set_child(v, other, u);
			self.flip_child(u, other);
		}

		v = self.rotate(v, side);
		self.flip_child(v, side);
		let outer = self.child(v, other);
		self.flip(outer);
		(v, false)
	}

	#[inline]
	fn set_child(&mut self, id: usize, side: Side, child: usize) {
		self.node_mut(id).set_child(side, child)
	}

	#[inline]
	pub(super) fn paint(&mut self, id: usize, color: Color) {
		debug_assert!(id != NIL, "the sentinel is immutable");
		self.node_mut(id).set_color(color)
	}

	/// Rotate `v` toward `side`.
	///
	/// The child of `v` on the opposite side takes its place, which is returned.
	fn rotate(&mut self, v: usize, side: Side) -> usize {
		let w = self.child(v, side.opposite());
		let inner = self.child(w, side);
		self.set_child(v, side.opposite(), inner);
		self.set_child(w, side, v);
		w
	}

	/// Toggle the color of `v`.
	#[inline]
	fn flip(&mut self, v: usize) {
		let color = self.color(v).toggle();
		self.paint(v, color)
	}

	/// Exchange the colors of `v` and its child on `side`.
	fn flip_child(&mut self, v: usize, side: Side) {
		let w = self.child(v, side);
		let (v_color, w_color) = (self.color(v), self.color(w));
		self.paint(v, w_color);
		self.paint(w, v_color)
	}

	/// Give the color of `v` to both its children, and take the color of its left child.
	fn flip_both(&mut self, v: usize) {
		let color = self.color(v);
		let (left, right) = (self.child(v, Side::Left), self.child(v, Side::Right));
		let left_color = self.color(left);
		self.paint(v, left_color);
		self.paint(left, color);
		self.paint(right, color)
	}
}

#[inline]
fn side_of(key: Key, pivot: Key) -> Side {
	if key < pivot {
		Side::Left
	} else {
		Side::Right
	}
}
