use std::fmt;

pub mod pool;

pub use pool::{Pool, PoolConfig, BLOCK_SIZE};

/// Key type of the tree.
pub type Key = i64;

/// Sentinel index.
///
/// Stands for every missing child and for the root of an empty tree.
/// It is never stored in the slab, and is always black.
pub const NIL: usize = usize::MAX;

/// Node color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
	Red,
	Black,
}

impl Color {
	#[inline]
	pub fn toggle(self) -> Color {
		match self {
			Color::Red => Color::Black,
			Color::Black => Color::Red,
		}
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Color::Red => write!(f, "red"),
			Color::Black => write!(f, "black"),
		}
	}
}

/// Child side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
	Left,
	Right,
}

impl Side {
	#[inline]
	pub fn opposite(self) -> Side {
		match self {
			Side::Left => Side::Right,
			Side::Right => Side::Left,
		}
	}
}

/// Red-black tree node.
///
/// A node is either *live*, in which case it holds a value and its children
/// are node indices (or [`NIL`]), or *vacant*, in which case it sits in the
/// pool and its right child index is the next vacant node of the free-list.
#[derive(Clone, Debug)]
pub struct Node<V> {
	key: Key,
	value: Option<V>,
	left: usize,
	right: usize,
	color: Color,
}

impl<V> Node<V> {
	#[inline]
	pub fn new(key: Key, value: V, left: usize, right: usize, color: Color) -> Node<V> {
		Node {
			key,
			value: Some(value),
			left,
			right,
			color,
		}
	}

	/// Create a vacant node, linked to the `next` vacant node.
	#[inline]
	pub(crate) fn vacant(next: usize) -> Node<V> {
		Node {
			key: 0,
			value: None,
			left: NIL,
			right: next,
			color: Color::Black,
		}
	}

	/// Turn this node into a vacant node linked to `next`.
	///
	/// Returns the value the node was holding.
	#[inline]
	pub(crate) fn vacate(&mut self, next: usize) -> Option<V> {
		self.key = 0;
		self.left = NIL;
		self.right = next;
		self.color = Color::Black;
		self.value.take()
	}

	#[inline]
	pub fn is_vacant(&self) -> bool {
		self.value.is_none()
	}

	#[inline]
	pub fn key(&self) -> Key {
		self.key
	}

	/// Modifying a key in such a way that its order with regard to other keys changes is a logical error.
	#[inline]
	pub(crate) fn set_key(&mut self, key: Key) {
		self.key = key
	}

	#[inline]
	pub fn value(&self) -> Option<&V> {
		self.value.as_ref()
	}

	#[inline]
	pub fn value_mut(&mut self) -> Option<&mut V> {
		self.value.as_mut()
	}

	#[inline]
	pub(crate) fn value_slot(&mut self) -> &mut Option<V> {
		&mut self.value
	}

	#[inline]
	pub fn left(&self) -> usize {
		self.left
	}

	#[inline]
	pub fn right(&self) -> usize {
		self.right
	}

	#[inline]
	pub fn child(&self, side: Side) -> usize {
		match side {
			Side::Left => self.left,
			Side::Right => self.right,
		}
	}

	#[inline]
	pub(crate) fn set_child(&mut self, side: Side, id: usize) {
		match side {
			Side::Left => self.left = id,
			Side::Right => self.right = id,
		}
	}

	#[inline]
	pub fn color(&self) -> Color {
		self.color
	}

	#[inline]
	pub(crate) fn set_color(&mut self, color: Color) {
		self.color = color
	}

	#[inline]
	pub fn is_red(&self) -> bool {
		self.color == Color::Red
	}

	#[inline]
	pub fn is_black(&self) -> bool {
		self.color == Color::Black
	}

	/// Write the label of the node in the DOT format.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		V: std::fmt::Display,
	{
		match &self.value {
			Some(value) => write!(f, "{}|{}", self.key, value),
			None => write!(f, "vacant"),
		}
	}
}
