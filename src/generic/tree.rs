use crate::{
	generic::node::{Color, Key, Node, Pool, PoolConfig, Side, NIL},
	Error, ValidityError,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::fmt;

mod balance;
mod ext;

pub use ext::*;

/// An ordered map based on a red-black tree.
///
/// Keys are integers ([`Key`]), values are anything owned by the tree, typically a handle to
/// data owned by the caller (`Rc<T>`, `&T`, an identifier...).
///
/// # Basic usage
///
/// ```
/// use rbtree_slab::RbTree;
///
/// let mut scores = RbTree::new();
/// scores.insert(30, "thirty");
/// scores.insert(10, "ten");
/// scores.insert(20, "twenty");
///
/// assert_eq!(scores.find(20), Some(&"twenty"));
/// assert_eq!(scores.min(), Some(10));
/// assert_eq!(scores.next(10), Some(20));
/// assert_eq!(scores.prev(10), None);
///
/// // inserting an existing key updates its value.
/// assert_eq!(scores.insert(20, "vingt"), Some("twenty"));
/// assert_eq!(scores.size(), 3);
///
/// assert_eq!(scores.delete(20), Some("vingt"));
/// assert_eq!(scores.next(10), Some(30));
/// ```
///
/// Ordered traversal goes through [`RbTree::min`] and [`RbTree::next`]
/// (or [`RbTree::max`] and [`RbTree::prev`]):
///
/// ```
/// use rbtree_slab::RbTree;
///
/// let mut tree = RbTree::new();
/// for key in [5, 3, 8, 1] {
///     tree.insert(key, ());
/// }
///
/// let mut keys = Vec::new();
/// let mut cursor = tree.min();
/// while let Some(key) = cursor {
///     keys.push(key);
///     cursor = tree.next(key);
/// }
///
/// assert_eq!(keys, [1, 3, 5, 8]);
/// ```
///
/// # Node allocation
///
/// Nodes live in a slab container `C` (`slab::Slab` by default through the
/// [`RbTree`](crate::RbTree) alias) and are never given back to it.
/// Deleted nodes are kept in a pool and recycled by the next insertions,
/// and the pool grows by blocks of [`PoolConfig::block_size`] nodes.
/// The pool may be bounded with [`PoolConfig::with_limit`], in which case
/// [`RbTree::try_insert`] reports the exhaustion instead of panicking.
///
/// ## Extended API
///
/// The [`RbTreeExt`] and [`RbTreeExtMut`] traits expose the nodes of the tree
/// by their identifier in the slab.
pub struct RbTree<V, C> {
	/// Allocated and free nodes.
	pool: Pool<V, C>,

	/// Root node id, or `NIL`.
	root: usize,
}

impl<V, C> RbTree<V, C> {
	/// Create a new empty tree.
	#[inline]
	pub fn new() -> RbTree<V, C>
	where
		C: Default,
	{
		Self::with_config(PoolConfig::default())
	}

	/// Create a new empty tree with the given node pool configuration.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::{PoolConfig, RbTree};
	///
	/// let mut tree = RbTree::with_config(PoolConfig::default().with_block_size(4).with_limit(4));
	/// for key in 0..4 {
	///     tree.try_insert(key, ()).unwrap();
	/// }
	///
	/// assert!(tree.try_insert(4, ()).is_err());
	/// ```
	#[inline]
	pub fn with_config(config: PoolConfig) -> RbTree<V, C>
	where
		C: Default,
	{
		RbTree {
			pool: Pool::new(config),
			root: NIL,
		}
	}

	/// Returns `true` if the tree contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root == NIL
	}

	#[inline]
	pub fn pool_config(&self) -> PoolConfig {
		self.pool.config()
	}

	/// Number of nodes allocated by the pool, used or not.
	#[inline]
	pub fn allocated(&self) -> usize {
		self.pool.allocated()
	}

	/// Number of unused nodes waiting in the pool.
	#[inline]
	pub fn available(&self) -> usize {
		self.pool.available()
	}
}

impl<V, C: Default> Default for RbTree<V, C> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<V, C: Slab<Node<V>>> RbTree<V, C>
where
	C: SimpleCollectionRef,
{
	/// Returns a reference to the value associated to the given key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RbTree;
	///
	/// let mut tree = RbTree::new();
	/// tree.insert(1, "a");
	/// assert_eq!(tree.find(1), Some(&"a"));
	/// assert_eq!(tree.find(2), None);
	/// ```
	#[inline]
	pub fn find(&self, key: Key) -> Option<&V> {
		match self.address_in(key, self.root) {
			NIL => None,
			id => self.node(id).value(),
		}
	}

	#[inline]
	pub fn contains(&self, key: Key) -> bool {
		self.address_in(key, self.root) != NIL
	}

	/// Returns the smallest key of the tree, if any.
	#[inline]
	pub fn min(&self) -> Option<Key> {
		self.key_of(self.min_in(self.root))
	}

	/// Returns the greatest key of the tree, if any.
	#[inline]
	pub fn max(&self) -> Option<Key> {
		self.key_of(self.max_in(self.root))
	}

	/// Returns the smallest key greater than `key`, if any.
	///
	/// `key` itself does not have to be in the tree.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RbTree;
	///
	/// let mut tree = RbTree::new();
	/// tree.insert(10, ());
	/// tree.insert(20, ());
	/// assert_eq!(tree.next(10), Some(20));
	/// assert_eq!(tree.next(15), Some(20));
	/// assert_eq!(tree.next(20), None);
	/// ```
	#[inline]
	pub fn next(&self, key: Key) -> Option<Key> {
		self.key_of(self.next_in(key, self.root))
	}

	/// Returns the greatest key smaller than `key`, if any.
	///
	/// `key` itself does not have to be in the tree.
	#[inline]
	pub fn prev(&self, key: Key) -> Option<Key> {
		self.key_of(self.prev_in(key, self.root))
	}

	/// Returns the number of elements in the tree.
	///
	/// This walks the whole tree.
	#[inline]
	pub fn size(&self) -> usize {
		self.size_in(self.root)
	}

	/// Returns `true` if the tree satisfies the red-black invariants.
	#[inline]
	pub fn valid(&self) -> bool {
		self.validate().is_ok()
	}

	/// Check the red-black invariants.
	///
	/// On success, returns the number of black nodes on every path from the root to a sentinel.
	pub fn validate(&self) -> Result<usize, ValidityError> {
		if self.root == NIL {
			return Ok(0);
		}

		let root = self.node(self.root);
		if root.is_red() {
			return Err(ValidityError::RedRoot(root.key()));
		}

		self.validate_node(self.root, None, None)
	}

	/// Write the tree in preorder, one node per line, indented by depth.
	///
	/// Each line holds the key, the value and the color of the node.
	pub fn dump<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		V: fmt::Display,
	{
		self.dump_node(f, self.root, 0)
	}

	fn dump_node<W: std::io::Write>(&self, f: &mut W, id: usize, depth: usize) -> std::io::Result<()>
	where
		V: fmt::Display,
	{
		if id != NIL {
			let node = self.node(id);
			write!(f, "{:width$}{}", "", node.key(), width = depth)?;
			if let Some(value) = node.value() {
				write!(f, " {}", value)?;
			}
			writeln!(f, " {}", node.color())?;

			self.dump_node(f, node.left(), depth + 1)?;
			self.dump_node(f, node.right(), depth + 1)?;
		}

		Ok(())
	}

	/// Write the tree in the DOT graph descrption language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		V: std::fmt::Display,
	{
		write!(f, "digraph tree {{\n\tnode [shape=record];\n")?;
		if self.root != NIL {
			self.dot_write_node(f, self.root)?
		}
		write!(f, "}}")
	}

	/// Write the given node in the DOT graph descrption language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	fn dot_write_node<W: std::io::Write>(&self, f: &mut W, id: usize) -> std::io::Result<()>
	where
		V: std::fmt::Display,
	{
		let name = format!("n{}", id);
		let node = self.node(id);

		write!(f, "\t{} [color={}, label=\"", name, node.color())?;
		node.dot_write_label(f)?;
		writeln!(f, "\"];")?;

		for child_id in [node.left(), node.right()] {
			if child_id != NIL {
				self.dot_write_node(f, child_id)?;
				writeln!(f, "\t{} -> n{}", name, child_id)?;
			}
		}

		Ok(())
	}

	#[inline]
	fn key_of(&self, id: usize) -> Option<Key> {
		if id == NIL {
			None
		} else {
			Some(self.node(id).key())
		}
	}

	fn fmt_entries(&self, map: &mut fmt::DebugMap<'_, '_>, id: usize)
	where
		V: fmt::Debug,
	{
		if id != NIL {
			let node = self.node(id);
			self.fmt_entries(map, node.left());
			if let Some(value) = node.value() {
				map.entry(&node.key(), value);
			}
			self.fmt_entries(map, node.right());
		}
	}
}

impl<V, C: SlabMut<Node<V>>> RbTree<V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Returns a mutable reference to the value associated to the given key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RbTree;
	///
	/// let mut tree = RbTree::new();
	/// tree.insert(1, "a");
	/// if let Some(x) = tree.find_mut(1) {
	///     *x = "b";
	/// }
	/// assert_eq!(tree.find(1), Some(&"b"));
	/// ```
	#[inline]
	pub fn find_mut(&mut self, key: Key) -> Option<&mut V> {
		match self.address_in(key, self.root) {
			NIL => None,
			id => self.node_mut(id).value_mut(),
		}
	}

	/// Insert a key-value pair in the tree.
	///
	/// If the key is already in the tree, its value is replaced and the old value is returned.
	///
	/// # Panics
	///
	/// Panics if a new node is needed and the pool reached its configured limit.
	/// See [`RbTree::try_insert`] for a non-panicking version.
	#[inline]
	pub fn insert(&mut self, key: Key, value: V) -> Option<V> {
		match self.try_insert(key, value) {
			Ok(old_value) => old_value,
			Err(e) => panic!("{}", e),
		}
	}

	/// Insert a key-value pair in the tree.
	///
	/// If the key is already in the tree, its value is replaced and the old value is returned.
	/// If a new node is needed and the pool reached its configured limit,
	/// the tree is left unchanged and an error is returned.
	pub fn try_insert(&mut self, key: Key, value: V) -> Result<Option<V>, Error> {
		let (root, old_value) = self.insert_in(self.root, key, value)?;
		self.set_root_id(root);
		self.paint(root, Color::Black);
		Ok(old_value)
	}

	/// Removes a key from the tree, returning its value if the key was in the tree.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RbTree;
	///
	/// let mut tree = RbTree::new();
	/// tree.insert(1, "a");
	/// assert_eq!(tree.delete(1), Some("a"));
	/// assert_eq!(tree.delete(1), None);
	/// ```
	pub fn delete(&mut self, key: Key) -> Option<V> {
		let removal = self.delete_in(self.root, key);
		self.set_root_id(removal.root);
		if self.root != NIL {
			self.paint(self.root, Color::Black)
		}

		removal.value
	}

	/// Clears the tree, giving all its nodes back to the pool.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RbTree;
	///
	/// let mut tree = RbTree::new();
	/// tree.insert(1, "a");
	/// tree.clear();
	/// assert!(tree.is_empty());
	/// assert_eq!(tree.available(), tree.allocated());
	/// ```
	pub fn clear(&mut self) {
		let count = self.clear_node(self.root);
		self.set_root_id(NIL);
		log::debug!("cleared {} nodes", count);
	}

	fn clear_node(&mut self, id: usize) -> usize {
		if id == NIL {
			return 0;
		}

		let node = self.node(id);
		let (left, right) = (node.left(), node.right());
		let count = self.clear_node(left) + self.clear_node(right);
		self.release_node(id);
		count + 1
	}

	/// Returns a copy of the tree, with the same shape and colors.
	///
	/// The copy has its own nodes, taken from a new pool with the same configuration.
	/// Values are cloned: storing handles (`Rc<T>`, `&T`) makes it a shallow copy.
	///
	/// # Panics
	///
	/// Panics if the new pool reaches its configured limit.
	/// Since the copy needs no more nodes than the tree ever allocated, this cannot happen.
	#[inline]
	pub fn copy(&self) -> RbTree<V, C>
	where
		V: Clone,
		C: Default,
	{
		match self.try_copy() {
			Ok(tree) => tree,
			Err(e) => panic!("{}", e),
		}
	}

	/// Returns a copy of the tree, with the same shape and colors.
	pub fn try_copy(&self) -> Result<RbTree<V, C>, Error>
	where
		V: Clone,
		C: Default,
	{
		let mut tree = RbTree::with_config(self.pool.config());
		let root = self.copy_node(self.root, &mut tree.pool)?;
		tree.set_root_id(root);
		Ok(tree)
	}

	fn copy_node(&self, id: usize, pool: &mut Pool<V, C>) -> Result<usize, Error>
	where
		V: Clone,
	{
		if id == NIL {
			return Ok(NIL);
		}

		let node = self.node(id);
		let left = self.copy_node(node.left(), pool)?;
		let right = self.copy_node(node.right(), pool)?;

		let mut copy = node.clone();
		copy.set_child(Side::Left, left);
		copy.set_child(Side::Right, right);
		pool.allocate(copy)
	}
}

impl<V: Clone, C: SlabMut<Node<V>> + Default> Clone for RbTree<V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn clone(&self) -> Self {
		self.copy()
	}
}

impl<V: fmt::Debug, C: Slab<Node<V>>> fmt::Debug for RbTree<V, C>
where
	C: SimpleCollectionRef,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut map = f.debug_map();
		self.fmt_entries(&mut map, self.root);
		map.finish()
	}
}
