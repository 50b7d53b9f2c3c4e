use super::{Node, NIL};
use crate::Error;
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use smallvec::SmallVec;
use std::marker::PhantomData;

/// Default number of nodes carved from the slab each time the pool runs dry.
pub const BLOCK_SIZE: usize = 32;

/// Pool configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PoolConfig {
	/// Number of nodes allocated at once when the free-list is empty.
	pub block_size: usize,

	/// Maximum number of nodes the pool may ever allocate, if any.
	pub limit: Option<usize>,
}

impl PoolConfig {
	/// Set the block size.
	///
	/// A block size of `0` is treated as `1`.
	#[inline]
	pub fn with_block_size(mut self, block_size: usize) -> PoolConfig {
		self.block_size = block_size.max(1);
		self
	}

	/// Bound the total number of nodes of the pool.
	#[inline]
	pub fn with_limit(mut self, limit: usize) -> PoolConfig {
		self.limit = Some(limit);
		self
	}
}

impl Default for PoolConfig {
	#[inline]
	fn default() -> Self {
		PoolConfig {
			block_size: BLOCK_SIZE,
			limit: None,
		}
	}
}

/// Node store.
///
/// Nodes are allocated in the underlying slab `C` by blocks, and are never
/// removed from it. Freed nodes are threaded into a free-list through their
/// right child index, and handed out again by [`Pool::allocate`].
pub struct Pool<V, C> {
	/// Live and vacant nodes.
	nodes: C,

	/// Head of the free-list.
	free: usize,

	/// Number of nodes in the free-list.
	available: usize,

	/// Number of nodes carved from the slab.
	allocated: usize,

	config: PoolConfig,

	v: PhantomData<V>,
}

impl<V, C> Pool<V, C> {
	/// Create a new empty pool.
	#[inline]
	pub fn new(config: PoolConfig) -> Pool<V, C>
	where
		C: Default,
	{
		Pool {
			nodes: Default::default(),
			free: NIL,
			available: 0,
			allocated: 0,
			config: config.with_block_size(config.block_size),
			v: PhantomData,
		}
	}

	#[inline]
	pub fn config(&self) -> PoolConfig {
		self.config
	}

	/// Number of nodes ever allocated from the slab, live or vacant.
	#[inline]
	pub fn allocated(&self) -> usize {
		self.allocated
	}

	/// Number of vacant nodes waiting in the free-list.
	#[inline]
	pub fn available(&self) -> usize {
		self.available
	}
}

impl<V, C: Slab<Node<V>>> Pool<V, C>
where
	C: SimpleCollectionRef,
{
	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is [`NIL`] or out of bounds.
	#[inline]
	pub fn node(&self, id: usize) -> &Node<V> {
		C::into_ref(self.nodes.get(id).expect("dangling node index"))
	}
}

impl<V, C: SlabMut<Node<V>>> Pool<V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Get the node associated to the given `id` mutabily.
	///
	/// Panics if `id` is [`NIL`] or out of bounds.
	#[inline]
	pub fn node_mut(&mut self, id: usize) -> &mut Node<V> {
		C::into_mut(self.nodes.get_mut(id).expect("dangling node index"))
	}

	/// Take a vacant node from the free-list and overwrite it with `node`.
	///
	/// Returns the identifier of the node.
	pub fn allocate(&mut self, node: Node<V>) -> Result<usize, Error> {
		if self.free == NIL {
			self.grow()?
		}

		let id = self.free;
		let slot = self.node_mut(id);
		let next = slot.right();
		*slot = node;

		self.free = next;
		self.available -= 1;
		Ok(id)
	}

	/// Put the given node back into the free-list.
	///
	/// Returns the value it was holding.
	pub fn free(&mut self, id: usize) -> Option<V> {
		let head = self.free;
		let value = self.node_mut(id).vacate(head);
		self.free = id;
		self.available += 1;
		value
	}

	/// Carve a new block of vacant nodes from the slab and link them into the free-list.
	fn grow(&mut self) -> Result<(), Error> {
		let mut size = self.config.block_size;
		if let Some(limit) = self.config.limit {
			size = size.min(limit.saturating_sub(self.allocated));
			if size == 0 {
				return Err(Error::Exhausted { limit });
			}
		}

		let mut block: SmallVec<[usize; BLOCK_SIZE]> = SmallVec::with_capacity(size);
		for _ in 0..size {
			block.push(self.nodes.insert(Node::vacant(NIL)))
		}

		// vacant nodes are handed out in slab order.
		let mut next = self.free;
		for &id in block.iter().rev() {
			*self.node_mut(id) = Node::vacant(next);
			next = id
		}

		self.free = next;
		self.available += size;
		self.allocated += size;
		log::debug!("node pool grown by {} nodes ({} allocated)", size, self.allocated);
		Ok(())
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use super::*;
	use crate::generic::node::Color;
	use slab::Slab;

	type TestPool = Pool<&'static str, Slab<Node<&'static str>>>;

	#[test]
	fn grows_by_blocks() {
		let mut pool = TestPool::new(PoolConfig::default().with_block_size(4));
		let a = pool.allocate(Node::new(1, "a", NIL, NIL, Color::Red)).unwrap();
		assert_eq!(pool.allocated(), 4);
		assert_eq!(pool.available(), 3);

		let ids: Vec<_> = (0..3)
			.map(|k| pool.allocate(Node::new(k, "b", NIL, NIL, Color::Red)).unwrap())
			.collect();
		assert_eq!(ids, vec![a + 1, a + 2, a + 3]);
		assert_eq!(pool.available(), 0);

		pool.allocate(Node::new(5, "c", NIL, NIL, Color::Red)).unwrap();
		assert_eq!(pool.allocated(), 8);
	}

	#[test]
	fn recycles_freed_nodes() {
		let mut pool = TestPool::new(PoolConfig::default());
		let a = pool.allocate(Node::new(1, "a", NIL, NIL, Color::Red)).unwrap();
		let b = pool.allocate(Node::new(2, "b", NIL, NIL, Color::Red)).unwrap();

		assert_eq!(pool.free(a), Some("a"));
		assert!(pool.node(a).is_vacant());

		let c = pool.allocate(Node::new(3, "c", NIL, NIL, Color::Black)).unwrap();
		assert_eq!(c, a);
		assert_eq!(pool.node(c).key(), 3);
		assert_eq!(pool.node(c).right(), NIL);
		assert_eq!(pool.node(b).value(), Some(&"b"));
		assert_eq!(pool.allocated(), BLOCK_SIZE);
	}

	#[test]
	fn limit() {
		let mut pool = TestPool::new(PoolConfig::default().with_block_size(2).with_limit(3));
		for k in 0..3 {
			pool.allocate(Node::new(k, "x", NIL, NIL, Color::Red)).unwrap();
		}

		assert_eq!(pool.allocated(), 3);
		assert_eq!(
			pool.allocate(Node::new(3, "x", NIL, NIL, Color::Red)),
			Err(Error::Exhausted { limit: 3 })
		);
	}
}
