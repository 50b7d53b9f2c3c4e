//! Red-black search tree storing its nodes in a slab.
//!
//! Nodes are never released to the allocator: freed nodes go back to a
//! per-tree pool and are recycled by later insertions, and the pool grows
//! by blocks of nodes. See [`generic::RbTree`] for the whole API.
#[cfg(feature = "std-slab")]
use slab::Slab;

mod error;
pub mod generic;

pub use error::{Error, ValidityError};
pub use generic::node::{Color, Key, PoolConfig};

/// Red-black tree based on `Slab`.
#[cfg(feature = "std-slab")]
pub type RbTree<V> = generic::RbTree<V, Slab<generic::Node<V>>>;
