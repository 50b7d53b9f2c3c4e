use proptest::prelude::*;
use rbtree_slab::{Key, RbTree};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
	Insert(Key, u32),
	Delete(Key),
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		3 => (-64..64 as Key, any::<u32>()).prop_map(|(key, value)| Op::Insert(key, value)),
		2 => (-64..64 as Key).prop_map(Op::Delete),
	]
}

fn entries<V: Clone>(tree: &RbTree<V>) -> Vec<(Key, V)> {
	let mut entries = Vec::new();
	let mut cursor = tree.min();
	while let Some(key) = cursor {
		entries.push((key, tree.find(key).cloned().unwrap()));
		cursor = tree.next(key);
	}

	entries
}

proptest! {
	#[test]
	fn behaves_like_a_map(ops in prop::collection::vec(op(), 0..300)) {
		let mut tree = RbTree::new();
		let mut reference = BTreeMap::new();

		for op in ops {
			match op {
				Op::Insert(key, value) => {
					prop_assert_eq!(tree.insert(key, value), reference.insert(key, value));
				}
				Op::Delete(key) => {
					prop_assert_eq!(tree.delete(key), reference.remove(&key));
				}
			}

			prop_assert!(tree.validate().is_ok());
			prop_assert_eq!(tree.size(), reference.len());
		}

		let expected: Vec<_> = reference.into_iter().collect();
		prop_assert_eq!(entries(&tree), expected);
	}

	#[test]
	fn neighbours(keys in prop::collection::btree_set(-1000..1000 as Key, 1..100), probe in -1100..1100 as Key) {
		let mut tree = RbTree::new();
		for key in &keys {
			tree.insert(*key, ());
		}

		prop_assert_eq!(tree.min(), keys.iter().next().copied());
		prop_assert_eq!(tree.max(), keys.iter().next_back().copied());
		prop_assert_eq!(tree.next(probe), keys.range(probe + 1..).next().copied());
		prop_assert_eq!(tree.prev(probe), keys.range(..probe).next_back().copied());
	}

	#[test]
	fn copy_is_independent(keys in prop::collection::vec(-500..500 as Key, 0..200)) {
		let mut tree = RbTree::new();
		for key in &keys {
			tree.insert(*key, *key * 2);
		}

		let mut copy = tree.copy();
		prop_assert_eq!(copy.size(), tree.size());
		prop_assert_eq!(entries(&copy), entries(&tree));
		prop_assert_eq!(copy.validate(), tree.validate());

		let before = entries(&tree);
		for key in &keys {
			copy.delete(*key);
		}

		prop_assert!(copy.is_empty());
		prop_assert_eq!(entries(&tree), before);
		prop_assert!(tree.valid());
	}

	#[test]
	fn delete_all_then_reinsert(keys in prop::collection::btree_set(any::<Key>(), 0..150)) {
		let mut tree = RbTree::new();
		for key in &keys {
			tree.insert(*key, ());
		}

		let before = entries(&tree);
		for key in &keys {
			tree.delete(*key);
			prop_assert!(tree.valid());
		}

		prop_assert!(tree.is_empty());
		prop_assert_eq!(tree.size(), 0);

		for key in keys.iter().rev() {
			tree.insert(*key, ());
		}

		prop_assert!(tree.valid());
		prop_assert_eq!(entries(&tree), before);
	}
}
