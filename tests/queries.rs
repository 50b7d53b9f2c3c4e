use rbtree_slab::{Key, RbTree};
use rstest::{fixture, rstest};

#[fixture]
fn tens() -> RbTree<&'static str> {
	let mut tree = RbTree::new();
	tree.insert(20, "twenty");
	tree.insert(10, "ten");
	tree.insert(30, "thirty");
	tree
}

#[fixture]
fn odds() -> RbTree<Key> {
	let mut tree = RbTree::new();
	for key in (1..200).step_by(2) {
		tree.insert(key, key * key);
	}

	tree
}

#[rstest]
#[case(20, Some(30))]
#[case(10, Some(20))]
#[case(30, None)]
#[case(15, Some(20))]
#[case(5, Some(10))]
#[case(35, None)]
fn next(tens: RbTree<&'static str>, #[case] key: Key, #[case] expected: Option<Key>) {
	assert_eq!(tens.next(key), expected)
}

#[rstest]
#[case(20, Some(10))]
#[case(30, Some(20))]
#[case(10, None)]
#[case(15, Some(10))]
#[case(35, Some(30))]
#[case(5, None)]
fn prev(tens: RbTree<&'static str>, #[case] key: Key, #[case] expected: Option<Key>) {
	assert_eq!(tens.prev(key), expected)
}

#[rstest]
#[case(10, Some(&"ten"))]
#[case(20, Some(&"twenty"))]
#[case(30, Some(&"thirty"))]
#[case(0, None)]
#[case(25, None)]
fn find(tens: RbTree<&'static str>, #[case] key: Key, #[case] expected: Option<&&'static str>) {
	assert_eq!(tens.find(key), expected);
	assert_eq!(tens.contains(key), expected.is_some())
}

#[rstest]
fn next_prev_walk(odds: RbTree<Key>) {
	for key in 0..=200 {
		let next = if key >= 199 { None } else if key % 2 == 0 { Some(key + 1) } else { Some(key + 2) };
		let prev = if key <= 1 { None } else if key % 2 == 0 { Some(key - 1) } else { Some(key - 2) };
		assert_eq!(odds.next(key), next, "next({})", key);
		assert_eq!(odds.prev(key), prev, "prev({})", key);
	}
}

#[rstest]
fn walk_backward(odds: RbTree<Key>) {
	let mut keys = Vec::new();
	let mut cursor = odds.max();
	while let Some(key) = cursor {
		assert_eq!(odds.find(key), Some(&(key * key)));
		keys.push(key);
		cursor = odds.prev(key);
	}

	let expected: Vec<Key> = (1..200).rev().step_by(2).collect();
	assert_eq!(keys, expected)
}

#[rstest]
fn empty_queries() {
	let tree: RbTree<()> = RbTree::new();
	assert!(tree.is_empty());
	assert_eq!(tree.size(), 0);
	assert_eq!(tree.min(), None);
	assert_eq!(tree.max(), None);
	assert_eq!(tree.next(0), None);
	assert_eq!(tree.prev(0), None);
	assert_eq!(tree.find(0), None);
	assert_eq!(tree.validate(), Ok(0));
}

#[rstest]
fn single(#[values(Key::MIN, -1, 0, 1, Key::MAX)] key: Key) {
	let mut tree = RbTree::new();
	tree.insert(key, ());
	assert_eq!(tree.min(), Some(key));
	assert_eq!(tree.max(), Some(key));
	assert_eq!(tree.next(key), None);
	assert_eq!(tree.prev(key), None);
	assert_eq!(tree.validate(), Ok(1));

	tree.delete(key);
	assert!(tree.is_empty());
}
