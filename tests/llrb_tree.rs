use std::collections::BTreeMap;

use llrb_tree::{Color, LlrbTree};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Keys are drawn from a range smaller than `TEST_SIZE` to force collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn tree_from(keys: &[i64]) -> LlrbTree {
    let mut tree = LlrbTree::new();
    for &key in keys {
        tree.insert(key, key * 100);
    }
    tree
}

fn keys_of(tree: &LlrbTree) -> Vec<i64> {
    tree.walk().map(|(key, _, _)| key).collect()
}

/// Checks the root color and the `2 * log2(n + 1)` height bound through the public API.
fn assert_shape(tree: &LlrbTree) {
    if tree.is_empty() {
        assert_eq!(tree.root_color(), None);
        assert_eq!(tree.height(), 0);
        return;
    }
    assert_eq!(tree.root_color(), Some(Color::Black));

    // 2 * log2(n + 1), rounded up.
    let bound = 2 * (usize::BITS - tree.len().leading_zeros()) as usize;
    assert!(tree.height() <= bound, "height {} exceeds bound {bound} for {} keys", tree.height(), tree.len());
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64, i64),
    Delete(i64),
    Remove(i64),
    Search(i64),
    DeleteMin,
    DeleteMax,
    PopFirst,
    PopLast,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| TreeOp::Insert(k, v)),
        2 => key_strategy().prop_map(TreeOp::Delete),
        1 => key_strategy().prop_map(TreeOp::Remove),
        2 => key_strategy().prop_map(TreeOp::Search),
        1 => Just(TreeOp::DeleteMin),
        1 => Just(TreeOp::DeleteMax),
        1 => Just(TreeOp::PopFirst),
        1 => Just(TreeOp::PopLast),
    ]
}

// ─── Reference scenario ──────────────────────────────────────────────────────

#[test]
fn reference_insert_order() {
    let mut tree = tree_from(&[5, 3, 8, 1, 4, 7, 9]);

    assert_eq!(keys_of(&tree), [1, 3, 4, 5, 7, 8, 9]);
    assert_eq!(tree.root_color(), Some(Color::Black));
    assert_eq!(tree.search(4), Some(400));

    tree.delete_min();
    assert_eq!(keys_of(&tree), [3, 4, 5, 7, 8, 9]);
    assert_shape(&tree);
}

#[test]
fn small_tree_colors() {
    let tree = tree_from(&[1, 2, 3]);
    // Three keys split into a balanced black triple.
    let walked: Vec<_> = tree.walk().collect();
    assert_eq!(walked, [(1, 100, Color::Black), (2, 200, Color::Black), (3, 300, Color::Black)]);

    let tree = tree_from(&[2, 1]);
    let walked: Vec<_> = tree.walk().collect();
    assert_eq!(walked, [(1, 100, Color::Red), (2, 200, Color::Black)]);
}

// ─── Empty-tree behavior ─────────────────────────────────────────────────────

#[test]
fn empty_tree_is_inert() {
    let mut tree = LlrbTree::new();

    tree.delete_min();
    assert!(!tree.delete_max());
    assert!(!tree.delete(0));
    assert_eq!(tree.search(0), None);
    assert_eq!(tree.pop_first(), None);
    assert_eq!(tree.pop_last(), None);
    assert_eq!(tree.walk().count(), 0);
    assert_shape(&tree);
}

#[test]
fn single_entry_lifecycle() {
    let mut tree = LlrbTree::default();
    tree.insert(7, 70);
    assert_shape(&tree);
    assert!(tree.delete(7));
    assert!(tree.is_empty());
    assert_shape(&tree);

    tree.insert(7, 70);
    assert!(tree.delete_max());
    assert!(tree.is_empty());

    tree.insert(7, 70);
    tree.delete_min();
    assert!(tree.is_empty());
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[test]
fn overwrite_is_idempotent() {
    let mut tree = tree_from(&[10, 20, 30]);
    let before = tree.len();

    tree.insert(20, 1);
    tree.insert(20, 2);

    assert_eq!(tree.search(20), Some(2));
    assert_eq!(tree.len(), before);
    assert_shape(&tree);
}

#[test]
fn delete_then_search_misses() {
    let mut tree = tree_from(&(0..200).collect::<Vec<_>>());
    for key in (0..200).step_by(3) {
        assert!(tree.delete(key));
        assert_eq!(tree.search(key), None);
        assert_shape(&tree);
    }
    assert_eq!(tree.len(), 200 - (0..200).step_by(3).count());
}

#[test]
fn descending_inserts_stay_balanced() {
    let tree = tree_from(&(0..4096).rev().collect::<Vec<_>>());
    assert_shape(&tree);
    assert_eq!(keys_of(&tree), (0..4096).collect::<Vec<_>>());
}

#[test]
fn debug_formats_as_map() {
    let tree = tree_from(&[2, 1]);
    assert_eq!(format!("{tree:?}"), "{1: 100, 2: 200}");
}

#[test]
fn into_iterator_matches_walk() {
    let tree = tree_from(&[4, 2, 6, 1, 3]);
    let mut seen = Vec::new();
    for (key, value, _) in &tree {
        seen.push((key, value));
    }
    assert_eq!(seen, [(1, 100), (2, 200), (3, 300), (4, 400), (6, 600)]);
}

#[test]
fn clone_is_independent() {
    let original = tree_from(&[1, 2, 3, 4]);
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.delete(2);
    assert_eq!(original.search(2), Some(200));
    assert_eq!(copy.search(2), None);
    assert_ne!(copy, original);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both LlrbTree and BTreeMap and
    /// asserts identical results at every step.
    #[test]
    fn tree_ops_match_btreemap(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree = LlrbTree::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(k, v) => {
                    prop_assert_eq!(tree.insert(k, v), model.insert(k, v), "insert({}, {})", k, v);
                }
                TreeOp::Delete(k) => {
                    prop_assert_eq!(tree.delete(k), model.remove(&k).is_some(), "delete({})", k);
                }
                TreeOp::Remove(k) => {
                    prop_assert_eq!(tree.remove(k), model.remove(&k), "remove({})", k);
                }
                TreeOp::Search(k) => {
                    prop_assert_eq!(tree.search(k), model.get(&k).copied(), "search({})", k);
                    prop_assert_eq!(tree.contains_key(k), model.contains_key(&k), "contains_key({})", k);
                }
                TreeOp::DeleteMin => {
                    tree.delete_min();
                    model.pop_first();
                }
                TreeOp::DeleteMax => {
                    prop_assert_eq!(tree.delete_max(), model.pop_last().is_some(), "delete_max");
                }
                TreeOp::PopFirst => {
                    prop_assert_eq!(tree.pop_first(), model.pop_first(), "pop_first");
                }
                TreeOp::PopLast => {
                    prop_assert_eq!(tree.pop_last(), model.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(tree.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(tree.root_color().is_some(), !model.is_empty(), "root mismatch after {:?}", op);
        }

        let walked: Vec<(i64, i64)> = tree.walk().map(|(k, v, _)| (k, v)).collect();
        let expected: Vec<(i64, i64)> = model.into_iter().collect();
        prop_assert_eq!(walked, expected);
        assert_shape(&tree);
    }

    /// In-order walk is strictly ascending and agrees with BTreeMap.
    #[test]
    fn walk_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut tree = LlrbTree::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for &(k, v) in &entries {
            tree.insert(k, v);
            model.insert(k, v);
        }

        let walked: Vec<(i64, i64)> = tree.walk().map(|(k, v, _)| (k, v)).collect();
        prop_assert!(walked.windows(2).all(|pair| pair[0].0 < pair[1].0), "walk is not strictly ascending");
        let expected: Vec<(i64, i64)> = model.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&walked, &expected);
        prop_assert_eq!(tree.walk().len(), model.len());
        prop_assert_eq!(tree.first_key_value(), model.first_key_value().map(|(&k, &v)| (k, v)));
        prop_assert_eq!(tree.last_key_value(), model.last_key_value().map(|(&k, &v)| (k, v)));
        assert_shape(&tree);
    }

    /// Heavy deletion keeps the root black and the height within the red-black bound.
    #[test]
    fn deletions_keep_tree_balanced(
        entries in proptest::collection::vec(key_strategy(), TEST_SIZE),
        deletions in proptest::collection::vec(key_strategy(), TEST_SIZE / 2),
    ) {
        let mut tree = LlrbTree::new();
        for &k in &entries {
            tree.insert(k, k);
        }
        for &k in &deletions {
            tree.delete(k);
            prop_assert_eq!(tree.search(k), None);
        }
        assert_shape(&tree);
    }
}
