use std::ops::Range;

use proptest::prelude::*;

use crate::model;

use super::*;

const POLICIES: [RemovalPolicy; 3] = [
    RemovalPolicy::Successor,
    RemovalPolicy::Predecessor,
    RemovalPolicy::Seeded(7),
];

fn tree_of(policy: RemovalPolicy, keys: &[u32]) -> BstTree<u32, u32> {
    let mut tree = BstTree::with_policy(policy);

    for &key in keys {
        tree.insert(key, key * 10).unwrap();
        tree.assert_invariants();
    }

    tree
}

fn keys(tree: &BstTree<u32, u32>) -> Vec<u32> {
    tree.keys().copied().collect()
}

fn insert_find_all(keys: &[u32]) {
    let tree = tree_of(RemovalPolicy::Successor, keys);

    assert_eq!(tree.len(), keys.len());

    for key in keys {
        assert_eq!(tree.get(key), Some(&(key * 10)));
    }
}

#[test]
fn zero_elems_find() {
    insert_find_all(&[]);
}

#[test]
fn single_elem_find() {
    insert_find_all(&[0]);
}

#[test]
fn two_elems_find() {
    insert_find_all(&[0, 1]);
    insert_find_all(&[1, 0]);
}

#[test]
fn three_elems_find() {
    insert_find_all(&[0, 1, 2]);
    insert_find_all(&[0, 2, 1]);
    insert_find_all(&[1, 0, 2]);
    insert_find_all(&[1, 2, 0]);
    insert_find_all(&[2, 0, 1]);
    insert_find_all(&[2, 1, 0]);
}

fn insert_remove_all(keys: &[u32]) {
    for policy in POLICIES {
        let mut tree = tree_of(policy, keys);

        for key in keys {
            assert_eq!(tree.delete(key), Ok((*key, key * 10)));
            tree.assert_invariants();
        }
        assert!(tree.is_empty());

        for &key in keys {
            tree.insert(key, key * 10).unwrap();
            tree.assert_invariants();
        }

        for key in keys.iter().rev() {
            assert_eq!(tree.delete(key), Ok((*key, key * 10)));
            tree.assert_invariants();
        }
        assert!(tree.is_empty());
    }
}

#[test]
fn remove_one() {
    insert_remove_all(&[0]);
}

#[test]
fn remove_two() {
    insert_remove_all(&[0, 1]);
    insert_remove_all(&[1, 0]);
}

#[test]
fn remove_three() {
    insert_remove_all(&[0, 1, 2]);
    insert_remove_all(&[0, 2, 1]);
    insert_remove_all(&[1, 0, 2]);
    insert_remove_all(&[1, 2, 0]);
    insert_remove_all(&[2, 0, 1]);
    insert_remove_all(&[2, 1, 0]);
}

#[test]
fn remove_four() {
    insert_remove_all(&[1, 0, 3, 2]);
    insert_remove_all(&[2, 0, 3, 1]);
    insert_remove_all(&[2, 3, 1, 0]);
    insert_remove_all(&[3, 0, 2, 1]);
    insert_remove_all(&[0, 3, 1, 2]);
}

const LEVELS: [u32; 7] = [50, 30, 70, 20, 40, 60, 80];

#[test]
fn three_level_fixture() {
    let tree = tree_of(RemovalPolicy::Successor, &LEVELS);

    assert_eq!(keys(&tree), [20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(tree.height(), 3);
    assert_eq!(tree.first(), Some((&20, &200)));
    assert_eq!(tree.last(), Some((&80, &800)));
}

#[test]
fn remove_root_with_two_children() {
    for policy in POLICIES {
        let mut tree = tree_of(policy, &LEVELS);

        assert_eq!(tree.delete(&50), Ok((50, 500)));
        tree.assert_invariants();

        assert_eq!(keys(&tree), [20, 30, 40, 60, 70, 80]);
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.get(&50), None);
        assert!(!tree.contains_key(&50));

        for key in [20, 30, 40, 60, 70, 80] {
            assert_eq!(tree.get(&key), Some(&(key * 10)));
        }
    }
}

#[test]
fn two_children_policy_decides_new_root() {
    let mut succ = tree_of(RemovalPolicy::Successor, &LEVELS);
    let mut pred = tree_of(RemovalPolicy::Predecessor, &LEVELS);

    succ.delete(&50).unwrap();
    pred.delete(&50).unwrap();

    let root_key = |tree: &BstTree<u32, u32>| tree.root.map(|r| tree.arena[r].key);
    assert_eq!(root_key(&succ), Some(60));
    assert_eq!(root_key(&pred), Some(40));

    // Different shapes, same contents.
    assert!(succ.iter().eq(pred.iter()));
}

#[test]
fn remove_leaf() {
    let mut tree = tree_of(RemovalPolicy::Successor, &LEVELS);

    assert_eq!(tree.delete(&20), Ok((20, 200)));
    tree.assert_invariants();

    assert_eq!(keys(&tree), [30, 40, 50, 60, 70, 80]);
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.height(), 3);
}

#[test]
fn remove_single_child() {
    // 20 ends up with only a right child (25), and 60 with only a left child (55).
    let mut tree = tree_of(RemovalPolicy::Successor, &[50, 30, 70, 20, 40, 60, 80, 25, 55]);

    assert_eq!(tree.delete(&20), Ok((20, 200)));
    tree.assert_invariants();
    assert_eq!(keys(&tree), [25, 30, 40, 50, 55, 60, 70, 80]);

    assert_eq!(tree.delete(&60), Ok((60, 600)));
    tree.assert_invariants();
    assert_eq!(keys(&tree), [25, 30, 40, 50, 55, 70, 80]);

    assert_eq!(tree.len(), 7);
    for key in [25, 30, 40, 50, 55, 70, 80] {
        assert_eq!(tree.get(&key), Some(&(key * 10)));
    }
}

#[test]
fn remove_root_with_one_child() {
    let mut right = tree_of(RemovalPolicy::Successor, &[1, 2, 3]);
    assert_eq!(right.delete(&1), Ok((1, 10)));
    right.assert_invariants();
    assert_eq!(keys(&right), [2, 3]);

    let mut left = tree_of(RemovalPolicy::Successor, &[3, 2, 1]);
    assert_eq!(left.delete(&3), Ok((3, 30)));
    left.assert_invariants();
    assert_eq!(keys(&left), [1, 2]);
}

#[test]
fn empty_tree() {
    let mut tree: BstTree<u32, u32> = BstTree::new();

    assert_eq!(tree.delete(&1), Err(Error::KeyNotFound));
    assert_eq!(tree.remove(&1), None);
    assert_eq!(tree.get(&1), None);
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.first(), None);
    assert_eq!(tree.pop_last(), None);
    assert_eq!(tree.iter().next(), None);
    tree.assert_invariants();
}

#[test]
fn duplicate_insert_leaves_tree_unchanged() {
    let mut tree = tree_of(RemovalPolicy::Successor, &LEVELS);
    let before = format!("{:?}", tree);
    let mut dot_before = String::new();
    tree.dotgraph("before", &mut dot_before).unwrap();

    assert_eq!(tree.insert(40, 0), Err(Error::DuplicateKey));

    tree.assert_invariants();
    assert_eq!(tree.len(), 7);
    assert_eq!(tree.get(&40), Some(&400));
    assert_eq!(format!("{:?}", tree), before);

    let mut dot_after = String::new();
    tree.dotgraph("before", &mut dot_after).unwrap();
    assert_eq!(dot_before, dot_after);
}

#[test]
fn sorted_insertions_degrade_to_a_list() {
    // Every walk has to survive a tree as tall as it is wide.
    const N: u32 = 10_000;

    let mut tree = BstTree::new();
    for key in 0..N {
        tree.insert(key, ()).unwrap();
    }

    assert_eq!(tree.height(), N as usize);
    assert_eq!(tree.get(&(N - 1)), Some(&()));
    assert!(tree.keys().copied().eq(0..N));

    tree.clear();
    assert!(tree.is_empty());
    tree.assert_invariants();
}

#[test]
fn clear_then_reuse() {
    let mut tree = tree_of(RemovalPolicy::Seeded(1), &LEVELS);

    tree.clear();
    tree.assert_invariants();
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.get(&50), None);

    tree.insert(5, 50).unwrap();
    tree.assert_invariants();
    assert_eq!(keys(&tree), [5]);
}

#[test]
fn entry_api() {
    let mut tree: BstTree<&str, u32> = BstTree::new();

    *tree.entry("a").or_insert(0) += 1;
    *tree.entry("a").or_insert(0) += 1;
    tree.entry("b").and_modify(|v| *v += 100).or_insert_with(|| 7);
    tree.entry("b").and_modify(|v| *v += 100).or_insert_with(|| 7);

    assert_eq!(tree.get("a"), Some(&2));
    assert_eq!(tree.get("b"), Some(&107));

    match tree.entry("a") {
        Entry::Occupied(occupied) => assert_eq!(occupied.remove_entry(), ("a", 2)),
        Entry::Vacant(_) => panic!("expected an occupied entry"),
    }

    assert_eq!(tree.len(), 1);
    tree.assert_invariants();
}

#[test]
fn set_replaces_in_place() {
    let mut tree = tree_of(RemovalPolicy::Successor, &LEVELS);
    let root = tree.root;

    assert_eq!(tree.set(50, 1), Some(500));
    assert_eq!(tree.root, root);
    assert_eq!(tree.get(&50), Some(&1));

    assert_eq!(tree.set(45, 2), None);
    assert_eq!(tree.len(), 8);
    tree.assert_invariants();
}

#[test]
fn pops_in_order() {
    let mut tree = tree_of(RemovalPolicy::Successor, &LEVELS);

    assert_eq!(tree.pop_first(), Some((20, 200)));
    assert_eq!(tree.pop_last(), Some((80, 800)));
    tree.assert_invariants();
    assert_eq!(keys(&tree), [30, 40, 50, 60, 70]);
}

#[test]
fn dotgraph_output() {
    let tree = tree_of(RemovalPolicy::Successor, &[2, 1]);
    let mut out = String::new();

    tree.dotgraph("t", &mut out).unwrap();

    assert!(out.starts_with("digraph \"graph-t\""));
    assert!(out.contains("\"grapht-2\" -> \"grapht-1\";"));
    assert!(out.contains("\"grapht-2\" -> \"grapht-missing0\";"));

    let empty: BstTree<u32, ()> = BstTree::new();
    let mut out = String::new();
    empty.dotgraph("e", &mut out).unwrap();
    assert_eq!(out, "digraph \"graph-e\" {}");
}

#[cfg(miri)]
const FUZZ_RANGE: Range<usize> = 0..10;

#[cfg(not(miri))]
const FUZZ_RANGE: Range<usize> = 0..1000;

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        max_shrink_iters: 65536,
        .. ProptestConfig::default()
    })]

    #[test]
    fn btree_equivalence(
        seed in any::<u64>(),
        ops in proptest::collection::vec(model::op_strategy(), FUZZ_RANGE),
    ) {
        model::run_btree_equivalence(RemovalPolicy::Seeded(seed), ops);
    }

    #[test]
    fn removal_outcome_is_policy_independent(
        keys in proptest::collection::btree_set(0u32..500, 0..64),
        order in any::<u64>(),
        removed in proptest::collection::vec(0u32..500, 0..32),
    ) {
        // Insert in a scrambled but reproducible order.
        let mut keys: Vec<u32> = keys.into_iter().collect();
        let n = keys.len();
        for i in 0..n {
            keys.swap(i, (order as usize).wrapping_mul(i + 1) % n);
        }

        let trees = POLICIES.map(|policy| {
            let mut tree = tree_of(policy, &keys);
            for key in &removed {
                tree.remove(key);
            }
            tree.assert_invariants();
            tree
        });

        prop_assert!(trees[0].iter().eq(trees[1].iter()));
        prop_assert!(trees[0].iter().eq(trees[2].iter()));
    }
}
