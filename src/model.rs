extern crate std;

use std::{collections::BTreeMap, prelude::v1::*};

use arbitrary::Arbitrary;
use proptest::strategy::{Just, Strategy};

use crate::{BstMap, Error, RemovalPolicy};

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum ItemValue {
    Index(usize),
    Random(u32),
}

proptest::prop_compose! {
    fn index_strategy()(
        index in 0usize..1000,
    ) -> ItemValue {
        ItemValue::Index(index)
    }
}

proptest::prop_compose! {
    fn random_strategy()(
        random in 0u32..1000,
    ) -> ItemValue {
        ItemValue::Random(random)
    }
}

fn value_strategy() -> impl Strategy<Value = ItemValue> {
    proptest::prop_oneof![index_strategy(), random_strategy()]
}

#[derive(Copy, Clone, Debug, Arbitrary)]
pub enum Op {
    Insert(ItemValue),
    Set(ItemValue),
    Get(ItemValue),
    Remove(ItemValue),
    First,
    PopFirst,
    Last,
    PopLast,
    Clear,
}

impl Op {
    // Resolves `Index` values against the keys currently in the map, so that most operations hit
    // existing keys.
    fn finalize(self, sorted: &[u32]) -> FinalOp {
        fn get_value(v: &[u32], i: ItemValue) -> u32 {
            match i {
                ItemValue::Index(idx) => {
                    if v.is_empty() {
                        idx as u32
                    } else {
                        v[idx % v.len()]
                    }
                }
                ItemValue::Random(v) => v,
            }
        }

        match self {
            Op::Insert(item) => FinalOp::Insert(get_value(sorted, item)),
            Op::Set(item) => FinalOp::Set(get_value(sorted, item)),
            Op::Get(item) => FinalOp::Get(get_value(sorted, item)),
            Op::Remove(item) => FinalOp::Remove(get_value(sorted, item)),
            Op::First => FinalOp::First,
            Op::PopFirst => FinalOp::PopFirst,
            Op::Last => FinalOp::Last,
            Op::PopLast => FinalOp::PopLast,
            Op::Clear => FinalOp::Clear,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum FinalOp {
    Insert(u32),
    Set(u32),
    Get(u32),
    Remove(u32),
    First,
    PopFirst,
    Last,
    PopLast,
    Clear,
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    proptest::prop_oneof![
        40 => value_strategy().prop_map(Op::Insert),
        20 => value_strategy().prop_map(Op::Set),
        20 => value_strategy().prop_map(Op::Get),
        30 => value_strategy().prop_map(Op::Remove),
        10 => Just(Op::First),
        10 => Just(Op::PopFirst),
        10 => Just(Op::Last),
        10 => Just(Op::PopLast),
        // Rare, so that trees get a chance to grow.
        1 => Just(Op::Clear),
    ]
}

/// Runs `ops` against both a [`BstMap`] and a `BTreeMap`, asserting that they agree after every
/// operation and that the tree's invariants hold.
pub fn run_btree_equivalence(policy: RemovalPolicy, ops: Vec<Op>) {
    let mut sorted_keys = Vec::with_capacity(ops.len());
    let mut btree: BTreeMap<u32, usize> = BTreeMap::new();
    let mut bst: BstMap<u32, usize> = BstMap::with_policy(policy);

    fn insert_sorted(v: &mut Vec<u32>, key: u32) {
        if let Err(idx) = v.binary_search(&key) {
            v.insert(idx, key);
        }
    }

    fn remove_sorted(v: &mut Vec<u32>, key: u32) {
        if let Ok(idx) = v.binary_search(&key) {
            v.remove(idx);
        }
    }

    for (op_id, op) in ops.into_iter().enumerate() {
        let final_op = op.finalize(&sorted_keys);

        match final_op {
            FinalOp::Insert(key) => {
                insert_sorted(&mut sorted_keys, key);

                let from_btree = if btree.contains_key(&key) {
                    Err(Error::DuplicateKey)
                } else {
                    btree.insert(key, op_id);
                    Ok(())
                };
                let from_bst = bst.insert(key, op_id);

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Set(key) => {
                insert_sorted(&mut sorted_keys, key);

                let from_btree = btree.insert(key, op_id);
                let from_bst = bst.set(key, op_id);

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Get(key) => {
                let from_btree = btree.get(&key);
                let from_bst = bst.get(&key);

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Remove(key) => {
                remove_sorted(&mut sorted_keys, key);

                let from_btree = btree.remove(&key).ok_or(Error::KeyNotFound);
                let from_bst = bst.try_remove(&key);

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::First => {
                let from_btree = btree.first_key_value();
                let from_bst = bst.first_key_value();

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopFirst => {
                let from_btree = btree.pop_first();
                let from_bst = bst.pop_first();

                if let Some((key, _)) = from_btree {
                    remove_sorted(&mut sorted_keys, key);
                }

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Last => {
                let from_btree = btree.last_key_value();
                let from_bst = bst.last_key_value();

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::PopLast => {
                let from_btree = btree.pop_last();
                let from_bst = bst.pop_last();

                if let Some((key, _)) = from_btree {
                    remove_sorted(&mut sorted_keys, key);
                }

                assert_eq!(from_btree, from_bst, "FinalOp #{op_id}: {final_op:?}");
            }

            FinalOp::Clear => {
                sorted_keys.clear();
                btree.clear();
                bst.clear();
            }
        }

        bst.tree().assert_invariants();
        assert_eq!(btree.len(), bst.len());
        assert!(btree.iter().eq(bst.iter()));
    }
}
