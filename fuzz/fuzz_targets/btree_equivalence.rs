#![no_main]
use libfuzzer_sys::fuzz_target;

use bst_map::{
    model::{run_btree_equivalence, Op},
    RemovalPolicy,
};

fuzz_target!(|input: (u64, Vec<Op>)| {
    let (seed, ops) = input;
    run_btree_equivalence(RemovalPolicy::Seeded(seed), ops)
});
