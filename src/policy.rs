use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Selects which neighbor replaces a node with two children when it is removed.
///
/// Either choice preserves the ordering of the tree, so the set of entries left behind is the same
/// for every policy; only the shape of the tree differs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Always promote the in-order successor (the minimum of the right subtree).
    #[default]
    Successor,
    /// Always promote the in-order predecessor (the maximum of the left subtree).
    Predecessor,
    /// Flip a coin for every removal, using a generator seeded with the given value.
    ///
    /// Two trees with the same seed and the same sequence of operations end up with the same
    /// shape.
    Seeded(u64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Replacement {
    Successor,
    Predecessor,
}

#[derive(Clone, Debug)]
pub(crate) struct Chooser {
    policy: RemovalPolicy,
    rng: Option<ChaCha8Rng>,
}

impl Chooser {
    pub(crate) fn new(policy: RemovalPolicy) -> Chooser {
        let rng = match policy {
            RemovalPolicy::Seeded(seed) => Some(ChaCha8Rng::seed_from_u64(seed)),
            _ => None,
        };

        Chooser { policy, rng }
    }

    pub(crate) fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    pub(crate) fn choose(&mut self) -> Replacement {
        match (self.policy, &mut self.rng) {
            (RemovalPolicy::Successor, _) => Replacement::Successor,
            (RemovalPolicy::Predecessor, _) => Replacement::Predecessor,
            (RemovalPolicy::Seeded(_), Some(rng)) => {
                if rng.gen_bool(0.5) {
                    Replacement::Successor
                } else {
                    Replacement::Predecessor
                }
            }
            (RemovalPolicy::Seeded(_), None) => unreachable!("seeded policy without a generator"),
        }
    }
}
