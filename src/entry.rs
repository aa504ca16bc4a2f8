use core::mem;

use crate::{
    node::{Dir, NodeId},
    BstTree,
};

/// A view into a single entry in a [`BstTree`], which may be either vacant or occupied.
pub enum Entry<'tree, K, V> {
    Vacant(VacantEntry<'tree, K, V>),
    Occupied(OccupiedEntry<'tree, K, V>),
}

impl<'tree, K: Ord, V> Entry<'tree, K, V> {
    pub(crate) fn vacant(tree: &'tree mut BstTree<K, V>, key: K, insert_as: InsertAs) -> Self {
        Entry::Vacant(VacantEntry {
            tree,
            key,
            insert_as,
        })
    }

    pub(crate) fn occupied(tree: &'tree mut BstTree<K, V>, node: NodeId) -> Self {
        Entry::Occupied(OccupiedEntry { tree, node })
    }

    /// Returns the key of this entry.
    pub fn key(&self) -> &K {
        match self {
            Entry::Vacant(vacant) => vacant.key(),
            Entry::Occupied(occupied) => occupied.key(),
        }
    }

    /// Inserts `default` if the entry is vacant, and returns a mutable reference to the value.
    pub fn or_insert(self, default: V) -> &'tree mut V {
        self.or_insert_with(|| default)
    }

    /// Inserts the result of `default` if the entry is vacant, and returns a mutable reference to
    /// the value.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'tree mut V {
        match self {
            Entry::Vacant(vacant) => vacant.insert(default()),
            Entry::Occupied(occupied) => occupied.into_mut(),
        }
    }

    /// Applies `f` to the value if the entry is occupied.
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        if let Entry::Occupied(occupied) = &mut self {
            f(occupied.get_mut());
        }
        self
    }
}

// Where a vacant entry's node goes once inserted. The slot is known to be free for as long as the
// tree stays borrowed by the entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum InsertAs {
    Root,
    Child { parent: NodeId, dir: Dir },
}

pub struct VacantEntry<'tree, K, V> {
    pub(crate) tree: &'tree mut BstTree<K, V>,
    pub(crate) key: K,
    pub(crate) insert_as: InsertAs,
}

impl<'tree, K: Ord, V> VacantEntry<'tree, K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts `value` at the key associated with this entry.
    pub fn insert(self, value: V) -> &'tree mut V {
        let tree = self.tree;
        let node = match tree.attach(self.insert_as, self.key, value) {
            Ok(node) => node,
            Err(err) => unreachable!("vacant entry slot was taken: {err}"),
        };

        &mut tree.arena[node].value
    }
}

pub struct OccupiedEntry<'tree, K, V> {
    pub(crate) tree: &'tree mut BstTree<K, V>,
    pub(crate) node: NodeId,
}

impl<'tree, K: Ord, V> OccupiedEntry<'tree, K, V> {
    pub fn key(&self) -> &K {
        &self.tree.arena[self.node].key
    }

    /// Returns a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.tree.arena[self.node].value
    }

    /// Returns a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.tree.arena[self.node].value
    }

    /// Converts the entry into a mutable reference to its value, tied to the tree's borrow.
    pub fn into_mut(self) -> &'tree mut V {
        let tree = self.tree;
        &mut tree.arena[self.node].value
    }

    /// Replaces the value in the entry, returning the previous one. The node keeps its position
    /// and its key.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the tree, returning its value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the tree, returning its key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.tree.remove_at(self.node)
    }
}
