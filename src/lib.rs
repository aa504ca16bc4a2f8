//! An ordered map backed by an unbalanced binary search tree.

// The tree never rebalances. Its shape is entirely determined by the order of insertions and
// removals, so its height can reach the number of elements on sorted input. Every walk over the
// tree is iterative for that reason; nothing recurses on the height.
//
// Nodes live in an arena and refer to each other through `NodeId`s. The invariants of the tree
// are:
// 1. Every key in a node's left subtree is less than the node's key, and every key in its right
//    subtree is greater. Keys are unique.
// 2. A node's child links and its children's parent links agree, and the root has no parent.
// 3. `len` is the number of nodes reachable from the root, which is also the number of nodes in
//    the arena.

use core::{borrow::Borrow, cmp::Ordering, fmt};

use tracing::trace;

mod arena;
mod debug;
pub mod entry;
pub mod error;
pub mod iter;
pub mod map;
#[cfg(any(test, feature = "model"))]
pub mod model;
mod node;
pub mod policy;

#[cfg(test)]
mod tests;

use crate::{
    arena::Arena,
    entry::{Entry, InsertAs},
    iter::{InOrder, Iter, Keys, Values},
    node::{Dir, Link, Node, NodeId},
    policy::{Chooser, Replacement},
};

pub use crate::{
    error::{Error, LinkSlot, Result},
    map::BstMap,
    policy::RemovalPolicy,
};

/// An unbalanced binary search tree of key-value entries.
///
/// Lookups, insertions and removals take _O(h)_ time, where _h_ is the height of the tree:
/// _O(log(n))_ on average for keys inserted in random order, and _O(n)_ in the worst case.
#[derive(Clone)]
pub struct BstTree<K, V> {
    arena: Arena<K, V>,
    root: Link,
    len: usize,
    chooser: Chooser,
}

// The result of descending the tree looking for a key.
pub(crate) enum Search {
    Found(NodeId),
    Vacant(InsertAs),
}

impl<K: Ord, V> BstTree<K, V> {
    /// Returns a new empty tree which promotes the in-order successor on removal.
    pub fn new() -> BstTree<K, V> {
        BstTree::with_policy(RemovalPolicy::default())
    }

    /// Returns a new empty tree using `policy` to remove nodes with two children.
    pub fn with_policy(policy: RemovalPolicy) -> BstTree<K, V> {
        BstTree {
            arena: Arena::new(),
            root: None,
            len: 0,
            chooser: Chooser::new(policy),
        }
    }

    /// Returns the policy used to remove nodes with two children.
    pub fn policy(&self) -> RemovalPolicy {
        self.chooser.policy()
    }

    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        let empty = self.len() == 0;
        debug_assert_eq!(empty, self.root.is_none());
        empty
    }

    /// Returns the number of elements in the tree.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<NodeId> = self.root.into_iter().collect();

        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| [self.arena[id].links.left(), self.arena[id].links.right()])
                .flatten()
                .collect();
        }

        height
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self)
    where
        K: fmt::Debug,
    {
        assert_eq!(self.arena.len(), self.len, "arena holds unreachable nodes");

        let Some(root) = self.root else {
            assert_eq!(self.len, 0);
            return;
        };

        assert_eq!(self.arena[root].links.parent(), None, "root has a parent");

        let mut reachable = 0;
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            reachable += 1;
            let node = &self.arena[id];

            for dir in [Dir::Left, Dir::Right] {
                if let Some(child) = node.links.child(dir) {
                    // Ensure child's parent link points to this node.
                    assert_eq!(self.arena[child].links.parent(), Some(id));

                    let ordering = self.arena[child].key.cmp(&node.key);
                    let expected = match dir {
                        Dir::Left => Ordering::Less,
                        Dir::Right => Ordering::Greater,
                    };
                    assert_eq!(
                        ordering, expected,
                        "{:?} child {:?} of {:?}",
                        dir, self.arena[child].key, node.key
                    );

                    stack.push(child);
                }
            }
        }

        assert_eq!(reachable, self.len, "len does not match reachable nodes");

        // Parent-child ordering alone does not order whole subtrees.
        let order = self.in_order();
        let keys: Vec<&K> = order.ids().rev().map(|id| &self.arena[id].key).collect();
        assert!(
            keys.windows(2).all(|w| w[0] < w[1]),
            "in-order keys are not strictly ascending: {keys:?}"
        );
    }

    // Descends from the root looking for `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut cur) = self.root else {
            return Search::Vacant(InsertAs::Root);
        };

        loop {
            let node = &self.arena[cur];

            let dir = match key.cmp(node.key.borrow()) {
                Ordering::Less => Dir::Left,
                Ordering::Equal => return Search::Found(cur),
                Ordering::Greater => Dir::Right,
            };

            match node.links.child(dir) {
                Some(child) => cur = child,
                None => return Search::Vacant(InsertAs::Child { parent: cur, dir }),
            }
        }
    }

    pub(crate) fn get_raw<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// Returns `true` if the tree contains an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_raw(key).is_some()
    }

    /// Returns a reference to the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and the value associated with `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = &self.arena[self.get_raw(key)?];
        Some((&node.key, &node.value))
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.get_raw(key)?;
        Some(&mut self.arena[id].value)
    }

    /// Returns the entry for `key`, for in-place insertion or update.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        match self.search(&key) {
            Search::Found(node) => Entry::occupied(self, node),
            Search::Vacant(insert_as) => Entry::vacant(self, key, insert_as),
        }
    }

    /// Inserts a new entry into the tree.
    ///
    /// Fails with [`Error::DuplicateKey`] if `key` is already present, leaving the tree untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        match self.search(&key) {
            Search::Found(_) => Err(Error::DuplicateKey),
            Search::Vacant(insert_as) => self.attach(insert_as, key, value).map(|_| ()),
        }
    }

    /// Inserts `value` at `key`, replacing and returning the previous value if there was one.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.entry(key) {
            Entry::Occupied(mut occupied) => Some(occupied.insert(value)),
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                None
            }
        }
    }

    // Creates a node for the entry and links it in at `insert_as`.
    pub(crate) fn attach(&mut self, insert_as: InsertAs, key: K, value: V) -> Result<NodeId> {
        let id = self.arena.insert(Node::new(key, value));

        match insert_as {
            InsertAs::Root => {
                debug_assert!(self.root.is_none());
                trace!(?id, "attaching as root");
                self.root = Some(id);
            }

            InsertAs::Child { parent, dir } => {
                trace!(?id, ?parent, ?dir, "attaching as child");
                if let Err(err) = self.link_child(parent, dir, id) {
                    self.arena.remove(id);
                    return Err(err);
                }
            }
        }

        self.len += 1;
        Ok(id)
    }

    // `child` must be freshly created, so only the parent's slot can already be taken.
    fn link_child(&mut self, parent: NodeId, dir: Dir, child: NodeId) -> Result<()> {
        self.arena[child].links.set_parent(parent)?;
        self.arena[parent].links.set_child(dir, child)
    }

    /// Returns the entry with the minimum key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = &self.arena[self.min_in_subtree(self.root?)];
        Some((&node.key, &node.value))
    }

    /// Returns the entry with the maximum key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let node = &self.arena[self.max_in_subtree(self.root?)];
        Some((&node.key, &node.value))
    }

    /// Removes and returns the entry with the minimum key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.min_in_subtree(self.root?);
        Some(self.remove_at(first))
    }

    /// Removes and returns the entry with the maximum key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.max_in_subtree(self.root?);
        Some(self.remove_at(last))
    }

    /// Removes the entry for `key`, returning it, or [`Error::KeyNotFound`] if there is none.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.get_raw(key).ok_or(Error::KeyNotFound)?;
        Ok(self.remove_at(node))
    }

    /// Removes the entry for `key`, returning it if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.delete(key).ok()
    }

    #[inline]
    fn min_in_subtree(&self, root: NodeId) -> NodeId {
        let mut cur = root;
        while let Some(left) = self.arena[cur].links.left() {
            cur = left;
        }
        cur
    }

    #[inline]
    fn max_in_subtree(&self, root: NodeId) -> NodeId {
        let mut cur = root;
        while let Some(right) = self.arena[cur].links.right() {
            cur = right;
        }
        cur
    }

    // Removes `node` from the tree and returns its entry.
    pub(crate) fn remove_at(&mut self, node: NodeId) -> (K, V) {
        // There are three possible cases:
        //
        // 1. `node` is a leaf. It is cut from its parent, or the tree becomes empty.
        //
        // 2. `node` has one child. The child takes `node`'s place.
        //
        // 3. `node` has two children. Its successor (the minimum of the right subtree) or its
        //    predecessor (the maximum of the left subtree) has at most one child, so it is removed
        //    by case 1 or 2 instead, and its entry is moved into `node`.
        let links = &self.arena[node].links;

        let entry = match (links.left(), links.right()) {
            (Some(left), Some(right)) => {
                let replacement = match self.chooser.choose() {
                    Replacement::Successor => self.min_in_subtree(right),
                    Replacement::Predecessor => self.max_in_subtree(left),
                };
                trace!(?node, ?replacement, "removing node with two children");

                let (key, value) = self.unlink(replacement);
                self.arena[node].swap_data(key, value)
            }

            _ => self.unlink(node),
        };

        self.len -= 1;
        entry
    }

    // Detaches a node with at most one child and frees it.
    fn unlink(&mut self, node: NodeId) -> (K, V) {
        let links = &self.arena[node].links;
        let parent = links.parent();

        match (links.left(), links.right(), parent) {
            (None, None, Some(parent)) => {
                trace!(?node, "removing leaf");
                self.arena.detach_no_children(node, parent);
            }

            (None, None, None) => {
                trace!(?node, "removing last node");
                self.root = None;
            }

            (None, Some(_), _) => {
                trace!(?node, "removing node with right child");
                let promoted = self.arena.detach_promote_right(node, parent);
                if parent.is_none() {
                    self.root = Some(promoted);
                }
            }

            (Some(_), None, _) => {
                trace!(?node, "removing node with left child");
                let promoted = self.arena.detach_promote_left(node, parent);
                if parent.is_none() {
                    self.root = Some(promoted);
                }
            }

            (Some(_), Some(_), _) => unreachable!("unlinked node must have at most one child"),
        }

        self.arena.remove(node).into_entry()
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        // Entries are removed in ascending order, so each removed node is the minimum of the
        // remaining tree and never has a left child.
        let mut order = self.in_order();

        while let Some(id) = order.pop() {
            debug_assert!(self.arena[id].links.left().is_none());
            self.remove_at(id);
        }

        debug_assert!(self.root.is_none());
        debug_assert_eq!(self.len(), 0);

        self.arena.clear();
    }

    pub(crate) fn in_order(&self) -> InOrder {
        InOrder::new(&self.arena, self.root, self.len)
    }

    /// Returns an iterator over the entries of the tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Returns an iterator over the keys of the tree in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the tree in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Ord, V> Default for BstTree<K, V> {
    fn default() -> Self {
        BstTree::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for BstTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
