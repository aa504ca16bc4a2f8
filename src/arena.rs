use core::{
    mem,
    ops::{Index, IndexMut},
};

use crate::node::{Dir, Link, Node, NodeId};

#[derive(Clone, Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Link },
}

/// Owns every node of a tree. Nodes are addressed by [`NodeId`]s, which stay valid until the node
/// is removed; freed slots are reused by later insertions.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Link,
    len: usize,
}

impl<K, V> Arena<K, V> {
    pub(crate) const fn new() -> Arena<K, V> {
        Arena {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    /// Returns the number of live nodes.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, V>> {
        match self.slots.get(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K, V>> {
        match self.slots.get_mut(id.index())? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    /// Stores `node`, returning its handle.
    pub(crate) fn insert(&mut self, node: Node<K, V>) -> NodeId {
        self.len += 1;

        match self.free {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.index()], Slot::Occupied(node));
                self.free = match slot {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Removes the node at `id` and returns it. The node's links are returned as they were; the
    /// caller is responsible for unlinking it from its neighbors first.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node<K, V> {
        let slot = &mut self.slots[id.index()];
        if let Slot::Vacant { .. } = slot {
            panic!("no node at {id:?}");
        }

        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        let Slot::Occupied(node) = mem::replace(slot, vacant) else {
            unreachable!()
        };

        self.free = Some(id);
        self.len -= 1;
        node
    }

    /// Drops every node and releases the slot storage.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }

    /// Returns which child of `parent` the node `child` is.
    pub(crate) fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self[parent].links.left() == Some(child) {
            Dir::Left
        } else {
            debug_assert_eq!(
                self[parent].links.right(),
                Some(child),
                "`child` must be a child of `parent`"
            );
            Dir::Right
        }
    }

    /// Clears whichever child link of `parent` points at the leaf `node`.
    pub(crate) fn detach_no_children(&mut self, node: NodeId, parent: NodeId) {
        debug_assert!(self[node].links.is_leaf());

        let which = self.which_child(parent, node);
        self[parent].links.relink_child(which, None);
        self[node].links.relink_parent(None);
    }

    /// Moves the `dir` child of `node` into `node`'s position, returning the promoted child.
    ///
    /// `node` must have no child on the other side. If `parent` is `None`, `node` was the root;
    /// the promoted child's parent link is cleared and the caller must make it the new root.
    pub(crate) fn detach_promote(&mut self, node: NodeId, parent: Link, dir: Dir) -> NodeId {
        debug_assert!(self[node].links.child(!dir).is_none());

        let child = match self[node].links.relink_child(dir, None) {
            Some(child) => child,
            None => unreachable!("promoted child must exist"),
        };

        self[child].links.relink_parent(parent);

        if let Some(parent) = parent {
            let which = self.which_child(parent, node);
            self[parent].links.relink_child(which, Some(child));
        }

        self[node].links.relink_parent(None);

        child
    }

    #[inline]
    pub(crate) fn detach_promote_right(&mut self, node: NodeId, parent: Link) -> NodeId {
        self.detach_promote(node, parent, Dir::Right)
    }

    #[inline]
    pub(crate) fn detach_promote_left(&mut self, node: NodeId, parent: Link) -> NodeId {
        self.detach_promote(node, parent, Dir::Left)
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    fn index(&self, id: NodeId) -> &Node<K, V> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("no node at {id:?}"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("no node at {id:?}"),
        }
    }
}
