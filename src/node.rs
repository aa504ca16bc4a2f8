use core::{mem, ops::Not};

use crate::error::{Error, LinkSlot, Result};

/// A stable handle to a node stored in the tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> NodeId {
        NodeId(index)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0
    }
}

pub(crate) type Link = Option<NodeId>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

impl From<Dir> for LinkSlot {
    fn from(dir: Dir) -> LinkSlot {
        match dir {
            Dir::Left => LinkSlot::Left,
            Dir::Right => LinkSlot::Right,
        }
    }
}

/// The parent and child links of a node.
///
/// Links are write-once through [`Links::set_parent`] and [`Links::set_child`]: a slot that is
/// already occupied is never overwritten by them. Removal rewires the tree through the `relink_*`
/// methods, which are only called from the detach primitives on the arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Links {
    parent: Link,
    children: [Link; 2],
}

impl Links {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Links {
            parent: None,
            children: [None; 2],
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    #[inline]
    pub(crate) fn parent(&self) -> Link {
        self.parent
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Link {
        self.children[dir as usize]
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.child(Dir::Right)
    }

    /// Sets the parent link, failing if it is already set.
    pub(crate) fn set_parent(&mut self, parent: NodeId) -> Result<()> {
        if self.parent.is_some() {
            return Err(Error::LinkAlreadySet(LinkSlot::Parent));
        }

        self.parent = Some(parent);
        Ok(())
    }

    /// Sets the `dir` child link, failing if it is already set.
    pub(crate) fn set_child(&mut self, dir: Dir, child: NodeId) -> Result<()> {
        let slot = &mut self.children[dir as usize];
        if slot.is_some() {
            return Err(Error::LinkAlreadySet(dir.into()));
        }

        *slot = Some(child);
        Ok(())
    }

    // Overwrites the parent link, returning the previous one. Removal only.
    #[inline]
    pub(crate) fn relink_parent(&mut self, parent: Link) -> Link {
        mem::replace(&mut self.parent, parent)
    }

    // Overwrites the `dir` child link, returning the previous one. Removal only.
    #[inline]
    pub(crate) fn relink_child(&mut self, dir: Dir, child: Link) -> Link {
        mem::replace(&mut self.children[dir as usize], child)
    }
}

/// A single tree cell holding one key-value entry.
#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) links: Links,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Node<K, V> {
    /// Returns an orphaned node with no links set.
    pub(crate) const fn new(key: K, value: V) -> Node<K, V> {
        Node {
            links: Links::new(),
            key,
            value,
        }
    }

    /// Replaces this node's entry, leaving its links untouched, and returns the old entry.
    pub(crate) fn swap_data(&mut self, key: K, value: V) -> (K, V) {
        let key = mem::replace(&mut self.key, key);
        let value = mem::replace(&mut self.value, value);
        (key, value)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_orphaned() {
        let node = Node::new(7u32, "seven");

        assert_eq!(node.links, Links::new());
        assert!(node.links.is_leaf());
        assert_eq!(node.links.parent(), None);
    }

    #[test]
    fn links_are_write_once() {
        let mut links = Links::new();

        links.set_parent(NodeId::new(0)).unwrap();
        links.set_child(Dir::Left, NodeId::new(1)).unwrap();
        links.set_child(Dir::Right, NodeId::new(2)).unwrap();

        assert_eq!(
            links.set_parent(NodeId::new(3)),
            Err(Error::LinkAlreadySet(LinkSlot::Parent))
        );
        assert_eq!(
            links.set_child(Dir::Left, NodeId::new(3)),
            Err(Error::LinkAlreadySet(LinkSlot::Left))
        );
        assert_eq!(
            links.set_child(Dir::Right, NodeId::new(3)),
            Err(Error::LinkAlreadySet(LinkSlot::Right))
        );

        // Failed writes leave the original links in place.
        assert_eq!(links.parent(), Some(NodeId::new(0)));
        assert_eq!(links.left(), Some(NodeId::new(1)));
        assert_eq!(links.right(), Some(NodeId::new(2)));
    }

    #[test]
    fn relink_overwrites() {
        let mut links = Links::new();
        links.set_child(Dir::Left, NodeId::new(1)).unwrap();

        assert_eq!(links.relink_child(Dir::Left, None), Some(NodeId::new(1)));
        assert_eq!(links.relink_child(Dir::Left, Some(NodeId::new(4))), None);
        assert_eq!(links.left(), Some(NodeId::new(4)));

        assert_eq!(links.relink_parent(Some(NodeId::new(9))), None);
        assert_eq!(links.relink_parent(None), Some(NodeId::new(9)));
    }

    #[test]
    fn swap_data_keeps_links() {
        let mut node = Node::new(1u32, 'a');
        node.links.set_parent(NodeId::new(5)).unwrap();

        assert_eq!(node.swap_data(2, 'b'), (1, 'a'));
        assert_eq!((node.key, node.value), (2, 'b'));
        assert_eq!(node.links.parent(), Some(NodeId::new(5)));
    }
}
