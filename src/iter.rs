use core::iter::FusedIterator;

use crate::{arena::Arena, node::Link, node::NodeId, BstTree};

/// The nodes of a tree in ascending key order, computed up front.
///
/// The tree is walked in descending order (right subtree, node, left subtree) and every node is
/// pushed onto a stack, so popping the stack yields the nodes in ascending order.
pub(crate) struct InOrder {
    stack: Vec<NodeId>,
}

impl InOrder {
    pub(crate) fn new<K, V>(arena: &Arena<K, V>, root: Link, len: usize) -> InOrder {
        let mut stack = Vec::with_capacity(len);
        let mut pending = Vec::new();
        let mut opt_cur = root;

        loop {
            // Descend to the maximum of the current subtree, remembering the path.
            while let Some(cur) = opt_cur {
                pending.push(cur);
                opt_cur = arena[cur].links.right();
            }

            let Some(cur) = pending.pop() else {
                break;
            };

            // Everything greater than `cur` has been pushed already.
            stack.push(cur);
            opt_cur = arena[cur].links.left();
        }

        debug_assert_eq!(stack.len(), len);

        InOrder { stack }
    }

    /// Returns the next node in ascending order.
    #[inline]
    pub(crate) fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns the remaining nodes in descending order.
    pub(crate) fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.stack.iter().copied()
    }
}

/// An iterator over the entries of a [`BstTree`] in ascending key order.
///
/// Created by [`BstTree::iter`].
pub struct Iter<'tree, K, V> {
    tree: &'tree BstTree<K, V>,
    order: InOrder,
}

impl<'tree, K: Ord, V> Iter<'tree, K, V> {
    pub(crate) fn new(tree: &'tree BstTree<K, V>) -> Self {
        Iter {
            tree,
            order: tree.in_order(),
        }
    }
}

impl<'tree, K, V> Iterator for Iter<'tree, K, V> {
    type Item = (&'tree K, &'tree V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.tree.arena[self.order.pop()?];
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.order.len(), Some(self.order.len()))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            order: InOrder {
                stack: self.order.stack.clone(),
            },
        }
    }
}

/// An iterator over the keys of a tree in ascending order.
pub struct Keys<'tree, K, V> {
    pub(crate) inner: Iter<'tree, K, V>,
}

impl<'tree, K, V> Iterator for Keys<'tree, K, V> {
    type Item = &'tree K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a tree in ascending key order.
pub struct Values<'tree, K, V> {
    pub(crate) inner: Iter<'tree, K, V>,
}

impl<'tree, K, V> Iterator for Values<'tree, K, V> {
    type Item = &'tree V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An owning iterator over the entries of a tree in ascending key order.
pub struct IntoIter<K, V> {
    arena: Arena<K, V>,
    order: InOrder,
}

impl<K: Ord, V> IntoIter<K, V> {
    pub(crate) fn new(tree: BstTree<K, V>) -> Self {
        let order = tree.in_order();
        IntoIter {
            arena: tree.arena,
            order,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        // The tree is gone, so nodes can be taken without unlinking them.
        let id = self.order.pop()?;
        Some(self.arena.remove(id).into_entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.order.len(), Some(self.order.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<'tree, K: Ord, V> IntoIterator for &'tree BstTree<K, V> {
    type Item = (&'tree K, &'tree V);
    type IntoIter = Iter<'tree, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> IntoIterator for BstTree<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
