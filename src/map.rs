use core::{borrow::Borrow, fmt, ops::Index};

use crate::{
    entry::Entry,
    error::{Error, Result},
    iter::{IntoIter, Iter, Keys, Values},
    BstTree, RemovalPolicy,
};

/// An ordered map based on an unbalanced [binary search tree].
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
#[derive(Clone)]
pub struct BstMap<K, V> {
    tree: BstTree<K, V>,
}

impl<K: Ord, V> BstMap<K, V> {
    /// Creates a new, empty `BstMap`.
    pub fn new() -> Self {
        Self {
            tree: BstTree::new(),
        }
    }

    /// Creates a new, empty `BstMap` which removes entries with two children according to
    /// `policy`.
    pub fn with_policy(policy: RemovalPolicy) -> Self {
        Self {
            tree: BstTree::with_policy(policy),
        }
    }

    /// Returns the policy used to remove entries with two children.
    pub fn policy(&self) -> RemovalPolicy {
        self.tree.policy()
    }

    /// Returns the underlying tree.
    pub fn tree(&self) -> &BstTree<K, V> {
        &self.tree
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains a value associated with `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }

    /// Returns a reference to the value associated with `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key)
    }

    /// Returns a mutable reference to the value associated with `key`.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get_mut(key)
    }

    /// Inserts a new key-value pair.
    ///
    /// Fails with [`Error::DuplicateKey`] if the key is already present; the map is left
    /// unchanged.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.tree.insert(key, value)
    }

    /// Associates `value` with `key`, inserting the key if it is absent.
    ///
    /// If the key was present, its value is replaced in place and the old value is returned.
    #[inline]
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.tree.set(key, value)
    }

    /// Returns the entry for `key`.
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        self.tree.entry(key)
    }

    /// Returns the first key-value pair in the map.
    ///
    /// The returned key is the minimum key in the map.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    /// Removes and returns the first key-value pair in the map.
    ///
    /// The returned key is the minimum key in the map.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first()
    }

    /// Returns the last key-value pair in the map.
    ///
    /// The returned key is the maximum key in the map.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    /// Removes and returns the last key-value pair in the map.
    ///
    /// The returned key is the maximum key in the map.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last()
    }

    /// Removes the value associated with `key` from the map.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).map(|(_, v)| v)
    }

    /// Removes the value associated with `key` from the map, failing with
    /// [`Error::KeyNotFound`] if there is none.
    #[inline]
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.delete(key).map(|(_, v)| v)
    }

    /// Clears the map, removing all elements.
    #[inline]
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns an iterator over the key-value pairs of the map, in ascending key order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    /// Returns an iterator over the keys of the map, in ascending order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        self.tree.keys()
    }

    /// Returns an iterator over the values of the map, in ascending key order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        self.tree.values()
    }

    /// Copies every entry of the map into `dest`, in ascending key order, starting at `offset`.
    ///
    /// Nothing is written unless all entries fit.
    pub fn copy_to(&self, dest: &mut [(K, V)], offset: usize) -> Result<()>
    where
        K: Clone,
        V: Clone,
    {
        if offset > dest.len() {
            return Err(Error::OffsetOutOfRange {
                offset,
                len: dest.len(),
            });
        }

        let available = dest.len() - offset;
        if available < self.len() {
            return Err(Error::InsufficientCapacity {
                required: self.len(),
                available,
            });
        }

        for (slot, (k, v)) in dest[offset..].iter_mut().zip(self.iter()) {
            *slot = (k.clone(), v.clone());
        }

        Ok(())
    }
}

impl<K: Ord, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V: PartialEq> PartialEq for BstMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Ord, V: Eq> Eq for BstMap<K, V> {}

impl<K, Q, V> Index<&Q> for BstMap<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value associated with `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in BstMap"),
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    /// Later pairs replace the values of earlier pairs with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<'map, K: Ord, V> IntoIterator for &'map BstMap<K, V> {
    type Item = (&'map K, &'map V);
    type IntoIter = Iter<'map, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> IntoIterator for BstMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}
