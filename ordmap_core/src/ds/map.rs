use std::{borrow::Borrow, fmt};

use super::rbt::SubTree;
pub use super::rbt::Iter;

/// A persistent map ordered by `K: Ord`.
///
/// All updates return a new map and leave `self` intact. The two versions
/// share every subtree the update did not touch, so both stay cheap to keep
/// around and can be read from several threads at once.
///
/// `K`'s `Ord` must be a total order. An inconsistent ordering is not
/// detected and leaves the shape of the tree unspecified.
pub struct OrdMap<K, V> {
    tree: SubTree<K, V>,
}

impl<K, V> OrdMap<K, V> {
    /// The empty map.
    #[must_use]
    pub const fn new() -> Self {
        OrdMap {
            tree: SubTree::new(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
    /// Number of entries. Walks the whole tree.
    pub fn count(&self) -> usize {
        self.tree.len()
    }
    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }
    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.min_node().map(|x| (&x.key, &x.value))
    }
    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.max_node().map(|x| (&x.key, &x.value))
    }
    /// The lowest-keyed entry satisfying `pred`, without visiting entries
    /// past it.
    pub fn find_first(&self, mut pred: impl FnMut(&K, &V) -> bool) -> Option<(&K, &V)> {
        self.tree.find_first(&mut pred).map(|x| (&x.key, &x.value))
    }
    /// The highest-keyed entry satisfying `pred`.
    pub fn find_last(&self, mut pred: impl FnMut(&K, &V) -> bool) -> Option<(&K, &V)> {
        self.tree.find_last(&mut pred).map(|x| (&x.key, &x.value))
    }
    pub fn any(&self, pred: impl FnMut(&K, &V) -> bool) -> bool {
        self.find_first(pred).is_some()
    }
    pub fn all(&self, mut pred: impl FnMut(&K, &V) -> bool) -> bool {
        self.find_first(|k, v| !pred(k, v)).is_none()
    }
    /// Folds entries from the lowest key to the highest.
    pub fn foldl<A>(&self, mut f: impl FnMut(&K, &V, A) -> A, acc: A) -> A {
        self.tree.foldl(&mut f, acc)
    }
    /// Folds entries from the highest key to the lowest.
    pub fn foldr<A>(&self, mut f: impl FnMut(&K, &V, A) -> A, acc: A) -> A {
        self.tree.foldr(&mut f, acc)
    }
}

impl<K: Ord, V> OrdMap<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key).map(|x| &x.value)
    }
    pub fn member<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(key).is_some()
    }
    /// Verifies ordering, color and black-height invariants by walking the
    /// whole tree. Returns the black height on success.
    pub fn check_invariants(&self) -> crate::err::Result<usize> {
        self.tree.check()
    }
}

impl<K: Clone, V: Clone> OrdMap<K, V> {
    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }
    /// Values in ascending key order.
    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<K: Clone, V> OrdMap<K, V> {
    /// Transforms every value. The result has the same keys and tree shape.
    pub fn map<W>(&self, mut f: impl FnMut(&K, &V) -> W) -> OrdMap<K, W> {
        OrdMap {
            tree: self.tree.map(&mut f),
        }
    }
}

impl<K: Ord + Clone, V: Clone> OrdMap<K, V> {
    pub fn singleton(key: K, value: V) -> Self {
        Self::new().set(key, value)
    }
    /// Builds a map from pairs; a later pair replaces an earlier one with the
    /// same key.
    pub fn from_array(pairs: &[(K, V)]) -> Self {
        pairs.iter().cloned().collect()
    }
    /// Inserts or replaces the value at `key`.
    #[must_use]
    pub fn set(&self, key: K, value: V) -> Self {
        OrdMap {
            tree: self.tree.insert(key, value).blacken(),
        }
        .verified()
    }
    /// Removes `key`. An absent key returns `self` unchanged, sharing its root.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.member(key) {
            return self.clone();
        }
        OrdMap {
            tree: self.tree.remove(key).blacken(),
        }
        .verified()
    }
    /// Replaces the entry at `key` with whatever `f` makes of the current
    /// value; `None` removes the entry.
    #[must_use]
    pub fn update(&self, key: K, f: impl FnOnce(Option<&V>) -> Option<V>) -> Self {
        match f(self.get(&key)) {
            Some(value) => self.set(key, value),
            None => self.remove(&key),
        }
    }
    pub fn keep_if(&self, mut pred: impl FnMut(&K, &V) -> bool) -> Self {
        self.foldl(
            |k, v, acc: Self| {
                if pred(k, v) {
                    acc.set(k.clone(), v.clone())
                } else {
                    acc
                }
            },
            Self::new(),
        )
    }
    /// Maps every entry and keeps only the `Some` results.
    pub fn map_and_keep_just<W: Clone>(
        &self,
        mut f: impl FnMut(&K, &V) -> Option<W>,
    ) -> OrdMap<K, W> {
        self.foldl(
            |k, v, acc: OrdMap<K, W>| match f(k, v) {
                Some(w) => acc.set(k.clone(), w),
                None => acc,
            },
            OrdMap::new(),
        )
    }
    /// Splits into the entries satisfying `pred` and the rest.
    pub fn partition(&self, mut pred: impl FnMut(&K, &V) -> bool) -> (Self, Self) {
        self.foldl(
            |k, v, (trues, falses): (Self, Self)| {
                if pred(k, v) {
                    (trues.set(k.clone(), v.clone()), falses)
                } else {
                    (trues, falses.set(k.clone(), v.clone()))
                }
            },
            (Self::new(), Self::new()),
        )
    }
    fn verified(self) -> Self {
        #[cfg(feature = "check-invariants")]
        debug_assert!(
            self.tree.check().is_ok(),
            "red-black invariants broken after update"
        );
        self
    }
}

impl<K, V> Clone for OrdMap<K, V> {
    fn clone(&self) -> Self {
        OrdMap {
            tree: self.tree.clone(),
        }
    }
}

impl<K, V> Default for OrdMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrdMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrdMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrdMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord + Clone, V: Clone> FromIterator<(K, V)> for OrdMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |map, (k, v)| map.set(k, v))
    }
}

impl<'a, K, V> IntoIterator for &'a OrdMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
