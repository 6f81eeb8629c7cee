use std::{borrow::Borrow, fmt};

use super::map::{Iter, OrdMap};

/// A persistent set of unique values ordered by `T: Ord`, stored as the keys
/// of an `OrdMap<T, ()>`.
pub struct OrdSet<T> {
    map: OrdMap<T, ()>,
}

pub struct SetIter<'a, T> {
    inner: Iter<'a, T, ()>,
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<T> OrdSet<T> {
    #[must_use]
    pub const fn new() -> Self {
        OrdSet { map: OrdMap::new() }
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn count(&self) -> usize {
        self.map.count()
    }
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            inner: self.map.iter(),
        }
    }
    pub fn first(&self) -> Option<&T> {
        self.map.first().map(|(k, _)| k)
    }
    pub fn last(&self) -> Option<&T> {
        self.map.last().map(|(k, _)| k)
    }
    pub fn find_first(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.map.find_first(|k, _| pred(k)).map(|(k, _)| k)
    }
    pub fn find_last(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&T> {
        self.map.find_last(|k, _| pred(k)).map(|(k, _)| k)
    }
    pub fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.map.any(|k, _| pred(k))
    }
    pub fn all(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.map.all(|k, _| pred(k))
    }
    pub fn foldl<A>(&self, mut f: impl FnMut(&T, A) -> A, acc: A) -> A {
        self.map.foldl(|k, _, acc| f(k, acc), acc)
    }
    pub fn foldr<A>(&self, mut f: impl FnMut(&T, A) -> A, acc: A) -> A {
        self.map.foldr(|k, _, acc| f(k, acc), acc)
    }
}

impl<T: Ord> OrdSet<T> {
    pub fn member<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.member(value)
    }
    pub fn check_invariants(&self) -> crate::err::Result<usize> {
        self.map.check_invariants()
    }
}

impl<T: Ord + Clone> OrdSet<T> {
    pub fn singleton(value: T) -> Self {
        OrdSet {
            map: OrdMap::singleton(value, ()),
        }
    }
    #[must_use]
    pub fn set(&self, value: T) -> Self {
        OrdSet {
            map: self.map.set(value, ()),
        }
    }
    #[must_use]
    pub fn remove<Q>(&self, value: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        OrdSet {
            map: self.map.remove(value),
        }
    }
    /// Removes `value` if present, inserts it otherwise.
    #[must_use]
    pub fn toggle(&self, value: T) -> Self {
        if self.member(&value) {
            self.remove(&value)
        } else {
            self.set(value)
        }
    }
    pub fn union(&self, other: &Self) -> Self {
        OrdSet {
            map: self.map.union(&other.map),
        }
    }
    pub fn intersect(&self, other: &Self) -> Self {
        OrdSet {
            map: self.map.intersect(&other.map),
        }
    }
    pub fn diff(&self, other: &Self) -> Self {
        OrdSet {
            map: self.map.diff(&other.map),
        }
    }
    /// Values in ascending order.
    pub fn to_array(&self) -> Vec<T> {
        self.map.keys()
    }
    pub fn from_array(values: &[T]) -> Self {
        values.iter().cloned().collect()
    }
    /// Images that compare equal collapse into one element.
    pub fn map<U: Ord + Clone>(&self, mut f: impl FnMut(&T) -> U) -> OrdSet<U> {
        self.foldl(|x, acc: OrdSet<U>| acc.set(f(x)), OrdSet::new())
    }
    pub fn keep_if(&self, mut pred: impl FnMut(&T) -> bool) -> Self {
        OrdSet {
            map: self.map.keep_if(|k, _| pred(k)),
        }
    }
    pub fn map_and_keep_just<U: Ord + Clone>(
        &self,
        mut f: impl FnMut(&T) -> Option<U>,
    ) -> OrdSet<U> {
        self.foldl(
            |x, acc: OrdSet<U>| match f(x) {
                Some(y) => acc.set(y),
                None => acc,
            },
            OrdSet::new(),
        )
    }
    pub fn partition(&self, mut pred: impl FnMut(&T) -> bool) -> (Self, Self) {
        let (trues, falses) = self.map.partition(|k, _| pred(k));
        (OrdSet { map: trues }, OrdSet { map: falses })
    }
}

impl<T> Clone for OrdSet<T> {
    fn clone(&self) -> Self {
        OrdSet {
            map: self.map.clone(),
        }
    }
}

impl<T> Default for OrdSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for OrdSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T: Eq> Eq for OrdSet<T> {}

impl<T: fmt::Debug> fmt::Debug for OrdSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord + Clone> FromIterator<T> for OrdSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OrdSet {
            map: iter.into_iter().map(|x| (x, ())).collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrdSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
