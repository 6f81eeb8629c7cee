use tracing::trace;

use super::map::OrdMap;

impl<K: Ord + Clone, V: Clone> OrdMap<K, V> {
    /// All entries of both maps. On a shared key the value from `self` wins.
    pub fn union(&self, other: &Self) -> Self {
        trace!(left = self.count(), right = other.count(), "union");
        self.foldl(|k, v, acc: Self| acc.set(k.clone(), v.clone()), other.clone())
    }
    /// Entries of `self` whose key is also in `other`.
    pub fn intersect<W>(&self, other: &OrdMap<K, W>) -> Self {
        trace!(left = self.count(), right = other.count(), "intersect");
        self.keep_if(|k, _| other.member(k))
    }
    /// Entries of `self` whose key is not in `other`.
    pub fn diff<W>(&self, other: &OrdMap<K, W>) -> Self {
        trace!(left = self.count(), right = other.count(), "diff");
        other.foldl(|k, _, acc: Self| acc.remove(k), self.clone())
    }
}

impl<K: Ord, V> OrdMap<K, V> {
    /// Walks both maps in ascending key order, feeding each key to exactly
    /// one of the three steps: `left_only` for keys only in `left`, `both`
    /// for shared keys and `right_only` for keys only in `right`.
    pub fn merge<W, R>(
        mut left_only: impl FnMut(&K, &V, R) -> R,
        mut both: impl FnMut(&K, &V, &W, R) -> R,
        mut right_only: impl FnMut(&K, &W, R) -> R,
        left: &Self,
        right: &OrdMap<K, W>,
        seed: R,
    ) -> R {
        trace!(left = left.count(), right = right.count(), "merge");
        let mut lefts = left.iter().peekable();
        let mut acc = seed;
        for (key, r) in right {
            while let Some((k, l)) = lefts.next_if(|&(k, _)| k < key) {
                acc = left_only(k, l, acc);
            }
            acc = match lefts.next_if(|&(k, _)| k == key) {
                Some((_, l)) => both(key, l, r, acc),
                None => right_only(key, r, acc),
            };
        }
        lefts.fold(acc, |acc, (k, l)| left_only(k, l, acc))
    }
}
