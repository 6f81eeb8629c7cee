//! Property tests for `OrdMap`
//!
//! Random `set`/`remove` sequences are replayed against `rpds::RedBlackTreeMap`
//! as a reference model, and the tree is checked after every step.

use ordmap_core::OrdMap;
use proptest::prelude::*;
use rpds::RedBlackTreeMap;

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u16),
    Remove(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Set(k, v)),
        2 => any::<u8>().prop_map(Op::Remove),
    ]
}

fn replay(ops: &[Op]) -> (OrdMap<u8, u16>, RedBlackTreeMap<u8, u16>) {
    ops.iter().fold(
        (OrdMap::new(), RedBlackTreeMap::new()),
        |(map, model), op| match *op {
            Op::Set(k, v) => (map.set(k, v), model.insert(k, v)),
            Op::Remove(k) => (map.remove(&k), model.remove(&k)),
        },
    )
}

fn entries(pairs: &[(u8, u16)]) -> OrdMap<u8, u16> {
    OrdMap::from_array(pairs)
}

// ============================================================
// Engine
// ============================================================

proptest! {
    #[test]
    fn matches_model_and_keeps_invariants(ops in prop::collection::vec(op(), 0..300)) {
        let mut map = OrdMap::new();
        let mut model = RedBlackTreeMap::new();
        for op in &ops {
            match *op {
                Op::Set(k, v) => {
                    map = map.set(k, v);
                    model = model.insert(k, v);
                }
                Op::Remove(k) => {
                    map = map.remove(&k);
                    model = model.remove(&k);
                }
            }
            prop_assert!(map.check_invariants().is_ok(), "{:?}", map.check_invariants());
        }
        prop_assert_eq!(map.count(), model.size());
        prop_assert!(map.iter().eq(model.iter()));
    }

    #[test]
    fn lookup_after_set(ops in prop::collection::vec(op(), 0..100), k: u8, v: u16) {
        let (map, _) = replay(&ops);
        let updated = map.set(k, v);
        prop_assert_eq!(updated.get(&k), Some(&v));
        prop_assert!(updated.member(&k));
    }

    #[test]
    fn lookup_after_remove(ops in prop::collection::vec(op(), 0..100), k: u8) {
        let (map, _) = replay(&ops);
        let removed = map.remove(&k);
        prop_assert_eq!(removed.get(&k), None);
        prop_assert!(!removed.member(&k));
    }

    #[test]
    fn remove_is_idempotent(ops in prop::collection::vec(op(), 0..100), k: u8) {
        let (map, _) = replay(&ops);
        let once = map.remove(&k);
        prop_assert_eq!(once.remove(&k), once);
    }

    #[test]
    fn keys_strictly_ascending(ops in prop::collection::vec(op(), 0..200)) {
        let (map, _) = replay(&ops);
        let keys = map.keys();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn old_versions_survive_updates(ops in prop::collection::vec(op(), 1..100), k: u8, v: u16) {
        let (map, model) = replay(&ops);
        let _ = map.set(k, v).remove(&k.wrapping_add(1));
        prop_assert!(map.iter().eq(model.iter()));
    }
}

// ============================================================
// Combine algorithms
// ============================================================

proptest! {
    #[test]
    fn diff_and_intersect_partition_left(
        a in prop::collection::vec(any::<(u8, u16)>(), 0..80),
        b in prop::collection::vec(any::<(u8, u16)>(), 0..80),
    ) {
        let (a, b) = (entries(&a), entries(&b));
        let (inside, outside) = (a.intersect(&b), a.diff(&b));
        prop_assert!(inside.check_invariants().is_ok());
        prop_assert!(outside.check_invariants().is_ok());
        prop_assert_eq!(inside.count() + outside.count(), a.count());
        for (k, v) in &a {
            let (hit, miss) = (inside.get(k), outside.get(k));
            prop_assert!(hit.is_some() != miss.is_some());
            prop_assert_eq!(hit.or(miss), Some(v));
            prop_assert_eq!(hit.is_some(), b.member(k));
        }
    }

    #[test]
    fn union_prefers_first_argument(
        a in prop::collection::vec(any::<(u8, u16)>(), 0..80),
        b in prop::collection::vec(any::<(u8, u16)>(), 0..80),
    ) {
        let (a, b) = (entries(&a), entries(&b));
        let u = a.union(&b);
        prop_assert!(u.check_invariants().is_ok());
        for (k, v) in &u {
            prop_assert_eq!(Some(v), a.get(k).or(b.get(k)));
        }
        prop_assert!(a.iter().all(|(k, _)| u.member(k)));
        prop_assert!(b.iter().all(|(k, _)| u.member(k)));
    }

    #[test]
    fn merge_emits_ascending_events(
        a in prop::collection::vec(any::<(u8, u16)>(), 0..80),
        b in prop::collection::vec(any::<(u8, u16)>(), 0..80),
    ) {
        let (a, b) = (entries(&a), entries(&b));
        let events: Vec<(u8, &str)> = OrdMap::merge(
            |k, _, mut acc: Vec<(u8, &'static str)>| {
                acc.push((*k, "left"));
                acc
            },
            |k, _, _, mut acc| {
                acc.push((*k, "both"));
                acc
            },
            |k, _, mut acc| {
                acc.push((*k, "right"));
                acc
            },
            &a,
            &b,
            Vec::new(),
        );
        prop_assert!(events.windows(2).all(|w| w[0].0 < w[1].0));
        prop_assert_eq!(events.len(), a.union(&b).count());
        for (k, side) in events {
            let expected = match (a.member(&k), b.member(&k)) {
                (true, true) => "both",
                (true, false) => "left",
                (false, true) => "right",
                (false, false) => unreachable!(),
            };
            prop_assert_eq!(side, expected);
        }
    }
}
