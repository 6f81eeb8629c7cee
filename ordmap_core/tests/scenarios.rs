use std::thread;

use ordmap_core::{OrdMap, OrdSet};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn first_and_last_of_pets() {
    init_tracing();
    let pets = OrdMap::new().set("Tom", "cat").set("Jerry", "mouse");
    assert_eq!(pets.first(), Some((&"Jerry", &"mouse")));
    assert_eq!(pets.last(), Some((&"Tom", &"cat")));
}

#[test]
fn union_of_singletons() {
    init_tracing();
    let u = OrdMap::singleton("Jerry", "mouse").union(&OrdMap::singleton("Tom", "cat"));
    assert_eq!(u, OrdMap::from_array(&[("Jerry", "mouse"), ("Tom", "cat")]));
}

#[test]
fn merge_concatenates_left_first() {
    init_tracing();
    let left = OrdMap::singleton("u2", vec![2]);
    let right = OrdMap::singleton("u2", vec![3]);
    let merged = OrdMap::merge(
        |k, l: &Vec<i32>, acc: OrdMap<&'static str, Vec<i32>>| acc.set(*k, l.clone()),
        |k, l, r, acc| acc.set(*k, [l.as_slice(), r.as_slice()].concat()),
        |k, r, acc| acc.set(*k, r.clone()),
        &left,
        &right,
        OrdMap::new(),
    );
    assert_eq!(merged, OrdMap::singleton("u2", vec![2, 3]));
}

#[test]
fn merge_overlapping_ranges() {
    init_tracing();
    let left: OrdMap<i32, Vec<i32>> = (1..=10).map(|i| (i, vec![i])).collect();
    let right: OrdMap<i32, Vec<i32>> = (5..=15).map(|i| (i, vec![i])).collect();
    let merged = OrdMap::merge(
        |k, l: &Vec<i32>, acc: OrdMap<i32, Vec<i32>>| acc.set(*k, l.clone()),
        |k, _, _, acc| acc.set(*k, vec![*k, *k]),
        |k, r, acc| acc.set(*k, r.clone()),
        &left,
        &right,
        OrdMap::new(),
    );
    let expected: Vec<(i32, Vec<i32>)> = (1..=15)
        .map(|i| match i {
            5..=10 => (i, vec![i, i]),
            _ => (i, vec![i]),
        })
        .collect();
    assert_eq!(merged, OrdMap::from_array(&expected));
    merged.check_invariants().unwrap();
}

#[test]
fn set_projection() {
    init_tracing();
    let words = OrdSet::from_array(&["pear", "apple", "fig", "apple", "kiwi"]);
    assert_eq!(words.to_array(), vec!["apple", "fig", "kiwi", "pear"]);
    let lengths = words.map(|w| w.len());
    assert_eq!(lengths.to_array(), vec![3, 4, 5]);
    assert!(words.member("fig"));
    assert!(!words.toggle("fig").member("fig"));
    assert_eq!(words.count(), 4);
}

#[test]
fn shared_map_across_threads() {
    init_tracing();
    let base: OrdMap<u32, u32> = (0..1000).map(|i| (i, i)).collect();
    let results: Vec<OrdMap<u32, u32>> = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let base = &base;
                s.spawn(move || {
                    assert_eq!(base.get(&t), Some(&t));
                    base.keep_if(|k, _| k % 4 == t).set(1000 + t, t)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });
    for (t, map) in (0u32..).zip(&results) {
        assert_eq!(map.count(), 251);
        assert!(map.all(|k, _| k % 4 == t % 4));
        map.check_invariants().unwrap();
    }
    assert_eq!(base.count(), 1000);
}
