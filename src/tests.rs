use crate::{map::Map, set::Set};
use paste::paste;
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::{
    collections::{hash_map::DefaultHasher, BTreeMap, HashSet},
    fmt::Debug,
    hash::{Hash, Hasher},
    iter::FromIterator,
};

const STRSIZE: usize = 10;
const SIZE: usize = 1000;

trait Rand: Sized {
    fn rand<R: Rng>(r: &mut R) -> Self;
}

impl Rand for String {
    fn rand<R: Rng>(r: &mut R) -> Self {
        let mut s = String::new();
        for _ in 0..STRSIZE {
            s.push(r.gen())
        }
        s
    }
}

impl Rand for i32 {
    fn rand<R: Rng>(r: &mut R) -> Self {
        r.gen()
    }
}

fn random<T: Rand>() -> T {
    let mut rng = thread_rng();
    T::rand(&mut rng)
}

fn randvec<T: Rand>(len: usize) -> Vec<T> {
    let mut v: Vec<T> = Vec::new();
    for _ in 0..len {
        v.push(random())
    }
    v
}

// distinct keys, in random order
fn randkeys<T: Rand + Hash + Eq + Clone>(len: usize) -> Vec<T> {
    let mut seen = HashSet::with_capacity(len);
    let mut v = Vec::with_capacity(len);
    while v.len() < len {
        let k: T = random();
        if seen.insert(k.clone()) {
            v.push(k)
        }
    }
    v
}

fn keys_of<K: Clone, V>(m: &Map<K, V>) -> Vec<K> {
    let mut keys = Vec::new();
    m.for_each(|k, _| keys.push(k.clone()));
    keys
}

fn assert_sorted<K: Ord + Debug>(keys: &[K]) {
    for w in keys.windows(2) {
        assert!(w[0] <= w[1], "out of order {:?} {:?}", w[0], w[1])
    }
}

fn hash_of<T: Hash>(t: &T) -> u64 {
    let mut h = DefaultHasher::new();
    t.hash(&mut h);
    h.finish()
}

#[test]
fn test_insert_remove_scenario() {
    let mut m = Map::new();
    assert_eq!(m.len(), 0);
    for k in vec![10, 5, 15, 2, 4, 12, 14] {
        m.insert(k, k);
        m.invariant();
    }
    assert_eq!(m.len(), 7);
    assert!(m.contains_key(&4));
    assert!(m.contains_key(&12));
    assert!(!m.contains_key(&3));
    assert!(!m.contains_key(&13));
    assert_eq!(keys_of(&m), vec![2, 4, 5, 10, 12, 14, 15]);

    assert_eq!(m.remove(&15), Some(15));
    assert_eq!(m.remove(&14), Some(14));
    assert_eq!(m.remove(&2), Some(2));
    m.invariant();
    assert_eq!(m.len(), 4);
    assert!(m.contains_key(&4));
    assert!(m.contains_key(&12));
    assert!(!m.contains_key(&2));
    assert!(!m.contains_key(&14));
    assert_eq!(keys_of(&m), vec![4, 5, 10, 12]);
}

#[test]
fn test_empty() {
    let mut m: Map<i32, i32> = Map::new();
    let mut calls = 0;
    m.for_each(|_, _| calls += 1);
    assert_eq!(calls, 0);
    assert_eq!(m.iter().next(), None);
    assert_eq!(m.remove(&1), None);
    assert_eq!(m.len(), 0);
    assert!(m.is_empty());
    assert_eq!(m.height(), 0);
    assert_eq!(m.first_key_value(), None);
    assert_eq!(m.last_key_value(), None);
    m.invariant();
}

#[test]
fn test_remove_absent_is_noop() {
    let mut m: Map<i32, i32> = vec![(3, 3), (1, 1), (5, 5)].into_iter().collect();
    let before = keys_of(&m);
    assert_eq!(m.remove(&4), None);
    assert_eq!(m.remove(&0), None);
    assert_eq!(m.remove(&6), None);
    assert_eq!(m.len(), 3);
    assert_eq!(keys_of(&m), before);
    m.invariant();
}

#[test]
fn test_remove_root_with_two_children() {
    let mut m = Map::new();
    for k in vec![50, 30, 70, 20, 40, 60, 80, 65, 75] {
        m.insert(k, k * 2);
    }
    assert_eq!(m.remove(&50), Some(100));
    m.invariant();
    // the in order successor moves up
    assert_eq!(m.root_key(), Some(&60));
    assert_eq!(keys_of(&m), vec![20, 30, 40, 60, 65, 70, 75, 80]);
    assert_eq!(m.remove(&70), Some(140));
    m.invariant();
    assert_eq!(keys_of(&m), vec![20, 30, 40, 60, 65, 75, 80]);
    assert_eq!(m.len(), 7);
}

#[test]
fn test_remove_successor_with_right_child() {
    let mut m = Map::new();
    for k in vec![10, 5, 20, 15, 17, 16] {
        m.insert(k, ());
    }
    assert!(m.remove(&10).is_some());
    m.invariant();
    assert_eq!(m.root_key(), Some(&15));
    assert_eq!(keys_of(&m), vec![5, 15, 16, 17, 20]);
}

#[test]
fn test_duplicate_insert_adds_node() {
    let mut m = Map::new();
    m.insert(5, "a");
    m.insert(3, "x");
    m.insert(5, "b");
    m.insert(7, "y");
    m.invariant();
    assert_eq!(m.len(), 4);
    assert_eq!(m.get(&5), Some(&"a"));
    assert_eq!(
        m.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        vec![(3, "x"), (5, "a"), (5, "b"), (7, "y")]
    );
    assert_eq!(m.remove(&5), Some("a"));
    m.invariant();
    assert_eq!(m.len(), 3);
    assert!(m.contains_key(&5));
    assert_eq!(m.get(&5), Some(&"b"));
    assert_eq!(m.remove(&5), Some("b"));
    m.invariant();
    assert_eq!(m.len(), 2);
    assert!(!m.contains_key(&5));
}

#[test]
fn test_upsert() {
    let mut m = Map::new();
    assert_eq!(m.upsert(1, 10), None);
    assert_eq!(m.upsert(2, 20), None);
    assert_eq!(m.upsert(1, 11), Some(10));
    assert_eq!(m.len(), 2);
    assert_eq!(m[&1], 11);
    m.invariant();
}

#[test]
fn test_get_mut() {
    let mut m: Map<i32, i32> = (0..10).map(|k| (k, k)).collect();
    if let Some(v) = m.get_mut(&7) {
        *v = 70
    }
    assert_eq!(m.get(&7), Some(&70));
    assert_eq!(m.get_mut(&11), None);
}

#[test]
fn test_first_last() {
    let m: Map<i32, &str> = vec![(4, "d"), (2, "b"), (9, "i"), (9, "j"), (1, "a")]
        .into_iter()
        .collect();
    assert_eq!(m.first_key_value(), Some((&1, &"a")));
    assert_eq!(m.last_key_value(), Some((&9, &"j")));
}

#[test]
fn test_remove_entry_returns_stored_key() {
    let mut m = Map::new();
    m.insert(String::from("k"), 1);
    assert_eq!(m.remove_entry("k"), Some((String::from("k"), 1)));
    assert!(m.is_empty());
    m.invariant();
}

#[test]
fn test_clear() {
    let mut m: Map<i32, i32> = (0..100).map(|k| (k, k)).collect();
    m.clear();
    assert!(m.is_empty());
    m.invariant();
    m.insert(1, 1);
    assert_eq!(m.len(), 1);
}

#[test]
#[should_panic(expected = "element not found for key")]
fn test_index_missing_panics() {
    let m: Map<i32, i32> = Map::new();
    let _v: i32 = m[&1];
}

#[test]
fn test_debug() {
    let m: Map<i32, i32> = vec![(2, 20), (1, 10)].into_iter().collect();
    assert_eq!(format!("{:?}", m), "{1: 10, 2: 20}");
    let s: Set<i32> = vec![3, 1, 2].into_iter().collect();
    assert_eq!(format!("{:?}", s), "{1, 2, 3}");
}

#[test]
fn test_eq_ignores_shape() {
    let a: Map<i32, i32> = vec![(1, 1), (2, 2), (3, 3)].into_iter().collect();
    let b: Map<i32, i32> = vec![(2, 2), (1, 1), (3, 3)].into_iter().collect();
    assert_ne!(a.height(), b.height());
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    let c: Map<i32, i32> = vec![(2, 2), (1, 1)].into_iter().collect();
    assert_ne!(a, c);
}

#[test]
fn test_clone_is_deep() {
    let mut a: Map<i32, i32> = vec![(5, 5), (2, 2), (8, 8), (1, 1)].into_iter().collect();
    let b = a.clone();
    b.invariant();
    assert_eq!(a.height(), b.height());
    a.remove(&2);
    a.insert(9, 9);
    assert_eq!(keys_of(&b), vec![1, 2, 5, 8]);
    assert_eq!(keys_of(&a), vec![1, 5, 8, 9]);
}

#[test]
fn test_iter_exact_size() {
    let m: Map<i32, i32> = (0..50).rev().map(|k| (k, k)).collect();
    let mut it = m.iter();
    assert_eq!(it.len(), 50);
    it.next();
    assert_eq!(it.len(), 49);
    assert_eq!(it.count(), 49);
}

// a sorted insert order builds a list, nothing on it may recurse per
// level
#[test]
fn test_degenerate_tree() {
    let n = 20_000;
    let mut m = Map::new();
    for k in 0..n {
        m.insert(k, k);
    }
    assert_eq!(m.len(), n as usize);
    assert_eq!(m.height(), n as usize);
    assert!(m.contains_key(&(n - 1)));
    assert_eq!(m.iter().count(), n as usize);
    let c = m.clone();
    assert_eq!(c.height(), n as usize);
    assert_eq!(m, c);
    for k in 0..n / 2 {
        assert_eq!(m.remove(&k), Some(k));
    }
    assert_eq!(m.len(), (n / 2) as usize);
    assert_eq!(m.first_key_value(), Some((&(n / 2), &(n / 2))));
    drop(m);
    drop(c);
}

#[test]
fn test_set() {
    let mut s = Set::new();
    assert!(s.insert(3));
    assert!(s.insert(1));
    assert!(!s.insert(3));
    assert!(s.insert(2));
    s.invariant();
    assert_eq!(s.len(), 3);
    assert_eq!(s.iter().cloned().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(s.first(), Some(&1));
    assert_eq!(s.last(), Some(&3));
    assert!(s.remove(&1));
    assert!(!s.remove(&1));
    assert!(!s.contains(&1));
    assert_eq!(s.len(), 2);
    s.invariant();
    let mut seen = Vec::new();
    s.for_each(|k| seen.push(*k));
    assert_eq!(seen, vec![2, 3]);
}

fn test_insert_find_rand<T: Ord + Clone + Debug + Rand>() {
    let v = randvec::<T>(SIZE);
    let mut m = Map::new();
    for k in &v {
        m.insert(k.clone(), k.clone());
        assert!(m.contains_key(k));
    }
    m.invariant();
    assert_eq!(m.len(), v.len());
    for k in &v {
        assert_eq!(m.get(k), Some(k));
    }
    let keys = keys_of(&m);
    assert_eq!(keys.len(), m.len());
    assert_sorted(&keys);
    let mut vs = v.clone();
    vs.sort();
    assert_eq!(keys, vs);
}

fn test_add_remove_rand<T: Ord + Clone + Debug + Hash + Rand>() {
    let v = randkeys::<T>(SIZE);
    let mut m = Map::new();
    let mut model = BTreeMap::new();
    for (i, k) in v.iter().enumerate() {
        m.insert(k.clone(), i);
        model.insert(k.clone(), i);
        assert!(m.contains_key(k));
        if i % 10 == 0 {
            assert_eq!(m.remove(k), model.remove(k));
            assert!(!m.contains_key(k));
        }
        m.invariant();
        assert_eq!(m.len(), model.len());
    }
    assert!(m.iter().eq(model.iter()));
}

fn test_remove_all_rand<T: Ord + Clone + Debug + Hash + Rand>() {
    let mut v = randkeys::<T>(SIZE);
    let mut m: Map<T, T> = v.iter().map(|k| (k.clone(), k.clone())).collect();
    v.shuffle(&mut thread_rng());
    for (i, k) in v.iter().enumerate() {
        assert_eq!(m.remove(k).as_ref(), Some(k));
        assert_eq!(m.remove(k), None);
        assert!(!m.contains_key(k));
        assert_eq!(m.len(), SIZE - i - 1);
        if i % 50 == 0 {
            m.invariant();
            assert_sorted(&keys_of(&m));
        }
    }
    m.invariant();
    assert!(m.is_empty());
}

// removing the root repeatedly always hits the two child case while
// both subtrees are populated
fn test_remove_root_rand<T: Ord + Clone + Debug + Hash + Rand>() {
    let v = randkeys::<T>(SIZE);
    let mut m: Map<T, ()> = v.iter().map(|k| (k.clone(), ())).collect();
    let mut remaining: HashSet<T> = HashSet::from_iter(v.iter().cloned());
    for _ in 0..SIZE / 2 {
        let root = match m.root_key() {
            None => break,
            Some(k) => k.clone(),
        };
        assert!(m.remove(&root).is_some());
        remaining.remove(&root);
        m.invariant();
        assert!(!m.contains_key(&root));
        assert_eq!(m.len(), remaining.len());
    }
    let keys = keys_of(&m);
    assert_sorted(&keys);
    for k in &keys {
        assert!(remaining.contains(k));
    }
}

fn test_set_rand<T: Ord + Clone + Debug + Hash + Rand>() {
    let v = randvec::<T>(SIZE);
    let s: Set<T> = v.iter().cloned().collect();
    let model: HashSet<T> = v.iter().cloned().collect();
    s.invariant();
    assert_eq!(s.len(), model.len());
    for k in &v {
        assert!(s.contains(k));
    }
    let elts: Vec<T> = s.iter().cloned().collect();
    for w in elts.windows(2) {
        assert!(w[0] < w[1])
    }
}

macro_rules! tests {
    ($t:ident) => {
        paste! {
            #[test]
            fn [<test_insert_find_rand_ $t:lower>]() { test_insert_find_rand::<$t>() }

            #[test]
            fn [<test_add_remove_rand_ $t:lower>]() { test_add_remove_rand::<$t>() }

            #[test]
            fn [<test_remove_all_rand_ $t:lower>]() { test_remove_all_rand::<$t>() }

            #[test]
            fn [<test_remove_root_rand_ $t:lower>]() { test_remove_root_rand::<$t>() }

            #[test]
            fn [<test_set_rand_ $t:lower>]() { test_set_rand::<$t>() }
        }
    };
}

tests!(i32);
tests!(String);

#[cfg(feature = "serde")]
mod serde_tests {
    use crate::{map::Map, set::Set};

    #[test]
    fn test_map_json() {
        let m: Map<String, i32> = vec![(String::from("b"), 2), (String::from("a"), 1)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
        let back: Map<String, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        back.invariant();
    }

    #[test]
    fn test_map_json_int_keys() {
        let m: Map<i32, i32> = (0..20).map(|k| (k, k * k)).collect();
        let json = serde_json::to_string(&m).unwrap();
        let back: Map<i32, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_set_json() {
        let s: Set<i32> = vec![3, 1, 2, 3].into_iter().collect();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Set<i32> = serde_json::from_str("[2,2,1,3]").unwrap();
        assert_eq!(back, s);
        back.invariant();
    }
}
