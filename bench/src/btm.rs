use crate::utils;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

fn bench_add(data: &[i64]) -> (BTreeMap<i64, i64>, Duration) {
    let mut m = BTreeMap::new();
    let begin = Instant::now();
    for k in data {
        m.insert(*k, *k);
    }
    (m, begin.elapsed())
}

fn bench_find(m: &BTreeMap<i64, i64>, d: &[i64]) -> Duration {
    let begin = Instant::now();
    for k in d {
        assert!(m.get(k).is_some());
    }
    begin.elapsed()
}

fn bench_remove(m: &mut BTreeMap<i64, i64>, d: &[i64]) -> Duration {
    let begin = Instant::now();
    for k in d {
        assert!(m.remove(k).is_some());
    }
    begin.elapsed()
}

pub(crate) fn run(size: usize) {
    let d = utils::randvec(size);
    let (mut m, add) = bench_add(&d);
    let find = bench_find(&m, &d);
    let rm = bench_remove(&mut m, &d);
    println!(
        "add: {}ns, find: {}ns, remove: {}ns",
        utils::to_ns_per(add, size),
        utils::to_ns_per(find, size),
        utils::to_ns_per(rm, size)
    );
}
