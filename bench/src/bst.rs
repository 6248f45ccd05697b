use crate::utils;
use ordered_bst::map::Map;
use std::time::{Duration, Instant};

fn bench_add(data: &[i64]) -> (Map<i64, i64>, Duration) {
    let mut m = Map::new();
    let begin = Instant::now();
    for k in data {
        m.insert(*k, *k);
    }
    (m, begin.elapsed())
}

fn bench_find(m: &Map<i64, i64>, d: &[i64]) -> Duration {
    let begin = Instant::now();
    for k in d {
        assert!(m.contains_key(k));
    }
    begin.elapsed()
}

fn bench_remove(m: &mut Map<i64, i64>, d: &[i64]) -> Duration {
    let begin = Instant::now();
    for k in d {
        assert!(m.remove(k).is_some());
    }
    begin.elapsed()
}

fn report(d: &[i64]) {
    let size = d.len();
    let (mut m, add) = bench_add(d);
    let height = m.height();
    let find = bench_find(&m, d);
    let rm = bench_remove(&mut m, d);
    println!(
        "height: {}, add: {}ns, find: {}ns, remove: {}ns",
        height,
        utils::to_ns_per(add, size),
        utils::to_ns_per(find, size),
        utils::to_ns_per(rm, size)
    );
}

pub(crate) fn run(size: usize) {
    report(&utils::randvec(size))
}

// sorted keys build a list, every operation is linear
pub(crate) fn run_sorted(size: usize) {
    let mut d = utils::randvec(size);
    d.sort_unstable();
    report(&d)
}
