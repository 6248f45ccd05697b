use rand::{thread_rng, Rng};
use std::{collections::HashSet, time::Duration};

// distinct random keys
pub(crate) fn randvec(len: usize) -> Vec<i64> {
    let mut rng = thread_rng();
    let mut seen = HashSet::with_capacity(len);
    let mut v = Vec::with_capacity(len);
    while v.len() < len {
        let k: i64 = rng.gen();
        if seen.insert(k) {
            v.push(k)
        }
    }
    v
}

pub(crate) fn to_ns_per(t: Duration, n: usize) -> f64 {
    (t.as_nanos() as f64) / (n as f64)
}
