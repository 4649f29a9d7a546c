//! Binary search

use crate::algorithms::Sortable;
use crate::container::{less, CompareWrap, Cursor};
use crate::trace::{Loggable, Returned, TraceElement};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const BINARY_SEARCH: AlgorithmInfo = AlgorithmInfo::algorithm("BinarySearch", "Search");

/// Find `key` in the sorted range `[first, last)`.
///
/// Returns a cursor at a matching element, or `last` when the key is absent.
/// Each step writes the active window as a `setRange` operation and the
/// midpoint jump as an `OffSet` operation.
pub fn binary_search<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>, key: &T) -> Cursor<'a, T> {
    let inv = Invocation::open(first.logger(), BINARY_SEARCH);
    inv.parameters(|l| {
        inv.range(first, last, true);
        l.add_value("key", key.trace_value());
    });
    let len = last.distance(first);
    if len < 2 {
        let lt = CompareWrap::new(less);
        let mut probe = first.clone();
        let found = len == 1 && !lt.call_value(&mut probe, key) && !lt.value_call(key, &mut probe);
        if found {
            inv.base_case(
                &format!("Range is too small, key {key} found at index {}", first.index()),
                Returned::Object(first),
            );
            return first.clone();
        }
        inv.base_case(
            &format!("Range is too small, key {key} was not found"),
            Returned::Object(last),
        );
        return last.clone();
    }

    let mut lo = first.named("lo");
    let mut hi = last.named("hi");
    let mut mid = first.named("mid");
    inv.locals(|l| {
        lo.log(l, false);
        hi.log(l, false);
        mid.log(l, false);
    });

    let result = inv.logs(|l| {
        let lt = CompareWrap::new(less);
        l.start_loop("Halve the window until the key is found or the window is empty");
        while lo < hi {
            l.set_range(&lo, &hi);
            mid.assign(&lo);
            mid.jump(hi.distance(&lo) / 2);
            if lt.call_value(&mut mid, key) {
                lo.assign(&mid);
                lo.inc();
            } else if lt.value_call(key, &mut mid) {
                hi.assign(&mid);
            } else {
                l.end_loop("");
                l.comment(&format!("Key {key} found at index {}", mid.index()));
                l.return_value(Returned::Object(&mid));
                return mid.clone();
            }
        }
        l.end_loop("");
        l.comment(&format!("Key {key} was not found"));
        l.return_value(Returned::Object(last));
        last.clone()
    });
    inv.stats(|l| {
        l.add_stats(&lo, false);
        l.add_stats(&hi, false);
        l.add_stats(&mid, true);
    });
    inv.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TracedVec;
    use crate::trace::{MemorySink, TraceLogger};

    fn search(data: Vec<i32>, key: i32) -> (isize, serde_json::Value) {
        let sink = MemorySink::new();
        let logger = TraceLogger::compact(sink.clone()).shared();
        let v = TracedVec::new("v", data, logger.clone());
        let index = binary_search(&v.begin(), &v.end(), &key).index();
        logger.finish().unwrap();
        (index, sink.values().unwrap().remove(0))
    }

    #[test]
    fn test_finds_key() {
        let (index, root) = search(vec![-3, -2, 0, 2, 8, 15, 36, 212, 366], 8);
        assert_eq!(index, 4);
        let logs = root["logs"].as_array().unwrap();
        assert_eq!(logs.last().unwrap()["data"]["data"], 4);
        assert!(logs.iter().any(|n| n["name"] == "setRange"));
        assert!(logs.iter().any(|n| n["name"] == "OffSet"));
    }

    #[test]
    fn test_missing_key_returns_end() {
        let (index, root) = search(vec![-3, -2, 0, 2, 8, 15, 36, 212, 366], -999);
        assert_eq!(index, 9);
        let logs = root["logs"].as_array().unwrap();
        let last_comment = logs.iter().rev().find(|n| n["type"] == "comment").unwrap();
        assert!(last_comment["message"].as_str().unwrap().contains("was not found"));
        assert_eq!(logs.last().unwrap()["data"]["name"], "end");
    }

    #[test]
    fn test_single_element_base_case() {
        let (index, root) = search(vec![5], 5);
        assert_eq!(index, 0);
        assert_eq!(root["logs"].as_array().unwrap().len(), 2);
        let (index, _) = search(vec![5], 6);
        assert_eq!(index, 1);
        let (index, _) = search(vec![], 6);
        assert_eq!(index, 0);
    }
}
