//! Top-down merge sort with an auxiliary buffer

use crate::algorithms::Sortable;
use crate::container::{less, CompareWrap, Cursor, TracedVec};
use crate::trace::{Loggable, Returned};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const MERGE: AlgorithmInfo = AlgorithmInfo::algorithm("Merge", "Sort");

/// Label of the auxiliary container holding the left half during a merge
pub const BUFFER_REF: &str = "buffer";

/// Sort `[first, last)`; stable.
///
/// Every merge writes a `{type: array, name, from, data}` snapshot of the
/// merged range.
pub fn merge_sort<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>) {
    let inv = Invocation::open(first.logger(), MERGE);
    inv.parameters(|_| inv.range(first, last, false));
    let len = last.distance(first);
    if len < 2 {
        inv.base_case("Range is too small, already processed", Returned::Void);
        return;
    }

    let middle = (first + len / 2).named("middle");
    inv.locals(|l| middle.log(l, false));
    inv.logs(|l| {
        merge_sort(first, &middle);
        merge_sort(&middle, last);
        l.comment(&format!(
            "Merge [{}, {}) with [{}, {})",
            first.index(),
            middle.index(),
            middle.index(),
            last.index()
        ));
        merge_halves(first, &middle, last);
        l.add_range_snapshot(first, last);
        l.return_value(Returned::Void);
    });
    inv.stats(|l| l.add_stats(&middle, true));
    inv.close();
}

/// Merge the sorted runs `[first, middle)` and `[middle, last)`.
///
/// The left run is copied into a traced buffer so that every comparison
/// crosses containers and counts on both.
fn merge_halves<'a, T: Sortable>(first: &Cursor<'a, T>, middle: &Cursor<'a, T>, last: &Cursor<'a, T>) {
    let logger = first.logger();
    let owner = first.owner();
    let left_len = middle.distance(first);

    let mut buffer = TracedVec::with_capacity(BUFFER_REF, left_len as usize, owner.shared_logger());
    let mut source = first.named("source");
    for offset in 0..left_len {
        buffer.push_back(source.at(offset));
    }
    logger.add_object(&buffer, false);

    let mut left = buffer.begin().named("left");
    let left_end = buffer.end();
    let mut right = middle.named("right");
    let mut out = first.named("out");
    let lt = CompareWrap::new(less);

    while left < left_end {
        if right < *last && lt.call(&mut right, &mut left) {
            out.set(right.get());
            right.inc();
        } else {
            out.set(left.get());
            left.inc();
        }
        out.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{MemorySink, TraceLogger};
    use serde_json::json;

    #[test]
    fn test_merge_sorts_sample() {
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let v = TracedVec::new("v", vec![1, -4, 2, 3, -1, 4, 0, -2, -5, -3], logger.clone());
        merge_sort(&v.begin(), &v.end());
        logger.finish().unwrap();
        assert_eq!(v.into_inner(), (-5..=4).collect::<Vec<_>>());
    }

    #[test]
    fn test_merge_sorts_strings() {
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let data = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')]
            .into_iter()
            .map(|(k, tag)| format!("{k}{tag}"))
            .collect::<Vec<_>>();
        let v = TracedVec::new("v", data, logger.clone());
        merge_sort(&v.begin(), &v.end());
        logger.finish().unwrap();
        assert_eq!(v.into_inner(), vec!["1b", "1d", "2a", "2c"]);
    }

    #[test]
    fn test_snapshot_after_merge() {
        let sink = MemorySink::new();
        let logger = TraceLogger::compact(sink.clone()).shared();
        let v = TracedVec::new("v", vec![3, 1], logger.clone());
        merge_sort(&v.begin(), &v.end());
        logger.finish().unwrap();

        let root = sink.values().unwrap().remove(0);
        let logs = root["logs"].as_array().unwrap();
        let snapshot = logs
            .iter()
            .find(|node| node["type"] == "array" && node.get("from").is_some())
            .unwrap();
        assert_eq!(*snapshot, json!({"type": "array", "name": "v", "from": 0, "data": [1, 3]}));
        assert!(logs.iter().any(|node| node["name"] == BUFFER_REF));
    }
}
