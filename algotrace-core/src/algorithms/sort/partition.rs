//! Partition around a pivot value

use crate::algorithms::Sortable;
use crate::container::{greater_equal, less_equal, swap, CompareWrap, Cursor};
use crate::trace::{Loggable, Returned, TraceElement};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const PARTITION: AlgorithmInfo = AlgorithmInfo::algorithm("Partition", "Sort");

/// Partition `[first, last)` with `<=` on the left and `>=` on the right
pub fn partition<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>, pivot: &T) -> Cursor<'a, T> {
    partition_by(first, last, pivot, less_equal, greater_equal)
}

/// Reorder `[first, last)` and return `p` such that every element of
/// `[first, p)` satisfies `left(x, pivot)` and every element of `[p, last)`
/// satisfies `right(x, pivot)`.
///
/// The two predicates must cover every element: for any `x`, at least one of
/// `left(x, pivot)` and `right(x, pivot)` holds.
pub fn partition_by<'a, T, L, R>(
    first: &Cursor<'a, T>,
    last: &Cursor<'a, T>,
    pivot: &T,
    left: L,
    right: R,
) -> Cursor<'a, T>
where
    T: Sortable,
    L: Fn(&T, &T) -> bool,
    R: Fn(&T, &T) -> bool,
{
    let inv = Invocation::open(first.logger(), PARTITION);
    inv.parameters(|l| {
        inv.range(first, last, false);
        l.add_value("pivot", pivot.trace_value());
    });
    if last.distance(first) < 1 {
        inv.base_case("Range is empty, nothing to partition", Returned::Object(first));
        return first.clone();
    }

    let mut lo = first.named("lo");
    let mut hi = last.named("hi");
    inv.locals(|l| {
        lo.log(l, false);
        hi.log(l, false);
    });

    let left = CompareWrap::new(left);
    let right = CompareWrap::new(right);
    inv.logs(|l| {
        l.start_loop(&format!("Partition around {pivot}"));
        loop {
            while lo < hi && left.call_value(&mut lo, pivot) {
                lo.inc();
            }
            while lo < hi {
                let mut before = &hi - 1;
                if !right.call_value(&mut before, pivot) {
                    break;
                }
                hi.dec();
            }
            if lo >= hi {
                break;
            }
            hi.dec();
            swap(&mut lo, &mut hi);
            lo.inc();
        }
        l.end_loop("");
        l.comment(&format!("Partition point is {}", lo.index()));
        l.return_value(Returned::Object(&lo));
    });
    inv.stats(|l| {
        l.add_stats(&lo, false);
        l.add_stats(&hi, true);
    });
    inv.close();
    lo.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{greater, less, TracedVec};
    use crate::trace::{MemorySink, TraceLogger};

    fn run(data: Vec<i32>, pivot: i32, strict: bool) -> (Vec<i32>, usize) {
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let v = TracedVec::new("v", data, logger.clone());
        let p = if strict {
            partition_by(&v.begin(), &v.end(), &pivot, less, greater_equal).index() as usize
        } else {
            partition(&v.begin(), &v.end(), &pivot).index() as usize
        };
        logger.finish().unwrap();
        (v.into_inner(), p)
    }

    #[test]
    fn test_partition_splits_around_pivot() {
        let (data, p) = run(vec![7, 2, 9, 4, 1, 8, 3], 5, false);
        assert!(data[..p].iter().all(|&x| x <= 5));
        assert!(data[p..].iter().all(|&x| x >= 5));
        assert_eq!(p, 4);
    }

    #[test]
    fn test_strict_left_predicate() {
        let (data, p) = run(vec![3, 3, 1, 3, 0], 3, true);
        assert_eq!(p, 2);
        assert!(data[..p].iter().all(|&x| x < 3));
        assert!(data[p..].iter().all(|&x| x >= 3));
    }

    #[test]
    fn test_all_on_one_side() {
        assert_eq!(run(vec![1, 2, 3], 10, false).1, 3);
        assert_eq!(run(vec![11, 12], 10, false).1, 0);
    }

    #[test]
    fn test_empty_range_is_base_case() {
        let sink = MemorySink::new();
        let logger = TraceLogger::compact(sink.clone()).shared();
        let v = TracedVec::new("v", Vec::<i32>::new(), logger.clone());
        let p = partition_by(&v.begin(), &v.end(), &0, less, greater);
        assert_eq!(p.index(), 0);
        logger.finish().unwrap();
        let root = sink.values().unwrap().remove(0);
        assert_eq!(root["logs"].as_array().unwrap().len(), 2);
        assert!(root.get("stats").is_none());
    }
}
