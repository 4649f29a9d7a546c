//! In-place merge sort
//!
//! Same recursion as [`merge_sort`](super::merge_sort) but without a buffer:
//! each element of the right run is bubbled leftward with swaps until it
//! meets a smaller or equal neighbour.

use crate::algorithms::Sortable;
use crate::container::{less, swap, CompareWrap, Cursor};
use crate::trace::{Loggable, Returned};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const AGGREGATE_IN_PLACE: AlgorithmInfo = AlgorithmInfo::algorithm("AggregateInPlace", "Sort");

pub fn aggregate_in_place<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>) {
    let inv = Invocation::open(first.logger(), AGGREGATE_IN_PLACE);
    inv.parameters(|_| inv.range(first, last, false));
    let len = last.distance(first);
    if len < 2 {
        inv.base_case("Range is too small, already processed", Returned::Void);
        return;
    }

    let middle = (first + len / 2).named("middle");
    let mut next = middle.named("next");
    let mut current = middle.named("current");
    inv.locals(|l| {
        middle.log(l, false);
        next.log(l, false);
        current.log(l, false);
    });

    inv.logs(|l| {
        aggregate_in_place(first, &middle);
        aggregate_in_place(&middle, last);
        l.start_loop("Insert each element of the right run into the left run");
        let lt = CompareWrap::new(less);
        while next < *last {
            current.assign(&next);
            while current > *first {
                let mut before = &current - 1;
                if !lt.call(&mut current, &mut before) {
                    break;
                }
                swap(&mut before, &mut current);
                current.dec();
            }
            next.inc();
        }
        l.end_loop("");
        l.add_range_snapshot(first, last);
        l.return_value(Returned::Void);
    });
    inv.stats(|l| {
        l.add_stats(&next, false);
        l.add_stats(&current, true);
    });
    inv.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TracedVec;
    use crate::trace::{MemorySink, TraceLogger};

    #[test]
    fn test_sorts_with_swaps_only() {
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let v = TracedVec::new("v", vec![4, 3, 2, 1, 0], logger.clone());
        aggregate_in_place(&v.begin(), &v.end());
        logger.finish().unwrap();
        assert_eq!(&*v.data(), &[0, 1, 2, 3, 4]);
        assert_eq!(v.stats().nb_swaps, 10);
    }

    #[test]
    fn test_duplicates_do_not_move() {
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let v = TracedVec::new("v", vec![1, 1, 1], logger.clone());
        aggregate_in_place(&v.begin(), &v.end());
        logger.finish().unwrap();
        assert_eq!(v.stats().nb_swaps, 0);
    }
}
