//! k-th order statistic (quickselect)

use crate::algorithms::sort::partition_by;
use crate::algorithms::Sortable;
use crate::container::{greater_equal, less, swap, Cursor};
use crate::trace::{Loggable, Returned};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const KTH_ORDER_STATISTIC: AlgorithmInfo = AlgorithmInfo::algorithm("KthOrderStatistic", "Search");

/// Move the `k`-th smallest element (0-based) of `[first, last)` into its
/// sorted position and return a cursor to it.
///
/// `k` outside the range writes an error node and returns `last`.
pub fn kth_order_statistic<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>, k: usize) -> Cursor<'a, T> {
    let inv = Invocation::open(first.logger(), KTH_ORDER_STATISTIC);
    inv.parameters(|l| {
        inv.range(first, last, false);
        l.add_value("k", k);
    });
    let len = last.distance(first);
    if k >= len as usize {
        inv.logs(|l| {
            l.error_node(
                "kth_order_statistic",
                &format!("k = {k} is outside a range of {len} element(s)"),
            );
            l.return_value(Returned::Object(last));
        });
        inv.close();
        return last.clone();
    }
    if len == 1 {
        inv.base_case("Range has a single element, it is the answer", Returned::Object(first));
        return first.clone();
    }

    let target = (first + k as isize).named("target");
    let mut lo = first.named("lo");
    let mut hi = last.named("hi");
    inv.locals(|l| {
        target.log(l, true);
        lo.log(l, false);
        hi.log(l, false);
    });

    let result = inv.logs(|l| {
        l.start_loop("Narrow the window around the target position");
        while hi.distance(&lo) > 1 {
            l.set_range(&lo, &hi);
            let mut pivot = (&lo + hi.distance(&lo) / 2).named("pivot");
            let mut back = (&hi - 1).named("back");
            if pivot != back {
                swap(&mut pivot, &mut back);
            }
            let value = back.get();
            let mut p = partition_by(&lo, &back, &value, less, greater_equal).named("p");
            if p != back {
                swap(&mut p, &mut back);
            }
            if p == target {
                lo.assign(&p);
                break;
            } else if target < p {
                l.comment(&format!("Pivot landed at {}, continue on the left", p.index()));
                hi.assign(&p);
            } else {
                l.comment(&format!("Pivot landed at {}, continue on the right", p.index()));
                lo.assign(&(&p + 1));
            }
        }
        l.end_loop("");
        l.comment(&format!("The element of rank {k} is at index {}", lo.index()));
        l.return_value(Returned::Object(&lo));
        lo.clone()
    });
    inv.stats(|l| {
        l.add_stats(&lo, false);
        l.add_stats(&hi, true);
    });
    inv.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TracedVec;
    use crate::trace::{MemorySink, TraceLogger};

    fn select(data: Vec<i32>, k: usize) -> (isize, Vec<i32>) {
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let v = TracedVec::new("v", data, logger.clone());
        let index = kth_order_statistic(&v.begin(), &v.end(), k).index();
        logger.finish().unwrap();
        (index, v.into_inner())
    }

    #[test]
    fn test_every_rank() {
        let input = vec![9, -1, 4, 4, 7, 0, 12, 3];
        let mut sorted = input.clone();
        sorted.sort();
        for k in 0..input.len() {
            let (index, data) = select(input.clone(), k);
            assert_eq!(index, k as isize);
            assert_eq!(data[k], sorted[k], "rank {k}");
        }
    }

    #[test]
    fn test_out_of_range_k_writes_error() {
        let sink = MemorySink::new();
        let logger = TraceLogger::compact(sink.clone()).shared();
        let v = TracedVec::new("v", vec![1, 2, 3], logger.clone());
        let index = kth_order_statistic(&v.begin(), &v.end(), 3).index();
        logger.finish().unwrap();
        assert_eq!(index, 3);
        let root = sink.values().unwrap().remove(0);
        assert_eq!(root["logs"][0]["type"], "error");
        assert_eq!(root["logs"][1]["data"]["name"], "end");
    }
}
