//! Bubble sort

use crate::algorithms::Sortable;
use crate::container::{greater, swap, CompareWrap, Cursor};
use crate::trace::{Loggable, Returned};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const BUBBLE: AlgorithmInfo = AlgorithmInfo::algorithm("Bubble", "Sort");

/// Sort `[first, last)` with adjacent swaps.
///
/// Each pass is a loop level; sorting stops after a pass without swaps.
pub fn bubble_sort<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>) {
    let inv = Invocation::open(first.logger(), BUBBLE);
    inv.parameters(|_| inv.range(first, last, false));
    if last.distance(first) < 2 {
        inv.base_case("Range is too small, already processed", Returned::Void);
        return;
    }

    let mut limit = last.named("limit");
    let mut current = first.named("current");
    let mut next = (first + 1).named("next");
    inv.locals(|l| {
        limit.log(l, false);
        current.log(l, false);
        next.log(l, false);
    });

    inv.logs(|l| {
        let gt = CompareWrap::new(greater);
        let mut swapped = true;
        while swapped && limit.distance(first) > 1 {
            swapped = false;
            l.start_loop(&format!("Pass over [{}, {})", first.index(), limit.index()));
            current.assign(first);
            next.assign(&(first + 1));
            while next < limit {
                if gt.call(&mut current, &mut next) {
                    swap(&mut current, &mut next);
                    swapped = true;
                }
                current.inc();
                next.inc();
            }
            l.add_value("swapped", swapped);
            l.end_loop("");
            limit.dec();
        }
        l.return_value(Returned::Void);
    });
    inv.stats(|l| {
        l.add_stats(&current, false);
        l.add_stats(&next, false);
        l.add_stats(&limit, true);
    });
    inv.close();
}
