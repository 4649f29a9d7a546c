//! Comb sort

use crate::algorithms::Sortable;
use crate::container::{greater, swap, CompareWrap, Cursor};
use crate::trace::{Loggable, Returned};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const COMB: AlgorithmInfo = AlgorithmInfo::algorithm("Comb", "Sort");

/// Gap shrink factor between passes
pub const SHRINK_FACTOR: f64 = 1.3;

/// Bubble sort over a shrinking gap; finishes with gap-1 passes until no swap happens.
pub fn comb_sort<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>) {
    let inv = Invocation::open(first.logger(), COMB);
    inv.parameters(|_| inv.range(first, last, false));
    let len = last.distance(first);
    if len < 2 {
        inv.base_case("Range is too small, already processed", Returned::Void);
        return;
    }

    let mut current = first.named("current");
    inv.locals(|l| {
        current.log(l, false);
        l.add_value("gap", len);
    });

    inv.logs(|l| {
        let gt = CompareWrap::new(greater);
        let mut gap = len;
        let mut sorted = false;
        while !sorted {
            gap = (gap as f64 / SHRINK_FACTOR) as isize;
            sorted = gap <= 1;
            gap = gap.max(1);
            l.add_value("gap", gap);
            l.start_loop(&format!("Pass with gap {gap}"));
            current.assign(first);
            while current.index() + gap < last.index() {
                let mut other = &current + gap;
                if gt.call(&mut current, &mut other) {
                    swap(&mut current, &mut other);
                    sorted = false;
                }
                current.inc();
            }
            l.end_loop("");
        }
        l.return_value(Returned::Void);
    });
    inv.stats(|l| l.add_stats(&current, true));
    inv.close();
}
