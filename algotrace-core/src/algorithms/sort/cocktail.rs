//! Cocktail shaker sort

use crate::algorithms::Sortable;
use crate::container::{greater, swap, CompareWrap, Cursor};
use crate::trace::{Loggable, Returned};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const COCKTAIL: AlgorithmInfo = AlgorithmInfo::algorithm("Cocktail", "Sort");

/// Bidirectional bubble sort: forward passes push the maximum to the back,
/// backward passes push the minimum to the front.
pub fn cocktail_sort<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>) {
    let inv = Invocation::open(first.logger(), COCKTAIL);
    inv.parameters(|_| inv.range(first, last, false));
    if last.distance(first) < 2 {
        inv.base_case("Range is too small, already processed", Returned::Void);
        return;
    }

    // lo and hi are both inclusive bounds of the unsorted window
    let mut lo = first.named("lo");
    let mut hi = (last - 1).named("hi");
    let mut current = first.named("current");
    inv.locals(|l| {
        lo.log(l, false);
        hi.log(l, false);
        current.log(l, false);
    });

    inv.logs(|l| {
        let gt = CompareWrap::new(greater);
        let mut swapped = true;
        while swapped && lo < hi {
            swapped = false;
            l.start_loop("Forward pass");
            current.assign(&lo);
            while current < hi {
                let mut after = &current + 1;
                if gt.call(&mut current, &mut after) {
                    swap(&mut current, &mut after);
                    swapped = true;
                }
                current.inc();
            }
            l.end_loop("");
            hi.dec();
            if !swapped {
                break;
            }

            swapped = false;
            l.start_loop("Backward pass");
            current.assign(&hi);
            while current > lo {
                let mut before = &current - 1;
                if gt.call(&mut before, &mut current) {
                    swap(&mut before, &mut current);
                    swapped = true;
                }
                current.dec();
            }
            l.end_loop("");
            lo.inc();
        }
        l.return_value(Returned::Void);
    });
    inv.stats(|l| {
        l.add_stats(&lo, false);
        l.add_stats(&hi, false);
        l.add_stats(&current, true);
    });
    inv.close();
}
