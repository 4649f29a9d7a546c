//! Quick sort

use super::partition::partition_by;
use crate::algorithms::{PivotStrategy, Sortable};
use crate::container::{greater_equal, less, swap, Cursor};
use crate::trace::{Loggable, Returned};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const QUICK: AlgorithmInfo = AlgorithmInfo::algorithm("Quick", "Sort");

/// Sort `[first, last)` in place.
///
/// The pivot is moved to the back, the rest is partitioned with `<` / `>=`,
/// and the pivot is swapped into its final slot before both sides recurse.
pub fn quick_sort<'a, T: Sortable>(first: &Cursor<'a, T>, last: &Cursor<'a, T>, strategy: PivotStrategy) {
    let inv = Invocation::open(first.logger(), QUICK);
    inv.parameters(|l| {
        inv.range(first, last, false);
        l.add_value("pivotStrategy", strategy.as_str());
    });
    if last.distance(first) < 2 {
        inv.base_case("Range is too small, already processed", Returned::Void);
        return;
    }

    let mut pivot = strategy.pick(first, last).named("pivot");
    let mut back = (last - 1).named("back");
    let mut p = first.named("p");
    inv.locals(|l| {
        pivot.log(l, false);
        back.log(l, false);
        p.log(l, false);
    });

    inv.logs(|l| {
        l.comment(&format!("Pivot {pivot} picked with the {strategy} strategy"));
        if pivot != back {
            swap(&mut pivot, &mut back);
            l.comment("Move the pivot to the back");
        }
        let value = back.get();
        let split = partition_by(first, &back, &value, less, greater_equal);
        p.assign(&split);
        if p != back {
            swap(&mut p, &mut back);
        }
        l.comment(&format!("Pivot {value} is in place at index {}", p.index()));
        quick_sort(first, &p, strategy);
        quick_sort(&(&p + 1), last, strategy);
        l.return_value(Returned::Void);
    });
    inv.stats(|l| {
        l.add_stats(&pivot, false);
        l.add_stats(&back, false);
        l.add_stats(&p, true);
    });
    inv.close();
}
