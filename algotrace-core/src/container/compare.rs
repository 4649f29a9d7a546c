//! Comparison and swap helpers
//!
//! Algorithms never compare or swap elements directly. They go through
//! [`CompareWrap`] and [`swap`], which count the operation on both cursors and
//! propagate it to the owning container exactly once per owner: when both
//! cursors belong to the same container only the first side propagates.

use super::cursor::Cursor;

/// Strict less-than
pub fn less<T: PartialOrd>(a: &T, b: &T) -> bool {
    a < b
}

pub fn less_equal<T: PartialOrd>(a: &T, b: &T) -> bool {
    a <= b
}

/// Strict greater-than
pub fn greater<T: PartialOrd>(a: &T, b: &T) -> bool {
    a > b
}

pub fn greater_equal<T: PartialOrd>(a: &T, b: &T) -> bool {
    a >= b
}

/// A comparator that counts every call on the cursors it reads.
///
/// Comparisons do not emit trace events.
#[derive(Debug, Clone, Copy)]
pub struct CompareWrap<F> {
    compare: F,
}

impl<F> CompareWrap<F> {
    pub fn new(compare: F) -> Self {
        Self { compare }
    }

    /// Compare the elements under two cursors
    pub fn call<T>(&self, a: &mut Cursor<'_, T>, b: &mut Cursor<'_, T>) -> bool
    where
        F: Fn(&T, &T) -> bool,
        T: Clone,
    {
        let propagate_second = !a.same_owner(b);
        a.add_compare(true);
        b.add_compare(propagate_second);
        let (x, y) = (a.get(), b.get());
        (self.compare)(&x, &y)
    }

    /// Compare the element under a cursor with a plain value
    pub fn call_value<T>(&self, a: &mut Cursor<'_, T>, value: &T) -> bool
    where
        F: Fn(&T, &T) -> bool,
        T: Clone,
    {
        a.add_compare(true);
        (self.compare)(&a.get(), value)
    }

    /// Compare a plain value with the element under a cursor
    pub fn value_call<T>(&self, value: &T, b: &mut Cursor<'_, T>) -> bool
    where
        F: Fn(&T, &T) -> bool,
        T: Clone,
    {
        b.add_compare(true);
        (self.compare)(value, &b.get())
    }
}

/// Exchange the elements under two cursors and emit a `Swap` event.
///
/// The cursors may belong to different containers.
///
/// # Panics
///
/// Panics if either cursor is not dereferenceable.
pub fn swap<T>(a: &mut Cursor<'_, T>, b: &mut Cursor<'_, T>) {
    let same_owner = a.same_owner(b);
    a.logger()
        .swap_event((a.owner_ref(), b.owner_ref()), (a.index(), b.index()));
    if std::ptr::eq(a.owner(), b.owner()) {
        a.owner().swap_within(a.index(), b.index());
    } else {
        a.owner().swap_across(a.index(), b.owner(), b.index());
    }
    a.add_swap(true);
    b.add_swap(!same_owner);
}
