//! Traced container
//!
//! [`TracedVec`] owns the elements, a shared logger handle and the aggregate
//! [`Stats`]. Cursors borrow it, so it always outlives them; storage and
//! counters use interior mutability because many cursors write through the
//! same container at once.

use std::cell::{Cell, Ref, RefCell};

use super::cursor::Cursor;
use super::stats::Stats;
use crate::trace::{EventKind, Loggable, SharedLogger, TraceElement, TraceLogger, TraceValue};

/// A vector whose cursors report to a trace logger
pub struct TracedVec<T> {
    reference: String,
    data: RefCell<Vec<T>>,
    logger: SharedLogger,
    stats: Cell<Stats>,
}

impl<T> std::fmt::Debug for TracedVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracedVec")
            .field("reference", &self.reference)
            .field("len", &self.len())
            .field("stats", &self.stats.get())
            .finish()
    }
}

impl<T> TracedVec<T> {
    /// Create a container labelled `reference` (the `ref` of all its cursors)
    pub fn new(reference: impl Into<String>, data: Vec<T>, logger: SharedLogger) -> Self {
        Self {
            reference: reference.into(),
            data: RefCell::new(data),
            logger,
            stats: Cell::new(Stats::default()),
        }
    }

    /// Create an empty container with room for `capacity` elements
    pub fn with_capacity(reference: impl Into<String>, capacity: usize, logger: SharedLogger) -> Self {
        Self::new(reference, Vec::with_capacity(capacity), logger)
    }

    /// Untraced append
    pub fn push_back(&mut self, value: T) {
        self.data.get_mut().push(value);
    }

    /// Untraced capacity reservation
    pub fn reserve(&mut self, additional: usize) {
        self.data.get_mut().reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }

    /// Untraced view of the elements, for assertions
    pub fn data(&self) -> Ref<'_, [T]> {
        Ref::map(self.data.borrow(), |v| v.as_slice())
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data.into_inner()
    }

    /// Stable label used as `ref` by every cursor of this container
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn logger(&self) -> &TraceLogger {
        &self.logger
    }

    /// Another handle to the logger, for auxiliary containers
    pub fn shared_logger(&self) -> SharedLogger {
        self.logger.clone()
    }

    /// Aggregate counters
    pub fn stats(&self) -> Stats {
        self.stats.get()
    }

    fn bump(&self, f: impl FnOnce(&mut Stats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    pub fn add_access(&self) {
        self.bump(|s| s.nb_access += 1);
    }

    pub fn add_compare(&self) {
        self.bump(|s| s.nb_compares += 1);
    }

    pub fn add_iteration(&self) {
        self.bump(|s| s.nb_iterations += 1);
    }

    pub fn add_it_copy(&self) {
        self.bump(|s| s.nb_it_copy += 1);
    }

    pub fn add_swap(&self) {
        self.bump(|s| s.nb_swaps += 1);
    }

    /// Cursor at index 0, logging disabled
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, 0, "begin")
    }

    /// Cursor one past the last element, logging disabled
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.len() as isize, "end")
    }

    /// Cursor at an arbitrary index, logging disabled
    pub fn cursor(&self, index: isize, name: impl Into<String>) -> Cursor<'_, T> {
        Cursor::new(self, index, name)
    }

    /// # Panics
    ///
    /// Panics if `index` is outside `[0, len)`.
    fn slot(&self, index: isize) -> usize {
        let len = self.len();
        match usize::try_from(index) {
            Ok(i) if i < len => i,
            _ => panic!(
                "cursor index {index} out of bounds for '{}' of length {len}",
                self.reference
            ),
        }
    }

    pub(crate) fn read(&self, index: isize) -> T
    where
        T: Clone,
    {
        let slot = self.slot(index);
        self.data.borrow()[slot].clone()
    }

    pub(crate) fn peek(&self, index: isize) -> Option<T>
    where
        T: Clone,
    {
        let i = usize::try_from(index).ok()?;
        self.data.borrow().get(i).cloned()
    }

    pub(crate) fn write_at(&self, index: isize, value: T) {
        let slot = self.slot(index);
        self.data.borrow_mut()[slot] = value;
    }

    pub(crate) fn swap_within(&self, a: isize, b: isize) {
        let (a, b) = (self.slot(a), self.slot(b));
        self.data.borrow_mut().swap(a, b);
    }

    pub(crate) fn swap_across(&self, index: isize, other: &TracedVec<T>, other_index: isize) {
        let (a, b) = (self.slot(index), other.slot(other_index));
        std::mem::swap(
            &mut self.data.borrow_mut()[a],
            &mut other.data.borrow_mut()[b],
        );
    }
}

impl<T: TraceElement> TracedVec<T> {
    /// Untraced values in `[from, to)`, clamped to the container
    pub(crate) fn values_between(&self, from: isize, to: isize) -> Vec<TraceValue> {
        let data = self.data.borrow();
        let len = data.len() as isize;
        let from = from.clamp(0, len) as usize;
        let to = to.clamp(0, len) as usize;
        if from >= to {
            return Vec::new();
        }
        data[from..to].iter().map(TraceElement::trace_value).collect()
    }

    /// Emit the aggregate counters through the container's logger
    pub fn log_stats(&self) {
        self.write_stats(&self.logger);
    }

    /// `{type: array, name, nbAccess, nbCompares, nbIterations, nbItCopy, nbSwaps}`
    pub fn write_stats(&self, logger: &TraceLogger) {
        logger.start_object("");
        logger.add_entry("type", EventKind::Array.as_str());
        logger.add_entry("name", self.reference.as_str());
        self.stats.get().write_entries(logger, true);
        logger.end_object();
    }
}

impl<T: TraceElement> Loggable for TracedVec<T> {
    /// `{type: array, name, data: [...], const?}`
    fn log(&self, logger: &TraceLogger, is_const: bool) {
        logger.start_object("");
        logger.add_entry("type", EventKind::Array.as_str());
        logger.add_entry("name", self.reference.as_str());
        logger.start_array("data");
        for value in self.values_between(0, self.len() as isize) {
            logger.scalar(value);
        }
        logger.end_array();
        if is_const {
            logger.add_entry("const", true);
        }
        logger.end_object();
    }
}
