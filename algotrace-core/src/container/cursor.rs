//! Observing cursor
//!
//! A [`Cursor`] stands in for a raw position into a [`TracedVec`]. Reads and
//! writes through it bump its access counter; moves bump its iteration
//! counter and, when `log_operations` is on, emit a `Set` event naming the
//! new index. Comparisons between cursors and distance queries are pure:
//! they are loop bookkeeping, not algorithmic comparisons.
//!
//! Every local increment is mirrored on the owning container only when
//! `log_operations` is on. Compare and swap counts are driven from outside by
//! [`CompareWrap`](super::CompareWrap) and [`swap`](super::swap), which
//! decide propagation themselves.
//!
//! # Preconditions
//!
//! The index may range over `[-1, len]`, but only `[0, len)` can be
//! dereferenced. Reading or writing outside that range panics.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::stats::Stats;
use super::vector::TracedVec;
use crate::trace::{EventKind, Loggable, Operation, TraceElement, TraceLogger};

/// A logging-aware position into a [`TracedVec`]
pub struct Cursor<'a, T> {
    owner: &'a TracedVec<T>,
    index: isize,
    name: String,
    comment: Option<String>,
    log_operations: bool,
    stats: Stats,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(owner: &'a TracedVec<T>, index: isize, name: impl Into<String>) -> Self {
        Self {
            owner,
            index,
            name: name.into(),
            comment: None,
            log_operations: false,
            stats: Stats::default(),
        }
    }

    /// Copy of this position under a new name, with logging enabled.
    ///
    /// This is how algorithms declare their working cursors.
    pub fn named(&self, name: impl Into<String>) -> Self {
        Self {
            owner: self.owner,
            index: self.index,
            name: name.into(),
            comment: None,
            log_operations: true,
            stats: Stats::default(),
        }
    }

    /// Attach a comment shown when the cursor is logged
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Turn position events and owner propagation on or off
    pub fn set_log_operations(&mut self, enabled: bool) {
        self.log_operations = enabled;
    }

    pub fn logs_operations(&self) -> bool {
        self.log_operations
    }

    pub fn owner(&self) -> &'a TracedVec<T> {
        self.owner
    }

    /// Label of the owning container
    pub fn owner_ref(&self) -> &'a str {
        self.owner.reference()
    }

    pub fn logger(&self) -> &'a TraceLogger {
        self.owner.logger()
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Same owner label; two cursors into one container always match
    pub fn same_owner<U>(&self, other: &Cursor<'_, U>) -> bool {
        self.owner_ref() == other.owner_ref()
    }

    /// True if the index can be dereferenced
    pub fn is_dereferenceable(&self) -> bool {
        self.index >= 0 && (self.index as usize) < self.owner.len()
    }

    fn touch(&mut self) {
        self.stats.nb_access += 1;
        if self.log_operations {
            self.owner.add_access();
        }
    }

    /// Traced read of the element under the cursor
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not dereferenceable.
    pub fn get(&mut self) -> T
    where
        T: Clone,
    {
        self.touch();
        self.owner.read(self.index)
    }

    /// Traced write of the element under the cursor
    ///
    /// # Panics
    ///
    /// Panics if the cursor is not dereferenceable.
    pub fn set(&mut self, value: T) {
        self.touch();
        self.owner.write_at(self.index, value);
    }

    /// Traced read at `index + offset` without moving
    pub fn at(&mut self, offset: isize) -> T
    where
        T: Clone,
    {
        self.touch();
        self.owner.read(self.index + offset)
    }

    /// Untraced read; `None` outside the container
    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.owner.peek(self.index)
    }

    /// Move by `delta`, emitting a `Set` event when logging
    pub fn advance(&mut self, delta: isize) {
        self.index += delta;
        self.stats.nb_iterations += 1;
        if self.log_operations {
            self.owner.add_iteration();
            self.logger()
                .operation(Operation::Set, Some(&self.name), Some(self.index.into()));
        }
    }

    /// Move by `delta`, emitting an `OffSet` event carrying the delta when logging
    pub fn jump(&mut self, delta: isize) {
        self.index += delta;
        self.stats.nb_iterations += 1;
        if self.log_operations {
            self.owner.add_iteration();
            self.logger()
                .operation(Operation::OffSet, Some(&self.name), Some(delta.into()));
        }
    }

    pub fn inc(&mut self) {
        self.advance(1);
    }

    pub fn dec(&mut self) {
        self.advance(-1);
    }

    /// Probe at `index + delta`: a new cursor carrying one iteration, no event
    pub fn offset(&self, delta: isize) -> Self {
        let mut probe = Self {
            owner: self.owner,
            index: self.index + delta,
            name: self.name.clone(),
            comment: self.comment.clone(),
            log_operations: self.log_operations,
            stats: Stats::default(),
        };
        probe.stats.nb_iterations = 1;
        if probe.log_operations {
            self.owner.add_iteration();
        }
        probe
    }

    /// Signed number of steps from `other` to `self`
    pub fn distance(&self, other: &Cursor<'_, T>) -> isize {
        self.index - other.index
    }

    /// Take the position of `source`, keeping this cursor's name and flags
    pub fn assign(&mut self, source: &Cursor<'a, T>) {
        self.owner = source.owner;
        self.index = source.index;
        self.stats.nb_it_copy += 1;
        if self.log_operations {
            self.owner.add_it_copy();
            self.logger()
                .operation(Operation::Set, Some(&self.name), Some(self.index.into()));
        }
    }

    /// Count one comparison involving this cursor
    pub fn add_compare(&mut self, propagate_owner: bool) {
        self.stats.nb_compares += 1;
        if propagate_owner {
            self.owner.add_compare();
        }
    }

    /// Count one swap involving this cursor
    pub fn add_swap(&mut self, propagate_owner: bool) {
        self.stats.nb_swaps += 1;
        if propagate_owner {
            self.owner.add_swap();
        }
    }

    /// Emit the local counters through the owner's logger
    pub fn log_stats(&self) {
        self.write_stats(self.logger());
    }

    /// `{type: iterator, name, ref, nbAccess, nbCompares, nbIterations, nbSwaps}`
    pub fn write_stats(&self, logger: &TraceLogger) {
        logger.start_object("");
        logger.add_entry("type", EventKind::Iterator.as_str());
        logger.add_entry("name", self.name.as_str());
        logger.add_entry("ref", self.owner_ref());
        self.stats.write_entries(logger, false);
        logger.end_object();
    }
}

impl<T> Loggable for Cursor<'_, T> {
    /// `{type: iterator, name, ref, data: index, const?, comment?}`
    fn log(&self, logger: &TraceLogger, is_const: bool) {
        logger.start_object("");
        logger.add_entry("type", EventKind::Iterator.as_str());
        logger.add_entry("name", self.name.as_str());
        logger.add_entry("ref", self.owner_ref());
        logger.add_entry("data", self.index);
        if is_const {
            logger.add_entry("const", true);
        }
        if let Some(comment) = &self.comment {
            logger.add_entry("comment", comment.as_str());
        }
        logger.end_object();
    }
}

/// Bookkeeping copy: same position and name, logging off, fresh counters
impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            index: self.index,
            name: self.name.clone(),
            comment: self.comment.clone(),
            log_operations: false,
            stats: Stats::default(),
        }
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("ref", &self.owner_ref())
            .field("name", &self.name)
            .field("index", &self.index)
            .field("log_operations", &self.log_operations)
            .field("stats", &self.stats)
            .finish()
    }
}

/// `name[index]{value}`; the value is omitted past the ends
impl<T: TraceElement> fmt::Display for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(value) => write!(f, "{}[{}]{{{}}}", self.name, self.index, value),
            None => write!(f, "{}[{}]", self.name, self.index),
        }
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.owner, other.owner) && self.index == other.index
    }
}

/// Cursors into different containers are unordered
impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if std::ptr::eq(self.owner, other.owner) {
            Some(self.index.cmp(&other.index))
        } else {
            None
        }
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    fn add_assign(&mut self, delta: isize) {
        self.advance(delta);
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    fn sub_assign(&mut self, delta: isize) {
        self.advance(-delta);
    }
}

impl<'a, T> Add<isize> for &Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn add(self, delta: isize) -> Cursor<'a, T> {
        self.offset(delta)
    }
}

impl<'a, T> Sub<isize> for &Cursor<'a, T> {
    type Output = Cursor<'a, T>;

    fn sub(self, delta: isize) -> Cursor<'a, T> {
        self.offset(-delta)
    }
}

impl<'a, T> Sub<&Cursor<'a, T>> for &Cursor<'a, T> {
    type Output = isize;

    fn sub(self, other: &Cursor<'a, T>) -> isize {
        self.distance(other)
    }
}
