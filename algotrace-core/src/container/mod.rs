//! Traced containers and observing cursors
//!
//! - [`TracedVec`] owns the elements and aggregate [`Stats`]
//! - [`Cursor`] is a logging-aware position into a `TracedVec`
//! - [`CompareWrap`] and [`swap`] route element comparisons and exchanges
//!   through the counters

mod compare;
mod cursor;
mod stats;
mod vector;

pub use compare::{greater, greater_equal, less, less_equal, swap, CompareWrap};
pub use cursor::Cursor;
pub use stats::Stats;
pub use vector::TracedVec;
