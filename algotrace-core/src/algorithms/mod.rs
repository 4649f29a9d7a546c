//! Traced algorithm clients
//!
//! Each algorithm takes a `[first, last)` cursor range into a
//! [`TracedVec`](crate::container::TracedVec), writes one invocation frame
//! (see [`tracer`](crate::tracer)) and routes every element comparison and
//! exchange through [`CompareWrap`](crate::container::CompareWrap) and
//! [`swap`](crate::container::swap).

pub mod pivot;
pub mod search;
pub mod sort;

use crate::trace::TraceElement;

pub use pivot::PivotStrategy;
pub use search::{binary_search, kth_order_statistic};
pub use sort::{
    aggregate_in_place, bubble_sort, cocktail_sort, comb_sort, merge_sort, partition,
    partition_by, quick_sort, SortAlgorithm,
};

/// Elements that can be traced and ordered
pub trait Sortable: TraceElement + PartialOrd {}

impl<T: TraceElement + PartialOrd> Sortable for T {}
