//! Traced searches over sorted or unsorted ranges

mod binary;
mod kth;

pub use binary::{binary_search, BINARY_SEARCH};
pub use kth::{kth_order_statistic, KTH_ORDER_STATISTIC};
