//! # algotrace - execution traces of classic algorithms
//!
//! algotrace runs sorting, searching and maze-generation algorithms over
//! instrumented containers and records what they do as a nested JSON
//! document that a visualizer can play back step by step:
//!
//! - **TraceLogger**: balanced, levelled event stream on top of a
//!   [`StructuredWriter`](trace::StructuredWriter)
//! - **Cursor / TracedVec**: an observing cursor over a traced container;
//!   moves, reads and writes become events, and every access, comparison,
//!   copy and swap is counted
//! - **Invocation**: the `algorithm` frame each traced function writes
//!   around its events (description, parameters, locals, logs, stats)
//! - **Inspection**: summary, structural verification and replay of a
//!   trace that was written earlier
//!
//! ## Core Principle
//!
//! > If it wasn't emitted through a cursor, it didn't happen.
//!
//! Algorithms never touch the elements directly: reads, writes and swaps go
//! through cursors, which keeps the trace and the container state in step.
//!
//! ## Example
//!
//! ```rust
//! use algotrace_core::{quick_sort, trace_sequence, MemorySink, PivotStrategy, TraceConfig};
//!
//! let sink = MemorySink::new();
//! let (sorted, ()) = trace_sequence(sink.clone(), &TraceConfig::default(), vec![3, 1, 2], |v| {
//!     quick_sort(&v.begin(), &v.end(), PivotStrategy::Middle)
//! })
//! .unwrap();
//! assert_eq!(sorted, vec![1, 2, 3]);
//!
//! let root = sink.values().unwrap().remove(0);
//! assert_eq!(root["name"], "Quick");
//! ```

pub mod algorithms;
pub mod config;
pub mod container;
pub mod error;
pub mod fixtures;
pub mod maze;
pub mod trace;
pub mod tracer;

// Re-export main types
pub use algorithms::{
    aggregate_in_place, binary_search, bubble_sort, cocktail_sort, comb_sort, kth_order_statistic,
    merge_sort, partition, partition_by, quick_sort, PivotStrategy, SortAlgorithm, Sortable,
};
pub use config::{FixtureConfig, MazeConfig, TraceConfig};
pub use container::{greater, greater_equal, less, less_equal, swap, CompareWrap, Cursor, Stats, TracedVec};
pub use error::{ErrorCategory, Result, TraceError};
pub use fixtures::{parse_list, Fixture};
pub use maze::{distance_map, Grid, Maze, MazeGenerator};
pub use trace::{
    BalanceVerification, BalanceVerifier, EventKind, JsonWriter, Loggable, MemorySink, Operation,
    ReplayEngine, ReplayResult, Returned, SharedLogger, StructuredWriter, TraceElement, TraceLogger,
    TraceSummary, TraceValue,
};
pub use tracer::{trace_sequence, AlgorithmInfo, Invocation};

/// Trace format version written into every description block
pub const TRACE_VERSION: &str = trace::VERSION;
