//! Execution trace recording
//!
//! A trace is a nested JSON document describing one algorithm invocation:
//! its description, parameters, working variables, an ordered log of events
//! and, at the outermost level, operation counters. Sub-invocations nest as
//! objects inside the parent's `logs` array.
//!
//! ## Layers
//!
//! ```text
//! algorithm body
//!   │  comparisons, swaps, cursor moves
//!   ▼
//! Cursor / TracedVec ──► TraceLogger ──► StructuredWriter ──► io::Write
//!                        (vocabulary,     (nesting checks,
//!                         levels)          JSON syntax)
//! ```
//!
//! ## Reading traces back
//!
//! - [`TraceSummary`] counts what a trace contains
//! - [`BalanceVerifier`] checks invocation structure and key order
//! - [`ReplayEngine`] rebuilds the final container from the recorded swaps

mod event;
mod logger;
mod replay;
mod sink;
mod value;
mod verify;
mod writer;

pub use event::{EventKind, Operation};
pub use logger::{Loggable, Returned, SharedLogger, TraceLogger};
pub use replay::{ReplayEngine, ReplayFailure, ReplayResult};
pub use sink::MemorySink;
pub use value::{TraceElement, TraceValue};
pub use verify::{BalanceVerification, BalanceVerifier, TraceSummary, VerificationError};
pub use writer::{JsonWriter, StructuredWriter};

/// Trace format version written into every description block
pub const VERSION: &str = "1.0";

/// Keys of an invocation object, in emission order
pub const INVOCATION_KEYS: [&str; 10] = [
    "type",
    "version",
    "author",
    "name",
    "module",
    "parameters",
    "structure",
    "locals",
    "logs",
    "stats",
];
