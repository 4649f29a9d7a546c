//! Invocation envelope
//!
//! Every traced algorithm writes the same frame around its events:
//!
//! ```text
//! { type, version, author, name, module,
//!   parameters: [...], structure?: {...}, locals: [...], logs: [...],
//!   stats?: { type: stats, data: [...] } }
//! ```
//!
//! [`Invocation`] opens that frame on a logger and hands out one method per
//! section, in order. Nested invocations share the caller's logger and write
//! their frame inside the caller's `logs` array; only the outermost one
//! writes `stats`.

use std::io::Write;

use tracing::debug;

use crate::config::TraceConfig;
use crate::container::{Cursor, TracedVec};
use crate::error::Result;
use crate::trace::{EventKind, Loggable, Returned, TraceElement, TraceLogger, VERSION};

/// Author written into every description block
pub const AUTHOR: &str = "algotrace";

/// Description block of a traced algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    /// `algorithm` or `DataStructure`
    pub kind: EventKind,
    pub name: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    /// Family the algorithm belongs to, e.g. `Sort`
    pub module: &'static str,
}

impl AlgorithmInfo {
    pub const fn algorithm(name: &'static str, module: &'static str) -> Self {
        Self {
            kind: EventKind::Algorithm,
            name,
            version: VERSION,
            author: AUTHOR,
            module,
        }
    }

    pub const fn data_structure(name: &'static str, module: &'static str) -> Self {
        Self {
            kind: EventKind::DataStructure,
            name,
            version: VERSION,
            author: AUTHOR,
            module,
        }
    }

    fn write(&self, logger: &TraceLogger) {
        logger.add_entry("type", self.kind.as_str());
        logger.add_entry("version", self.version);
        logger.add_entry("author", self.author);
        logger.add_entry("name", self.name);
        logger.add_entry("module", self.module);
    }
}

/// An open invocation frame.
///
/// Call the section methods in declaration order, then [`close`](Self::close)
/// or [`base_case`](Self::base_case) exactly once.
#[derive(Debug)]
pub struct Invocation<'l> {
    logger: &'l TraceLogger,
    info: AlgorithmInfo,
    top_level: bool,
}

impl<'l> Invocation<'l> {
    /// Open the frame and write the description block
    pub fn open(logger: &'l TraceLogger, info: AlgorithmInfo) -> Self {
        logger.start();
        let top_level = logger.level() == 0;
        debug!(algorithm = info.name, level = logger.level(), "invocation opened");
        info.write(logger);
        Self {
            logger,
            info,
            top_level,
        }
    }

    pub fn logger(&self) -> &'l TraceLogger {
        self.logger
    }

    pub fn info(&self) -> &AlgorithmInfo {
        &self.info
    }

    /// True for the outermost invocation of a trace
    pub fn is_top_level(&self) -> bool {
        self.top_level
    }

    /// `parameters: [...]`
    pub fn parameters(&self, f: impl FnOnce(&TraceLogger)) {
        self.logger.start_array("parameters");
        f(self.logger);
        self.logger.end_array();
    }

    /// Describe a `[first, last)` range parameter.
    ///
    /// The outermost invocation also snapshots the whole container; nested
    /// ones only name the bounds.
    pub fn range<T: TraceElement>(&self, first: &Cursor<'_, T>, last: &Cursor<'_, T>, is_const: bool) {
        if self.top_level {
            self.logger.add_data_details(first, last, is_const);
        } else {
            first.log(self.logger, is_const);
            last.log(self.logger, is_const);
        }
    }

    /// `structure: {...}`
    pub fn structure(&self, f: impl FnOnce(&TraceLogger)) {
        self.logger.start_object("structure");
        f(self.logger);
        self.logger.end_object();
    }

    /// `locals: [...]`
    pub fn locals(&self, f: impl FnOnce(&TraceLogger)) {
        self.logger.start_array("locals");
        f(self.logger);
        self.logger.end_array();
    }

    /// `logs: [...]`
    pub fn logs<R>(&self, f: impl FnOnce(&TraceLogger) -> R) -> R {
        self.logger.start_array("logs");
        let result = f(self.logger);
        self.logger.end_array();
        result
    }

    /// `stats: {type: stats, data: [...]}`, written by the outermost invocation only
    pub fn stats(&self, f: impl FnOnce(&TraceLogger)) {
        if !self.top_level {
            return;
        }
        self.logger.start_object("stats");
        self.logger.add_entry("type", EventKind::Stats.as_str());
        self.logger.start_array("data");
        f(self.logger);
        self.logger.end_array();
        self.logger.end_object();
    }

    /// Short-circuit: a `logs` array with one comment and a `Return`, then close
    pub fn base_case(self, message: &str, returned: Returned<'_>) {
        debug!(algorithm = self.info.name, message, "base case");
        self.logs(|logger| {
            logger.comment(message);
            logger.return_value(returned);
        });
        self.close();
    }

    /// Close the frame
    pub fn close(self) {
        debug!(algorithm = self.info.name, level = self.logger.level(), "invocation closed");
        self.logger.end();
    }
}

/// Trace one algorithm run over `data` into `out`.
///
/// Builds the logger and the container from `config`, runs `body` on the
/// container and checks that the trace is complete. Returns the final
/// elements with whatever `body` returned.
pub fn trace_sequence<T, W, R, F>(out: W, config: &TraceConfig, data: Vec<T>, body: F) -> Result<(Vec<T>, R)>
where
    W: Write + 'static,
    F: FnOnce(&TracedVec<T>) -> R,
{
    let logger = TraceLogger::from_config(out, config).shared();
    let container = TracedVec::new(config.reference.clone(), data, logger.clone());
    let result = body(&container);
    logger.finish()?;
    Ok((container.into_inner(), result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::MemorySink;
    use serde_json::json;

    const ECHO: AlgorithmInfo = AlgorithmInfo::algorithm("Echo", "Test");

    fn echo(first: &Cursor<'_, i32>, last: &Cursor<'_, i32>) {
        let inv = Invocation::open(first.logger(), ECHO);
        inv.parameters(|_| inv.range(first, last, true));
        if last.distance(first) < 2 {
            inv.base_case("Range is too small, already processed", Returned::Void);
            return;
        }
        let middle = (first + 1).named("middle");
        inv.locals(|l| middle.log(l, false));
        inv.logs(|l| {
            echo(&middle, last);
            l.return_value(Returned::Void);
        });
        inv.stats(|l| l.add_stats(&middle, true));
        inv.close();
    }

    fn compact() -> TraceConfig {
        TraceConfig {
            pretty: false,
            ..TraceConfig::default()
        }
    }

    #[test]
    fn test_envelope_key_order_and_nesting() {
        let sink = MemorySink::new();
        trace_sequence(sink.clone(), &compact(), vec![1, 2], |v| echo(&v.begin(), &v.end())).unwrap();
        let root = sink.values().unwrap().remove(0);
        let keys: Vec<&str> = root.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["type", "version", "author", "name", "module", "parameters", "locals", "logs", "stats"]
        );
        assert_eq!(root["type"], "algorithm");
        assert_eq!(root["parameters"][0], json!({"type": "array", "name": "v", "data": [1, 2], "const": true}));
        assert_eq!(root["stats"]["type"], "stats");

        let nested = &root["logs"][0];
        assert_eq!(nested["name"], "Echo");
        assert_eq!(nested["parameters"].as_array().unwrap().len(), 2);
        assert!(nested.get("locals").is_none());
        assert!(nested.get("stats").is_none());
        assert_eq!(
            nested["logs"],
            json!([
                {"type": "comment", "message": "Range is too small, already processed", "level": 1},
                {"type": "operation", "name": "Return"}
            ])
        );
    }

    #[test]
    fn test_trace_sequence_returns_data() {
        let sink = MemorySink::new();
        let (data, len) = trace_sequence(sink, &compact(), vec![3, 4, 5], |v| {
            echo(&v.begin(), &v.end());
            v.len()
        })
        .unwrap();
        assert_eq!(data, vec![3, 4, 5]);
        assert_eq!(len, 3);
    }
}
