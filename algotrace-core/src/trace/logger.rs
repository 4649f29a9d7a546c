//! Trace logger
//!
//! [`TraceLogger`] is the vocabulary layer on top of a [`StructuredWriter`]:
//! it knows what a comment, a `Return` or a cursor snapshot looks like, and it
//! tracks the nesting level that consumers use for indentation.
//!
//! The logger is shared (`Rc<TraceLogger>`) by a container, every cursor into
//! it and every nested invocation, so all methods take `&self`.
//!
//! # Errors
//!
//! Event methods do not return `Result`. The first writer failure is latched,
//! later events are dropped, and [`TraceLogger::finish`] reports it. A logger
//! dropped with open scopes and without `finish` is a bug in the traced
//! algorithm and trips a debug assertion.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use tracing::{debug, error, warn};

use super::event::{EventKind, Operation};
use super::value::{TraceElement, TraceValue};
use super::writer::{JsonWriter, StructuredWriter};
use crate::config::TraceConfig;
use crate::container::Cursor;
use crate::error::{Result, TraceError};

/// Shared handle to a logger
pub type SharedLogger = Rc<TraceLogger>;

/// Types that can describe themselves as a trace node
pub trait Loggable {
    /// Write one self-contained JSON object describing `self`
    fn log(&self, logger: &TraceLogger, is_const: bool);
}

/// Payload of a `Return` operation
pub enum Returned<'a> {
    /// No `data` key
    Void,
    Value(TraceValue),
    Object(&'a dyn Loggable),
}

struct LoggerState {
    writer: Box<dyn StructuredWriter>,
    level: i32,
    error: Option<TraceError>,
    finished: bool,
}

/// Event vocabulary and nesting discipline over a structured writer
pub struct TraceLogger {
    state: RefCell<LoggerState>,
}

impl std::fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TraceLogger")
            .field("level", &state.level)
            .field("depth", &state.writer.depth())
            .field("failed", &state.error.is_some())
            .field("finished", &state.finished)
            .finish()
    }
}

impl TraceLogger {
    /// Create a logger over any structured writer
    pub fn new(writer: Box<dyn StructuredWriter>) -> Self {
        Self {
            state: RefCell::new(LoggerState {
                writer,
                level: -1,
                error: None,
                finished: false,
            }),
        }
    }

    /// Indented JSON output
    pub fn pretty<W: Write + 'static>(out: W) -> Self {
        Self::new(Box::new(JsonWriter::pretty(out)))
    }

    /// One line per root object
    pub fn compact<W: Write + 'static>(out: W) -> Self {
        Self::new(Box::new(JsonWriter::compact(out)))
    }

    /// Pick the formatter from configuration
    pub fn from_config<W: Write + 'static>(out: W, config: &TraceConfig) -> Self {
        if config.pretty {
            Self::pretty(out)
        } else {
            Self::compact(out)
        }
    }

    /// Wrap into a shared handle
    pub fn shared(self) -> SharedLogger {
        Rc::new(self)
    }

    /// Current nesting level; -1 outside any invocation
    pub fn level(&self) -> i32 {
        self.state.borrow().level
    }

    /// True when no object or array is open
    pub fn is_complete(&self) -> bool {
        self.state.borrow().writer.is_complete()
    }

    /// True once a writer error has been latched
    pub fn has_failed(&self) -> bool {
        self.state.borrow().error.is_some()
    }

    fn write<F>(&self, f: F)
    where
        F: FnOnce(&mut dyn StructuredWriter) -> Result<()>,
    {
        let mut state = self.state.borrow_mut();
        if state.error.is_some() {
            return;
        }
        if let Err(err) = f(state.writer.as_mut()) {
            warn!(error = %err, level = state.level, "trace writer failed; dropping further events");
            state.error = Some(err);
        }
    }

    // ─── Invocation and loop bracketing ────────────────────────────────────

    /// Open an invocation object and enter the next level
    pub fn start(&self) {
        self.write(|w| w.start_object());
        self.state.borrow_mut().level += 1;
    }

    /// Close the invocation object opened by [`start`](Self::start)
    pub fn end(&self) {
        self.write(|w| w.end_object());
        self.state.borrow_mut().level -= 1;
    }

    /// Enter a logical loop level; the comment, if any, is written first
    pub fn start_loop(&self, comment: &str) {
        if !comment.is_empty() {
            self.comment(comment);
        }
        self.state.borrow_mut().level += 1;
    }

    /// Leave a logical loop level; the comment, if any, is written after
    pub fn end_loop(&self, comment: &str) {
        self.state.borrow_mut().level -= 1;
        if !comment.is_empty() {
            self.comment(comment);
        }
    }

    // ─── Structural passthroughs ───────────────────────────────────────────

    /// Open an array, keyed when `key` is not empty
    pub fn start_array(&self, key: &str) {
        self.write(|w| {
            if !key.is_empty() {
                w.key(key)?;
            }
            w.start_array()
        });
    }

    pub fn end_array(&self) {
        self.write(|w| w.end_array());
    }

    /// Open an object, keyed when `key` is not empty
    pub fn start_object(&self, key: &str) {
        self.write(|w| {
            if !key.is_empty() {
                w.key(key)?;
            }
            w.start_object()
        });
    }

    pub fn end_object(&self) {
        self.write(|w| w.end_object());
    }

    /// Write a bare key; the next call must supply its value
    pub fn key(&self, key: &str) {
        self.write(|w| w.key(key));
    }

    /// Write a bare scalar
    pub fn scalar(&self, value: impl Into<TraceValue>) {
        let value = value.into();
        self.write(|w| value.write_to(w));
    }

    /// Write `key: value` into the open object
    pub fn add_entry(&self, key: &str, value: impl Into<TraceValue>) {
        let value = value.into();
        self.write(|w| {
            w.key(key)?;
            value.write_to(w)
        });
    }

    fn open_node(&self, kind: EventKind) {
        self.start_object("");
        self.add_entry("type", kind.as_str());
    }

    fn open_operation(&self, op: Operation) {
        self.open_node(EventKind::Operation);
        self.add_entry("name", op.as_str());
    }

    // ─── Events ────────────────────────────────────────────────────────────

    /// `{type: comment, message, level?}`
    pub fn comment(&self, message: &str) {
        self.comment_extent(message, "");
    }

    /// `{type: comment, message, level?, extent?}`; the level is omitted at 0
    pub fn comment_extent(&self, message: &str, extent: &str) {
        let level = self.level();
        self.open_node(EventKind::Comment);
        self.add_entry("message", message);
        if level != 0 {
            self.add_entry("level", level);
        }
        if !extent.is_empty() {
            self.add_entry("extent", extent);
        }
        self.end_object();
    }

    /// `{type: error, fct, message}`, written in place of a malformed node
    pub fn error_node(&self, fct: &str, message: &str) {
        warn!(fct, message, "trace parameter error");
        self.open_node(EventKind::Error);
        self.add_entry("fct", fct);
        self.add_entry("message", message);
        self.end_object();
    }

    /// `{type: value, name, data}`; an empty name writes an error node and returns false
    pub fn add_value(&self, name: &str, value: impl Into<TraceValue>) -> bool {
        if name.is_empty() {
            self.error_node("add_value", "a value needs a non-empty name");
            return false;
        }
        self.open_node(EventKind::Value);
        self.add_entry("name", name);
        self.add_entry("data", value);
        self.end_object();
        true
    }

    /// Raw iterator description for positions that are not backed by a [`Cursor`]
    pub fn add_iterator(&self, name: &str, reference: &str, index: i64) -> bool {
        if name.is_empty() || reference.is_empty() {
            self.error_node("add_iterator", "an iterator needs a name and a reference");
            return false;
        }
        self.open_node(EventKind::Iterator);
        self.add_entry("name", name);
        self.add_entry("ref", reference);
        self.add_entry("data", index);
        self.end_object();
        true
    }

    /// `{type: array, name, data: [...]}` from loose values; needs a name and at least one value
    pub fn add_array<I>(&self, name: &str, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<TraceValue>,
    {
        if name.is_empty() {
            self.error_node("add_array", "an array needs a non-empty name");
            return false;
        }
        let values: Vec<TraceValue> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.error_node("add_array", "an array needs at least one value");
            return false;
        }
        self.open_node(EventKind::Array);
        self.add_entry("name", name);
        self.start_array("data");
        for value in &values {
            self.write(|w| value.write_to(w));
        }
        self.end_array();
        self.end_object();
        true
    }

    /// Delegate to the object's own description
    pub fn add_object(&self, object: &dyn Loggable, is_const: bool) {
        object.log(self, is_const);
    }

    /// Untraced snapshot of the elements in `[begin, end)`, keyed when `key` is not empty
    pub fn add_data<T: TraceElement>(&self, begin: &Cursor<'_, T>, end: &Cursor<'_, T>, key: &str) {
        let values = begin.owner().values_between(begin.index(), end.index());
        self.start_array(key);
        for value in &values {
            self.write(|w| value.write_to(w));
        }
        self.end_array();
    }

    /// `{type: array, name, from, data}` for the range `[begin, end)`
    pub fn add_range_snapshot<T: TraceElement>(&self, begin: &Cursor<'_, T>, end: &Cursor<'_, T>) {
        self.open_node(EventKind::Array);
        self.add_entry("name", begin.owner_ref());
        self.add_entry("from", begin.index());
        self.add_data(begin, end, "data");
        self.end_object();
    }

    /// Full container snapshot followed by the begin/end cursor identities
    pub fn add_data_details<T: TraceElement>(
        &self,
        begin: &Cursor<'_, T>,
        end: &Cursor<'_, T>,
        is_const: bool,
    ) {
        begin.owner().log(self, is_const);
        begin.log(self, is_const);
        end.log(self, is_const);
    }

    /// Stats of a cursor and, on request, of its container
    pub fn add_stats<T: TraceElement>(&self, cursor: &Cursor<'_, T>, log_owner: bool) {
        cursor.write_stats(self);
        if log_owner {
            cursor.owner().write_stats(self);
        }
    }

    /// `{type: operation, name: Return, data?}`
    pub fn return_value(&self, returned: Returned<'_>) {
        self.open_operation(Operation::Return);
        match returned {
            Returned::Void => {}
            Returned::Value(value) => self.add_entry("data", value),
            Returned::Object(object) => {
                self.key("data");
                object.log(self, false);
            }
        }
        self.end_object();
    }

    /// `{type: operation, name: setRange, ref, data: [first, last]}`
    pub fn set_range<T: TraceElement>(&self, first: &Cursor<'_, T>, last: &Cursor<'_, T>) {
        self.open_operation(Operation::SetRange);
        self.add_entry("ref", first.owner_ref());
        self.start_array("data");
        self.scalar(first.index());
        self.scalar(last.index());
        self.end_array();
        self.end_object();
    }

    /// `{type: operation, name, ref?, data?}`
    pub fn operation(&self, op: Operation, reference: Option<&str>, data: Option<TraceValue>) {
        self.open_operation(op);
        if let Some(reference) = reference {
            self.add_entry("ref", reference);
        }
        if let Some(data) = data {
            self.add_entry("data", data);
        }
        self.end_object();
    }

    /// `{type: operation, name, cells: [...], data?}` for grid operations
    pub fn operation_cells(&self, op: Operation, cells: &[usize], data: Option<TraceValue>) {
        self.open_operation(op);
        self.start_array("cells");
        for &cell in cells {
            self.scalar(cell);
        }
        self.end_array();
        if let Some(data) = data {
            self.add_entry("data", data);
        }
        self.end_object();
    }

    /// `{type: operation, name: Swap, ref | refs, indexes: [i, j]}`
    pub fn swap_event(&self, refs: (&str, &str), indexes: (isize, isize)) {
        self.open_operation(Operation::Swap);
        if refs.0 == refs.1 {
            self.add_entry("ref", refs.0);
        } else {
            self.start_array("refs");
            self.scalar(refs.0);
            self.scalar(refs.1);
            self.end_array();
        }
        self.start_array("indexes");
        self.scalar(indexes.0);
        self.scalar(indexes.1);
        self.end_array();
        self.end_object();
    }

    // ─── Completion ────────────────────────────────────────────────────────

    /// Check balance, flush, and report any latched writer error.
    ///
    /// Call once after the outermost invocation returned.
    pub fn finish(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.finished = true;
        if let Some(err) = state.error.take() {
            return Err(err);
        }
        if !state.writer.is_complete() || state.level != -1 {
            return Err(TraceError::Unbalanced {
                open: state.writer.depth(),
                level: state.level,
            });
        }
        state.writer.flush()?;
        debug!("trace finished");
        Ok(())
    }
}

impl Drop for TraceLogger {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        if state.finished || std::thread::panicking() {
            return;
        }
        if state.error.is_none() && (!state.writer.is_complete() || state.level != -1) {
            error!(
                open = state.writer.depth(),
                level = state.level,
                "trace logger dropped with open scopes"
            );
            debug_assert!(
                false,
                "trace logger dropped with {} open scope(s) at level {}",
                state.writer.depth(),
                state.level
            );
        }
        let _ = state.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::MemorySink;
    use serde_json::json;

    fn logger() -> (TraceLogger, MemorySink) {
        let sink = MemorySink::new();
        (TraceLogger::compact(sink.clone()), sink)
    }

    #[test]
    fn test_start_end_tracks_level() {
        let (logger, sink) = logger();
        assert_eq!(logger.level(), -1);
        logger.start();
        assert_eq!(logger.level(), 0);
        logger.start_array("logs");
        logger.start();
        assert_eq!(logger.level(), 1);
        logger.end();
        logger.end_array();
        logger.end();
        assert_eq!(logger.level(), -1);
        logger.finish().unwrap();
        assert_eq!(sink.values().unwrap(), vec![json!({"logs": [{}]})]);
    }

    #[test]
    fn test_comment_level_and_extent() {
        let (logger, sink) = logger();
        logger.start();
        logger.start_array("logs");
        logger.comment("top");
        logger.start_loop("entering");
        logger.comment_extent("inside", "3");
        logger.end_loop("leaving");
        logger.end_array();
        logger.end();
        logger.finish().unwrap();

        let root = &sink.values().unwrap()[0];
        assert_eq!(
            root["logs"],
            json!([
                {"type": "comment", "message": "top"},
                {"type": "comment", "message": "entering"},
                {"type": "comment", "message": "inside", "level": 1, "extent": "3"},
                {"type": "comment", "message": "leaving"}
            ])
        );
    }

    #[test]
    fn test_parameter_errors_emit_error_nodes() {
        let (logger, sink) = logger();
        logger.start_array("");
        assert!(!logger.add_value("", 3));
        assert!(logger.add_value("k", 3));
        assert!(!logger.add_array("empty", Vec::<i32>::new()));
        assert!(logger.add_array("a", vec![1, 2]));
        assert!(!logger.add_iterator("it", "", 0));
        logger.end_array();
        logger.finish().unwrap();

        let nodes = sink.values().unwrap().remove(0);
        assert_eq!(nodes[0]["type"], "error");
        assert_eq!(nodes[0]["fct"], "add_value");
        assert_eq!(nodes[1], json!({"type": "value", "name": "k", "data": 3}));
        assert_eq!(nodes[2]["fct"], "add_array");
        assert_eq!(nodes[3], json!({"type": "array", "name": "a", "data": [1, 2]}));
        assert_eq!(nodes[4]["fct"], "add_iterator");
    }

    #[test]
    fn test_return_variants() {
        let (logger, sink) = logger();
        logger.start_array("");
        logger.return_value(Returned::Void);
        logger.return_value(Returned::Value(TraceValue::Int(5)));
        logger.end_array();
        logger.finish().unwrap();
        assert_eq!(
            sink.values().unwrap()[0],
            json!([
                {"type": "operation", "name": "Return"},
                {"type": "operation", "name": "Return", "data": 5}
            ])
        );
    }

    #[test]
    fn test_swap_event_refs() {
        let (logger, sink) = logger();
        logger.start_array("");
        logger.swap_event(("v", "v"), (0, 3));
        logger.swap_event(("v", "buffer"), (1, 2));
        logger.end_array();
        logger.finish().unwrap();
        let nodes = &sink.values().unwrap()[0];
        assert_eq!(
            nodes[0],
            json!({"type": "operation", "name": "Swap", "ref": "v", "indexes": [0, 3]})
        );
        assert_eq!(nodes[1]["refs"], json!(["v", "buffer"]));
    }

    #[test]
    fn test_finish_reports_unbalanced() {
        let (logger, _sink) = logger();
        logger.start();
        let err = logger.finish().unwrap_err();
        assert!(matches!(err, TraceError::Unbalanced { open: 1, level: 0 }));
    }

    #[test]
    fn test_finish_reports_latched_error() {
        let (logger, _sink) = logger();
        logger.start();
        logger.end_array();
        logger.comment("dropped");
        assert!(logger.has_failed());
        let err = logger.finish().unwrap_err();
        assert!(matches!(err, TraceError::MismatchedEnd { .. }));
    }

    #[test]
    fn test_unbalanced_loop_is_reported() {
        let (logger, _sink) = logger();
        logger.start_loop("");
        assert!(matches!(
            logger.finish(),
            Err(TraceError::Unbalanced { open: 0, level: 0 })
        ));
    }
}
