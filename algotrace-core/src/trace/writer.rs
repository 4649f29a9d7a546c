//! Structured JSON writer
//!
//! [`StructuredWriter`] is the SAX-style seam the logger writes through:
//! objects, arrays, keys and typed scalars, plus an `is_complete` query for
//! the balance check. [`JsonWriter`] implements it on top of serde_json's
//! [`Formatter`], so pretty and compact output share the same state machine.
//!
//! Several root values may be written to one stream; each completed root is
//! followed by a newline.

use std::io::Write;

use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::error::{Result, TraceError};

/// Streaming writer for nested JSON
pub trait StructuredWriter {
    fn start_object(&mut self) -> Result<()>;
    fn end_object(&mut self) -> Result<()>;
    fn start_array(&mut self) -> Result<()>;
    fn end_array(&mut self) -> Result<()>;

    /// Write an object key; the next call must write its value
    fn key(&mut self, key: &str) -> Result<()>;

    fn string(&mut self, value: &str) -> Result<()>;
    fn int(&mut self, value: i32) -> Result<()>;
    fn int64(&mut self, value: i64) -> Result<()>;
    fn uint(&mut self, value: u32) -> Result<()>;
    fn uint64(&mut self, value: u64) -> Result<()>;
    /// Non-finite values are written as `null`
    fn double(&mut self, value: f64) -> Result<()>;
    fn bool(&mut self, value: bool) -> Result<()>;

    /// True when every opened object and array has been closed
    fn is_complete(&self) -> bool;

    /// Number of currently open objects and arrays
    fn depth(&self) -> usize;

    fn flush(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy)]
enum Frame {
    Object { first: bool, has_key: bool },
    Array { first: bool },
}

impl Frame {
    fn name(&self) -> &'static str {
        match self {
            Frame::Object { .. } => "object",
            Frame::Array { .. } => "array",
        }
    }
}

/// [`StructuredWriter`] over any `io::Write`, formatted by a serde_json [`Formatter`]
pub struct JsonWriter<W, F = PrettyFormatter<'static>> {
    out: W,
    formatter: F,
    stack: Vec<Frame>,
    roots: usize,
}

impl<W: Write> JsonWriter<W, PrettyFormatter<'static>> {
    /// Indented output, two spaces per level
    pub fn pretty(out: W) -> Self {
        Self::with_formatter(out, PrettyFormatter::new())
    }
}

impl<W: Write> JsonWriter<W, CompactFormatter> {
    /// Single-line output per root value
    pub fn compact(out: W) -> Self {
        Self::with_formatter(out, CompactFormatter)
    }
}

impl<W: Write, F: Formatter> JsonWriter<W, F> {
    pub fn with_formatter(out: W, formatter: F) -> Self {
        Self {
            out,
            formatter,
            stack: Vec::new(),
            roots: 0,
        }
    }

    /// Number of root values completed so far
    pub fn roots(&self) -> usize {
        self.roots
    }

    /// Recover the underlying stream
    pub fn into_inner(self) -> W {
        self.out
    }

    fn begin_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            None => {}
            Some(Frame::Array { first }) => {
                let was_first = *first;
                *first = false;
                self.formatter.begin_array_value(&mut self.out, was_first)?;
            }
            Some(Frame::Object { has_key, .. }) => {
                if !*has_key {
                    return Err(TraceError::ValueWithoutKey);
                }
            }
        }
        Ok(())
    }

    fn end_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            None => {
                self.roots += 1;
                self.out.write_all(b"\n")?;
            }
            Some(Frame::Array { .. }) => self.formatter.end_array_value(&mut self.out)?,
            Some(Frame::Object { has_key, .. }) => {
                *has_key = false;
                self.formatter.end_object_value(&mut self.out)?;
            }
        }
        Ok(())
    }

    fn scalar<G>(&mut self, write: G) -> Result<()>
    where
        G: FnOnce(&mut F, &mut W) -> std::io::Result<()>,
    {
        self.begin_value()?;
        write(&mut self.formatter, &mut self.out)?;
        self.end_value()
    }

    fn close(&mut self, expected: &'static str) -> Result<Frame> {
        match self.stack.last() {
            Some(Frame::Object { has_key: true, .. }) => Err(TraceError::MismatchedEnd {
                expected: "value",
                found: expected,
            }),
            Some(frame) if frame.name() == expected => {
                let frame = *frame;
                self.stack.pop();
                Ok(frame)
            }
            Some(frame) => Err(TraceError::MismatchedEnd {
                expected: frame.name(),
                found: expected,
            }),
            None => Err(TraceError::MismatchedEnd {
                expected: "nothing",
                found: expected,
            }),
        }
    }
}

impl<W: Write, F: Formatter> StructuredWriter for JsonWriter<W, F> {
    fn start_object(&mut self) -> Result<()> {
        self.begin_value()?;
        self.formatter.begin_object(&mut self.out)?;
        self.stack.push(Frame::Object {
            first: true,
            has_key: false,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        self.close("object")?;
        self.formatter.end_object(&mut self.out)?;
        self.end_value()
    }

    fn start_array(&mut self) -> Result<()> {
        self.begin_value()?;
        self.formatter.begin_array(&mut self.out)?;
        self.stack.push(Frame::Array { first: true });
        Ok(())
    }

    fn end_array(&mut self) -> Result<()> {
        self.close("array")?;
        self.formatter.end_array(&mut self.out)?;
        self.end_value()
    }

    fn key(&mut self, key: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object { first, has_key }) if !*has_key => {
                let was_first = *first;
                *first = false;
                *has_key = true;
                self.formatter.begin_object_key(&mut self.out, was_first)?;
                serde_json::to_writer(&mut self.out, key)?;
                self.formatter.end_object_key(&mut self.out)?;
                self.formatter.begin_object_value(&mut self.out)?;
                Ok(())
            }
            _ => Err(TraceError::KeyOutsideObject {
                key: key.to_string(),
            }),
        }
    }

    fn string(&mut self, value: &str) -> Result<()> {
        self.begin_value()?;
        serde_json::to_writer(&mut self.out, value)?;
        self.end_value()
    }

    fn int(&mut self, value: i32) -> Result<()> {
        self.scalar(|f, out| f.write_i32(out, value))
    }

    fn int64(&mut self, value: i64) -> Result<()> {
        self.scalar(|f, out| f.write_i64(out, value))
    }

    fn uint(&mut self, value: u32) -> Result<()> {
        self.scalar(|f, out| f.write_u32(out, value))
    }

    fn uint64(&mut self, value: u64) -> Result<()> {
        self.scalar(|f, out| f.write_u64(out, value))
    }

    fn double(&mut self, value: f64) -> Result<()> {
        if value.is_finite() {
            self.scalar(|f, out| f.write_f64(out, value))
        } else {
            self.scalar(|f, out| f.write_null(out))
        }
    }

    fn bool(&mut self, value: bool) -> Result<()> {
        self.scalar(|f, out| f.write_bool(out, value))
    }

    fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    fn depth(&self) -> usize {
        self.stack.len()
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
