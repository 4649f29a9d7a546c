//! In-memory output sink
//!
//! [`MemorySink`] is an `io::Write` whose clones share one buffer, so a test
//! can hand one clone to a logger and read the trace back through another.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use serde_json::Value;

use crate::error::Result;

/// Shared in-memory byte buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, as UTF-8 (lossy)
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.bytes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.borrow_mut().clear();
    }

    /// Parse the stream of root JSON values written so far
    pub fn values(&self) -> Result<Vec<Value>> {
        let bytes = self.bytes.borrow();
        let values = serde_json::Deserializer::from_slice(&bytes)
            .into_iter::<Value>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(values)
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
