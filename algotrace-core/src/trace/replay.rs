//! Trace replay
//!
//! Rebuilds the traced container from a parsed trace: start from the root
//! snapshot in `parameters`, then apply `Swap` operations and range
//! snapshots in document order, descending into nested frames. A faithful
//! trace replays to the container's final state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::event::{EventKind, Operation};
use crate::error::{Result, TraceError};

/// Result of replaying a trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayResult {
    /// Whether every replayable event applied cleanly
    pub success: bool,

    /// Label of the replayed container
    pub reference: String,

    /// Reconstructed elements
    pub data: Vec<Value>,

    pub swaps_applied: usize,

    pub snapshots_applied: usize,

    /// Events that could not be applied
    pub failures: Vec<ReplayFailure>,
}

/// An event that could not be applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFailure {
    /// Position among the events visited, in document order
    pub event_index: usize,

    pub event_name: String,

    pub error: String,
}

/// Replays `Swap` operations and range snapshots
#[derive(Debug, Default)]
pub struct ReplayEngine;

impl ReplayEngine {
    pub fn new() -> Self {
        Self
    }

    /// Replay one root frame.
    ///
    /// Fails if the root has no container snapshot among its parameters.
    pub fn replay(&self, root: &Value) -> Result<ReplayResult> {
        let snapshot = root
            .get("parameters")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .find(|p| p.get("type").and_then(Value::as_str) == Some(EventKind::Array.as_str()))
            .ok_or_else(|| TraceError::Replay {
                reason: "root parameters carry no container snapshot".to_string(),
            })?;
        let reference = snapshot
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let data = snapshot
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| TraceError::Replay {
                reason: format!("snapshot of '{reference}' has no data"),
            })?;

        let mut state = ReplayState {
            reference,
            data,
            swaps_applied: 0,
            snapshots_applied: 0,
            events: 0,
            failures: Vec::new(),
        };
        state.visit_logs(root);
        debug!(
            swaps = state.swaps_applied,
            snapshots = state.snapshots_applied,
            failures = state.failures.len(),
            "trace replayed"
        );

        Ok(ReplayResult {
            success: state.failures.is_empty(),
            reference: state.reference,
            data: state.data,
            swaps_applied: state.swaps_applied,
            snapshots_applied: state.snapshots_applied,
            failures: state.failures,
        })
    }

    /// Replay and compare with the expected final elements
    pub fn reproduces(&self, root: &Value, expected: &[Value]) -> Result<bool> {
        let result = self.replay(root)?;
        Ok(result.success && result.data == expected)
    }
}

struct ReplayState {
    reference: String,
    data: Vec<Value>,
    swaps_applied: usize,
    snapshots_applied: usize,
    events: usize,
    failures: Vec<ReplayFailure>,
}

impl ReplayState {
    fn visit_logs(&mut self, frame: &Value) {
        let Some(logs) = frame.get("logs").and_then(Value::as_array) else {
            return;
        };
        for node in logs {
            let kind = node.get("type").and_then(Value::as_str).and_then(EventKind::parse);
            match kind {
                Some(k) if k.is_envelope() => self.visit_logs(node),
                Some(EventKind::Operation) => {
                    self.events += 1;
                    let name = node.get("name").and_then(Value::as_str).unwrap_or("");
                    if Operation::parse(name) == Some(Operation::Swap) {
                        if let Err(error) = self.apply_swap(node) {
                            self.fail(name, error);
                        }
                    }
                }
                Some(EventKind::Array) if node.get("from").is_some() => {
                    self.events += 1;
                    if let Err(error) = self.apply_snapshot(node) {
                        self.fail("array", error);
                    }
                }
                Some(_) => self.events += 1,
                None => {}
            }
        }
    }

    fn fail(&mut self, name: &str, error: String) {
        self.failures.push(ReplayFailure {
            event_index: self.events - 1,
            event_name: name.to_string(),
            error,
        });
    }

    fn apply_swap(&mut self, node: &Value) -> std::result::Result<(), String> {
        match node.get("ref").and_then(Value::as_str) {
            Some(r) if r == self.reference => {}
            Some(other) => {
                debug!(reference = other, "skipping swap in another container");
                return Ok(());
            }
            None => return Err("swap across containers cannot be replayed".to_string()),
        }
        let indexes: Vec<usize> = node
            .get("indexes")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_u64).map(|i| i as usize).collect())
            .unwrap_or_default();
        let [i, j] = indexes[..] else {
            return Err("swap needs two indexes".to_string());
        };
        if i >= self.data.len() || j >= self.data.len() {
            return Err(format!("swap ({i}, {j}) outside {} elements", self.data.len()));
        }
        self.data.swap(i, j);
        self.swaps_applied += 1;
        Ok(())
    }

    fn apply_snapshot(&mut self, node: &Value) -> std::result::Result<(), String> {
        if node.get("name").and_then(Value::as_str) != Some(self.reference.as_str()) {
            return Ok(());
        }
        let from = node
            .get("from")
            .and_then(Value::as_u64)
            .ok_or("snapshot has no valid 'from'")? as usize;
        let values = node
            .get("data")
            .and_then(Value::as_array)
            .ok_or("snapshot has no data")?;
        let end = from + values.len();
        if end > self.data.len() {
            return Err(format!("snapshot [{from}, {end}) outside {} elements", self.data.len()));
        }
        self.data[from..end].clone_from_slice(values);
        self.snapshots_applied += 1;
        Ok(())
    }
}
