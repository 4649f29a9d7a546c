//! Trace inspection and structural verification
//!
//! Works on parsed traces (`serde_json::Value`), so traces written by
//! another run or another tool can be checked the same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::event::{EventKind, Operation};
use super::INVOCATION_KEYS;

/// Counts of what a trace contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSummary {
    /// Invocation frames, the root included
    pub invocations: usize,

    /// Invocation frames by algorithm name
    pub algorithms: BTreeMap<String, usize>,

    pub comments: usize,

    /// Operation nodes by name
    pub operations: BTreeMap<String, usize>,

    /// `Return` operations
    pub returns: usize,

    /// `{type: error}` nodes
    pub errors: usize,

    /// Deepest comment level seen; comments at level 0 carry no `level` key
    pub max_level: i64,

    /// Whether the root frame carries a `stats` block
    pub has_stats: bool,
}

impl TraceSummary {
    /// Summarize one root invocation
    pub fn from_value(root: &Value) -> Self {
        let mut summary = Self {
            has_stats: root.get("stats").is_some(),
            ..Self::default()
        };
        summary.visit(root);
        summary
    }

    /// Number of operation nodes named `op`
    pub fn operation_count(&self, op: Operation) -> usize {
        self.operations.get(op.as_str()).copied().unwrap_or(0)
    }

    /// Number of passage-carving operations
    pub fn connections(&self) -> usize {
        Operation::ALL
            .iter()
            .filter(|op| op.is_connection())
            .map(|op| self.operation_count(*op))
            .sum()
    }

    fn visit(&mut self, node: &Value) {
        let Some(kind) = node.get("type").and_then(Value::as_str).and_then(EventKind::parse) else {
            return;
        };
        match kind {
            EventKind::Algorithm | EventKind::DataStructure => {
                self.invocations += 1;
                let name = node.get("name").and_then(Value::as_str).unwrap_or("");
                *self.algorithms.entry(name.to_string()).or_insert(0) += 1;
                if let Some(logs) = node.get("logs").and_then(Value::as_array) {
                    for child in logs {
                        self.visit(child);
                    }
                }
            }
            EventKind::Comment => {
                self.comments += 1;
                let level = node.get("level").and_then(Value::as_i64).unwrap_or(0);
                self.max_level = self.max_level.max(level);
            }
            EventKind::Operation => {
                let name = node.get("name").and_then(Value::as_str).unwrap_or("");
                if name == Operation::Return.as_str() {
                    self.returns += 1;
                }
                *self.operations.entry(name.to_string()).or_insert(0) += 1;
            }
            EventKind::Error => self.errors += 1,
            _ => {}
        }
    }
}

/// Result of verifying the structure of a trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceVerification {
    /// Whether the trace is well-formed
    pub is_valid: bool,

    /// Invocation frames checked before stopping
    pub invocation_count: usize,

    /// JSON pointer to the offending node, if any
    pub path: Option<String>,

    pub error_type: Option<VerificationError>,

    pub error_message: Option<String>,
}

impl BalanceVerification {
    fn valid(invocation_count: usize) -> Self {
        Self {
            is_valid: true,
            invocation_count,
            path: None,
            error_type: None,
            error_message: None,
        }
    }

    fn invalid(invocation_count: usize, path: String, error_type: VerificationError, message: String) -> Self {
        Self {
            is_valid: false,
            invocation_count,
            path: Some(path),
            error_type: Some(error_type),
            error_message: Some(message),
        }
    }
}

/// Kinds of structural defects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationError {
    /// The node is not an `algorithm` or `DataStructure` frame
    NotAnInvocation,
    /// A description key, `parameters` or `logs` is missing
    MissingKey,
    /// A key outside the invocation vocabulary
    UnknownKey,
    /// Keys are not in emission order
    KeyOrder,
    /// A nested frame carries `stats`
    NestedStats,
    /// A section has the wrong JSON type
    MalformedSection,
}

impl std::fmt::Display for VerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationError::NotAnInvocation => write!(f, "not_an_invocation"),
            VerificationError::MissingKey => write!(f, "missing_key"),
            VerificationError::UnknownKey => write!(f, "unknown_key"),
            VerificationError::KeyOrder => write!(f, "key_order"),
            VerificationError::NestedStats => write!(f, "nested_stats"),
            VerificationError::MalformedSection => write!(f, "malformed_section"),
        }
    }
}

/// Structural verifier for parsed traces
pub struct BalanceVerifier;

impl BalanceVerifier {
    /// Verify a root frame and every frame nested in its logs.
    ///
    /// Checks:
    /// 1. Every frame has the description keys, `parameters` and `logs`
    /// 2. Keys appear in emission order and nothing else appears
    /// 3. Only the root frame carries `stats`
    pub fn verify(root: &Value) -> BalanceVerification {
        let mut count = 0;
        match Self::check(root, "", true, &mut count) {
            Ok(()) => BalanceVerification::valid(count),
            Err((path, error_type, message)) => BalanceVerification::invalid(count, path, error_type, message),
        }
    }

    fn check(
        node: &Value,
        path: &str,
        is_root: bool,
        count: &mut usize,
    ) -> Result<(), (String, VerificationError, String)> {
        let fail = |error_type, message: String| Err((path.to_string(), error_type, message));

        let Some(object) = node.as_object() else {
            return fail(VerificationError::NotAnInvocation, "frame is not an object".to_string());
        };
        let kind = object.get("type").and_then(Value::as_str).and_then(EventKind::parse);
        if !kind.is_some_and(|k| k.is_envelope()) {
            return fail(
                VerificationError::NotAnInvocation,
                format!("frame type is {:?}", object.get("type")),
            );
        }
        *count += 1;

        let mut last_position = None;
        for key in object.keys() {
            let Some(position) = INVOCATION_KEYS.iter().position(|k| *k == key.as_str()) else {
                return fail(VerificationError::UnknownKey, format!("unexpected key '{key}'"));
            };
            if last_position.is_some_and(|last| position <= last) {
                return fail(VerificationError::KeyOrder, format!("key '{key}' is out of order"));
            }
            last_position = Some(position);
        }

        for key in ["version", "author", "name", "module", "parameters", "logs"] {
            if !object.contains_key(key) {
                return fail(VerificationError::MissingKey, format!("missing key '{key}'"));
            }
        }

        if let Some(stats) = object.get("stats") {
            if !is_root {
                return fail(VerificationError::NestedStats, "stats below the root frame".to_string());
            }
            let well_formed = stats.get("type").and_then(Value::as_str) == Some(EventKind::Stats.as_str())
                && stats.get("data").is_some_and(Value::is_array);
            if !well_formed {
                return fail(VerificationError::MalformedSection, "stats block is malformed".to_string());
            }
        }

        for section in ["parameters", "locals", "logs"] {
            if object.get(section).is_some_and(|s| !s.is_array()) {
                return fail(VerificationError::MalformedSection, format!("'{section}' is not an array"));
            }
        }

        let logs = object.get("logs").and_then(Value::as_array).into_iter().flatten();
        for (i, child) in logs.enumerate() {
            let is_frame = child
                .get("type")
                .and_then(Value::as_str)
                .and_then(EventKind::parse)
                .is_some_and(|k| k.is_envelope());
            if is_frame {
                Self::check(child, &format!("{path}/logs/{i}"), false, count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(name: &str, logs: Value) -> Value {
        json!({
            "type": "algorithm", "version": "1.0", "author": "algotrace",
            "name": name, "module": "Sort", "parameters": [], "logs": logs
        })
    }

    #[test]
    fn test_summary_counts() {
        let root = json!({
            "type": "algorithm", "version": "1.0", "author": "algotrace",
            "name": "Quick", "module": "Sort", "parameters": [], "locals": [],
            "logs": [
                {"type": "comment", "message": "a"},
                {"type": "operation", "name": "Swap", "ref": "v", "indexes": [0, 1]},
                frame("Partition", json!([
                    {"type": "comment", "message": "b", "level": 1},
                    {"type": "operation", "name": "Return"}
                ])),
                {"type": "error", "fct": "f", "message": "m"},
                {"type": "operation", "name": "Return"}
            ],
            "stats": {"type": "stats", "data": []}
        });
        let summary = TraceSummary::from_value(&root);
        assert_eq!(summary.invocations, 2);
        assert_eq!(summary.algorithms["Partition"], 1);
        assert_eq!(summary.comments, 2);
        assert_eq!(summary.returns, 2);
        assert_eq!(summary.operation_count(Operation::Swap), 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.max_level, 1);
        assert!(summary.has_stats);

        assert!(BalanceVerifier::verify(&root).is_valid);
    }

    #[test]
    fn test_nested_stats_rejected() {
        let mut nested = frame("Partition", json!([]));
        nested["stats"] = json!({"type": "stats", "data": []});
        let root = frame("Quick", json!([nested]));
        let result = BalanceVerifier::verify(&root);
        assert!(!result.is_valid);
        assert_eq!(result.error_type, Some(VerificationError::NestedStats));
        assert_eq!(result.path.as_deref(), Some("/logs/0"));
    }

    #[test]
    fn test_key_order_and_missing_keys() {
        let root = json!({
            "type": "algorithm", "name": "Quick", "version": "1.0", "author": "a",
            "module": "Sort", "parameters": [], "logs": []
        });
        assert_eq!(BalanceVerifier::verify(&root).error_type, Some(VerificationError::KeyOrder));

        let root = json!({"type": "algorithm", "version": "1.0", "logs": []});
        assert_eq!(BalanceVerifier::verify(&root).error_type, Some(VerificationError::MissingKey));

        let root = json!({"type": "comment", "message": "x"});
        assert_eq!(
            BalanceVerifier::verify(&root).error_type,
            Some(VerificationError::NotAnInvocation)
        );
    }
}
