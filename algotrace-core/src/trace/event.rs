//! Trace event vocabulary
//!
//! Events are never stored by the recorder: they are written straight to the
//! output stream. These enums pin down the `type` and `name` strings so the
//! writer side and the inspection side agree on spelling.

use serde::{Deserialize, Serialize};

/// Discriminator written under the `type` key of every trace node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "comment")]
    Comment,
    #[serde(rename = "operation")]
    Operation,
    #[serde(rename = "value")]
    Value,
    #[serde(rename = "iterator")]
    Iterator,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "stats")]
    Stats,
    /// Envelope of a traced algorithm invocation
    #[serde(rename = "algorithm")]
    Algorithm,
    /// Envelope of a traced data-structure builder (mazes)
    #[serde(rename = "DataStructure")]
    DataStructure,
}

impl EventKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Comment => "comment",
            EventKind::Operation => "operation",
            EventKind::Value => "value",
            EventKind::Iterator => "iterator",
            EventKind::Array => "array",
            EventKind::Error => "error",
            EventKind::Stats => "stats",
            EventKind::Algorithm => "algorithm",
            EventKind::DataStructure => "DataStructure",
        }
    }

    /// Whether this kind opens an invocation envelope
    pub fn is_envelope(&self) -> bool {
        matches!(self, EventKind::Algorithm | EventKind::DataStructure)
    }

    /// Parse a `type` string back into a kind
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "comment" => EventKind::Comment,
            "operation" => EventKind::Operation,
            "value" => EventKind::Value,
            "iterator" => EventKind::Iterator,
            "array" => EventKind::Array,
            "error" => EventKind::Error,
            "stats" => EventKind::Stats,
            "algorithm" => EventKind::Algorithm,
            "DataStructure" => EventKind::DataStructure,
            _ => return None,
        })
    }
}

/// Name of an `operation` node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// A cursor moved; `data` is its new index
    Set,
    /// A cursor jumped by an offset; `data` is the offset
    OffSet,
    Swap,
    Push,
    Pop,
    /// An element was picked from a pool and removed
    SelectPop,
    Connect,
    ConnectEdge,
    ConnectCells,
    SelectCell,
    SelectEdgePop,
    BuildWall,
    SetDistance,
    Return,
    #[serde(rename = "setRange")]
    SetRange,
}

impl Operation {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Set => "Set",
            Operation::OffSet => "OffSet",
            Operation::Swap => "Swap",
            Operation::Push => "Push",
            Operation::Pop => "Pop",
            Operation::SelectPop => "SelectPop",
            Operation::Connect => "Connect",
            Operation::ConnectEdge => "ConnectEdge",
            Operation::ConnectCells => "ConnectCells",
            Operation::SelectCell => "SelectCell",
            Operation::SelectEdgePop => "SelectEdgePop",
            Operation::BuildWall => "BuildWall",
            Operation::SetDistance => "SetDistance",
            Operation::Return => "Return",
            Operation::SetRange => "setRange",
        }
    }

    /// Parse an operation name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == s)
    }

    /// Operations that join two maze cells into one passage
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Operation::Connect | Operation::ConnectEdge | Operation::ConnectCells
        )
    }

    /// Every operation, in declaration order
    pub const ALL: [Operation; 15] = [
        Operation::Set,
        Operation::OffSet,
        Operation::Swap,
        Operation::Push,
        Operation::Pop,
        Operation::SelectPop,
        Operation::Connect,
        Operation::ConnectEdge,
        Operation::ConnectCells,
        Operation::SelectCell,
        Operation::SelectEdgePop,
        Operation::BuildWall,
        Operation::SetDistance,
        Operation::Return,
        Operation::SetRange,
    ];
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
