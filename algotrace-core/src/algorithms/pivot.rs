//! Pivot selection strategies for quick sort

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Sortable;
use crate::container::{less, CompareWrap, Cursor};
use crate::error::TraceError;

/// How quick sort picks its pivot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PivotStrategy {
    First,
    Last,
    #[default]
    Middle,
    /// Median of the first, middle and last elements; costs up to three compares
    MedianOfThree,
}

impl PivotStrategy {
    pub const ALL: [PivotStrategy; 4] = [
        PivotStrategy::First,
        PivotStrategy::Last,
        PivotStrategy::Middle,
        PivotStrategy::MedianOfThree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PivotStrategy::First => "first",
            PivotStrategy::Last => "last",
            PivotStrategy::Middle => "middle",
            PivotStrategy::MedianOfThree => "median-of-three",
        }
    }

    /// Position of the pivot in the non-empty range `[first, last)`.
    ///
    /// The returned cursor does not log; callers name it.
    pub fn pick<'a, T: Sortable>(&self, first: &Cursor<'a, T>, last: &Cursor<'a, T>) -> Cursor<'a, T> {
        let len = last.distance(first);
        debug_assert!(len > 0, "pivot of an empty range");
        match self {
            PivotStrategy::First => first.clone(),
            PivotStrategy::Last => last.clone().offset(-1),
            PivotStrategy::Middle => first.clone().offset(len / 2),
            PivotStrategy::MedianOfThree => {
                let mut a = first.clone();
                let mut b = first.clone().offset(len / 2);
                let mut c = last.clone().offset(-1);
                let lt = CompareWrap::new(less);
                if lt.call(&mut a, &mut b) {
                    if lt.call(&mut b, &mut c) {
                        b
                    } else if lt.call(&mut a, &mut c) {
                        c
                    } else {
                        a
                    }
                } else if lt.call(&mut a, &mut c) {
                    a
                } else if lt.call(&mut b, &mut c) {
                    c
                } else {
                    b
                }
            }
        }
    }
}

impl fmt::Display for PivotStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PivotStrategy {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| TraceError::InvalidParameter {
                fct: "pivot".to_string(),
                message: format!("unknown pivot strategy '{s}'"),
            })
    }
}
