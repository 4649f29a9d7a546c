//! Traced comparison sorts

mod aggregate;
mod bubble;
mod cocktail;
mod comb;
mod merge;
mod partition;
mod quick;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use aggregate::{aggregate_in_place, AGGREGATE_IN_PLACE};
pub use bubble::{bubble_sort, BUBBLE};
pub use cocktail::{cocktail_sort, COCKTAIL};
pub use comb::{comb_sort, COMB, SHRINK_FACTOR};
pub use merge::{merge_sort, BUFFER_REF, MERGE};
pub use partition::{partition, partition_by, PARTITION};
pub use quick::{quick_sort, QUICK};

use super::{PivotStrategy, Sortable};
use crate::container::Cursor;
use crate::error::TraceError;
use crate::tracer::AlgorithmInfo;

/// Every sort that can run on a whole range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortAlgorithm {
    Quick(PivotStrategy),
    Merge,
    AggregateInPlace,
    Bubble,
    Cocktail,
    Comb,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Quick(PivotStrategy::Middle),
        SortAlgorithm::Merge,
        SortAlgorithm::AggregateInPlace,
        SortAlgorithm::Bubble,
        SortAlgorithm::Cocktail,
        SortAlgorithm::Comb,
    ];

    /// Description block written by this sort
    pub fn info(&self) -> AlgorithmInfo {
        match self {
            SortAlgorithm::Quick(_) => QUICK,
            SortAlgorithm::Merge => MERGE,
            SortAlgorithm::AggregateInPlace => AGGREGATE_IN_PLACE,
            SortAlgorithm::Bubble => BUBBLE,
            SortAlgorithm::Cocktail => COCKTAIL,
            SortAlgorithm::Comb => COMB,
        }
    }

    /// Command-line name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortAlgorithm::Quick(_) => "quick",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::AggregateInPlace => "aggregate-in-place",
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Cocktail => "cocktail",
            SortAlgorithm::Comb => "comb",
        }
    }

    /// Sort `[first, last)`
    pub fn run<'a, T: Sortable>(&self, first: &Cursor<'a, T>, last: &Cursor<'a, T>) {
        match *self {
            SortAlgorithm::Quick(strategy) => quick_sort(first, last, strategy),
            SortAlgorithm::Merge => merge_sort(first, last),
            SortAlgorithm::AggregateInPlace => aggregate_in_place(first, last),
            SortAlgorithm::Bubble => bubble_sort(first, last),
            SortAlgorithm::Cocktail => cocktail_sort(first, last),
            SortAlgorithm::Comb => comb_sort(first, last),
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortAlgorithm {
    type Err = TraceError;

    /// Accepts the command-line names; quick sort takes the default pivot
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| TraceError::InvalidParameter {
                fct: "sort".to_string(),
                message: format!("unknown sort algorithm '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TracedVec;
    use crate::trace::{MemorySink, TraceLogger};

    #[test]
    fn test_every_sort_sorts() {
        let input = vec![12, -3, 7, 7, 0, 25, -8, 3, 3, 1, 19];
        let mut expected = input.clone();
        expected.sort();
        for algorithm in SortAlgorithm::ALL {
            let logger = TraceLogger::compact(MemorySink::new()).shared();
            let v = TracedVec::new("v", input.clone(), logger.clone());
            algorithm.run(&v.begin(), &v.end());
            logger.finish().unwrap();
            assert_eq!(v.into_inner(), expected, "{algorithm}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("merge".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::Merge);
        assert_eq!(
            "quick".parse::<SortAlgorithm>().unwrap(),
            SortAlgorithm::Quick(PivotStrategy::Middle)
        );
        assert!("heap".parse::<SortAlgorithm>().is_err());
    }
}
