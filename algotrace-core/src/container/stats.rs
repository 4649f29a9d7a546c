//! Operation counters kept per cursor and per container

use serde::{Deserialize, Serialize};

use crate::trace::TraceLogger;

/// Access/compare/iteration/copy/swap counters.
///
/// Counters only grow during a run; a fresh container or cursor starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub nb_access: u64,
    pub nb_compares: u64,
    pub nb_iterations: u64,
    pub nb_it_copy: u64,
    pub nb_swaps: u64,
}

impl Stats {
    /// True if no counter went backwards since `earlier`
    pub fn is_monotonic_from(&self, earlier: &Stats) -> bool {
        self.nb_access >= earlier.nb_access
            && self.nb_compares >= earlier.nb_compares
            && self.nb_iterations >= earlier.nb_iterations
            && self.nb_it_copy >= earlier.nb_it_copy
            && self.nb_swaps >= earlier.nb_swaps
    }

    /// Sum of every counter
    pub fn total(&self) -> u64 {
        self.nb_access + self.nb_compares + self.nb_iterations + self.nb_it_copy + self.nb_swaps
    }

    /// Write the counters as entries of the open object.
    ///
    /// Cursor stats leave out `nbItCopy`, container stats include it.
    pub(crate) fn write_entries(&self, logger: &TraceLogger, with_copies: bool) {
        logger.add_entry("nbAccess", self.nb_access);
        logger.add_entry("nbCompares", self.nb_compares);
        logger.add_entry("nbIterations", self.nb_iterations);
        if with_copies {
            logger.add_entry("nbItCopy", self.nb_it_copy);
        }
        logger.add_entry("nbSwaps", self.nb_swaps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_field_names() {
        let stats = Stats {
            nb_access: 1,
            nb_it_copy: 2,
            ..Stats::default()
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["nbAccess"], 1);
        assert_eq!(json["nbItCopy"], 2);
        assert_eq!(json["nbSwaps"], 0);
    }

    #[test]
    fn test_monotonic() {
        let before = Stats::default();
        let after = Stats {
            nb_compares: 3,
            ..before
        };
        assert!(after.is_monotonic_from(&before));
        assert!(!before.is_monotonic_from(&after));
        assert_eq!(after.total(), 3);
    }
}
