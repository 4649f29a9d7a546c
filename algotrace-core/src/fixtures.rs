//! Input sequences for traced runs
//!
//! Generated fixtures are deterministic for a given seed.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::FixtureConfig;
use crate::error::TraceError;

/// Sample input used by the merge sort walkthrough
pub const MERGE_SAMPLE: [i32; 10] = [1, -4, 2, 3, -1, 4, 0, -2, -5, -3];

/// Sorted sample input used by the binary search walkthrough
pub const SEARCH_SAMPLE: [i32; 9] = [-3, -2, 0, 2, 8, 15, 36, 212, 366];

/// Shape of a generated input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fixture {
    Sorted,
    Reversed,
    Random,
    FewUniques,
}

impl Fixture {
    pub const ALL: [Fixture; 4] = [
        Fixture::Sorted,
        Fixture::Reversed,
        Fixture::Random,
        Fixture::FewUniques,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Fixture::Sorted => "sorted",
            Fixture::Reversed => "reversed",
            Fixture::Random => "random",
            Fixture::FewUniques => "few-uniques",
        }
    }

    /// Build the sequence described by `config`
    pub fn generate(&self, config: &FixtureConfig, seed: u64) -> Vec<i32> {
        let size = config.size;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        match self {
            Fixture::Sorted => (0..size as i32).collect(),
            Fixture::Reversed => (0..size as i32).rev().collect(),
            Fixture::Random => {
                let mut data: Vec<i32> = (0..size as i32).collect();
                data.shuffle(&mut rng);
                data
            }
            Fixture::FewUniques => {
                let uniques = config.uniques.max(1) as i32;
                (0..size).map(|_| rng.gen_range(0..uniques)).collect()
            }
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fixture {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| TraceError::InvalidParameter {
                fct: "fixture".to_string(),
                message: format!("unknown fixture '{s}'"),
            })
    }
}

/// Parse `1,2,3` into a sequence
pub fn parse_list(text: &str) -> Result<Vec<i32>, TraceError> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>().map_err(|e| TraceError::InvalidParameter {
                fct: "data".to_string(),
                message: format!("'{s}' is not an integer: {e}"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: usize, uniques: usize) -> FixtureConfig {
        FixtureConfig { size, uniques }
    }

    #[test]
    fn test_shapes() {
        assert_eq!(Fixture::Sorted.generate(&config(4, 1), 0), vec![0, 1, 2, 3]);
        assert_eq!(Fixture::Reversed.generate(&config(3, 1), 0), vec![2, 1, 0]);

        let mut random = Fixture::Random.generate(&config(20, 1), 42);
        assert_eq!(random, Fixture::Random.generate(&config(20, 1), 42));
        random.sort();
        assert_eq!(random, (0..20).collect::<Vec<_>>());

        let few = Fixture::FewUniques.generate(&config(50, 3), 1);
        assert_eq!(few.len(), 50);
        assert!(few.iter().all(|x| (0..3).contains(x)));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("3, -1,2,").unwrap(), vec![3, -1, 2]);
        assert!(parse_list("").unwrap().is_empty());
        assert!(parse_list("1,x").is_err());
    }
}
