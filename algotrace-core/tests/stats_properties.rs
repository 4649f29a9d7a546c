//! Property tests over sorts, partition, counters and mazes

use algotrace_core::{
    partition, trace_sequence, Grid, MazeGenerator, MemorySink, Operation, ReplayEngine, SortAlgorithm, Stats,
    TraceConfig, TraceLogger, TraceSummary, TracedVec,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

fn compact() -> TraceConfig {
    TraceConfig {
        pretty: false,
        ..TraceConfig::default()
    }
}

fn inversions(data: &[i32]) -> u64 {
    let mut count = 0;
    for i in 0..data.len() {
        for j in i + 1..data.len() {
            if data[i] > data[j] {
                count += 1;
            }
        }
    }
    count
}

fn container_stats(root: &Value) -> Option<&Value> {
    root["stats"]["data"]
        .as_array()?
        .iter()
        .find(|entry| entry["type"] == "array" && entry["name"] == "v")
}

proptest! {
    #[test]
    fn sorts_sort_and_replay(data in prop::collection::vec(-50i32..50, 0..40), which in 0usize..6) {
        let algorithm = SortAlgorithm::ALL[which];
        let mut expected = data.clone();
        expected.sort();

        let sink = MemorySink::new();
        let (sorted, ()) = trace_sequence(sink.clone(), &compact(), data, |v| {
            algorithm.run(&v.begin(), &v.end())
        })
        .unwrap();
        prop_assert_eq!(&sorted, &expected);

        let root = sink.values().unwrap().remove(0);
        let replay = ReplayEngine::new().replay(&root).unwrap();
        prop_assert!(replay.success);
        let as_values: Vec<Value> = sorted.iter().map(|x| Value::from(*x)).collect();
        prop_assert_eq!(replay.data, as_values);
    }

    #[test]
    fn partition_splits_around_pivot(data in prop::collection::vec(-20i32..20, 0..30), pivot in -20i32..20) {
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let v = TracedVec::new("v", data.clone(), logger.clone());
        let split = partition(&v.begin(), &v.end(), &pivot).index() as usize;
        logger.finish().unwrap();

        let out = v.into_inner();
        prop_assert!(split <= out.len());
        prop_assert!(out[..split].iter().all(|x| *x <= pivot));
        prop_assert!(out[split..].iter().all(|x| *x >= pivot));

        let mut before = data;
        let mut after = out;
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn bubble_swaps_equal_inversions(data in prop::collection::vec(-30i32..30, 2..30)) {
        let expected_swaps = inversions(&data);
        let sink = MemorySink::new();
        trace_sequence(sink.clone(), &compact(), data, |v| {
            SortAlgorithm::Bubble.run(&v.begin(), &v.end())
        })
        .unwrap();

        let root = sink.values().unwrap().remove(0);
        let summary = TraceSummary::from_value(&root);
        prop_assert_eq!(summary.operation_count(Operation::Swap) as u64, expected_swaps);

        let container = container_stats(&root).unwrap();
        prop_assert_eq!(container["nbSwaps"].as_u64(), Some(expected_swaps));
        let container_compares = container["nbCompares"].as_u64().unwrap_or(0);
        for entry in root["stats"]["data"].as_array().unwrap() {
            if entry["type"] == "iterator" {
                prop_assert!(entry["nbCompares"].as_u64().unwrap_or(0) <= container_compares);
            }
        }
    }

    #[test]
    fn container_counters_only_grow(data in prop::collection::vec(-30i32..30, 2..25), which in 0usize..6) {
        let algorithm = SortAlgorithm::ALL[which];
        let logger = TraceLogger::compact(MemorySink::new()).shared();
        let v = TracedVec::new("v", data, logger.clone());
        let before: Stats = v.stats();
        algorithm.run(&v.begin(), &v.end());
        let middle = v.stats();
        algorithm.run(&v.begin(), &v.end());
        let after = v.stats();
        logger.finish().unwrap();

        prop_assert!(middle.is_monotonic_from(&before));
        prop_assert!(after.is_monotonic_from(&middle));
        prop_assert!(after.total() >= middle.total());
    }

    #[test]
    fn mazes_are_spanning_trees(width in 1usize..9, height in 1usize..9, seed in any::<u64>(), which in 0usize..6) {
        let generator = MazeGenerator::ALL[which];
        let grid = Grid::new(width, height);
        let start = (seed as usize) % grid.len();
        let logger = TraceLogger::compact(MemorySink::new());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let maze = generator.generate(&logger, grid, start, &mut rng);
        logger.finish().unwrap();

        prop_assert_eq!(maze.passages().len(), grid.len() - 1);
        prop_assert!(maze.is_spanning_tree(start));
        for &(a, b) in maze.passages() {
            prop_assert!(grid.are_adjacent(a, b));
        }
    }
}
