//! Binary tree maze

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{trace_generator, Grid, Maze};
use crate::trace::{Operation, TraceLogger};
use crate::tracer::AlgorithmInfo;

pub const BINARY_TREE: AlgorithmInfo = AlgorithmInfo::data_structure("BinaryTree", "Maze");

/// Link every cell to its north or west neighbour, chosen at random.
///
/// The north-west corner has neither and stays the root of the tree.
pub fn binary_tree(logger: &TraceLogger, grid: Grid, start: usize, rng: &mut ChaCha8Rng) -> Maze {
    trace_generator(logger, BINARY_TREE, grid, start, &[], |l, maze| {
        for cell in 0..grid.len() {
            let (x, y) = grid.coords(cell);
            let mut candidates = Vec::with_capacity(2);
            if y > 0 {
                candidates.push(cell - grid.width);
            }
            if x > 0 {
                candidates.push(cell - 1);
            }
            if candidates.is_empty() {
                continue;
            }
            let other = candidates[rng.gen_range(0..candidates.len())];
            maze.connect(cell, other);
            l.operation_cells(Operation::Connect, &[cell, other], None);
        }
    })
}
