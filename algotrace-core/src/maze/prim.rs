//! Randomized Prim

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{trace_generator, Grid, Maze};
use crate::trace::{Operation, TraceLogger, TraceValue};
use crate::tracer::AlgorithmInfo;

pub const PRIM: AlgorithmInfo = AlgorithmInfo::data_structure("Prim", "Maze");

/// Grow the maze from `start` by pulling random cells off the frontier.
///
/// Emits `SelectPop` for the frontier cell taken and `ConnectCells` for the
/// passage to a random already-carved neighbour.
pub fn prim(logger: &TraceLogger, grid: Grid, start: usize, rng: &mut ChaCha8Rng) -> Maze {
    let locals = [("frontierSize", TraceValue::from(0usize))];
    trace_generator(logger, PRIM, grid, start, &locals, |l, maze| {
        let mut in_maze = vec![false; grid.len()];
        let mut in_frontier = vec![false; grid.len()];
        let mut frontier = Vec::new();
        absorb(grid, start, &mut in_maze, &mut in_frontier, &mut frontier);
        l.add_value("frontierSize", frontier.len());

        while !frontier.is_empty() {
            let cell = frontier.swap_remove(rng.gen_range(0..frontier.len()));
            l.operation_cells(Operation::SelectPop, &[cell], Some(frontier.len().into()));
            let carved: Vec<usize> = grid
                .neighbors(cell)
                .into_iter()
                .filter(|&n| in_maze[n])
                .collect();
            let target = carved[rng.gen_range(0..carved.len())];
            maze.connect(target, cell);
            l.operation_cells(Operation::ConnectCells, &[target, cell], None);
            absorb(grid, cell, &mut in_maze, &mut in_frontier, &mut frontier);
            l.add_value("frontierSize", frontier.len());
        }
    })
}

/// Mark `cell` as carved and put its uncarved neighbours on the frontier
fn absorb(grid: Grid, cell: usize, in_maze: &mut [bool], in_frontier: &mut [bool], frontier: &mut Vec<usize>) {
    in_maze[cell] = true;
    for n in grid.neighbors(cell) {
        if !in_maze[n] && !in_frontier[n] {
            in_frontier[n] = true;
            frontier.push(n);
        }
    }
}
