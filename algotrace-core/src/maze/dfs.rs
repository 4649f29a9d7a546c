//! Recursive backtracker

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{trace_generator, Grid, Maze};
use crate::trace::{Operation, TraceLogger, TraceValue};
use crate::tracer::AlgorithmInfo;

pub const DFS: AlgorithmInfo = AlgorithmInfo::data_structure("DFS", "Maze");

/// Random depth-first walk with an explicit stack.
///
/// Emits `Push` when a cell is entered, `Connect` for the passage into it
/// and `Pop` when a cell has no unvisited neighbour left.
pub fn dfs(logger: &TraceLogger, grid: Grid, start: usize, rng: &mut ChaCha8Rng) -> Maze {
    let locals = [("stackSize", TraceValue::from(0usize))];
    trace_generator(logger, DFS, grid, start, &locals, |l, maze| {
        let mut visited = vec![false; grid.len()];
        let mut stack = vec![start];
        visited[start] = true;
        l.operation_cells(Operation::Push, &[start], None);
        l.add_value("stackSize", stack.len());

        while let Some(&cell) = stack.last() {
            let candidates: Vec<usize> = grid
                .neighbors(cell)
                .into_iter()
                .filter(|&n| !visited[n])
                .collect();
            if candidates.is_empty() {
                stack.pop();
                l.operation_cells(Operation::Pop, &[cell], None);
                l.add_value("stackSize", stack.len());
                continue;
            }
            let next = candidates[rng.gen_range(0..candidates.len())];
            maze.connect(cell, next);
            l.operation_cells(Operation::Connect, &[cell, next], None);
            visited[next] = true;
            stack.push(next);
            l.operation_cells(Operation::Push, &[next], Some(stack.len().into()));
            l.add_value("stackSize", stack.len());
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::MemorySink;
    use rand::SeedableRng;

    #[test]
    fn test_push_pop_balance() {
        let sink = MemorySink::new();
        let logger = TraceLogger::compact(sink.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let maze = dfs(&logger, Grid::new(4, 3), 5, &mut rng);
        logger.finish().unwrap();
        assert!(maze.is_spanning_tree(5));

        let root = sink.values().unwrap().remove(0);
        let count = |name: &str| {
            root["logs"]
                .as_array()
                .unwrap()
                .iter()
                .filter(|n| n["name"] == name)
                .count()
        };
        assert_eq!(count("Push"), 12);
        assert_eq!(count("Pop"), 12);
        assert_eq!(count("Connect"), 11);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let run = |seed| {
            let logger = TraceLogger::compact(MemorySink::new());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let maze = dfs(&logger, Grid::new(6, 6), 0, &mut rng);
            logger.finish().unwrap();
            maze
        };
        assert_eq!(run(11), run(11));
    }
}
