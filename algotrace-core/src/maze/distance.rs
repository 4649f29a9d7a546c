//! Distance map over a carved maze

use std::collections::VecDeque;

use super::Maze;
use crate::trace::{Operation, Returned, TraceLogger};
use crate::tracer::{AlgorithmInfo, Invocation};

pub const DISTANCE_MAP: AlgorithmInfo = AlgorithmInfo::algorithm("DistanceMap", "Maze");

/// Breadth-first distances from `start`, one `SetDistance` per reached cell.
///
/// Returns the distance of every cell; cells the passages do not reach stay
/// `None`.
pub fn distance_map(logger: &TraceLogger, maze: &Maze, start: usize) -> Vec<Option<usize>> {
    let grid = maze.grid();
    let inv = Invocation::open(logger, DISTANCE_MAP);
    inv.parameters(|l| {
        l.add_value("width", grid.width);
        l.add_value("height", grid.height);
        l.add_value("start", start);
    });
    inv.structure(|l| {
        l.add_entry("type", "grid");
        l.add_entry("width", grid.width);
        l.add_entry("height", grid.height);
    });

    let mut dist = vec![None; grid.len()];
    if grid.len() < 2 {
        if grid.contains(start) {
            dist[start] = Some(0);
        }
        inv.base_case("Grid has a single cell at distance 0", Returned::Value(0usize.into()));
        return dist;
    }

    inv.locals(|l| {
        l.add_value("current", start);
    });
    let farthest = inv.logs(|l| {
        let mut farthest = 0usize;
        if !grid.contains(start) {
            l.error_node("distance_map", &format!("start cell {start} is outside the grid"));
            l.return_value(Returned::Value(farthest.into()));
            return farthest;
        }
        dist[start] = Some(0);
        l.operation_cells(Operation::SetDistance, &[start], Some(0usize.into()));
        let mut queue = VecDeque::from([(start, 0usize)]);
        while let Some((cell, d)) = queue.pop_front() {
            l.add_value("current", cell);
            for &next in maze.links(cell) {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    farthest = farthest.max(d + 1);
                    l.operation_cells(Operation::SetDistance, &[next], Some((d + 1).into()));
                    queue.push_back((next, d + 1));
                }
            }
        }
        l.comment(&format!("Farthest cell is {farthest} step(s) away"));
        l.return_value(Returned::Value(farthest.into()));
        farthest
    });
    inv.stats(|l| {
        l.add_value("nbReached", dist.iter().filter(|d| d.is_some()).count());
        l.add_value("farthest", farthest);
    });
    inv.close();
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{dfs, Grid};
    use crate::trace::MemorySink;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_matches_maze_distances() {
        let sink = MemorySink::new();
        let logger = TraceLogger::compact(sink.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let maze = dfs(&logger, Grid::new(5, 5), 12, &mut rng);
        let dist = distance_map(&logger, &maze, 12);
        logger.finish().unwrap();

        assert_eq!(dist, maze.distances(12));
        let roots = sink.values().unwrap();
        assert_eq!(roots.len(), 2);
        let set = roots[1]["logs"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|n| n["name"] == "SetDistance")
            .count();
        assert_eq!(set, 25);
    }
}
