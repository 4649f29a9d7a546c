//! Traced maze generators
//!
//! A maze is a spanning tree over a rectangular grid. Cells are numbered in
//! row-major order; two cells can be joined only if they share a side.
//!
//! Every generator writes a `DataStructure` invocation whose `structure`
//! block describes the grid, emits one connecting operation per passage it
//! carves and returns the number of passages. A generator run on a
//! `width x height` grid always carves exactly `width * height - 1` passages.

mod binary_tree;
mod dfs;
mod distance;
mod division;
mod kruskal;
mod prim;
mod sidewinder;

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub use binary_tree::{binary_tree, BINARY_TREE};
pub use dfs::{dfs, DFS};
pub use distance::{distance_map, DISTANCE_MAP};
pub use division::{recursive_division, RECURSIVE_DIVISION};
pub use kruskal::{kruskal, KRUSKAL};
pub use prim::{prim, PRIM};
pub use sidewinder::{sidewinder, SIDEWINDER};

use crate::error::TraceError;
use crate::trace::{Returned, TraceLogger, TraceValue};
use crate::tracer::{AlgorithmInfo, Invocation};

/// Rectangular grid of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: usize) -> bool {
        cell < self.len()
    }

    pub fn cell(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// `(x, y)` of a cell
    pub fn coords(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    /// Side-adjacent cells in north, south, west, east order
    pub fn neighbors(&self, cell: usize) -> Vec<usize> {
        let (x, y) = self.coords(cell);
        let mut out = Vec::with_capacity(4);
        if y > 0 {
            out.push(cell - self.width);
        }
        if y + 1 < self.height {
            out.push(cell + self.width);
        }
        if x > 0 {
            out.push(cell - 1);
        }
        if x + 1 < self.width {
            out.push(cell + 1);
        }
        out
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.contains(a) && self.neighbors(a).contains(&b)
    }
}

/// Passages carved into a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    links: Vec<Vec<usize>>,
    passages: Vec<(usize, usize)>,
}

impl Maze {
    /// A grid with every wall standing
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            links: vec![Vec::new(); grid.len()],
            passages: Vec::new(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Open the wall between two adjacent cells
    pub fn connect(&mut self, a: usize, b: usize) {
        debug_assert!(self.grid.are_adjacent(a, b), "cells {a} and {b} are not adjacent");
        if self.is_linked(a, b) {
            return;
        }
        self.links[a].push(b);
        self.links[b].push(a);
        self.passages.push((a, b));
    }

    pub fn is_linked(&self, a: usize, b: usize) -> bool {
        self.links.get(a).is_some_and(|l| l.contains(&b))
    }

    /// Cells reachable from `cell` through one passage
    pub fn links(&self, cell: usize) -> &[usize] {
        &self.links[cell]
    }

    /// Passages in carving order
    pub fn passages(&self) -> &[(usize, usize)] {
        &self.passages
    }

    /// BFS distance of every cell from `start`; `None` for unreachable cells
    pub fn distances(&self, start: usize) -> Vec<Option<usize>> {
        let mut dist = vec![None; self.grid.len()];
        if !self.grid.contains(start) {
            return dist;
        }
        dist[start] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            let d = dist[cell].unwrap_or(0);
            for &next in &self.links[cell] {
                if dist[next].is_none() {
                    dist[next] = Some(d + 1);
                    queue.push_back(next);
                }
            }
        }
        dist
    }

    /// True if the passages form a tree spanning every cell
    pub fn is_spanning_tree(&self, start: usize) -> bool {
        self.passages.len() + 1 == self.grid.len()
            && self.distances(start).iter().all(Option::is_some)
    }
}

/// Every maze generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MazeGenerator {
    Dfs,
    Prim,
    Kruskal,
    RecursiveDivision,
    Sidewinder,
    BinaryTree,
}

impl MazeGenerator {
    pub const ALL: [MazeGenerator; 6] = [
        MazeGenerator::Dfs,
        MazeGenerator::Prim,
        MazeGenerator::Kruskal,
        MazeGenerator::RecursiveDivision,
        MazeGenerator::Sidewinder,
        MazeGenerator::BinaryTree,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MazeGenerator::Dfs => "dfs",
            MazeGenerator::Prim => "prim",
            MazeGenerator::Kruskal => "kruskal",
            MazeGenerator::RecursiveDivision => "recursive-division",
            MazeGenerator::Sidewinder => "sidewinder",
            MazeGenerator::BinaryTree => "binary-tree",
        }
    }

    pub fn info(&self) -> AlgorithmInfo {
        match self {
            MazeGenerator::Dfs => DFS,
            MazeGenerator::Prim => PRIM,
            MazeGenerator::Kruskal => KRUSKAL,
            MazeGenerator::RecursiveDivision => RECURSIVE_DIVISION,
            MazeGenerator::Sidewinder => SIDEWINDER,
            MazeGenerator::BinaryTree => BINARY_TREE,
        }
    }

    /// Carve a maze over `grid`, tracing into `logger`
    pub fn generate(&self, logger: &TraceLogger, grid: Grid, start: usize, rng: &mut ChaCha8Rng) -> Maze {
        match self {
            MazeGenerator::Dfs => dfs(logger, grid, start, rng),
            MazeGenerator::Prim => prim(logger, grid, start, rng),
            MazeGenerator::Kruskal => kruskal(logger, grid, start, rng),
            MazeGenerator::RecursiveDivision => recursive_division(logger, grid, start, rng),
            MazeGenerator::Sidewinder => sidewinder(logger, grid, start, rng),
            MazeGenerator::BinaryTree => binary_tree(logger, grid, start, rng),
        }
    }
}

impl fmt::Display for MazeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MazeGenerator {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| TraceError::InvalidParameter {
                fct: "maze".to_string(),
                message: format!("unknown maze generator '{s}'"),
            })
    }
}

/// Shared envelope of the generators.
///
/// Writes description, grid parameters and structure, handles the
/// single-cell base case, then runs `carve` inside `logs` with the given
/// locals and closes with a `Return` of the passage count.
///
/// A `start` outside the grid writes an error node and returns an uncarved
/// maze.
pub(crate) fn trace_generator<F>(
    logger: &TraceLogger,
    info: AlgorithmInfo,
    grid: Grid,
    start: usize,
    locals: &[(&str, TraceValue)],
    carve: F,
) -> Maze
where
    F: FnOnce(&TraceLogger, &mut Maze),
{
    let inv = Invocation::open(logger, info);
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

    let mut maze = Maze::new(grid);
    if !grid.contains(start) {
        inv.logs(|l| {
            l.error_node(info.name, &format!("start cell {start} is outside the grid"));
            l.return_value(Returned::Value(TraceValue::from(0usize)));
        });
        inv.close();
        return maze;
    }
    if grid.len() < 2 {
        inv.base_case(
            "Grid has a single cell, nothing to carve",
            Returned::Value(TraceValue::from(0usize)),
        );
        return maze;
    }

    inv.locals(|l| {
        for (name, value) in locals {
            l.add_value(name, value.clone());
        }
    });
    inv.logs(|l| {
        carve(l, &mut maze);
        l.comment(&format!("Carved {} passages", maze.passages().len()));
        l.return_value(Returned::Value(maze.passages().len().into()));
    });
    inv.stats(|l| {
        l.add_value("nbCells", grid.len());
        l.add_value("nbPassages", maze.passages().len());
    });
    inv.close();
    maze
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::MemorySink;
    use rand::SeedableRng;

    #[test]
    fn test_grid_neighbors() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.neighbors(0), vec![3, 1]);
        assert_eq!(grid.neighbors(4), vec![1, 3, 5]);
        assert_eq!(grid.coords(5), (2, 1));
        assert!(grid.are_adjacent(2, 5));
        assert!(!grid.are_adjacent(2, 3));
    }

    #[test]
    fn test_maze_distances() {
        let mut maze = Maze::new(Grid::new(2, 2));
        maze.connect(0, 1);
        maze.connect(1, 3);
        assert!(!maze.is_spanning_tree(0));
        maze.connect(3, 2);
        maze.connect(3, 2);
        assert!(maze.is_spanning_tree(0));
        assert_eq!(maze.distances(0), vec![Some(0), Some(1), Some(3), Some(2)]);
    }

    #[test]
    fn test_every_generator_spans_the_grid() {
        for generator in MazeGenerator::ALL {
            for (width, height) in [(1, 5), (4, 1), (5, 4), (7, 7)] {
                let logger = TraceLogger::compact(MemorySink::new());
                let mut rng = ChaCha8Rng::seed_from_u64(7);
                let grid = Grid::new(width, height);
                let maze = generator.generate(&logger, grid, 0, &mut rng);
                logger.finish().unwrap();
                assert!(maze.is_spanning_tree(0), "{generator} on {width}x{height}");
            }
        }
    }

    #[test]
    fn test_single_cell_is_base_case() {
        let sink = MemorySink::new();
        let logger = TraceLogger::compact(sink.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let maze = MazeGenerator::Prim.generate(&logger, Grid::new(1, 1), 0, &mut rng);
        logger.finish().unwrap();
        assert!(maze.passages().is_empty());
        let root = sink.values().unwrap().remove(0);
        assert_eq!(root["type"], "DataStructure");
        assert_eq!(root["structure"]["type"], "grid");
        assert_eq!(root["logs"].as_array().unwrap().len(), 2);
        assert!(root.get("locals").is_none());
    }
}
