//! Randomized Kruskal

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use super::{trace_generator, Grid, Maze};
use crate::trace::{Operation, TraceLogger, TraceValue};
use crate::tracer::AlgorithmInfo;

pub const KRUSKAL: AlgorithmInfo = AlgorithmInfo::data_structure("Kruskal", "Maze");

/// Disjoint sets with path halving and union by size
struct Sets {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl Sets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// False if both were already in one set
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        true
    }
}

/// Walk every wall in random order and open it when it separates two sets.
///
/// Emits `SelectEdgePop` for every wall drawn and `ConnectEdge` for the ones
/// opened.
pub fn kruskal(logger: &TraceLogger, grid: Grid, start: usize, rng: &mut ChaCha8Rng) -> Maze {
    let locals = [("nbSets", TraceValue::from(grid.len()))];
    trace_generator(logger, KRUSKAL, grid, start, &locals, |l, maze| {
        let mut edges = Vec::new();
        for cell in 0..grid.len() {
            let (x, y) = grid.coords(cell);
            if x + 1 < grid.width {
                edges.push((cell, cell + 1));
            }
            if y + 1 < grid.height {
                edges.push((cell, cell + grid.width));
            }
        }
        edges.shuffle(rng);

        let mut sets = Sets::new(grid.len());
        let mut nb_sets = grid.len();
        while let Some((a, b)) = edges.pop() {
            l.operation_cells(Operation::SelectEdgePop, &[a, b], Some(edges.len().into()));
            if sets.union(a, b) {
                maze.connect(a, b);
                l.operation_cells(Operation::ConnectEdge, &[a, b], None);
                nb_sets -= 1;
                l.add_value("nbSets", nb_sets);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets() {
        let mut sets = Sets::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
    }
}
