//! Sidewinder

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{trace_generator, Grid, Maze};
use crate::trace::{Operation, TraceLogger, TraceValue};
use crate::tracer::AlgorithmInfo;

pub const SIDEWINDER: AlgorithmInfo = AlgorithmInfo::data_structure("Sidewinder", "Maze");

/// Row by row: extend the current run east at random, and when a run closes
/// carve north from one of its cells. The top row is a single corridor.
///
/// Emits `SelectCell` for every visited cell and `Connect` for each passage.
pub fn sidewinder(logger: &TraceLogger, grid: Grid, start: usize, rng: &mut ChaCha8Rng) -> Maze {
    let locals = [("runLength", TraceValue::from(0usize))];
    trace_generator(logger, SIDEWINDER, grid, start, &locals, |l, maze| {
        for y in 0..grid.height {
            let mut run: Vec<usize> = Vec::new();
            for x in 0..grid.width {
                let cell = grid.cell(x, y);
                run.push(cell);
                l.operation_cells(Operation::SelectCell, &[cell], Some(run.len().into()));
                l.add_value("runLength", run.len());

                let at_east = x + 1 == grid.width;
                let at_north = y == 0;
                let carve_east = !at_east && (at_north || rng.gen_bool(0.5));
                if carve_east {
                    maze.connect(cell, cell + 1);
                    l.operation_cells(Operation::Connect, &[cell, cell + 1], None);
                } else if !at_north {
                    let member = run[rng.gen_range(0..run.len())];
                    maze.connect(member, member - grid.width);
                    l.operation_cells(Operation::Connect, &[member, member - grid.width], None);
                    run.clear();
                    l.add_value("runLength", run.len());
                }
            }
        }
    })
}
