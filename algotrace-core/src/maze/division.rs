//! Recursive division

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::{trace_generator, Grid, Maze};
use crate::trace::{Operation, TraceLogger, TraceValue};
use crate::tracer::AlgorithmInfo;

pub const RECURSIVE_DIVISION: AlgorithmInfo = AlgorithmInfo::data_structure("RecursiveDivision", "Maze");

#[derive(Debug, Clone, Copy)]
struct Region {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

/// Split the grid with walls, leaving one gap per wall, until every region
/// is a single cell.
///
/// Emits `BuildWall` with the cells on the west (or north) side of the new
/// wall and its orientation, then `Connect` for the gap.
pub fn recursive_division(logger: &TraceLogger, grid: Grid, start: usize, rng: &mut ChaCha8Rng) -> Maze {
    let locals = [("nbRegions", TraceValue::from(1usize))];
    trace_generator(logger, RECURSIVE_DIVISION, grid, start, &locals, |l, maze| {
        let whole = Region {
            x: 0,
            y: 0,
            width: grid.width,
            height: grid.height,
        };
        let mut regions = 1;
        divide(l, maze, rng, whole, &mut regions);
    })
}

fn divide(l: &TraceLogger, maze: &mut Maze, rng: &mut ChaCha8Rng, region: Region, regions: &mut usize) {
    let Region { x, y, width, height } = region;
    if width * height < 2 {
        return;
    }
    let grid = maze.grid();
    let vertical = match width.cmp(&height) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => rng.gen_bool(0.5),
    };

    if vertical {
        let split = rng.gen_range(1..width);
        let side: Vec<usize> = (y..y + height).map(|row| grid.cell(x + split - 1, row)).collect();
        l.operation_cells(Operation::BuildWall, &side, Some("vertical".into()));
        *regions += 1;
        l.add_value("nbRegions", *regions);
        let row = rng.gen_range(y..y + height);
        let (a, b) = (grid.cell(x + split - 1, row), grid.cell(x + split, row));
        maze.connect(a, b);
        l.operation_cells(Operation::Connect, &[a, b], None);
        divide(l, maze, rng, Region { width: split, ..region }, regions);
        divide(l, maze, rng, Region { x: x + split, width: width - split, ..region }, regions);
    } else {
        let split = rng.gen_range(1..height);
        let side: Vec<usize> = (x..x + width).map(|col| grid.cell(col, y + split - 1)).collect();
        l.operation_cells(Operation::BuildWall, &side, Some("horizontal".into()));
        *regions += 1;
        l.add_value("nbRegions", *regions);
        let col = rng.gen_range(x..x + width);
        let (a, b) = (grid.cell(col, y + split - 1), grid.cell(col, y + split));
        maze.connect(a, b);
        l.operation_cells(Operation::Connect, &[a, b], None);
        divide(l, maze, rng, Region { height: split, ..region }, regions);
        divide(l, maze, rng, Region { y: y + split, height: height - split, ..region }, regions);
    }
}
