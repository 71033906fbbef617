//! Day 17: Clumsy Crucible

use crate::utils::grid::{Direction, Grid, Point};
use crate::utils::parse::invalid;
use anyhow::Context;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["2023", "grid", "dijkstra"])]
pub struct Solver;

/// How far a crucible may travel in a straight line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crucible {
    /// Blocks it must move before turning or stopping.
    pub min_run: u8,
    /// Blocks after which it must turn.
    pub max_run: u8,
}

pub const CRUCIBLE: Crucible = Crucible {
    min_run: 1,
    max_run: 3,
};

pub const ULTRA_CRUCIBLE: Crucible = Crucible {
    min_run: 4,
    max_run: 10,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct State {
    pos: Point,
    dir: Direction,
    run: u8,
}

/// Least heat lost moving from the top-left to the bottom-right block.
pub fn least_heat_loss(grid: &Grid<u8>, crucible: Crucible) -> Option<u32> {
    let runs = usize::from(crucible.max_run) + 1;
    let slot = |s: &State| grid.index_of(s.pos).map(|i| (i * 4 + s.dir.index()) * runs + usize::from(s.run));
    let mut best = vec![u32::MAX; grid.width() * grid.height() * 4 * runs];
    let target = Point::new(grid.height() as i64 - 1, grid.width() as i64 - 1);
    if target == Point::new(0, 0) {
        return Some(0);
    }

    let mut heap = BinaryHeap::new();
    for dir in [Direction::Right, Direction::Down] {
        heap.push(Reverse((
            0u32,
            State {
                pos: Point::new(0, 0),
                dir,
                run: 0,
            },
        )));
    }

    while let Some(Reverse((heat, state))) = heap.pop() {
        if state.pos == target && state.run >= crucible.min_run {
            return Some(heat);
        }
        let Some(idx) = slot(&state) else { continue };
        if heat > best[idx] {
            continue;
        }

        let mut moves = Vec::with_capacity(3);
        if state.run < crucible.max_run {
            moves.push((state.dir, state.run + 1));
        }
        if state.run >= crucible.min_run {
            moves.push((state.dir.turn_left(), 1));
            moves.push((state.dir.turn_right(), 1));
        }

        for (dir, run) in moves {
            let pos = state.pos.step(dir);
            let Some(&cost) = grid.get(pos) else { continue };
            let next = State { pos, dir, run };
            let next_heat = heat + u32::from(cost);
            if let Some(next_idx) = slot(&next) {
                if next_heat < best[next_idx] {
                    best[next_idx] = next_heat;
                    heap.push(Reverse((next_heat, next)));
                }
            }
        }
    }
    None
}

fn solve_with(grid: &Grid<u8>, crucible: Crucible) -> Result<String, SolveError> {
    least_heat_loss(grid, crucible)
        .map(|heat| heat.to_string())
        .ok_or_else(|| SolveError::failed("the factory cannot be reached"))
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |_, c| {
            c.to_digit(10)
                .map(|d| d as u8)
                .with_context(|| format!("expected a digit, got {:?}", c))
        })
        .map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, CRUCIBLE)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, ULTRA_CRUCIBLE)
    }
}
