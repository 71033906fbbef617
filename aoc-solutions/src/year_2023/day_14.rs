//! Day 14: Parabolic Reflector Dish

use crate::utils::grid::{Direction, Grid, Point};
use crate::utils::parse::invalid;
use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["2023", "grid", "cycle"])]
pub struct Solver;

const SPIN_CYCLES: usize = 1_000_000_000;

/// Roll every round rock (`O`) as far as it goes towards `dir`.
pub fn tilt(grid: &mut Grid<u8>, dir: Direction) {
    let (width, height) = (grid.width() as i64, grid.height() as i64);
    let (lanes, lane_len) = if dir.is_vertical() {
        (width, height)
    } else {
        (height, width)
    };

    for lane in 0..lanes {
        // k-th cell of the lane, counted from the edge the rocks roll towards.
        let at = |k: i64| match dir {
            Direction::Up => Point::new(k, lane),
            Direction::Down => Point::new(height - 1 - k, lane),
            Direction::Left => Point::new(lane, k),
            Direction::Right => Point::new(lane, width - 1 - k),
        };
        let mut free = 0;
        for k in 0..lane_len {
            match grid[at(k)] {
                b'#' => free = k + 1,
                b'O' => {
                    grid[at(k)] = b'.';
                    grid[at(free)] = b'O';
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

/// One spin cycle: north, west, south, east.
pub fn spin(grid: &mut Grid<u8>) {
    for dir in [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ] {
        tilt(grid, dir);
    }
}

pub fn north_load(grid: &Grid<u8>) -> usize {
    grid.rows()
        .enumerate()
        .map(|(row, cells)| (grid.height() - row) * cells.iter().filter(|&&c| c == b'O').count())
        .sum()
}

/// Load after `cycles` spin cycles, skipping ahead once the states repeat.
pub fn load_after_spins(grid: &Grid<u8>, cycles: usize) -> usize {
    let mut grid = grid.clone();
    let mut seen: HashMap<Grid<u8>, usize> = HashMap::new();
    let mut loads = Vec::new();

    for done in 0..cycles {
        if let Some(&first) = seen.get(&grid) {
            let period = done - first;
            debug!(first, period, "spin cycle repeats");
            return loads[first + (cycles - first) % period];
        }
        seen.insert(grid.clone(), done);
        loads.push(north_load(&grid));
        spin(&mut grid);
    }
    north_load(&grid)
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |_, c| match c {
            'O' | '#' | '.' => Ok(c as u8),
            other => bail!("unexpected {:?}", other),
        })
        .map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        tilt(&mut grid, Direction::Up);
        Ok(north_load(&grid).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(load_after_spins(shared, SPIN_CYCLES).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....";

    const AFTER_ONE_CYCLE: &str = ".....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "136");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "64");
    }

    #[test]
    fn test_single_spin() {
        let mut grid = Solver::parse(EXAMPLE).unwrap();
        spin(&mut grid);
        assert_eq!(grid, Solver::parse(AFTER_ONE_CYCLE).unwrap());
    }

    #[test]
    fn test_few_cycles_without_repeat() {
        let grid = Solver::parse(EXAMPLE).unwrap();
        let mut manual = grid.clone();
        spin(&mut manual);
        spin(&mut manual);
        assert_eq!(load_after_spins(&grid, 2), north_load(&manual));
    }
}
