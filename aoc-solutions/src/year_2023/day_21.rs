//! Day 21: Step Counter

use crate::utils::grid::{Grid, Point};
use crate::utils::parse::invalid;
use anyhow::{Context, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashSet;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["2023", "grid", "bfs", "math"])]
pub struct Solver;

pub const STEPS: u64 = 64;
pub const TILED_STEPS: u64 = 26_501_365;

#[derive(Debug, Clone)]
pub struct Garden {
    /// `true` for rocks.
    rocks: Grid<bool>,
    start: Point,
}

impl Garden {
    fn is_open(&self, p: Point, tiled: bool) -> bool {
        if tiled {
            !*self.rocks.get_wrapped(p)
        } else {
            self.rocks.get(p).is_some_and(|&rock| !rock)
        }
    }

    /// Number of plots first reached at each distance, up to `max_steps`.
    fn new_plots_per_step(&self, max_steps: u64, tiled: bool) -> Vec<u64> {
        let mut seen = HashSet::from([self.start]);
        let mut frontier = vec![self.start];
        let mut counts = vec![1];
        for _ in 0..max_steps {
            let mut next = Vec::new();
            for p in frontier {
                for q in p.neighbors4() {
                    if self.is_open(q, tiled) && seen.insert(q) {
                        next.push(q);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            counts.push(next.len() as u64);
            frontier = next;
        }
        counts
    }

    fn reachable(&self, steps: u64, tiled: bool) -> u64 {
        // A plot reached in d steps is reachable in exactly `steps` when the
        // parities match, by stepping back and forth.
        self.new_plots_per_step(steps, tiled)
            .iter()
            .enumerate()
            .filter(|&(d, _)| d as u64 % 2 == steps % 2)
            .map(|(_, n)| n)
            .sum()
    }
}

fn parse_garden(input: &str) -> anyhow::Result<Garden> {
    let mut start = None;
    let rocks = Grid::parse(input, |p, c| match c {
        '#' => Ok(true),
        '.' => Ok(false),
        'S' => {
            if start.replace(p).is_some() {
                bail!("more than one start");
            }
            Ok(false)
        }
        _ => bail!("unexpected tile {:?}", c),
    })?;
    let start = start.context("no start position")?;
    Ok(Garden { rocks, start })
}

/// Plots reachable in exactly `steps` steps within the map.
pub fn plots_reachable(garden: &Garden, steps: u64) -> u64 {
    garden.reachable(steps, false)
}

/// Plots reachable in exactly `steps` steps on the infinitely repeated map,
/// by direct search.
pub fn plots_reachable_infinite(garden: &Garden, steps: u64) -> u64 {
    garden.reachable(steps, true)
}

/// Value at `n` of the quadratic through `(0, f0)`, `(1, f1)`, `(2, f2)`.
pub fn extrapolate_quadratic([f0, f1, f2]: [i64; 3], n: i64) -> i64 {
    let first = f1 - f0;
    let second = f2 - 2 * f1 + f0;
    f0 + n * first + n * (n - 1) / 2 * second
}

/// Plots reachable in exactly `steps` steps on the infinitely repeated map.
///
/// On a square map the count grows quadratically in whole map widths, so
/// three samples a map width apart determine it.
pub fn plots_reachable_tiled(garden: &Garden, steps: u64) -> Result<u64, SolveError> {
    let size = garden.rocks.width() as u64;
    if garden.rocks.height() as u64 != size {
        return Err(SolveError::failed("tiled extrapolation needs a square map"));
    }
    let rem = steps % size;
    if steps < rem + 2 * size {
        return Ok(plots_reachable_infinite(garden, steps));
    }

    let samples = [0, 1, 2].map(|k| plots_reachable_infinite(garden, rem + k * size) as i64);
    debug!(?samples, rem, size, "sampled infinite search");
    let n = ((steps - rem) / size) as i64;
    Ok(extrapolate_quadratic(samples, n) as u64)
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_garden(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(plots_reachable(shared, STEPS).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(plots_reachable_tiled(shared, TILED_STEPS)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    fn garden() -> Garden {
        Solver::parse(EXAMPLE).unwrap()
    }

    #[test]
    fn test_bounded_example() {
        assert_eq!(plots_reachable(&garden(), 1), 2);
        assert_eq!(plots_reachable(&garden(), 2), 4);
        assert_eq!(plots_reachable(&garden(), 6), 16);
    }

    #[test]
    fn test_infinite_example() {
        let garden = garden();
        assert_eq!(plots_reachable_infinite(&garden, 6), 16);
        assert_eq!(plots_reachable_infinite(&garden, 10), 50);
        assert_eq!(plots_reachable_infinite(&garden, 50), 1594);
        assert_eq!(plots_reachable_infinite(&garden, 100), 6536);
    }

    #[test]
    fn test_extrapolate_quadratic() {
        let f = |n: i64| 3 * n * n + 2 * n + 1;
        let samples = [f(0), f(1), f(2)];
        for n in [0, 1, 2, 10, 202_300] {
            assert_eq!(extrapolate_quadratic(samples, n), f(n));
        }
    }

    #[test]
    fn test_open_map_matches_direct_search() {
        // Without rocks the reachable set is a diamond, which the
        // extrapolation reproduces exactly.
        let open = Solver::parse(".....\n.....\n..S..\n.....\n.....").unwrap();
        assert_eq!(
            plots_reachable_tiled(&open, 27).unwrap(),
            plots_reachable_infinite(&open, 27)
        );
        assert_eq!(plots_reachable_infinite(&open, 27), 28 * 28);
    }

    #[test]
    fn test_non_square_map_rejected() {
        let garden = Solver::parse("...\n.S.").unwrap();
        assert!(plots_reachable_tiled(&garden, 100).is_err());
    }

    #[test]
    fn test_start_required() {
        assert!(Solver::parse("...\n...").is_err());
        assert!(Solver::parse("S.S").is_err());
    }
}
