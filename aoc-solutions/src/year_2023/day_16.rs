//! Day 16: The Floor Will Be Lava

use crate::utils::grid::{Direction, Grid, Point};
use crate::utils::parse::invalid;
use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use rayon::prelude::*;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["2023", "grid", "parallel"])]
pub struct Solver;

/// Directions a beam continues in after entering `tile` heading `dir`.
fn deflect(tile: u8, dir: Direction) -> ([Direction; 2], usize) {
    use Direction::*;
    match (tile, dir) {
        (b'/', Right) => ([Up, Up], 1),
        (b'/', Up) => ([Right, Right], 1),
        (b'/', Left) => ([Down, Down], 1),
        (b'/', Down) => ([Left, Left], 1),
        (b'\\', Right) => ([Down, Down], 1),
        (b'\\', Down) => ([Right, Right], 1),
        (b'\\', Left) => ([Up, Up], 1),
        (b'\\', Up) => ([Left, Left], 1),
        (b'|', Left | Right) => ([Up, Down], 2),
        (b'-', Up | Down) => ([Left, Right], 2),
        _ => ([dir, dir], 1),
    }
}

/// Number of tiles a beam entering at `start` heading `dir` energizes.
pub fn energized(grid: &Grid<u8>, start: Point, dir: Direction) -> usize {
    // One bit per direction per tile.
    let mut seen = vec![0u8; grid.width() * grid.height()];
    let mut beams = vec![(start, dir)];

    while let Some((pos, dir)) = beams.pop() {
        let Some(idx) = grid.index_of(pos) else {
            continue;
        };
        let bit = 1 << dir.index();
        if seen[idx] & bit != 0 {
            continue;
        }
        seen[idx] |= bit;

        let (next, count) = deflect(grid[pos], dir);
        for &out in &next[..count] {
            beams.push((pos.step(out), out));
        }
    }

    seen.iter().filter(|&&bits| bits != 0).count()
}

/// Every beam entering from the edge of the grid.
fn edge_entries(grid: &Grid<u8>) -> Vec<(Point, Direction)> {
    let (w, h) = (grid.width() as i64, grid.height() as i64);
    let vertical = (0..w).flat_map(|col| {
        [
            (Point::new(0, col), Direction::Down),
            (Point::new(h - 1, col), Direction::Up),
        ]
    });
    let horizontal = (0..h).flat_map(|row| {
        [
            (Point::new(row, 0), Direction::Right),
            (Point::new(row, w - 1), Direction::Left),
        ]
    });
    vertical.chain(horizontal).collect()
}

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |_, c| match c {
            '.' | '/' | '\\' | '|' | '-' => Ok(c as u8),
            other => bail!("unexpected {:?}", other),
        })
        .map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energized(shared, Point::new(0, 0), Direction::Right).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let grid = &*shared;
        edge_entries(grid)
            .into_par_iter()
            .map(|(start, dir)| energized(grid, start, dir))
            .max()
            .map(|best| best.to_string())
            .ok_or_else(|| SolveError::failed("empty grid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "46");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "51");
    }

    #[test]
    fn test_best_entry_is_from_top() {
        let grid = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(energized(&grid, Point::new(0, 3), Direction::Down), 51);
    }

    #[test]
    fn test_beam_loops_terminate() {
        let grid = Solver::parse(r"/.\
...
\./").unwrap();
        assert_eq!(energized(&grid, Point::new(0, 1), Direction::Right), 8);
    }
}
