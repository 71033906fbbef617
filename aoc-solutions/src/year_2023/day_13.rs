//! Day 13: Point of Incidence

use crate::utils::grid::Grid;
use crate::utils::parse::{invalid, sections};
use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["2023", "grid"])]
pub struct Solver;

/// A pattern as bitmasks of its rows and of its columns (`#` = 1).
#[derive(Debug)]
pub struct Pattern {
    rows: Vec<u64>,
    cols: Vec<u64>,
}

fn masks(grid: &Grid<bool>) -> Vec<u64> {
    grid.rows()
        .map(|row| row.iter().fold(0, |mask, &rock| (mask << 1) | u64::from(rock)))
        .collect()
}

/// Lines before a mirror whose reflection differs in exactly `smudges` cells.
fn mirror_at(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&split| {
        let differing: u32 = lines[..split]
            .iter()
            .rev()
            .zip(&lines[split..])
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        differing == smudges
    })
}

impl Pattern {
    /// Columns left of a vertical mirror, or 100 × rows above a horizontal one.
    pub fn summary(&self, smudges: u32) -> Option<usize> {
        mirror_at(&self.cols, smudges).or_else(|| mirror_at(&self.rows, smudges).map(|r| 100 * r))
    }
}

fn parse_pattern(section: &str) -> anyhow::Result<Pattern> {
    let grid = Grid::parse(section, |_, c| match c {
        '#' => Ok(true),
        '.' => Ok(false),
        other => bail!("unexpected {:?}", other),
    })?;
    ensure!(grid.width() <= 64 && grid.height() <= 64, "pattern too large");
    Ok(Pattern {
        rows: masks(&grid),
        cols: masks(&grid.transpose()),
    })
}

fn total(patterns: &[Pattern], smudges: u32) -> Result<String, SolveError> {
    patterns
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            p.summary(smudges)
                .with_context(|| format!("pattern {} has no mirror", idx + 1))
                .map_err(SolveError::failed)
        })
        .sum::<Result<usize, _>>()
        .map(|sum| sum.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pattern>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        sections(input)
            .into_iter()
            .enumerate()
            .map(|(idx, s)| {
                parse_pattern(s)
                    .with_context(|| format!("pattern {}", idx + 1))
                    .map_err(invalid)
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, 0)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "#.##..##.
..#.##.#.
##......#
##......#
..#.##.#.
..##..###
#.####.#.

#...##..#
#....#..#
..##..###
#####.##.
#####.##.
..##..###
#....#..#";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "405");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "400");
    }

    #[test]
    fn test_individual_summaries() {
        let patterns = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(patterns[0].summary(0), Some(5));
        assert_eq!(patterns[1].summary(0), Some(400));
        assert_eq!(patterns[0].summary(1), Some(300));
        assert_eq!(patterns[1].summary(1), Some(100));
    }

    #[test]
    fn test_pattern_without_mirror_fails() {
        let mut patterns = Solver::parse("#.\n..").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut patterns).is_err());
    }
}
