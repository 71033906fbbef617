//! Day 11: Cosmic Expansion

use crate::utils::grid::{Grid, Point};
use crate::utils::parse::invalid;
use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["2023", "grid", "math"])]
pub struct Solver;

#[derive(Debug)]
pub struct Image {
    pub galaxies: Vec<Point>,
    empty_rows: Vec<bool>,
    empty_cols: Vec<bool>,
}

/// Sum of |a - b| over every pair, from sorted values.
fn pairwise_distance(mut values: Vec<i64>) -> i64 {
    values.sort_unstable();
    let n = values.len() as i64;
    values
        .iter()
        .zip(0i64..)
        .map(|(&v, i)| v * (2 * i - n + 1))
        .sum()
}

/// Coordinates after every empty line before them grows to `factor` lines.
fn expand(coords: impl Iterator<Item = i64>, empty: &[bool], factor: i64) -> Vec<i64> {
    let mut empties_before = Vec::with_capacity(empty.len());
    let mut count = 0;
    for &is_empty in empty {
        empties_before.push(count);
        count += i64::from(is_empty);
    }
    coords
        .map(|c| c + (factor - 1) * empties_before[c as usize])
        .collect()
}

/// Sum of shortest paths between all galaxy pairs with the given expansion.
pub fn sum_of_distances(image: &Image, factor: i64) -> i64 {
    let rows = expand(
        image.galaxies.iter().map(|g| g.row),
        &image.empty_rows,
        factor,
    );
    let cols = expand(
        image.galaxies.iter().map(|g| g.col),
        &image.empty_cols,
        factor,
    );
    pairwise_distance(rows) + pairwise_distance(cols)
}

fn parse_image(input: &str) -> anyhow::Result<Image> {
    let grid = Grid::parse(input, |_, c| match c {
        '#' => Ok(true),
        '.' => Ok(false),
        other => bail!("unexpected {:?}", other),
    })?;
    let galaxies: Vec<Point> = grid.iter().filter(|(_, g)| **g).map(|(p, _)| p).collect();
    let mut empty_rows = vec![true; grid.height()];
    let mut empty_cols = vec![true; grid.width()];
    for g in &galaxies {
        empty_rows[g.row as usize] = false;
        empty_cols[g.col as usize] = false;
    }
    Ok(Image {
        galaxies,
        empty_rows,
        empty_cols,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Image;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_image(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_of_distances(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_of_distances(shared, 1_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "374");
    }

    #[test]
    fn test_larger_factors() {
        let image = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(sum_of_distances(&image, 10), 1030);
        assert_eq!(sum_of_distances(&image, 100), 8410);
    }

    #[test]
    fn test_pairwise_distance() {
        assert_eq!(pairwise_distance(vec![3, 1, 7]), 2 + 6 + 4);
        assert_eq!(pairwise_distance(vec![]), 0);
    }
}
