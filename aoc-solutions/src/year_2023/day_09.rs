//! Day 9: Mirage Maintenance

use crate::utils::parse::{parse_lines, parse_numbers};
use anyhow::ensure;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["2023", "math"])]
pub struct Solver;

/// Next value of the sequence from its repeated differences.
pub fn extrapolate(history: &[i64]) -> i64 {
    if history.iter().all(|&v| v == 0) {
        return 0;
    }
    let diffs: Vec<i64> = history.windows(2).map(|w| w[1] - w[0]).collect();
    history.last().copied().unwrap_or(0) + extrapolate(&diffs)
}

/// Value preceding the first one.
pub fn extrapolate_back(history: &[i64]) -> i64 {
    let reversed: Vec<i64> = history.iter().rev().copied().collect();
    extrapolate(&reversed)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, |line| {
            let history: Vec<i64> = parse_numbers(line)?;
            ensure!(!history.is_empty(), "empty history");
            Ok(history)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|h| extrapolate(h)).sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|h| extrapolate_back(h))
            .sum::<i64>()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "114");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "2");
    }

    #[test]
    fn test_single_value_and_negative() {
        assert_eq!(extrapolate(&[7]), 7);
        assert_eq!(extrapolate(&[5, 2, -1]), -4);
        assert_eq!(extrapolate_back(&[10, 13, 16, 21, 30, 45]), 5);
    }
}
