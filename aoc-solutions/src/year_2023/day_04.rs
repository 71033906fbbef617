//! Day 4: Scratchcards

use crate::utils::dp_cache::{DpCache, VecBackend};
use crate::utils::parse::{parse_lines, parse_numbers, split_once};
use anyhow::Context;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["2023", "dp"])]
pub struct Solver;

/// Winning numbers matched on one card.
fn parse_matches(line: &str) -> anyhow::Result<usize> {
    let (card, numbers) = split_once(line, ":")?;
    card.strip_prefix("Card")
        .context("missing \"Card\" prefix")?;
    let (winning, have) = split_once(numbers, "|")?;
    let winning: HashSet<u32> = parse_numbers::<u32>(winning)?.into_iter().collect();
    let have: Vec<u32> = parse_numbers(have)?;
    Ok(have.iter().filter(|n| winning.contains(n)).count())
}

/// Total cards held once every won copy has been scratched.
///
/// One copy of card `i` yields itself plus, recursively, everything its
/// `matches[i]` following cards yield.
pub fn total_cards(matches: &[usize]) -> u64 {
    let n = matches.len();
    let cache = DpCache::new(
        VecBackend::with_capacity(n),
        |&i: &usize| (i + 1..(i + 1 + matches[i]).min(n)).collect::<Vec<_>>(),
        |_: &usize, won: Vec<u64>| 1 + won.iter().sum::<u64>(),
    );
    (0..n).map(|i| cache.get(&i)).sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<usize>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_matches)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let points: u64 = shared
            .iter()
            .filter(|&&m| m > 0)
            .map(|&m| 1u64 << (m - 1))
            .sum();
        Ok(points.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_cards(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "13");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "30");
    }

    #[test]
    fn test_matches_per_card() {
        assert_eq!(Solver::parse(EXAMPLE).unwrap(), vec![4, 2, 2, 1, 0, 0]);
    }

    #[test]
    fn test_copies_never_run_past_last_card() {
        assert_eq!(total_cards(&[5, 5]), 3);
        assert_eq!(total_cards(&[]), 0);
    }
}
