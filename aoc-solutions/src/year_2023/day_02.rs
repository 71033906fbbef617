//! Day 2: Cube Conundrum

use crate::utils::parse::{parse_lines, split_once};
use anyhow::{Context, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["2023", "strings"])]
pub struct Solver;

/// Cube counts per colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cubes {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl Cubes {
    fn max(self, other: Cubes) -> Cubes {
        Cubes {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_within(self, bag: Cubes) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn power(self) -> u32 {
        self.red * self.green * self.blue
    }
}

#[derive(Debug)]
pub struct Game {
    pub id: u32,
    /// Largest count of each colour seen in any reveal.
    pub fewest: Cubes,
}

const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

fn parse_reveal(reveal: &str) -> anyhow::Result<Cubes> {
    let mut cubes = Cubes::default();
    for entry in reveal.split(',') {
        let (count, colour) = split_once(entry.trim(), " ")?;
        let count: u32 = count.parse().context("invalid cube count")?;
        match colour {
            "red" => cubes.red += count,
            "green" => cubes.green += count,
            "blue" => cubes.blue += count,
            other => bail!("unknown colour {:?}", other),
        }
    }
    Ok(cubes)
}

fn parse_game(line: &str) -> anyhow::Result<Game> {
    let (header, reveals) = split_once(line, ": ")?;
    let id = header
        .strip_prefix("Game ")
        .context("missing \"Game\" prefix")?
        .parse()
        .context("invalid game id")?;
    let fewest = reveals
        .split(';')
        .map(parse_reveal)
        .try_fold(Cubes::default(), |acc, cubes| cubes.map(|c| acc.max(c)))?;
    Ok(Game { id, fewest })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_game)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared
            .iter()
            .filter(|game| game.fewest.fits_within(BAG))
            .map(|game| game.id)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared.iter().map(|game| game.fewest.power()).sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "8");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "2286");
    }

    #[test]
    fn test_fewest_cubes() {
        let game = parse_game("Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green").unwrap();
        assert_eq!(
            game.fewest,
            Cubes {
                red: 20,
                green: 13,
                blue: 6
            }
        );
    }

    #[test]
    fn test_unknown_colour_rejected() {
        assert!(Solver::parse("Game 1: 3 purple").is_err());
    }
}
