//! Day 18: Lavaduct Lagoon

use crate::utils::grid::{Direction, Point};
use crate::utils::math::{pick_interior, shoelace2};
use crate::utils::parse::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["2023", "geometry"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dig {
    pub dir: Direction,
    pub meters: i64,
}

/// A plan line read both ways: as written, and decoded from its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLine {
    pub plain: Dig,
    pub colour: Dig,
}

fn parse_line(line: &str) -> anyhow::Result<PlanLine> {
    let mut parts = line.split_whitespace();
    let (Some(dir), Some(meters), Some(colour), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        bail!("expected \"DIR METERS (#RRGGBB)\"");
    };
    let dir = match dir {
        "U" => Direction::Up,
        "D" => Direction::Down,
        "L" => Direction::Left,
        "R" => Direction::Right,
        other => bail!("unknown direction {:?}", other),
    };
    let meters = meters.parse().context("invalid distance")?;

    let hex = colour
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|c| c.len() == 6)
        .with_context(|| format!("invalid colour {:?}", colour))?;
    let encoded = i64::from_str_radix(hex, 16).context("invalid hex colour")?;
    let colour_dir = match encoded & 0xf {
        0 => Direction::Right,
        1 => Direction::Down,
        2 => Direction::Left,
        3 => Direction::Up,
        other => return Err(anyhow!("colour direction digit {} out of range", other)),
    };

    Ok(PlanLine {
        plain: Dig { dir, meters },
        colour: Dig {
            dir: colour_dir,
            meters: encoded >> 4,
        },
    })
}

/// Cubic meters held by the lagoon outlined by `digs`, trench included.
pub fn lagoon_volume(digs: impl Iterator<Item = Dig>) -> i64 {
    let mut pos = Point::default();
    let mut vertices = Vec::new();
    let mut boundary = 0;
    for dig in digs {
        pos = pos.offset(dig.dir, dig.meters);
        vertices.push((pos.row, pos.col));
        boundary += dig.meters;
    }
    pick_interior(shoelace2(&vertices), boundary) + boundary
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<PlanLine>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_line)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(shared.iter().map(|l| l.plain)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_volume(shared.iter().map(|l| l.colour)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "R 6 (#70c710)
D 5 (#0dc571)
L 2 (#5713f0)
D 2 (#d2c112)
R 2 (#59c680)
D 2 (#411b91)
L 5 (#8ceff2)
U 2 (#caa173)
L 1 (#1b58a2)
U 2 (#caa171)
R 2 (#7807d2)
U 3 (#a77fa3)
L 2 (#015232)
U 2 (#7a21e3)";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "62");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "952408144115");
    }

    #[test]
    fn test_colour_decoding() {
        let line = parse_line("R 6 (#70c710)").unwrap();
        assert_eq!(
            line.colour,
            Dig {
                dir: Direction::Right,
                meters: 461937
            }
        );
        assert!(parse_line("R 6 (#70c714)").is_err());
        assert!(parse_line("X 6 (#70c710)").is_err());
    }
}
