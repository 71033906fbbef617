//! Day 1: Trebuchet?!

use crate::utils::parse::parse_lines;
use anyhow::ensure;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "strings"])]
pub struct Solver;

const SPELLED: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

fn digit_at(line: &[u8], i: usize, spelled: bool) -> Option<u32> {
    match line[i] {
        b @ b'0'..=b'9' => Some(u32::from(b - b'0')),
        _ if spelled => SPELLED
            .iter()
            .position(|word| line[i..].starts_with(word.as_bytes()))
            .map(|idx| idx as u32 + 1),
        _ => None,
    }
}

/// First and last digit of `line` as a two-digit number.
///
/// With `spelled`, the words `one`..`nine` count as digits too; they may
/// overlap (`eightwo` is 8 then 2).
pub fn calibration_value(line: &str, spelled: bool) -> Option<u32> {
    let bytes = line.as_bytes();
    let first = (0..bytes.len()).find_map(|i| digit_at(bytes, i, spelled))?;
    let last = (0..bytes.len())
        .rev()
        .find_map(|i| digit_at(bytes, i, spelled))?;
    Some(first * 10 + last)
}

fn total(lines: &[&str], spelled: bool) -> Result<String, SolveError> {
    lines
        .iter()
        .map(|line| {
            calibration_value(line, spelled)
                .ok_or_else(|| SolveError::failed(format!("no digit in {:?}", line)))
        })
        .sum::<Result<u32, _>>()
        .map(|sum| sum.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let line = line.trim();
            ensure!(calibration_value(line, true).is_some(), "line has no digit");
            Ok(line)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(shared, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE_1: &str = "1abc2
pqr3stu8vwx
a1b2c3d4e5f
treb7uchet";

    const EXAMPLE_2: &str = "two1nine
eightwothree
abcone2threexyz
xtwone3four
4nineeightseven2
zoneight234
7pqrstsixteen";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE_1, 1), "142");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE_2, 2), "281");
    }

    #[test]
    fn test_overlapping_words() {
        assert_eq!(calibration_value("eightwo", true), Some(82));
        assert_eq!(calibration_value("eightwo", false), None);
    }

    #[test]
    fn test_zero_is_not_a_digit_word() {
        assert_eq!(calibration_value("zero5nine", true), Some(59));
        assert_eq!(calibration_value("zero", true), None);
    }

    #[test]
    fn test_line_without_digit_is_rejected() {
        let err = Solver::parse("1abc2\nxyz").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("(line 2)")));
    }

    #[test]
    fn test_part1_fails_on_spelled_only_line() {
        let mut shared = Solver::parse("eightwothree").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }
}
