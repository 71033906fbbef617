//! Day 15: Lens Library

use crate::utils::parse::invalid;
use anyhow::{Context, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 15, tags = ["2023", "hashing"])]
pub struct Solver;

/// The HASH algorithm: `(h + byte) * 17 mod 256` for each byte.
pub fn hash(s: &str) -> usize {
    s.bytes()
        .fold(0, |h, b| (h + usize::from(b)) * 17 % 256)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Remove,
    Insert(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub raw: &'a str,
    pub label: &'a str,
    pub op: Operation,
}

fn parse_step(raw: &str) -> anyhow::Result<Step<'_>> {
    let (label, op) = if let Some(label) = raw.strip_suffix('-') {
        (label, Operation::Remove)
    } else {
        let (label, focal) = raw
            .split_once('=')
            .with_context(|| format!("step {:?} has no operation", raw))?;
        let focal: u8 = focal
            .parse()
            .with_context(|| format!("invalid focal length in {:?}", raw))?;
        ensure!((1..=9).contains(&focal), "focal length {} out of range", focal);
        (label, Operation::Insert(focal))
    };
    ensure!(!label.is_empty(), "step {:?} has no label", raw);
    Ok(Step { raw, label, op })
}

/// Run the HASHMAP procedure and return the total focusing power.
pub fn focusing_power(steps: &[Step<'_>]) -> usize {
    let mut boxes: Vec<Vec<(&str, u8)>> = vec![Vec::new(); 256];
    for step in steps {
        let lenses = &mut boxes[hash(step.label)];
        let slot = lenses.iter().position(|&(label, _)| label == step.label);
        match (step.op, slot) {
            (Operation::Remove, Some(idx)) => {
                lenses.remove(idx);
            }
            (Operation::Remove, None) => {}
            (Operation::Insert(focal), Some(idx)) => lenses[idx].1 = focal,
            (Operation::Insert(focal), None) => lenses.push((step.label, focal)),
        }
    }

    boxes
        .iter()
        .enumerate()
        .flat_map(|(b, lenses)| {
            lenses
                .iter()
                .enumerate()
                .map(move |(slot, &(_, focal))| (b + 1) * (slot + 1) * usize::from(focal))
        })
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Step<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .trim()
            .split(',')
            .map(|raw| parse_step(raw.trim()))
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|s| hash(s.raw)).sum::<usize>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(focusing_power(shared).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7";

    #[test]
    fn test_hash() {
        assert_eq!(hash("HASH"), 52);
        assert_eq!(hash("rn"), 0);
        assert_eq!(hash("qp"), 1);
    }

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "1320");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "145");
    }

    #[test]
    fn test_invalid_steps_rejected() {
        assert!(Solver::parse("rn=0").is_err());
        assert!(Solver::parse("rn").is_err());
        assert!(Solver::parse("=3").is_err());
    }
}
