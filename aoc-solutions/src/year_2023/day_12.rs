//! Day 12: Hot Springs

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
use crate::utils::parse::{parse_lines, parse_numbers, split_once};
use anyhow::bail;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use rayon::prelude::*;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["2023", "dp", "parallel"])]
pub struct Solver;

/// One row of the spring report: `.` operational, `#` damaged, `?` unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub springs: Vec<u8>,
    pub groups: Vec<usize>,
}

impl Record {
    /// Five copies of the springs joined by `?`, groups repeated five times.
    pub fn unfold(&self) -> Record {
        let springs = std::iter::repeat_n(self.springs.as_slice(), 5)
            .collect::<Vec<_>>()
            .join(&b'?');
        Record {
            springs,
            groups: self.groups.repeat(5),
        }
    }

    pub fn arrangements(&self) -> u64 {
        let cache = DpCache::with_problem(HashMapBackend::new(), Arrangements { record: self });
        cache.get(&(0, 0))
    }
}

/// Ways to place `groups[j..]` into `springs[i..]`, keyed by `(i, j)`.
struct Arrangements<'r> {
    record: &'r Record,
}

impl Arrangements<'_> {
    /// Whether a damaged run of `len` can start at `i`.
    fn fits(&self, i: usize, len: usize) -> bool {
        let springs = &self.record.springs;
        i + len <= springs.len()
            && springs[i..i + len].iter().all(|&c| c != b'.')
            && springs.get(i + len) != Some(&b'#')
    }
}

impl DpProblem<(usize, usize), u64> for Arrangements<'_> {
    fn deps(&self, &(i, j): &(usize, usize)) -> Vec<(usize, usize)> {
        let Record { springs, groups } = self.record;
        let n = springs.len();
        if i >= n {
            return vec![];
        }
        let mut deps = Vec::with_capacity(2);
        if springs[i] != b'#' {
            deps.push((i + 1, j));
        }
        if springs[i] != b'.' && j < groups.len() && self.fits(i, groups[j]) {
            deps.push(((i + groups[j] + 1).min(n), j + 1));
        }
        deps
    }

    fn compute(&self, &(i, j): &(usize, usize), deps: Vec<u64>) -> u64 {
        if i >= self.record.springs.len() {
            u64::from(j == self.record.groups.len())
        } else {
            deps.iter().sum()
        }
    }
}

fn parse_record(line: &str) -> anyhow::Result<Record> {
    let (springs, groups) = split_once(line, " ")?;
    if let Some(bad) = springs.chars().find(|c| !matches!(c, '.' | '#' | '?')) {
        bail!("unexpected spring {:?}", bad);
    }
    let groups: Vec<usize> = parse_numbers(groups)?;
    if groups.contains(&0) {
        bail!("damaged groups must be non-empty");
    }
    Ok(Record {
        springs: springs.as_bytes().to_vec(),
        groups,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_lines(input, parse_record)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.par_iter().map(Record::arrangements).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .par_iter()
            .map(|record| record.unfold().arrangements())
            .sum();
        Ok(total.to_string())
    }
}
