//! Day 6: Wait For It

use crate::utils::parse::{invalid, parse_numbers};
use anyhow::{Context, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    pub time: u64,
    pub record: u64,
}

/// Number of integer hold times `h` in `0..=time` with `h * (time - h) > record`.
///
/// Starts from the smaller root of `h² - time·h + record = 0` and fixes any
/// floating-point error with exact integer checks. The count is symmetric
/// around `time / 2`.
pub fn ways_to_win(race: Race) -> u64 {
    // Products of two u64 values always fit in u128.
    let (time, record) = (u128::from(race.time), u128::from(race.record));
    let beats = |hold: u128| hold * (time - hold) > record;

    let mid = time / 2;
    if !beats(mid) {
        return 0;
    }

    let discriminant = (time * time - 4 * record) as f64;
    let mut lo = (((time as f64) - discriminant.sqrt()) / 2.0).floor().max(0.0) as u128;
    lo = lo.min(mid);
    while !beats(lo) {
        lo += 1;
    }
    while lo > 0 && beats(lo - 1) {
        lo -= 1;
    }
    let hi = time - lo;
    u64::try_from(hi - lo + 1).unwrap_or(u64::MAX)
}

fn concat_digits(values: impl Iterator<Item = u64>) -> anyhow::Result<u64> {
    values
        .map(|v| v.to_string())
        .collect::<String>()
        .parse()
        .context("concatenated number overflows")
}

fn parse_races(input: &str) -> anyhow::Result<Vec<Race>> {
    let mut lines = input.trim().lines();
    let times = lines
        .next()
        .and_then(|l| l.strip_prefix("Time:"))
        .context("missing \"Time:\" line")?;
    let records = lines
        .next()
        .and_then(|l| l.strip_prefix("Distance:"))
        .context("missing \"Distance:\" line")?;
    let times: Vec<u64> = parse_numbers(times)?;
    let records: Vec<u64> = parse_numbers(records)?;
    ensure!(
        times.len() == records.len(),
        "{} times but {} distances",
        times.len(),
        records.len()
    );
    Ok(times
        .into_iter()
        .zip(records)
        .map(|(time, record)| Race { time, record })
        .collect())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Race>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_races(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: u64 = shared.iter().map(|&race| ways_to_win(race)).product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let race = Race {
            time: concat_digits(shared.iter().map(|r| r.time)).map_err(SolveError::failed)?,
            record: concat_digits(shared.iter().map(|r| r.record)).map_err(SolveError::failed)?,
        };
        Ok(ways_to_win(race).to_string())
    }
}
