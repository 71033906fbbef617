//! Day 5: If You Give A Seed A Fertilizer

use crate::utils::parse::{invalid, parse_numbers, sections};
use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use rayon::prelude::*;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["2023", "ranges", "parallel"])]
pub struct Solver;

/// `len` values starting at `src` map to the same offsets from `dst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapRange {
    pub dst: i64,
    pub src: i64,
    pub len: i64,
}

/// One `X-to-Y map` section, ranges sorted by source start.
#[derive(Debug, Clone)]
pub struct Mapping {
    pub name: String,
    ranges: Vec<MapRange>,
}

impl Mapping {
    pub fn new(name: impl Into<String>, mut ranges: Vec<MapRange>) -> Self {
        ranges.sort_by_key(|r| r.src);
        Self {
            name: name.into(),
            ranges,
        }
    }

    pub fn apply(&self, value: i64) -> i64 {
        self.ranges
            .iter()
            .find(|r| (r.src..r.src + r.len).contains(&value))
            .map_or(value, |r| value - r.src + r.dst)
    }

    /// Map half-open intervals, splitting them at range boundaries.
    pub fn apply_intervals(&self, intervals: &[(i64, i64)]) -> Vec<(i64, i64)> {
        let mut mapped = Vec::with_capacity(intervals.len() * 2);
        for &(mut start, end) in intervals {
            for r in &self.ranges {
                if start >= end {
                    break;
                }
                let (range_start, range_end) = (r.src, r.src + r.len);
                if range_end <= start {
                    continue;
                }
                if range_start >= end {
                    break;
                }
                if start < range_start {
                    mapped.push((start, range_start));
                    start = range_start;
                }
                let stop = end.min(range_end);
                let shift = r.dst - r.src;
                mapped.push((start + shift, stop + shift));
                start = stop;
            }
            if start < end {
                mapped.push((start, end));
            }
        }
        mapped
    }
}

#[derive(Debug, Clone)]
pub struct Almanac {
    pub seeds: Vec<i64>,
    pub mappings: Vec<Mapping>,
}

impl Almanac {
    pub fn location(&self, seed: i64) -> i64 {
        self.mappings.iter().fold(seed, |value, m| m.apply(value))
    }

    /// Lowest location reachable from any seed in `start..start + len`.
    pub fn lowest_location_in(&self, start: i64, len: i64) -> Option<i64> {
        let intervals = self
            .mappings
            .iter()
            .fold(vec![(start, start + len)], |intervals, m| {
                m.apply_intervals(&intervals)
            });
        intervals.into_iter().map(|(lo, _)| lo).min()
    }
}

fn parse_mapping(section: &str) -> anyhow::Result<Mapping> {
    let mut lines = section.lines();
    let header = lines.next().context("empty map section")?;
    let name = header
        .strip_suffix(" map:")
        .with_context(|| format!("invalid map header {:?}", header))?;
    let ranges = lines
        .map(|line| -> anyhow::Result<MapRange> {
            let nums: Vec<i64> = parse_numbers(line)?;
            match nums[..] {
                [dst, src, len] if len >= 0 => Ok(MapRange { dst, src, len }),
                _ => Err(anyhow!("expected \"dst src len\", got {:?}", line)),
            }
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .with_context(|| format!("in {} map", name))?;
    Ok(Mapping::new(name, ranges))
}

fn parse_almanac(input: &str) -> anyhow::Result<Almanac> {
    let sections = sections(input);
    let (first, maps) = sections.split_first().context("empty almanac")?;
    let seeds = first
        .strip_prefix("seeds:")
        .context("missing \"seeds:\" line")?;
    let seeds = parse_numbers(seeds)?;
    let mappings = maps
        .iter()
        .map(|s| parse_mapping(s))
        .collect::<anyhow::Result<Vec<_>>>()?;
    ensure!(!mappings.is_empty(), "almanac has no maps");
    Ok(Almanac { seeds, mappings })
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_almanac(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .seeds
            .iter()
            .map(|&seed| shared.location(seed))
            .min()
            .map(|loc| loc.to_string())
            .ok_or_else(|| SolveError::failed("no seeds"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.seeds.len() % 2 != 0 {
            return Err(SolveError::failed("seed ranges need start/length pairs"));
        }
        let almanac = &*shared;
        debug!(ranges = almanac.seeds.len() / 2, "mapping seed ranges");
        almanac
            .seeds
            .par_chunks(2)
            .filter_map(|pair| almanac.lowest_location_in(pair[0], pair[1]))
            .min()
            .map(|loc| loc.to_string())
            .ok_or_else(|| SolveError::failed("no seed ranges"))
    }
}
