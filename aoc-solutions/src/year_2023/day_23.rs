//! Day 23: A Long Walk

use crate::utils::grid::{Direction, Grid, Point};
use crate::utils::parse::invalid;
use anyhow::{Context, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["2023", "grid", "graph", "dfs"])]
pub struct Solver;

#[derive(Debug, Clone)]
pub struct Trails {
    tiles: Grid<u8>,
    start: Point,
    end: Point,
}

fn slope(tile: u8) -> Option<Direction> {
    match tile {
        b'^' => Some(Direction::Up),
        b'>' => Some(Direction::Right),
        b'v' => Some(Direction::Down),
        b'<' => Some(Direction::Left),
        _ => None,
    }
}

impl Trails {
    fn is_open(&self, p: Point) -> bool {
        self.tiles.get(p).is_some_and(|&t| t != b'#')
    }

    /// Directions one may leave `p` in; slopes force their own direction.
    fn exits(&self, p: Point, slippery: bool) -> Vec<Direction> {
        let candidates = match slope(self.tiles[p]) {
            Some(dir) if slippery => vec![dir],
            _ => Direction::ALL.to_vec(),
        };
        candidates
            .into_iter()
            .filter(|&dir| self.is_open(p.step(dir)))
            .collect()
    }

    fn is_junction(&self, p: Point) -> bool {
        p == self.start
            || p == self.end
            || Direction::ALL.iter().filter(|&&d| self.is_open(p.step(d))).count() > 2
    }
}

/// The trail map compressed to the start, the end and every fork.
#[derive(Debug, Clone)]
pub struct JunctionGraph {
    /// Outgoing edges as (target, length).
    pub edges: Vec<Vec<(usize, u32)>>,
    pub start: usize,
    pub end: usize,
}

impl JunctionGraph {
    pub fn build(trails: &Trails, slippery: bool) -> Self {
        let junctions: Vec<Point> = trails
            .tiles
            .points()
            .filter(|&p| trails.is_open(p) && trails.is_junction(p))
            .collect();
        let id = |p: Point| junctions.iter().position(|&j| j == p);

        let edges = junctions
            .iter()
            .map(|&from| {
                trails
                    .exits(from, slippery)
                    .into_iter()
                    .filter_map(|dir| {
                        let (mut prev, mut cur, mut len) = (from, from.step(dir), 1);
                        loop {
                            if let Some(target) = id(cur) {
                                return Some((target, len));
                            }
                            let next = trails
                                .exits(cur, slippery)
                                .into_iter()
                                .map(|d| cur.step(d))
                                .find(|&n| n != prev)?;
                            (prev, cur, len) = (cur, next, len + 1);
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            edges,
            start: id(trails.start).unwrap_or(0),
            end: id(trails.end).unwrap_or(0),
        }
    }

    /// Longest path from start to end visiting no junction twice.
    pub fn longest_path(&self) -> Result<Option<u32>, SolveError> {
        if self.edges.len() > 64 {
            return Err(SolveError::failed(format!(
                "{} junctions do not fit a 64-bit visited set",
                self.edges.len()
            )));
        }
        // Once at the only junction leading to the end, any detour would cut
        // the end off, so go straight there.
        let into_end: Vec<usize> = (0..self.edges.len())
            .filter(|&j| self.edges[j].iter().any(|&(t, _)| t == self.end))
            .collect();
        let last = match into_end[..] {
            [only] => Some(only),
            _ => None,
        };
        debug!(junctions = self.edges.len(), ?last, "searching junction graph");
        Ok(self.search(self.start, 1 << self.start, last))
    }

    fn search(&self, node: usize, visited: u64, last: Option<usize>) -> Option<u32> {
        if node == self.end {
            return Some(0);
        }
        if Some(node) == last {
            return self.edges[node]
                .iter()
                .find(|&&(t, _)| t == self.end)
                .map(|&(_, len)| len);
        }
        self.edges[node]
            .iter()
            .filter(|&&(next, _)| visited & (1 << next) == 0)
            .filter_map(|&(next, len)| {
                self.search(next, visited | (1 << next), last)
                    .map(|rest| rest + len)
            })
            .max()
    }
}

fn parse_trails(input: &str) -> anyhow::Result<Trails> {
    let tiles = Grid::parse(input, |_, c| match c {
        '#' | '.' | '^' | '>' | 'v' | '<' => Ok(c as u8),
        _ => bail!("unexpected tile {:?}", c),
    })?;
    let bottom = tiles.height() - 1;
    let gap = |row: usize| tiles.row(row).iter().position(|&t| t == b'.');
    let start = gap(0).context("no opening in the top row")?;
    let end = gap(bottom).context("no opening in the bottom row")?;
    Ok(Trails {
        start: Point::new(0, start as i64),
        end: Point::new(bottom as i64, end as i64),
        tiles,
    })
}

fn solve_walk(trails: &Trails, slippery: bool) -> Result<String, SolveError> {
    JunctionGraph::build(trails, slippery)
        .longest_path()?
        .map(|len| len.to_string())
        .ok_or_else(|| SolveError::failed("no path to the end"))
}

impl AocParser for Solver {
    type SharedData<'a> = Trails;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_trails(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_walk(shared, true)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_walk(shared, false)
    }
}
