//! Day 10: Pipe Maze

use crate::utils::grid::{Direction, Grid, Point};
use crate::utils::math::{pick_interior, shoelace2};
use crate::utils::parse::invalid;
use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid", "geometry"])]
pub struct Solver;

/// Directions a pipe tile opens towards.
fn openings(tile: u8) -> &'static [Direction] {
    use Direction::*;
    match tile {
        b'|' => &[Up, Down],
        b'-' => &[Left, Right],
        b'L' => &[Up, Right],
        b'J' => &[Up, Left],
        b'7' => &[Down, Left],
        b'F' => &[Down, Right],
        _ => &[],
    }
}

/// The closed loop through `S`, as the sequence of tiles visited.
#[derive(Debug)]
pub struct PipeLoop {
    pub tiles: Vec<Point>,
}

impl PipeLoop {
    pub fn farthest(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn enclosed(&self) -> i64 {
        let vertices: Vec<(i64, i64)> = self.tiles.iter().map(|p| (p.row, p.col)).collect();
        pick_interior(shoelace2(&vertices), self.tiles.len() as i64)
    }
}

fn trace_loop(grid: &Grid<u8>) -> anyhow::Result<PipeLoop> {
    let start = grid.position(|&c| c == b'S').context("no S tile")?;

    // S connects to every neighbour that opens back towards it.
    let connected: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&dir| {
            grid.get(start.step(dir))
                .is_some_and(|&tile| openings(tile).contains(&dir.opposite()))
        })
        .collect();
    ensure!(
        connected.len() == 2,
        "S connects to {} pipes, expected 2",
        connected.len()
    );

    let mut tiles = vec![start];
    let mut heading = connected[0];
    let mut pos = start.step(heading);
    while pos != start {
        tiles.push(pos);
        let tile = grid[pos];
        heading = match openings(tile) {
            &[a, b] if a == heading.opposite() => b,
            &[a, b] if b == heading.opposite() => a,
            _ => bail!("loop breaks at {:?} ({:?})", pos, tile as char),
        };
        pos = pos.step(heading);
        ensure!(grid.contains(pos), "loop leaves the map at {:?}", pos);
    }
    Ok(PipeLoop { tiles })
}

impl AocParser for Solver {
    type SharedData<'a> = PipeLoop;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let grid = Grid::parse(input, |_, c| Ok(c as u8)).map_err(invalid)?;
        trace_loop(&grid).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.farthest().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.enclosed().to_string())
    }
}
