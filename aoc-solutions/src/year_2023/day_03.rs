//! Day 3: Gear Ratios

use crate::utils::grid::{Grid, Point};
use crate::utils::parse::invalid;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["2023", "grid"])]
pub struct Solver;

/// A number printed horizontally on the schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartNumber {
    pub value: u32,
    pub row: i64,
    pub first_col: i64,
    pub last_col: i64,
}

impl PartNumber {
    fn touches(&self, p: Point) -> bool {
        (self.row - 1..=self.row + 1).contains(&p.row)
            && (self.first_col - 1..=self.last_col + 1).contains(&p.col)
    }
}

#[derive(Debug)]
pub struct Schematic {
    pub numbers: Vec<PartNumber>,
    pub symbols: Vec<(Point, u8)>,
}

fn is_symbol(c: u8) -> bool {
    c != b'.' && !c.is_ascii_digit()
}

fn scan(grid: &Grid<u8>) -> Schematic {
    let mut numbers = Vec::new();
    let mut symbols = Vec::new();

    for (row, cells) in grid.rows().enumerate() {
        let row = row as i64;
        let mut current: Option<PartNumber> = None;
        for (col, &c) in cells.iter().enumerate() {
            let col = col as i64;
            if let Some(digit) = (c as char).to_digit(10) {
                let number = current.get_or_insert(PartNumber {
                    value: 0,
                    row,
                    first_col: col,
                    last_col: col,
                });
                number.value = number.value * 10 + digit;
                number.last_col = col;
                continue;
            }
            numbers.extend(current.take());
            if is_symbol(c) {
                symbols.push((Point::new(row, col), c));
            }
        }
        numbers.extend(current.take());
    }

    Schematic { numbers, symbols }
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let grid = Grid::parse(input, |_, c| Ok(c as u8)).map_err(invalid)?;
        Ok(scan(&grid))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared
            .numbers
            .iter()
            .filter(|n| shared.symbols.iter().any(|&(p, _)| n.touches(p)))
            .map(|n| n.value)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .symbols
            .iter()
            .filter(|&&(_, c)| c == b'*')
            .filter_map(|&(gear, _)| {
                let adjacent: Vec<u64> = shared
                    .numbers
                    .iter()
                    .filter(|n| n.touches(gear))
                    .map(|n| u64::from(n.value))
                    .collect();
                (adjacent.len() == 2).then(|| adjacent[0] * adjacent[1])
            })
            .sum();
        Ok(sum.to_string())
    }
}
