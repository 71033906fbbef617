//! Day 22: Sand Slabs

use crate::utils::parse::{invalid, parse_numbers, split_once, try_parse_lines};
use anyhow::ensure;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::VecDeque;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 22, tags = ["2023", "simulation", "graph"])]
pub struct Solver;

/// Axis-aligned brick, inclusive on both corners with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brick {
    pub lo: [u32; 3],
    pub hi: [u32; 3],
}

impl Brick {
    fn footprint(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let [x0, y0, _] = self.lo;
        let [x1, y1, _] = self.hi;
        (x0..=x1).flat_map(move |x| (y0..=y1).map(move |y| (x as usize, y as usize)))
    }

    fn height(&self) -> u32 {
        self.hi[2] - self.lo[2] + 1
    }
}

/// Who rests on whom once every brick has fallen.
#[derive(Debug, Clone, Default)]
pub struct Settled {
    /// Bricks resting directly on each brick.
    pub supports: Vec<Vec<usize>>,
    /// Bricks each brick rests directly on.
    pub supported_by: Vec<Vec<usize>>,
}

/// Let every brick fall, lowest first, until it lands on the ground or on
/// another brick.
pub fn settle(bricks: &[Brick]) -> Settled {
    let mut order: Vec<usize> = (0..bricks.len()).collect();
    order.sort_by_key(|&i| bricks[i].lo[2]);

    let width = bricks.iter().map(|b| b.hi[0] as usize + 1).max().unwrap_or(0);
    let depth = bricks.iter().map(|b| b.hi[1] as usize + 1).max().unwrap_or(0);
    // Top surface per column: (height, brick on top).
    let mut top: Vec<(u32, Option<usize>)> = vec![(0, None); width * depth];

    let mut settled = Settled {
        supports: vec![Vec::new(); bricks.len()],
        supported_by: vec![Vec::new(); bricks.len()],
    };
    for id in order {
        let brick = &bricks[id];
        let rest = brick
            .footprint()
            .map(|(x, y)| top[y * width + x].0)
            .max()
            .unwrap_or(0);
        let mut below: Vec<usize> = brick
            .footprint()
            .filter_map(|(x, y)| match top[y * width + x] {
                (h, Some(other)) if h == rest => Some(other),
                _ => None,
            })
            .collect();
        below.sort_unstable();
        below.dedup();
        for &other in &below {
            settled.supports[other].push(id);
        }
        settled.supported_by[id] = below;

        let new_top = rest + brick.height();
        for (x, y) in brick.footprint() {
            top[y * width + x] = (new_top, Some(id));
        }
    }
    settled
}

impl Settled {
    /// Bricks whose removal leaves every other brick in place.
    pub fn safe_to_disintegrate(&self) -> usize {
        (0..self.supports.len())
            .filter(|&i| {
                self.supports[i]
                    .iter()
                    .all(|&above| self.supported_by[above].len() > 1)
            })
            .count()
    }

    /// Number of other bricks that fall when `removed` is disintegrated.
    pub fn chain_reaction(&self, removed: usize) -> usize {
        let mut remaining: Vec<usize> = self.supported_by.iter().map(Vec::len).collect();
        let mut queue = VecDeque::from([removed]);
        let mut fallen = 0;
        while let Some(brick) = queue.pop_front() {
            for &above in &self.supports[brick] {
                remaining[above] -= 1;
                if remaining[above] == 0 {
                    fallen += 1;
                    queue.push_back(above);
                }
            }
        }
        fallen
    }
}

/// Bricks as listed in the snapshot; settled lazily on first use.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub bricks: Vec<Brick>,
    settled: Option<Settled>,
}

impl Snapshot {
    pub fn settled(&mut self) -> &Settled {
        let bricks = &self.bricks;
        self.settled.get_or_insert_with(|| settle(bricks))
    }
}

fn parse_corner(s: &str) -> anyhow::Result<[u32; 3]> {
    let coords: Vec<u32> = parse_numbers(s)?;
    <[u32; 3]>::try_from(coords).map_err(|c| anyhow::anyhow!("expected 3 coordinates, got {}", c.len()))
}

fn parse_brick(line: &str) -> anyhow::Result<Brick> {
    let (a, b) = split_once(line, "~")?;
    let (a, b) = (parse_corner(a)?, parse_corner(b)?);
    let lo = [0, 1, 2].map(|i| a[i].min(b[i]));
    let hi = [0, 1, 2].map(|i| a[i].max(b[i]));
    ensure!(lo[2] >= 1, "brick below ground");
    Ok(Brick { lo, hi })
}

impl AocParser for Solver {
    type SharedData<'a> = Snapshot;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let bricks = try_parse_lines(input, parse_brick).map_err(invalid)?;
        Ok(Snapshot {
            bricks,
            settled: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.settled().safe_to_disintegrate().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let settled = shared.settled();
        let total: usize = (0..settled.supports.len())
            .map(|i| settled.chain_reaction(i))
            .sum();
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9";

    #[test]
    fn test_part1_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "5");
    }

    #[test]
    fn test_part2_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "7");
    }

    #[test]
    fn test_settled_supports() {
        let mut snapshot = Solver::parse(EXAMPLE).unwrap();
        let settled = snapshot.settled().clone();
        // A holds up B and C, which both hold up D and E.
        assert_eq!(settled.supports[0], vec![1, 2]);
        assert_eq!(settled.supported_by[3], vec![1, 2]);
        assert_eq!(settled.supported_by[0], Vec::<usize>::new());
        assert_eq!(settled.chain_reaction(0), 6);
        assert_eq!(settled.chain_reaction(5), 1);
        assert_eq!(settled.chain_reaction(6), 0);
    }

    #[test]
    fn test_reversed_corners_normalised() {
        let snapshot = Solver::parse("1,2,5~1,0,3").unwrap();
        assert_eq!(
            snapshot.bricks[0],
            Brick {
                lo: [1, 0, 3],
                hi: [1, 2, 5]
            }
        );
    }

    #[test]
    fn test_malformed_brick_rejected() {
        assert!(Solver::parse("1,0,1~1,2").is_err());
        assert!(Solver::parse("1,0,0~1,2,0").is_err());
    }
}
