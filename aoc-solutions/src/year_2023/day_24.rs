//! Day 24: Never Tell Me The Odds

use crate::utils::parse::{invalid, parse_numbers, split_once, try_parse_lines};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use itertools::Itertools;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["2023", "math", "geometry"])]
pub struct Solver;

/// Inclusive X/Y bounds of the test area.
pub const TEST_AREA: (i64, i64) = (200_000_000_000_000, 400_000_000_000_000);

type Vec3 = [i128; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pub pos: [i64; 3],
    pub vel: [i64; 3],
}

impl Hailstone {
    fn pos(&self) -> Vec3 {
        self.pos.map(i128::from)
    }

    fn vel(&self) -> Vec3 {
        self.vel.map(i128::from)
    }
}

/// Whether the future XY paths of `a` and `b` cross inside `[lo, hi]`.
pub fn paths_cross_within(a: &Hailstone, b: &Hailstone, (lo, hi): (i64, i64)) -> bool {
    let [ax, ay, _] = a.pos();
    let [avx, avy, _] = a.vel();
    let [bx, by, _] = b.pos();
    let [bvx, bvy, _] = b.vel();

    let mut det = avx * bvy - avy * bvx;
    if det == 0 {
        return false;
    }
    let (dx, dy) = (bx - ax, by - ay);
    // Times along each path, scaled by `det`.
    let mut t = dx * bvy - dy * bvx;
    let mut s = dx * avy - dy * avx;
    if det < 0 {
        (det, t, s) = (-det, -t, -s);
    }
    if t < 0 || s < 0 {
        return false;
    }
    let (lo, hi) = (i128::from(lo) * det, i128::from(hi) * det);
    let x = ax * det + t * avx;
    let y = ay * det + t * avy;
    (lo..=hi).contains(&x) && (lo..=hi).contains(&y)
}

pub fn future_crossings(stones: &[Hailstone], area: (i64, i64)) -> usize {
    stones
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| paths_cross_within(a, b, area))
        .count()
}

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: Vec3, b: Vec3) -> Option<Vec3> {
    let term = |i: usize, j: usize| a[i].checked_mul(b[j])?.checked_sub(a[j].checked_mul(b[i])?);
    Some([term(1, 2)?, term(2, 0)?, term(0, 1)?])
}

fn reduce(v: Vec3) -> Vec3 {
    let g = v.iter().fold(0i128, |g, &x| {
        let (mut a, mut b) = (g, x.abs());
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    });
    if g == 0 { v } else { v.map(|x| x / g) }
}

/// Integer time at which `pos + t * vel` lies on the line through the origin
/// along `dir`.
fn meeting_time(pos: Vec3, vel: Vec3, dir: Vec3) -> Option<i128> {
    let pd = cross(pos, dir)?;
    let vd = cross(vel, dir)?;
    let i = (0..3).find(|&i| vd[i] != 0)?;
    if pd[i] % vd[i] != 0 {
        return None;
    }
    let t = -pd[i] / vd[i];
    (0..3).all(|j| pd[j] + t * vd[j] == 0).then_some(t)
}

/// Rock trajectory that hits hailstones `i` and `j`, worked out in the rest
/// frame of hailstone 0 where the rock passes through the origin.
fn candidate_throw(stones: &[Hailstone], i: usize, j: usize) -> Option<(Vec3, Vec3)> {
    let (p0, v0) = (stones[0].pos(), stones[0].vel());
    let relative = |k: usize| (sub(stones[k].pos(), p0), sub(stones[k].vel(), v0));
    let (p1, v1) = relative(i);
    let (p2, v2) = relative(j);

    // The rock's line lies in the plane through the origin and each path.
    let dir = reduce(cross(cross(p1, v1)?, cross(p2, v2)?)?);
    if dir == [0; 3] {
        return None;
    }
    let t1 = meeting_time(p1, v1, dir)?;
    let t2 = meeting_time(p2, v2, dir)?;
    if t1 == t2 {
        return None;
    }
    let hit = |p: Vec3, v: Vec3, t: i128| [0, 1, 2].map(|k| p[k] + t * v[k]);
    let (x1, x2) = (hit(p1, v1, t1), hit(p2, v2, t2));
    let travel = sub(x2, x1);
    if travel.iter().any(|&d| d % (t2 - t1) != 0) {
        return None;
    }
    let vel = travel.map(|d| d / (t2 - t1));
    let pos = [0, 1, 2].map(|k| x1[k] - t1 * vel[k] + p0[k]);
    Some((pos, [0, 1, 2].map(|k| vel[k] + v0[k])))
}

fn hits(pos: Vec3, vel: Vec3, stone: &Hailstone) -> bool {
    let gap = sub(stone.pos(), pos);
    let closing = sub(vel, stone.vel());
    match (0..3).find(|&k| closing[k] != 0) {
        None => gap == [0; 3],
        Some(k) => {
            gap[k] % closing[k] == 0
                && gap[k] / closing[k] >= 0
                && (0..3).all(|m| gap[m] * closing[k] == gap[k] * closing[m])
        }
    }
}

/// Starting position of a rock thrown at integer velocity that hits every
/// hailstone.
pub fn rock_position(stones: &[Hailstone]) -> Result<[i128; 3], SolveError> {
    if stones.len() < 3 {
        return Err(SolveError::failed("need at least three hailstones"));
    }
    (1..stones.len())
        .tuple_combinations()
        .filter_map(|(i, j)| candidate_throw(stones, i, j))
        .find(|&(pos, vel)| stones.iter().all(|s| hits(pos, vel, s)))
        .map(|(pos, vel)| {
            debug!(?pos, ?vel, "found throw");
            pos
        })
        .ok_or_else(|| SolveError::failed("no throw hits every hailstone"))
}

fn parse_hailstone(line: &str) -> anyhow::Result<Hailstone> {
    let (pos, vel) = split_once(line, "@")?;
    let triple = |s: &str| -> anyhow::Result<[i64; 3]> {
        let values: Vec<i64> = parse_numbers(s)?;
        <[i64; 3]>::try_from(values)
            .map_err(|v| anyhow::anyhow!("expected 3 values, got {}", v.len()))
    };
    Ok(Hailstone {
        pos: triple(pos)?,
        vel: triple(vel)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        try_parse_lines(input, parse_hailstone).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(future_crossings(shared, TEST_AREA).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let pos = rock_position(shared)?;
        Ok(pos.iter().sum::<i128>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3";

    fn stones() -> Vec<Hailstone> {
        Solver::parse(EXAMPLE).unwrap()
    }

    #[test]
    fn test_example_crossings() {
        assert_eq!(future_crossings(&stones(), (7, 27)), 2);
    }

    #[test]
    fn test_crossing_cases() {
        let s = stones();
        // Inside the area.
        assert!(paths_cross_within(&s[0], &s[1], (7, 27)));
        // Parallel.
        assert!(!paths_cross_within(&s[1], &s[2], (7, 27)));
        // Crossed in the past for hailstone A.
        assert!(!paths_cross_within(&s[0], &s[4], (7, 27)));
    }

    #[test]
    fn test_rock_position_example() {
        assert_eq!(rock_position(&stones()).unwrap(), [24, 13, 10]);
        assert_eq!(run_part::<Solver>(EXAMPLE, 2), "47");
    }

    #[test]
    fn test_rock_misses_rejected() {
        let (pos, vel) = ([24, 13, 10], [-3, 1, 2]);
        assert!(stones().iter().all(|s| hits(pos, vel, s)));
        assert!(!hits([24, 13, 11], vel, &stones()[0]));
    }

    #[test]
    fn test_too_few_hailstones() {
        assert!(rock_position(&stones()[..2]).is_err());
    }
}
