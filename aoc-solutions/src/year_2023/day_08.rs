//! Day 8: Haunted Wasteland

use crate::utils::math::lcm_all;
use crate::utils::parse::{invalid, sections, split_once, try_parse_lines};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["2023", "graph", "math"])]
pub struct Solver;

#[derive(Debug)]
pub struct Network<'a> {
    /// `true` for `R`.
    turns: Vec<bool>,
    names: Vec<&'a str>,
    /// (left, right) successor of each node.
    links: Vec<(usize, usize)>,
}

impl<'a> Network<'a> {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|&n| n == name)
    }

    /// Steps from `start` until a node satisfying `is_end` is reached.
    ///
    /// Fails once every (node, instruction) state has been visited without
    /// reaching an end.
    pub fn steps_until<F>(&self, start: usize, is_end: F) -> Result<u64, SolveError>
    where
        F: Fn(&str) -> bool,
    {
        let limit = (self.names.len() * self.turns.len()) as u64;
        let mut node = start;
        for (steps, &right) in (0u64..).zip(self.turns.iter().cycle()) {
            if is_end(self.names[node]) {
                return Ok(steps);
            }
            if steps > limit {
                break;
            }
            let (left, right_node) = self.links[node];
            node = if right { right_node } else { left };
        }
        Err(SolveError::failed(format!(
            "{} never reaches an end node",
            self.names[start]
        )))
    }
}

fn parse_network(input: &str) -> anyhow::Result<Network<'_>> {
    let sections = sections(input);
    let [turns, nodes] = sections[..] else {
        bail!("expected instructions and nodes separated by a blank line");
    };
    let turns = turns
        .trim()
        .chars()
        .map(|c| match c {
            'L' => Ok(false),
            'R' => Ok(true),
            other => Err(anyhow!("invalid instruction {:?}", other)),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let raw = try_parse_lines(nodes, |line| {
        let (name, targets) = split_once(line, " = ")?;
        let (left, right) = targets
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .and_then(|t| t.split_once(", "))
            .context("expected \"(LEFT, RIGHT)\"")?;
        Ok((name.trim(), left, right))
    })?;

    let names: Vec<&str> = raw.iter().map(|&(name, _, _)| name).collect();
    let lookup: HashMap<&str, usize> = names.iter().enumerate().map(|(i, &n)| (n, i)).collect();
    let resolve = |name: &str| {
        lookup
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("unknown node {:?}", name))
    };
    let links = raw
        .iter()
        .map(|&(_, left, right)| -> anyhow::Result<_> { Ok((resolve(left)?, resolve(right)?)) })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Network {
        turns,
        names,
        links,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let network = parse_network(input).map_err(invalid)?;
        if network.turns.is_empty() {
            return Err(ParseError::MissingData("no instructions".into()));
        }
        Ok(network)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared
            .index_of("AAA")
            .ok_or_else(|| SolveError::failed("no AAA node"))?;
        Ok(shared.steps_until(start, |n| n == "ZZZ")?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cycles = shared
            .names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.ends_with('A'))
            .map(|(start, _)| shared.steps_until(start, |n| n.ends_with('Z')))
            .collect::<Result<Vec<_>, _>>()?;
        if cycles.is_empty() {
            return Err(SolveError::failed("no ..A start nodes"));
        }
        Ok(lcm_all(cycles.into_iter().map(|c| c as i64)).to_string())
    }
}
