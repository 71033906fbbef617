//! Day 19: Aplenty

use crate::utils::parse::{invalid, sections, split_once, try_parse_lines};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use regex::Regex;
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["2023", "ranges"])]
pub struct Solver;

const START: &str = "in";
const MAX_RATING: u32 = 4000;

/// Ratings in `x`, `m`, `a`, `s` order.
pub type Part = [u32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Accept,
    Reject,
    Workflow(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<'a> {
    pub category: usize,
    /// `true` for `>`, `false` for `<`.
    pub greater: bool,
    pub value: u32,
    pub target: Target<'a>,
}

impl Rule<'_> {
    fn matches(&self, part: &Part) -> bool {
        let rating = part[self.category];
        if self.greater {
            rating > self.value
        } else {
            rating < self.value
        }
    }

    /// Split an inclusive rating range into (matching, not matching).
    fn split(&self, (lo, hi): (u32, u32)) -> (Option<(u32, u32)>, Option<(u32, u32)>) {
        let non_empty = |(lo, hi): (u32, u32)| (lo <= hi).then_some((lo, hi));
        if self.greater {
            (
                non_empty((lo.max(self.value.saturating_add(1)), hi)),
                non_empty((lo, hi.min(self.value))),
            )
        } else {
            (
                non_empty((lo, hi.min(self.value.saturating_sub(1)))),
                non_empty((lo.max(self.value), hi)),
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow<'a> {
    pub rules: Vec<Rule<'a>>,
    pub fallback: Target<'a>,
}

#[derive(Debug)]
pub struct System<'a> {
    pub workflows: HashMap<&'a str, Workflow<'a>>,
    pub parts: Vec<Part>,
}

impl<'a> System<'a> {
    fn workflow(&self, name: &str) -> Result<&Workflow<'a>, SolveError> {
        self.workflows
            .get(name)
            .ok_or_else(|| SolveError::failed(format!("unknown workflow {:?}", name)))
    }

    pub fn accepts(&self, part: &Part) -> Result<bool, SolveError> {
        let mut current = START;
        // A part visits each workflow at most once unless the workflows loop.
        for _ in 0..=self.workflows.len() {
            let workflow = self.workflow(current)?;
            let target = workflow
                .rules
                .iter()
                .find(|rule| rule.matches(part))
                .map_or(workflow.fallback, |rule| rule.target);
            match target {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(next) => current = next,
            }
        }
        Err(SolveError::failed("workflows loop forever"))
    }

    /// Rating combinations in `ranges` that end up accepted from `target`.
    pub fn count_accepted(
        &self,
        target: Target<'a>,
        mut ranges: [(u32, u32); 4],
        depth: usize,
    ) -> Result<u64, SolveError> {
        let name = match target {
            Target::Accept => {
                return Ok(ranges
                    .iter()
                    .map(|&(lo, hi)| u64::from(hi - lo + 1))
                    .product());
            }
            Target::Reject => return Ok(0),
            Target::Workflow(name) => name,
        };
        if depth > self.workflows.len() {
            return Err(SolveError::failed("workflows loop forever"));
        }

        let workflow = self.workflow(name)?;
        let mut total = 0;
        for rule in &workflow.rules {
            let (matching, rest) = rule.split(ranges[rule.category]);
            if let Some(range) = matching {
                let mut sub = ranges;
                sub[rule.category] = range;
                total += self.count_accepted(rule.target, sub, depth + 1)?;
            }
            match rest {
                Some(range) => ranges[rule.category] = range,
                None => return Ok(total),
            }
        }
        Ok(total + self.count_accepted(workflow.fallback, ranges, depth + 1)?)
    }
}

fn parse_target(s: &str) -> Target<'_> {
    match s {
        "A" => Target::Accept,
        "R" => Target::Reject,
        name => Target::Workflow(name),
    }
}

fn parse_category(c: &str) -> anyhow::Result<usize> {
    "xmas"
        .find(c)
        .filter(|_| c.len() == 1)
        .ok_or_else(|| anyhow!("unknown category {:?}", c))
}

fn parse_workflow(line: &str) -> anyhow::Result<(&str, Workflow<'_>)> {
    let (name, body) = split_once(line, "{")?;
    let body = body.strip_suffix('}').context("missing closing brace")?;
    let mut steps: Vec<&str> = body.split(',').collect();
    let fallback = steps.pop().filter(|s| !s.contains(':')).context("missing fallback")?;

    let rules = steps
        .into_iter()
        .map(|step| -> anyhow::Result<Rule<'_>> {
            let (condition, target) = split_once(step, ":")?;
            let op_at = condition
                .find(['<', '>'])
                .with_context(|| format!("rule {:?} has no comparison", step))?;
            Ok(Rule {
                category: parse_category(&condition[..op_at])?,
                greater: condition.as_bytes()[op_at] == b'>',
                value: condition[op_at + 1..].parse().context("invalid rule value")?,
                target: parse_target(target),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok((
        name,
        Workflow {
            rules,
            fallback: parse_target(fallback),
        },
    ))
}

fn parse_system(input: &str) -> anyhow::Result<System<'_>> {
    let sections = sections(input);
    let [workflows, parts] = sections[..] else {
        bail!("expected workflows and parts separated by a blank line");
    };

    let workflows: HashMap<&str, Workflow<'_>> = try_parse_lines(workflows, parse_workflow)
        .context("in workflows")?
        .into_iter()
        .collect();
    if !workflows.contains_key(START) {
        bail!("no {:?} workflow", START);
    }

    let rating = Regex::new(r"^\{x=(\d+),m=(\d+),a=(\d+),s=(\d+)\}$")?;
    let parts = try_parse_lines(parts, |line| {
        let caps = rating
            .captures(line.trim())
            .context("expected {x=..,m=..,a=..,s=..}")?;
        let mut part: Part = [0; 4];
        for (slot, value) in part.iter_mut().zip(caps.iter().skip(1).flatten()) {
            *slot = value.as_str().parse()?;
        }
        Ok(part)
    })
    .context("in parts")?;

    Ok(System { workflows, parts })
}

impl AocParser for Solver {
    type SharedData<'a> = System<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_system(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 0u64;
        for part in &shared.parts {
            if shared.accepts(part)? {
                total += part.iter().map(|&r| u64::from(r)).sum::<u64>();
            }
        }
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let all = [(1, MAX_RATING); 4];
        Ok(shared
            .count_accepted(Target::Workflow(START), all, 0)?
            .to_string())
    }
}
