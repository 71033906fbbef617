//! Day 25: Snowverload

use crate::utils::parse::{invalid, split_once, try_parse_lines};
use anyhow::ensure;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, VecDeque};
use std::fmt::Write;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25, tags = ["2023", "graph", "max-flow"])]
pub struct Solver;

/// Wires cut to split the machine in two.
pub const CUT_SIZE: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct Wiring<'a> {
    pub names: Vec<&'a str>,
    pub adjacent: Vec<Vec<usize>>,
}

impl<'a> Wiring<'a> {
    fn node(&mut self, index: &mut HashMap<&'a str, usize>, name: &'a str) -> usize {
        *index.entry(name).or_insert_with(|| {
            self.names.push(name);
            self.adjacent.push(Vec::new());
            self.names.len() - 1
        })
    }

    fn connect(&mut self, a: usize, b: usize) {
        if !self.adjacent[a].contains(&b) {
            self.adjacent[a].push(b);
            self.adjacent[b].push(a);
        }
    }

    /// Graphviz rendering, each wire listed once.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("graph wiring {\n");
        for (a, neighbours) in self.adjacent.iter().enumerate() {
            for &b in neighbours.iter().filter(|&&b| a < b) {
                let _ = writeln!(dot, "  {} -- {};", self.names[a], self.names[b]);
            }
        }
        dot.push_str("}\n");
        dot
    }

    /// Breadth-first search over wires with spare capacity, returning each
    /// reached node's predecessor.
    fn residual_search(&self, flow: &HashMap<(usize, usize), i8>, source: usize) -> Vec<Option<usize>> {
        let mut parent = vec![None; self.adjacent.len()];
        parent[source] = Some(source);
        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacent[u] {
                let used = flow.get(&(u, v)).copied().unwrap_or(0);
                if parent[v].is_none() && used < 1 {
                    parent[v] = Some(u);
                    queue.push_back(v);
                }
            }
        }
        parent
    }

    /// Size of the `source` side when exactly `cut` edge-disjoint paths join
    /// `source` and `sink`.
    pub fn cut_side(&self, source: usize, sink: usize, cut: usize) -> Option<usize> {
        let mut flow: HashMap<(usize, usize), i8> = HashMap::new();
        let mut paths = 0;
        loop {
            let parent = self.residual_search(&flow, source);
            if parent[sink].is_none() {
                return (paths == cut).then(|| parent.iter().filter(|p| p.is_some()).count());
            }
            if paths == cut {
                return None;
            }
            let mut v = sink;
            while let Some(u) = parent[v].filter(|&u| u != v) {
                *flow.entry((u, v)).or_default() += 1;
                *flow.entry((v, u)).or_default() -= 1;
                v = u;
            }
            paths += 1;
        }
    }

    /// Product of the two group sizes left after cutting `cut` wires.
    pub fn split_product(&self, cut: usize) -> Option<usize> {
        let total = self.names.len();
        (1..total)
            .find_map(|sink| self.cut_side(0, sink, cut))
            .map(|side| side * (total - side))
    }
}

fn parse_wiring(input: &str) -> anyhow::Result<Wiring<'_>> {
    let lines = try_parse_lines(input, |line| {
        let (from, to) = split_once(line, ":")?;
        let to: Vec<&str> = to.split_whitespace().collect();
        ensure!(!to.is_empty(), "component {:?} has no wires", from);
        Ok((from.trim(), to))
    })?;
    let mut wiring = Wiring::default();
    let mut index = HashMap::new();
    for (from, to) in lines {
        let a = wiring.node(&mut index, from);
        for name in to {
            let b = wiring.node(&mut index, name);
            wiring.connect(a, b);
        }
    }
    Ok(wiring)
}

impl AocParser for Solver {
    type SharedData<'a> = Wiring<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_wiring(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        debug!(dot = %shared.to_dot(), "wiring diagram");
        shared
            .split_product(CUT_SIZE)
            .map(|product| product.to_string())
            .ok_or_else(|| SolveError::failed(format!("no {}-wire cut splits the machine", CUT_SIZE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE: &str = "jqt: rhn xhk nvd
rsh: frs pzl lsr
xhk: hfx
cmg: qnr nvd lhk bvb
rhn: xhk bvb hfx
bvb: xhk hfx
pzl: lsr hfx nvd
qnr: nvd
ntq: jqt hfx bvb xhk
nvd: lhk
lsr: lhk
rzs: qnr cmg lsr rsh
frs: qnr lhk lsr";

    #[test]
    fn test_example() {
        assert_eq!(run_part::<Solver>(EXAMPLE, 1), "54");
    }

    #[test]
    fn test_single_bridge() {
        let wiring = Solver::parse("a: b c\nb: c\nc: d\nd: e f\ne: f").unwrap();
        assert_eq!(wiring.split_product(1), Some(9));
        assert_eq!(wiring.split_product(CUT_SIZE), None);
    }

    #[test]
    fn test_to_dot_lists_each_wire_once() {
        let wiring = Solver::parse("a: b c\nb: c").unwrap();
        let dot = wiring.to_dot();
        assert!(dot.starts_with("graph wiring {"));
        assert_eq!(dot.matches(" -- ").count(), 3);
        assert!(dot.contains("  a -- b;"));
    }

    #[test]
    fn test_component_without_wires_rejected() {
        assert!(Solver::parse("a:").is_err());
    }
}
