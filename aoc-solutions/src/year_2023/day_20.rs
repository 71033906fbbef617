//! Day 20: Pulse Propagation

use crate::utils::math::lcm_all;
use crate::utils::parse::{invalid, split_once, try_parse_lines};
use anyhow::{Context, bail};
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 20, tags = ["2023", "simulation", "math"])]
pub struct Solver;

const BROADCASTER: &str = "broadcaster";
const OUTPUT: &str = "rx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pulse {
    Low,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Module {
    Broadcaster,
    FlipFlop { on: bool },
    /// Most recent pulse from each input module.
    Conjunction { memory: BTreeMap<usize, Pulse> },
    /// Named only as a destination.
    Sink,
}

impl Module {
    pub fn flip_flop() -> Self {
        Module::FlipFlop { on: false }
    }

    /// A conjunction that initially remembers a low pulse from every input.
    pub fn conjunction(inputs: impl IntoIterator<Item = usize>) -> Self {
        Module::Conjunction {
            memory: inputs.into_iter().map(|i| (i, Pulse::Low)).collect(),
        }
    }

    /// Handle `pulse` from module `from`, returning the pulse sent to every
    /// output, if any.
    pub fn receive(&mut self, from: usize, pulse: Pulse) -> Option<Pulse> {
        match self {
            Module::Broadcaster => Some(pulse),
            Module::FlipFlop { on } => match pulse {
                Pulse::High => None,
                Pulse::Low => {
                    *on = !*on;
                    Some(if *on { Pulse::High } else { Pulse::Low })
                }
            },
            Module::Conjunction { memory } => {
                memory.insert(from, pulse);
                let all_high = memory.values().all(|&p| p == Pulse::High);
                Some(if all_high { Pulse::Low } else { Pulse::High })
            }
            Module::Sink => None,
        }
    }
}

/// Sent while pressing the button: (from, to, pulse).
pub type Sent = (usize, usize, Pulse);

#[derive(Debug, Clone)]
pub struct Network<'a> {
    names: Vec<&'a str>,
    modules: Vec<Module>,
    outputs: Vec<Vec<usize>>,
    broadcaster: usize,
}

impl<'a> Network<'a> {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|&n| n == name)
    }

    fn inputs_of(&self, target: usize) -> Vec<usize> {
        (0..self.outputs.len())
            .filter(|&m| self.outputs[m].contains(&target))
            .collect()
    }

    /// Press the button once, reporting every pulse in delivery order.
    ///
    /// The button's own low pulse to the broadcaster is reported with the
    /// broadcaster as its source.
    pub fn press<F>(&mut self, mut on_pulse: F)
    where
        F: FnMut(Sent),
    {
        let mut queue = VecDeque::from([(self.broadcaster, self.broadcaster, Pulse::Low)]);
        while let Some(sent @ (from, to, pulse)) = queue.pop_front() {
            on_pulse(sent);
            if let Some(out) = self.modules[to].receive(from, pulse) {
                queue.extend(self.outputs[to].iter().map(|&next| (to, next, out)));
            }
        }
    }
}

fn parse_network<'a>(input: &'a str) -> anyhow::Result<Network<'a>> {
    let declared = try_parse_lines(input, |line| {
        let (module, targets) = split_once(line.trim(), " -> ")?;
        let targets: Vec<&str> = targets.split(',').map(str::trim).collect();
        let (kind, name) = match module.as_bytes().first() {
            Some(b'%') => (Some(b'%'), &module[1..]),
            Some(b'&') => (Some(b'&'), &module[1..]),
            _ if module == BROADCASTER => (None, module),
            _ => bail!("unknown module {:?}", module),
        };
        Ok((kind, name, targets))
    })?;

    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut names = Vec::new();
    let mut intern = |name: &'a str| -> usize {
        *index.entry(name).or_insert_with(|| {
            names.push(name);
            names.len() - 1
        })
    };
    for (_, name, _) in &declared {
        intern(*name);
    }
    let mut outputs: Vec<Vec<usize>> = Vec::new();
    let mut kinds = Vec::new();
    for (kind, name, targets) in &declared {
        let id = intern(*name);
        let targets: Vec<usize> = targets.iter().map(|&t| intern(t)).collect();
        if outputs.len() <= id {
            outputs.resize(id + 1, Vec::new());
            kinds.resize(id + 1, None);
        }
        outputs[id] = targets;
        kinds[id] = Some(*kind);
    }
    drop(intern);
    outputs.resize(names.len(), Vec::new());
    kinds.resize(names.len(), None);

    let broadcaster = index.get(BROADCASTER).copied().context("no broadcaster")?;
    let mut network = Network {
        names,
        modules: Vec::new(),
        outputs,
        broadcaster,
    };
    network.modules = kinds
        .iter()
        .enumerate()
        .map(|(id, kind)| match kind {
            Some(Some(b'%')) => Module::flip_flop(),
            Some(Some(_)) => Module::conjunction(network.inputs_of(id)),
            Some(None) => Module::Broadcaster,
            None => Module::Sink,
        })
        .collect();
    Ok(network)
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_network(input).map_err(invalid)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut network = shared.clone();
        let (mut low, mut high) = (0u64, 0u64);
        for _ in 0..1000 {
            network.press(|(_, _, pulse)| match pulse {
                Pulse::Low => low += 1,
                Pulse::High => high += 1,
            });
        }
        Ok((low * high).to_string())
    }
}

/// Presses until `rx` first receives a low pulse.
///
/// `rx` is fed by a single conjunction; each of that conjunction's inputs
/// sends it a high pulse on a fixed cycle, so the answer is the LCM of the
/// press at which each input first does so.
pub fn presses_until_output_low(network: &Network<'_>) -> Result<u64, SolveError> {
    let output = network
        .index_of(OUTPUT)
        .ok_or_else(|| SolveError::failed("no rx module"))?;
    let inputs = network.inputs_of(output);
    let [hub] = inputs[..] else {
        return Err(SolveError::failed("rx must have exactly one input"));
    };
    if !matches!(network.modules[hub], Module::Conjunction { .. }) {
        return Err(SolveError::failed("rx is not fed by a conjunction"));
    }

    let feeders = network.inputs_of(hub);
    let mut first_high: HashMap<usize, u64> = HashMap::new();
    let mut network = network.clone();
    // Each feeder must fire within one cycle of its flip-flop counter.
    let limit = 1u64 << network.modules.len().min(40);
    for presses in 1..=limit {
        network.press(|(from, to, pulse)| {
            if to == hub && pulse == Pulse::High {
                first_high.entry(from).or_insert(presses);
            }
        });
        if first_high.len() == feeders.len() {
            debug!(?first_high, "all conjunction inputs fired");
            return Ok(lcm_all(first_high.values().map(|&p| p as i64)) as u64);
        }
    }
    Err(SolveError::failed("conjunction inputs never all fire"))
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(presses_until_output_low(shared)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::run_part;

    const EXAMPLE_1: &str = "broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a";

    const EXAMPLE_2: &str = "broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output";

    /// Two binary counters of 3 and 2 bits feeding `rx` through inverters.
    const COUNTERS: &str = "broadcaster -> a1, b1
%a1 -> a2
%a2 -> a3
%a3 -> pa
&pa -> hub
%b1 -> b2
%b2 -> pb
&pb -> hub
&hub -> rx";

    fn feed(module: &mut Module, from: usize, pulses: &[Pulse]) -> Vec<Pulse> {
        pulses
            .iter()
            .filter_map(|&p| module.receive(from, p))
            .collect()
    }

    #[test]
    fn test_flip_flop_ignores_high_pulse() {
        let mut module = Module::flip_flop();
        assert_eq!(feed(&mut module, 0, &[Pulse::High]), vec![]);
        assert_eq!(module, Module::FlipFlop { on: false });
    }

    #[test]
    fn test_flip_flop_emits_high_then_low() {
        let mut module = Module::flip_flop();
        assert_eq!(
            feed(&mut module, 0, &[Pulse::Low, Pulse::Low]),
            vec![Pulse::High, Pulse::Low]
        );
    }

    #[test]
    fn test_broadcaster_forwards_pulses() {
        let mut module = Module::Broadcaster;
        assert_eq!(
            feed(&mut module, 0, &[Pulse::High, Pulse::Low]),
            vec![Pulse::High, Pulse::Low]
        );
    }

    #[test]
    fn test_conjunction_sends_high_until_all_inputs_high() {
        let mut module = Module::conjunction([1, 2, 3]);
        let sent: Vec<Pulse> = [1, 2]
            .iter()
            .filter_map(|&from| module.receive(from, Pulse::High))
            .collect();
        assert_eq!(sent, vec![Pulse::High, Pulse::High]);
    }

    #[test]
    fn test_conjunction_sends_low_once_all_inputs_high() {
        let mut module = Module::conjunction([1, 2, 3]);
        let sent: Vec<Pulse> = [1, 2, 3, 1, 2, 3]
            .iter()
            .filter_map(|&from| module.receive(from, Pulse::High))
            .collect();
        assert_eq!(
            sent,
            vec![
                Pulse::High,
                Pulse::High,
                Pulse::Low,
                Pulse::Low,
                Pulse::Low,
                Pulse::Low
            ]
        );
    }

    #[test]
    fn test_sink_swallows_pulses() {
        assert_eq!(feed(&mut Module::Sink, 0, &[Pulse::Low, Pulse::High]), vec![]);
    }

    #[test]
    fn test_part1_examples() {
        assert_eq!(run_part::<Solver>(EXAMPLE_1, 1), "32000000");
        assert_eq!(run_part::<Solver>(EXAMPLE_2, 1), "11687500");
    }

    #[test]
    fn test_single_press_pulse_order() {
        let mut network = Solver::parse(EXAMPLE_1).unwrap();
        let mut sent = Vec::new();
        network.press(|(from, to, pulse)| {
            sent.push(format!("{} -{:?}-> {}", network_name(from), pulse, network_name(to)))
        });
        assert_eq!(sent.len(), 12);
        assert_eq!(sent[0], "broadcaster -Low-> broadcaster");
    }

    fn network_name(id: usize) -> &'static str {
        ["broadcaster", "a", "b", "c", "inv"][id]
    }

    #[test]
    fn test_part2_matches_brute_force() {
        let mut network = Solver::parse(COUNTERS).unwrap();
        let rx = network.index_of("rx").unwrap();
        let mut brute = 0;
        let mut done = false;
        while !done {
            brute += 1;
            network.press(|(_, to, pulse)| done |= to == rx && pulse == Pulse::Low);
        }
        assert_eq!(brute, 8);
        assert_eq!(run_part::<Solver>(COUNTERS, 2), "8");
    }

    #[test]
    fn test_missing_rx_fails_part2() {
        let mut network = Solver::parse(EXAMPLE_1).unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut network).is_err());
    }

    #[test]
    fn test_missing_broadcaster_rejected() {
        assert!(Solver::parse("%a -> b").is_err());
    }
}
