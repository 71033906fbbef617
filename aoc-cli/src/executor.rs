//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::{InputStore, read_input};
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use tracing::debug;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Absent when the input never parsed
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: RunContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs to run one work item
struct RunContext {
    registry: SolverRegistry,
    inputs: InputStore,
    input_file: Option<PathBuf>,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: RunContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                input_file: config.input_file.clone(),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Whether inputs come from a single explicit file
    pub fn has_input_file(&self) -> bool {
        self.context.input_file.is_some()
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.context;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();

        match self.context.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.context) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_parallel(by_year, &tx)
            }
            // Part differs from Day inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel(singles, &tx)
            }
        }
    }

    /// Run groups in parallel; items within a group run in order
    fn execute_parallel(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let context = &self.context;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, context) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(|a, b| match (a, b) {
                    (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                    (a, b) => a.or(b),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts to run given the part filter and the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Load the input and solve every part of one work item.
///
/// Failures of the puzzle itself travel as error results; only a broken
/// channel is returned as an error.
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let loaded = match &context.input_file {
        Some(path) => read_input(path),
        None => context.inputs.read(year, day),
    };
    let input = match loaded {
        Ok(input) => input,
        Err(source) => {
            let error = ArcExecutorError::from(ExecutorError::Input { year, day, source });
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if matches!(context.parallelize_by, ParallelizeBy::Part) {
        work.parts
            .clone()
            .into_par_iter()
            .try_for_each(|part| solve_parts(year, day, part..=part, &input, tx, context))
    } else {
        solve_parts(year, day, work.parts.clone(), &input, tx, context)
    }
}

/// Parse once, then solve `parts` in order
fn solve_parts(
    year: u16,
    day: u8,
    parts: RangeInclusive<u8>,
    input: &str,
    tx: &Sender<SolverResult>,
    context: &RunContext,
) -> Result<(), ArcExecutorError> {
    let mut solver = match context.registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            let error = ArcExecutorError::from(ExecutorError::Solver(e));
            for part in parts {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };
    debug!(year, day, parse = %solver.parse_duration(), "parsed input");

    for part in parts {
        send(tx, solve_part(part, &mut *solver))?;
    }
    Ok(())
}

/// Solve a single part
fn solve_part(part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    let outcome = solver.solve(part);
    debug!(year, day, part, ok = outcome.is_ok(), "solved part");

    let (answer, solve_duration) = match outcome {
        Ok(result) => {
            let duration = result.duration();
            (Ok(result.answer), duration)
        }
        Err(e) => (
            Err(ExecutorError::Solver(e.into()).into()),
            TimeDelta::zero(),
        ),
    };
    SolverResult {
        year,
        day,
        part,
        answer,
        parse_duration: Some(solver.parse_duration()),
        solve_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    /// Sums numbers (part 1) or counts them (part 2); fails on an empty list.
    struct Numbers;

    impl AocParser for Numbers {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
                .collect()
        }
    }

    impl Solver for Numbers {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            if shared.is_empty() {
                return Err(SolveError::failed("no numbers"));
            }
            match part {
                1 => Ok(shared.iter().sum::<i64>().to_string()),
                _ => Ok(shared.len().to_string()),
            }
        }
    }

    fn config(dir: &TempDir, parallelize_by: ParallelizeBy) -> Config {
        Config {
            year_filter: None,
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input_dir: dir.path().to_path_buf(),
            input_file: None,
            thread_count: 2,
            parallelize_by,
            quiet: true,
            verbose: false,
        }
    }

    fn executor(config: &Config) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register::<Numbers>(2023, 1)
            .unwrap()
            .register::<Numbers>(2023, 2)
            .unwrap()
            .register::<Numbers>(2022, 5)
            .unwrap()
            .build();
        Executor::new(registry, config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<SolverResult> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    fn answers(results: &[SolverResult]) -> Vec<(u16, u8, u8, Option<String>)> {
        results
            .iter()
            .map(|r| (r.year, r.day, r.part, r.answer.as_ref().ok().cloned()))
            .collect()
    }

    #[test]
    fn test_filters_select_work_items() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, ParallelizeBy::Day);
        assert_eq!(executor(&config).collect_work_items().len(), 3);

        config.year_filter = Some(2023);
        config.part_filter = Some(2);
        let items = executor(&config).collect_work_items();
        assert_eq!(
            items,
            vec![
                WorkItem { year: 2023, day: 1, parts: 2..=2 },
                WorkItem { year: 2023, day: 2, parts: 2..=2 },
            ]
        );
    }

    #[test]
    fn test_every_mode_produces_the_same_results() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2023_day01.txt"), "1 2 3").unwrap();
        fs::write(dir.path().join("2022_day05.txt"), "10 -4").unwrap();

        let expected = vec![
            (2022, 5, 1, Some("6".to_string())),
            (2022, 5, 2, Some("2".to_string())),
            (2023, 1, 1, Some("6".to_string())),
            (2023, 1, 2, Some("3".to_string())),
            (2023, 2, 1, None),
            (2023, 2, 2, None),
        ];
        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let results = run(&executor(&config(&dir, mode)));
            assert_eq!(answers(&results), expected, "{:?}", mode);
        }
    }

    #[test]
    fn test_missing_input_reported_per_part() {
        let dir = TempDir::new().unwrap();
        let mut config = config(&dir, ParallelizeBy::Day);
        config.day_filter = Some(2);
        let results = run(&executor(&config));
        assert_eq!(results.len(), 2);
        for result in &results {
            let err = result.answer.as_ref().unwrap_err();
            assert!(matches!(
                err.inner(),
                ExecutorError::Input {
                    source: InputError::Missing(_),
                    ..
                }
            ));
            assert_eq!(result.parse_duration, None);
        }
    }

    #[test]
    fn test_parse_and_solve_failures_become_error_results() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2023_day01.txt"), "1 x").unwrap();
        fs::write(dir.path().join("2023_day02.txt"), "   ").unwrap();
        let mut config = config(&dir, ParallelizeBy::Sequential);
        config.year_filter = Some(2023);
        let results = run(&executor(&config));
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.answer.is_err()));
        // Day 2 parsed; only solving failed.
        assert!(results[2].parse_duration.is_some());
    }

    #[test]
    fn test_explicit_input_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("custom.txt");
        fs::write(&file, "4 5").unwrap();
        let mut config = config(&dir, ParallelizeBy::Day);
        config.day_filter = Some(2);
        config.input_file = Some(file);
        let results = run(&executor(&config));
        assert_eq!(
            answers(&results),
            vec![
                (2023, 2, 1, Some("9".to_string())),
                (2023, 2, 2, Some("2".to_string())),
            ]
        );
    }
}
