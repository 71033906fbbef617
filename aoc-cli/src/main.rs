//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod logging;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, WorkItem};
use output::{OutputFormatter, Summary};
use tracing::{debug, warn};

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = Config::from_args(args).and_then(run) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), CliError> {
    logging::init_cli_logger(config.verbose);
    debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    run_with(registry, &config).map(|_| ())
}

/// Run every selected solver; any part without an answer fails the run
fn run_with(registry: SolverRegistry, config: &Config) -> Result<Summary, CliError> {
    let executor =
        Executor::new(registry, config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        return Err(CliError::NoSolvers);
    }
    if executor.has_input_file() {
        if work_items.len() != 1 {
            return Err(CliError::Config(format!(
                "an input file needs exactly one solver, but {} match",
                work_items.len()
            )));
        }
    } else {
        warn_missing_inputs(&executor, &work_items);
    }

    let summary = run_executor(executor, work_items, config.quiet)?;
    match summary.failed {
        0 => Ok(summary),
        failed => Err(CliError::FailedParts(failed)),
    }
}

/// List inputs that are not in the input directory before running anything
fn warn_missing_inputs(executor: &Executor, work_items: &[WorkItem]) {
    let missing: Vec<&WorkItem> = work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .collect();
    if missing.is_empty() {
        return;
    }
    warn!("missing {} input file(s)", missing.len());
    for w in missing {
        warn!(path = %executor.inputs().path(w.year, w.day).display(), "no input for {}/{:02}", w.year, w.day);
    }
}

/// Run the executor, streaming results in (year, day, part) order
fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    quiet: bool,
) -> Result<Summary, CliError> {
    let expected_keys: Vec<ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect();
    debug!(parts = expected_keys.len(), "running solvers");

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    let summary = Summary::of(&results);
    formatter.print_summary(&summary);
    Ok(summary)
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
