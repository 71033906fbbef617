//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

/// Totals over every printed result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    pub fn of(results: &[SolverResult]) -> Self {
        let ok = || results.iter().filter(|r| r.answer.is_ok());
        let solved = ok().count();
        Self {
            solved,
            failed: results.len() - solved,
            parse_time: ok().filter_map(|r| r.parse_duration).sum(),
            solve_time: ok().map(|r| r.solve_duration).sum(),
        }
    }
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Line for one result: `Ok` goes to stdout, `Err` to stderr
    pub fn format_result(&self, result: &SolverResult) -> Result<String, String> {
        let prefix = if self.quiet {
            format!("Part {}", result.part)
        } else {
            format!("{}/{:02} Part {}", result.year, result.day, result.part)
        };

        match &result.answer {
            Ok(answer) if self.quiet => Ok(format!("{}: {}", prefix, answer)),
            Ok(answer) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                Ok(format!(
                    "{}: {} ({}solve: {})",
                    prefix,
                    answer,
                    parse_timing,
                    format_duration(result.solve_duration)
                ))
            }
            Err(e) => Err(format!("{}: Error - {}", prefix, e)),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        match self.format_result(result) {
            Ok(line) => println!("{}", line),
            Err(line) => eprintln!("{}", line),
        }
    }

    /// Print a summary after all results
    ///
    /// Shows both total solve time (sum of durations) and actual elapsed
    /// wall-clock time.
    pub fn print_summary(&self, summary: &Summary) {
        if self.quiet {
            return;
        }

        let elapsed_time = self.start_time.elapsed();
        println!();
        println!("--- Summary ---");
        println!(
            "Solvers: {} solved, {} failed",
            summary.solved, summary.failed
        );
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let compute = summary.parse_time + summary.solve_time;
            let compute_secs = compute.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!(
                "Speedup factor: {:.2}x",
                compute_secs / elapsed_time.as_secs_f64()
            );
        }
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    match TimeDelta::from_std(d) {
        Ok(delta) => format_duration(delta),
        Err(_) => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, ExecutorError};
    use aoc_solver::SolverError;

    fn result(part: u8, answer: Result<&str, ArcExecutorError>) -> SolverResult {
        SolverResult {
            year: 2023,
            day: 7,
            part,
            answer: answer.map(str::to_string),
            parse_duration: Some(TimeDelta::microseconds(250)),
            solve_duration: TimeDelta::microseconds(1_500),
        }
    }

    fn not_found() -> ArcExecutorError {
        ExecutorError::Solver(SolverError::NotFound(2023, 7)).into()
    }

    #[test]
    fn test_full_line() {
        let out = OutputFormatter::new(false);
        assert_eq!(
            out.format_result(&result(1, Ok("6440"))),
            Ok("2023/07 Part 1: 6440 (parse: 250µs, solve: 1.50ms)".to_string())
        );
    }

    #[test]
    fn test_quiet_line() {
        let out = OutputFormatter::new(true);
        assert_eq!(
            out.format_result(&result(2, Ok("5905"))),
            Ok("Part 2: 5905".to_string())
        );
    }

    #[test]
    fn test_error_line() {
        let out = OutputFormatter::new(false);
        let line = out.format_result(&result(1, Err(not_found()))).unwrap_err();
        assert!(line.starts_with("2023/07 Part 1: Error - "), "{line}");
    }

    #[test]
    fn test_summary_counts_only_successful_timings() {
        let results = [result(1, Ok("1")), result(2, Err(not_found()))];
        let summary = Summary::of(&results);
        assert_eq!((summary.solved, summary.failed), (1, 1));
        assert_eq!(summary.parse_time, TimeDelta::microseconds(250));
        assert_eq!(summary.solve_time, TimeDelta::microseconds(1_500));
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(2_500)), "2.50ms");
        assert_eq!(format_duration(TimeDelta::seconds(3)), "3.00s");
        assert_eq!(format_duration(TimeDelta::microseconds(-5)), "-5µs");
    }
}
