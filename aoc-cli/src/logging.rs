//! Diagnostic logging on stderr, keeping stdout for answers

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events `--verbose` raises to debug
const KIT_TARGETS: [&str; 3] = ["aoc", "aoc_solver", "aoc_solutions"];

fn default_directives(verbose: bool) -> String {
    if verbose {
        let mut directives: Vec<String> = KIT_TARGETS.iter().map(|t| format!("{t}=debug")).collect();
        directives.push("warn".to_string());
        directives.join(",")
    } else {
        "warn".to_string()
    }
}

/// Install the global subscriber; `RUST_LOG` takes precedence over `verbose`.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        assert_eq!(default_directives(false), "warn");
        assert_eq!(
            default_directives(true),
            "aoc=debug,aoc_solver=debug,aoc_solutions=debug,warn"
        );
        assert!(EnvFilter::try_new(default_directives(true)).is_ok());
    }
}
