//! Advent of Code solver framework
//!
//! Each puzzle is a type that parses its input once ([`AocParser`]) and then
//! answers any of its parts ([`PartSolver`] / [`Solver`]). Solvers are
//! type-erased behind [`DynSolver`] and looked up by (year, day) in a
//! [`SolverRegistry`], which can be filled by hand or from plugins submitted
//! with `#[derive(AutoRegisterSolver)]`.
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Calories;
//!
//! impl AocParser for Calories {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .trim()
//!             .split("\n\n")
//!             .map(|elf| {
//!                 elf.lines()
//!                     .map(|l| l.parse::<u32>().map_err(|e| ParseError::InvalidFormat(e.to_string())))
//!                     .sum()
//!             })
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or(0).to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Calories {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         shared.sort_unstable_by(|a, b| b.cmp(a));
//!         Ok(shared.iter().take(3).sum::<u32>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Calories>(2022, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2022, 1, "1\n2\n\n4\n\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "4");
//! assert_eq!(solver.solve(2).unwrap().answer, "10");
//! assert!(solver.solve(3).is_err());
//! ```
//!
//! # Part Data Sharing
//!
//! Parts receive `&mut SharedData`, so work common to both parts can be
//! computed once and cached in the parsed model (e.g. an `Option` field
//! filled by whichever part runs first).

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
