//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses a puzzle input into the data shared by every part of a day.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(format!("bad depth {l:?}"))))
///             .collect()
///     }
/// }
///
/// assert_eq!(Depths::parse("3\n1\n2").unwrap(), vec![3, 1, 2]);
/// ```
pub trait AocParser {
    /// Parsed puzzle model.
    ///
    /// Owned structures are the common case. Borrowing from the input
    /// (`&'a str`, `Vec<&'a str>`) is possible when no transformation is needed.
    type SharedData<'a>;

    /// Parse the raw (untrimmed) puzzle input.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implement once per part; `#[derive(AocSolver)]` wires the implementations
/// into [`Solver::solve_part`].
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad depth".into())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let increases = shared.windows(2).filter(|w| w[1] > w[0]).count();
///         Ok(increases.to_string())
///     }
/// }
///
/// let mut depths = Depths::parse("1\n3\n2\n5").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut depths).unwrap(), "2");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part using (and possibly caching into) the shared data.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete solver for one year/day puzzle.
///
/// Usually derived with `#[derive(AocSolver)]`, which dispatches each part
/// number to the matching [`PartSolver`] implementation.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part.
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartOutOfRange)` - `part` is not in `1..=PARTS`
    /// * `Err(SolveError::SolveFailed)` - The input cannot produce an answer
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked solving, available on every [`Solver`].
pub trait SolverExt: Solver {
    /// Reject parts outside `1..=PARTS` before calling [`Solver::solve_part`].
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
