//! Property tests for part range checking and derived dispatch

use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver, SolverExt};
use proptest::prelude::*;

/// Echoes the part number it was asked to solve
struct EchoSolver<const N: u8>;

impl<const N: u8> AocParser for EchoSolver<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for EchoSolver<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{}", part))
    }
}

fn checked(max_parts: u8, part: u8) -> Result<String, SolveError> {
    let mut shared = ();
    match max_parts {
        1 => EchoSolver::<1>::solve_part_checked_range(&mut shared, part),
        2 => EchoSolver::<2>::solve_part_checked_range(&mut shared, part),
        _ => EchoSolver::<3>::solve_part_checked_range(&mut shared, part),
    }
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad int {s:?}")))
            })
            .collect()
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_out_of_range_rejection(max_parts in 1u8..=3, part in 0u8..=255) {
        let result = checked(max_parts, part);

        if part == 0 || part > max_parts {
            match result {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "Expected PartOutOfRange, got {:?}", other),
            }
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{}", part));
        }
    }

    #[test]
    fn prop_derived_dispatch_matches_part_solver(
        numbers in prop::collection::vec(-20i64..20, 1..6),
        part in 1u8..=2,
    ) {
        let input = numbers.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",");
        let mut via_dispatch = SumProduct::parse(&input).unwrap();
        let mut direct = SumProduct::parse(&input).unwrap();

        let dispatched = SumProduct::solve_part(&mut via_dispatch, part).unwrap();
        let expected = match part {
            1 => <SumProduct as PartSolver<1>>::solve(&mut direct),
            _ => <SumProduct as PartSolver<2>>::solve(&mut direct),
        };

        prop_assert_eq!(dispatched, expected.unwrap());
    }

    #[test]
    fn prop_derived_dispatch_rejects_invalid(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = SumProduct::parse("1,2,3").unwrap();
        match SumProduct::solve_part(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "Expected PartOutOfRange, got {:?}", other),
        }
    }
}

#[test]
fn test_part_zero_rejected() {
    assert!(matches!(checked(2, 0), Err(SolveError::PartOutOfRange(0))));
}

#[test]
fn test_part_exceeds_max_rejected() {
    assert!(matches!(checked(2, 3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn test_parse_error_propagates() {
    assert_eq!(
        SumProduct::parse("1,x").unwrap_err(),
        ParseError::InvalidFormat("bad int \"x\"".into())
    );
}
