//! Advent of Code puzzle solutions with automatic registration
//!
//! Each day is a unit struct deriving `AocSolver` (part dispatch) and
//! `AutoRegisterSolver` (plugin submission), so linking this crate is enough
//! for `SolverRegistryBuilder::register_all_plugins` to find every puzzle.
//! Years are gated behind cargo features.

pub mod utils;

#[cfg(feature = "year-2023")]
pub mod year_2023;
