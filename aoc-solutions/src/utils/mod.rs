//! Helpers shared across puzzle solutions.

pub mod dp_cache;
pub mod grid;
pub mod math;
pub mod parse;
