//! Memoization for recursive dynamic-programming recurrences.
//!
//! A problem is described by its dependency structure ([`DpProblem::deps`])
//! and how to combine resolved dependencies ([`DpProblem::compute`]). The
//! [`DpCache`] resolves indices lazily and stores results in a [`Backend`]:
//!
//! - [`VecBackend`] for dense `usize` indices
//! - [`HashMapBackend`] for sparse or composite keys
//!
//! Dependencies must form a DAG; there is no cycle detection.
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, HashMapBackend};
//!
//! // Monotone lattice paths to (r, c).
//! let paths = DpCache::new(
//!     HashMapBackend::new(),
//!     |&(r, c): &(u32, u32)| match (r, c) {
//!         (0, _) | (_, 0) => vec![],
//!         _ => vec![(r - 1, c), (r, c - 1)],
//!     },
//!     |_: &(u32, u32), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
//! );
//! assert_eq!(paths.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};
