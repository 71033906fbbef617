//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::{ClosureProblem, DpProblem};

/// Memoizes a recursive [`DpProblem`], computing each index at most once.
///
/// Dependencies are resolved depth-first on demand. The dependency graph must
/// be acyclic: a cycle recurses until the stack overflows.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, VecBackend};
///
/// let cache = DpCache::new(
///     VecBackend::new(),
///     |n: &usize| if *n == 0 { vec![] } else { vec![n - 1] },
///     |n: &usize, deps: Vec<u64>| if *n == 0 { 1 } else { *n as u64 * deps[0] },
/// );
///
/// assert_eq!(cache.get(&5), 120);
/// ```
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and any missing dependencies first.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow is held while recursing into dependencies.
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }

    /// Whether `index` has already been resolved.
    pub fn is_cached(&self, index: &I) -> bool {
        self.backend.borrow().get(index).is_some()
    }
}

impl<I, K, B, D, C> DpCache<I, K, B, ClosureProblem<D, C>>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    /// Closure-based shorthand for [`DpCache::with_problem`].
    pub fn new(backend: B, dep_fn: D, compute_fn: C) -> Self {
        Self::with_problem(backend, ClosureProblem::new(dep_fn, compute_fn))
    }
}
