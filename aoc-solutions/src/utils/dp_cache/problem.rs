//! Trait-based DP problem definition.

/// The recurrence a [`DpCache`](super::DpCache) evaluates.
///
/// `deps` names the sub-problems an index needs; `compute` receives their
/// values in the same order. Base cases return no dependencies.
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, VecBackend};
///
/// struct Fibonacci;
///
/// impl DpProblem<usize, u64> for Fibonacci {
///     fn deps(&self, n: &usize) -> Vec<usize> {
///         if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
///     }
///
///     fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
///         if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
///     }
/// }
///
/// let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
/// assert_eq!(cache.get(&10), 55);
/// ```
pub trait DpProblem<I, K> {
    /// Indices this index depends on.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value for `index` given the resolved dependency values.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// Adapts a pair of closures to [`DpProblem`].
pub struct ClosureProblem<D, C> {
    dep_fn: D,
    compute_fn: C,
}

impl<D, C> ClosureProblem<D, C> {
    pub fn new(dep_fn: D, compute_fn: C) -> Self {
        Self { dep_fn, compute_fn }
    }
}

impl<I, K, D, C> DpProblem<I, K> for ClosureProblem<D, C>
where
    D: Fn(&I) -> Vec<I>,
    C: Fn(&I, Vec<K>) -> K,
{
    fn deps(&self, index: &I) -> Vec<I> {
        (self.dep_fn)(index)
    }

    fn compute(&self, index: &I, deps: Vec<K>) -> K {
        (self.compute_fn)(index, deps)
    }
}
