use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;
use std::cmp::Ordering;

/// Selects whether an operation runs on the calling thread or on the rayon pool.
/// Every primitive returns only after all of its work has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

impl ExecutionPolicy {
    pub fn for_each<I, F>(self, items: I, op: F)
    where
        I: IntoIterator + IntoParallelIterator<Item = <I as IntoIterator>::Item>,
        F: Fn(<I as IntoIterator>::Item) + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => IntoIterator::into_iter(items).for_each(op),
            ExecutionPolicy::Parallel => IntoParallelIterator::into_par_iter(items).for_each(op),
        }
    }

    pub fn any<I, F>(self, items: I, pred: F) -> bool
    where
        I: IntoIterator + IntoParallelIterator<Item = <I as IntoIterator>::Item>,
        F: Fn(<I as IntoIterator>::Item) -> bool + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => IntoIterator::into_iter(items).any(pred),
            ExecutionPolicy::Parallel => IntoParallelIterator::into_par_iter(items).any(pred),
        }
    }

    /// Keeps the `Some` outputs of `op`, in input order.
    pub fn filter_map<I, R, F>(self, items: I, op: F) -> Vec<R>
    where
        I: IntoIterator + IntoParallelIterator<Item = <I as IntoIterator>::Item>,
        R: Send,
        F: Fn(<I as IntoIterator>::Item) -> Option<R> + Sync + Send,
    {
        match self {
            ExecutionPolicy::Sequential => IntoIterator::into_iter(items).filter_map(op).collect(),
            ExecutionPolicy::Parallel => IntoParallelIterator::into_par_iter(items).filter_map(op).collect(),
        }
    }

    /// Stable sort. `compare` must be a total order.
    pub fn sort_by<T, F>(self, items: &mut [T], compare: F)
    where
        T: Send,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        match self {
            ExecutionPolicy::Sequential => items.sort_by(compare),
            ExecutionPolicy::Parallel => items.par_sort_by(compare),
        }
    }
}
