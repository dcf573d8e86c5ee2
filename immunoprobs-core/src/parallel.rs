//! Fixed-size worker pool with static, contiguous sharding.
//!
//! Work is split up front into exactly `min(threads, len)` shards, each shard is
//! processed to completion by one worker and the per-shard results are returned
//! in shard order. There is no work stealing between shards and no shared
//! mutable state: the only synchronisation point is the final gather.
use log::debug;
use rayon::prelude::*;

use crate::config::{Config, ThreadCount};
use crate::errors::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    threads: ThreadCount,
}

impl WorkerPool {
    pub fn new(threads: ThreadCount) -> Self {
        WorkerPool { threads }
    }

    ///
    /// Create a pool from a raw worker count, rejecting zero.
    ///
    pub fn with_threads(threads: usize) -> ConfigResult<Self> {
        Ok(WorkerPool::new(ThreadCount::new(threads)?))
    }

    pub fn from_config(config: &Config) -> ConfigResult<Self> {
        Ok(WorkerPool::new(config.threads()?))
    }

    pub fn threads(&self) -> usize {
        self.threads.get()
    }

    /// Workers actually spawned for `len` items.
    pub fn num_workers(&self, len: usize) -> usize {
        self.threads.get().min(len)
    }

    ///
    /// Run `func` once per shard of `items` and return the results in shard
    /// order.
    ///
    /// # Arguments
    ///
    /// - items: the work to split, shared read-only between workers
    /// - func: the per-shard function
    ///
    /// # Returns
    ///
    /// One result per shard; empty when `items` is empty.
    ///
    pub fn map_shards<T, R, F>(&self, items: &[T], func: F) -> ConfigResult<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&[T]) -> R + Sync,
    {
        let workers = self.num_workers(items.len());
        if workers == 0 {
            return Ok(Vec::new());
        }

        let shards = split_even(items, workers);
        debug!(
            "Dispatching {} items over {} workers (shard sizes: {:?})",
            items.len(),
            workers,
            shards.iter().map(|s| s.len()).collect::<Vec<_>>()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| ConfigError::WorkerPool(e.to_string()))?;

        Ok(pool.install(|| shards.into_par_iter().map(|shard| func(shard)).collect()))
    }
}

///
/// Split a slice into `parts` contiguous shards whose sizes differ by at most
/// one; the first `len % parts` shards carry the extra item.
///
pub fn split_even<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    if parts == 0 {
        return Vec::new();
    }
    let base = items.len() / parts;
    let extra = items.len() % parts;

    let mut shards = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        shards.push(&items[start..start + size]);
        start += size;
    }
    shards
}
