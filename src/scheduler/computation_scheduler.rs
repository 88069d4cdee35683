use futures::{executor::ThreadPool, future};
use std::{num::NonZeroUsize, sync::Arc, thread};

use super::{guard_task, PoolConfig, PoolSlot, Scheduler, Task};
use crate::error::SchedulerError;

const NAME: &str = "computation";

/// A fixed pool with one worker per available CPU, for CPU-bound work.
///
/// Tasks queue when every worker is busy. Clones share the same pool.
#[derive(Clone)]
pub struct ComputationScheduler {
  pool: Arc<PoolSlot<ThreadPool>>,
}

impl ComputationScheduler {
  pub fn new() -> Result<Self, SchedulerError> { Self::with_config(PoolConfig::default()) }

  pub fn with_config(config: PoolConfig) -> Result<Self, SchedulerError> {
    let pool_size = config.pool_size.unwrap_or_else(available_parallelism);
    let name_prefix = config.name_prefix.unwrap_or_else(|| "rx-computation-".to_string());
    let pool = create_thread_pool(NAME, pool_size, name_prefix)?;
    Ok(ComputationScheduler { pool: Arc::new(PoolSlot::new(NAME, pool)) })
  }
}

impl Scheduler for ComputationScheduler {
  fn execute(&self, task: Task) -> Result<(), SchedulerError> {
    self.pool.with(|pool| spawn_task(pool, NAME, task))
  }

  fn shutdown(&self) { drop(self.pool.take()); }

  fn is_shutdown(&self) -> bool { self.pool.is_empty() }
}

fn available_parallelism() -> usize { thread::available_parallelism().map_or(1, NonZeroUsize::get) }

pub(super) fn create_thread_pool(
  scheduler: &'static str,
  pool_size: usize,
  name_prefix: String,
) -> Result<ThreadPool, SchedulerError> {
  let pool = ThreadPool::builder()
    .pool_size(pool_size)
    .name_prefix(name_prefix.as_str())
    .create()
    .map_err(|err| SchedulerError::start(scheduler, err))?;
  tracing::debug!(scheduler, pool_size, name_prefix = %name_prefix, "scheduler started");
  Ok(pool)
}

/// Queued tasks still run after the last pool handle is dropped; the
/// workers exit once the queue drains.
pub(super) fn spawn_task(pool: &ThreadPool, scheduler: &'static str, task: Task) {
  let task = guard_task(scheduler, task);
  pool.spawn_ok(future::lazy(move |_| task()));
}
