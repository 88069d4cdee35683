use futures::executor::ThreadPool;
use std::sync::Arc;

use super::{
  computation_scheduler::{create_thread_pool, spawn_task},
  PoolConfig, PoolSlot, Scheduler, Task,
};
use crate::error::SchedulerError;

const NAME: &str = "single";

/// Exactly one worker thread.
///
/// Tasks run one at a time in the order they were submitted, which makes
/// this the only scheduler with an ordering guarantee.
#[derive(Clone)]
pub struct SingleScheduler {
  pool: Arc<PoolSlot<ThreadPool>>,
}

impl SingleScheduler {
  pub fn new() -> Result<Self, SchedulerError> { Self::with_config(PoolConfig::default()) }

  /// `pool_size` and `keep_alive` are ignored.
  pub fn with_config(config: PoolConfig) -> Result<Self, SchedulerError> {
    let name_prefix = config.name_prefix.unwrap_or_else(|| "rx-single-".to_string());
    let pool = create_thread_pool(NAME, 1, name_prefix)?;
    Ok(SingleScheduler { pool: Arc::new(PoolSlot::new(NAME, pool)) })
  }
}

impl Scheduler for SingleScheduler {
  fn execute(&self, task: Task) -> Result<(), SchedulerError> {
    self.pool.with(|pool| spawn_task(pool, NAME, task))
  }

  fn shutdown(&self) { drop(self.pool.take()); }

  fn is_shutdown(&self) -> bool { self.pool.is_empty() }
}
