use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

use super::{guard_task, PoolConfig, PoolSlot, Scheduler, Task};
use crate::error::SchedulerError;

const NAME: &str = "io";
const DEFAULT_MAX_THREADS: usize = 512;

/// A cached pool for short, numerous or blocking tasks.
///
/// Backed by the blocking pool of a tokio runtime: a worker is started
/// whenever all existing ones are busy (up to `pool_size`, 512 by default)
/// and reclaimed after it has been idle for `keep_alive`.
///
/// Running and queued tasks keep the pool alive, so dropping the last
/// handle releases it once they finish. An explicit
/// [`shutdown`](Scheduler::shutdown) discards tasks that have not started.
#[derive(Clone)]
pub struct IoScheduler {
  pool: Arc<IoPool>,
}

struct IoPool(PoolSlot<Runtime>);

impl Drop for IoPool {
  // never blocks, the last handle is usually dropped on one of the pool's
  // own workers
  fn drop(&mut self) {
    if let Some(runtime) = self.0.take() {
      runtime.shutdown_background();
    }
  }
}

impl IoScheduler {
  pub fn new() -> Result<Self, SchedulerError> { Self::with_config(PoolConfig::default()) }

  pub fn with_config(config: PoolConfig) -> Result<Self, SchedulerError> {
    let max_threads = config.pool_size.unwrap_or(DEFAULT_MAX_THREADS);
    let name_prefix = config.name_prefix.unwrap_or_else(|| "rx-io".to_string());
    let runtime = Builder::new_current_thread()
      .thread_name(name_prefix.as_str())
      .max_blocking_threads(max_threads)
      .thread_keep_alive(config.keep_alive)
      .build()
      .map_err(|err| SchedulerError::start(NAME, err))?;
    tracing::debug!(
      scheduler = NAME,
      max_threads,
      keep_alive = ?config.keep_alive,
      name_prefix = %name_prefix,
      "scheduler started"
    );
    Ok(IoScheduler { pool: Arc::new(IoPool(PoolSlot::new(NAME, runtime))) })
  }
}

impl Scheduler for IoScheduler {
  fn execute(&self, task: Task) -> Result<(), SchedulerError> {
    let task = guard_task(NAME, task);
    let pool = self.pool.clone();
    self.pool.0.with(|runtime| {
      runtime.spawn_blocking(move || {
        task();
        drop(pool);
      });
    })
  }

  fn shutdown(&self) {
    if let Some(runtime) = self.pool.0.take() {
      runtime.shutdown_background();
    }
  }

  fn is_shutdown(&self) -> bool { self.pool.0.is_empty() }
}
