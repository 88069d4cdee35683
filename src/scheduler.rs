//! Schedulers decide on which thread a unit of work runs.
//!
//! | Scheduler | Pool | Ordering |
//! |---|---|---|
//! | [`IoScheduler`] | grows on demand, reclaims idle workers | none |
//! | [`ComputationScheduler`] | one worker per CPU | none |
//! | [`SingleScheduler`] | one worker | FIFO, never overlapping |
//!
//! Every scheduler owns its pool until [`Scheduler::shutdown`] is called or
//! its last handle is dropped; after that its worker threads exit.

use std::{
  panic::{self, AssertUnwindSafe},
  sync::{Mutex, MutexGuard, PoisonError},
  time::Duration,
};

use crate::error::{RxError, SchedulerError};

#[cfg(feature = "futures-scheduler")]
mod computation_scheduler;
#[cfg(feature = "tokio-scheduler")]
mod io_scheduler;
#[cfg(feature = "futures-scheduler")]
mod single_scheduler;

#[cfg(feature = "futures-scheduler")]
pub use computation_scheduler::ComputationScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use io_scheduler::IoScheduler;
#[cfg(feature = "futures-scheduler")]
pub use single_scheduler::SingleScheduler;

/// A unit of work submitted to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A Scheduler runs submitted tasks asynchronously on its own workers.
pub trait Scheduler: Send + Sync {
  /// Submits `task` for execution.
  ///
  /// The caller cannot wait for the task or observe its outcome. The only
  /// failure is a rejection because the scheduler was shut down.
  fn execute(&self, task: Task) -> Result<(), SchedulerError>;

  /// Stops accepting tasks and releases the worker pool.
  fn shutdown(&self);

  fn is_shutdown(&self) -> bool;
}

impl<S: Scheduler + ?Sized> Scheduler for std::sync::Arc<S> {
  #[inline]
  fn execute(&self, task: Task) -> Result<(), SchedulerError> { (**self).execute(task) }

  #[inline]
  fn shutdown(&self) { (**self).shutdown() }

  #[inline]
  fn is_shutdown(&self) -> bool { (**self).is_shutdown() }
}

/// Settings for building a scheduler's worker pool.
///
/// `pool_size` means the worker count for [`ComputationScheduler`] and the
/// upper bound of on-demand workers for [`IoScheduler`]; `keep_alive` only
/// applies to [`IoScheduler`]. [`SingleScheduler`] always has one worker.
#[derive(Debug, Clone)]
pub struct PoolConfig {
  pub(crate) name_prefix: Option<String>,
  pub(crate) pool_size: Option<usize>,
  pub(crate) keep_alive: Duration,
}

impl Default for PoolConfig {
  fn default() -> Self {
    PoolConfig {
      name_prefix: None,
      pool_size: None,
      keep_alive: Duration::from_secs(10),
    }
  }
}

impl PoolConfig {
  pub fn new() -> Self { Self::default() }

  /// Prefix for worker thread names.
  pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = Some(prefix.into());
    self
  }

  pub fn pool_size(mut self, size: usize) -> Self {
    self.pool_size = Some(size.max(1));
    self
  }

  /// How long an idle on-demand worker lives before it is reclaimed.
  pub fn keep_alive(mut self, keep_alive: Duration) -> Self {
    self.keep_alive = keep_alive;
    self
  }
}

/// The pool owned by a scheduler, `None` once shut down.
pub(crate) struct PoolSlot<P> {
  name: &'static str,
  pool: Mutex<Option<P>>,
}

impl<P> PoolSlot<P> {
  pub(crate) fn new(name: &'static str, pool: P) -> Self {
    PoolSlot { name, pool: Mutex::new(Some(pool)) }
  }

  fn lock(&self) -> MutexGuard<'_, Option<P>> {
    self.pool.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Runs `f` with the pool, or reports a rejection when shut down.
  pub(crate) fn with<R>(&self, f: impl FnOnce(&P) -> R) -> Result<R, SchedulerError> {
    match self.lock().as_ref() {
      Some(pool) => Ok(f(pool)),
      None => {
        tracing::warn!(scheduler = self.name, "task rejected, scheduler is shut down");
        Err(SchedulerError::Shutdown { scheduler: self.name })
      }
    }
  }

  /// Removes the pool, returning it to the caller on the first call only.
  pub(crate) fn take(&self) -> Option<P> {
    let pool = self.lock().take();
    if pool.is_some() {
      tracing::debug!(scheduler = self.name, "scheduler shut down");
    }
    pool
  }

  pub(crate) fn is_empty(&self) -> bool { self.lock().is_none() }
}

/// Wraps a task so that a panic is logged instead of unwinding the worker.
pub(crate) fn guard_task(scheduler: &'static str, task: Task) -> impl FnOnce() + Send + 'static {
  move || {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
      let err = RxError::from_panic(payload);
      tracing::error!(scheduler, error = %err, "scheduled task panicked");
    }
  }
}
