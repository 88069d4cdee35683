//! Error types carried through the `error` callback and returned by
//! schedulers.

use std::{
  any::Any,
  error::Error,
  fmt::{Debug, Formatter},
  io,
  panic::{self, AssertUnwindSafe},
  sync::Arc,
};

/// The error delivered to [`Observer::error`](crate::observer::Observer).
///
/// A stream never retries: once an `RxError` reaches a consumer the
/// subscription that produced it is finished.
#[derive(Clone, thiserror::Error)]
pub enum RxError {
  /// A caller-provided message.
  #[error("{0}")]
  Message(String),
  /// A panic caught inside a subscription function or an operator closure.
  #[error("panicked: {0}")]
  Panic(String),
  /// A scheduler refused to run work on behalf of the stream.
  #[error(transparent)]
  Scheduler(#[from] SchedulerError),
  /// Any other error, shared so the value stays `Clone`.
  #[error(transparent)]
  Custom(Arc<dyn Error + Send + Sync>),
}

impl RxError {
  pub fn msg(message: impl Into<String>) -> Self { RxError::Message(message.into()) }

  pub fn custom<E>(err: E) -> Self
  where
    E: Error + Send + Sync + 'static,
  {
    RxError::Custom(Arc::new(err))
  }

  pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
      (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
      s.clone()
    } else {
      "unknown panic payload".to_string()
    };
    RxError::Panic(message)
  }
}

impl Debug for RxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RxError::Message(m) => f.debug_tuple("Message").field(m).finish(),
      RxError::Panic(m) => f.debug_tuple("Panic").field(m).finish(),
      RxError::Scheduler(e) => f.debug_tuple("Scheduler").field(e).finish(),
      RxError::Custom(e) => f.debug_tuple("Custom").field(&e.to_string()).finish(),
    }
  }
}

/// `Custom` errors compare by identity of the shared error.
impl PartialEq for RxError {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (RxError::Message(a), RxError::Message(b)) => a == b,
      (RxError::Panic(a), RxError::Panic(b)) => a == b,
      (RxError::Scheduler(a), RxError::Scheduler(b)) => a == b,
      (RxError::Custom(a), RxError::Custom(b)) => Arc::ptr_eq(a, b),
      _ => false,
    }
  }
}

/// Errors produced by a [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulerError {
  /// The scheduler has been shut down and no longer accepts tasks.
  #[error("{scheduler} scheduler is shut down")]
  Shutdown { scheduler: &'static str },
  /// The worker pool could not be built.
  #[error("failed to start {scheduler} scheduler")]
  Start {
    scheduler: &'static str,
    #[source]
    source: Arc<io::Error>,
  },
}

impl SchedulerError {
  pub(crate) fn start(scheduler: &'static str, source: io::Error) -> Self {
    SchedulerError::Start { scheduler, source: Arc::new(source) }
  }
}

impl PartialEq for SchedulerError {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (SchedulerError::Shutdown { scheduler: a }, SchedulerError::Shutdown { scheduler: b }) => {
        a == b
      }
      (
        SchedulerError::Start { scheduler: a, source: sa },
        SchedulerError::Start { scheduler: b, source: sb },
      ) => a == b && Arc::ptr_eq(sa, sb),
      _ => false,
    }
  }
}

/// Runs `f`, converting a panic into [`RxError::Panic`].
///
/// This is the single point where user closures (subscription functions,
/// transforms, predicates) are invoked, so every fault surfaces as an
/// `Err`.
pub(crate) fn catch_fault<R>(f: impl FnOnce() -> Result<R, RxError>) -> Result<R, RxError> {
  panic::catch_unwind(AssertUnwindSafe(f))
    .unwrap_or_else(|payload| Err(RxError::from_panic(payload)))
}
