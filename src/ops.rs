//! Operators over [`Stream`].
//!
//! Every operator is a free function building a new stream around its
//! source; [`StreamExt`] offers the same operators as chainable methods.

use crate::{error::RxError, scheduler::Scheduler, stream::Stream};
use std::sync::Arc;

pub mod complete_status;
pub mod filter;
pub mod flat_map;
pub mod map;
pub mod observe_on;
pub mod subscribe_on;

pub use complete_status::{complete_status, CompleteStatus};
pub use filter::{filter, try_filter};
pub use flat_map::{flat_map, try_flat_map};
pub use map::{map, try_map};
pub use observe_on::observe_on;
pub use subscribe_on::subscribe_on;

/// Method syntax for the operators in this module.
///
/// ```rust
/// use rxstream::prelude::*;
///
/// factory::from_iter(1..=5)
///   .filter(|v| v % 2 == 0)
///   .map(|v| format!("Value: {}", v))
///   .flat_map(factory::of)
///   .subscribe(FnObserver::new(|v: String| println!("{}", v)));
/// ```
pub trait StreamExt<T>: Sized {
  fn map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> R + Send + Sync + 'static;

  fn try_map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> Result<R, RxError> + Send + Sync + 'static;

  fn filter<F>(self, predicate: F) -> Stream<T>
  where
    F: Fn(&T) -> bool + Send + Sync + 'static;

  fn try_filter<F>(self, predicate: F) -> Stream<T>
  where
    F: Fn(&T) -> Result<bool, RxError> + Send + Sync + 'static;

  fn flat_map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> Stream<R> + Send + Sync + 'static;

  fn try_flat_map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> Result<Stream<R>, RxError> + Send + Sync + 'static;

  fn subscribe_on<SD>(self, scheduler: SD) -> Stream<T>
  where
    SD: Scheduler + 'static;

  fn observe_on<SD>(self, scheduler: SD) -> Stream<T>
  where
    T: Send,
    SD: Scheduler + 'static;

  fn complete_status(self) -> (Stream<T>, Arc<CompleteStatus>);
}

impl<T: 'static> StreamExt<T> for Stream<T> {
  #[inline]
  fn map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
  {
    map::map(self, f)
  }

  #[inline]
  fn try_map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> Result<R, RxError> + Send + Sync + 'static,
  {
    map::try_map(self, f)
  }

  #[inline]
  fn filter<F>(self, predicate: F) -> Stream<T>
  where
    F: Fn(&T) -> bool + Send + Sync + 'static,
  {
    filter::filter(self, predicate)
  }

  #[inline]
  fn try_filter<F>(self, predicate: F) -> Stream<T>
  where
    F: Fn(&T) -> Result<bool, RxError> + Send + Sync + 'static,
  {
    filter::try_filter(self, predicate)
  }

  #[inline]
  fn flat_map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> Stream<R> + Send + Sync + 'static,
  {
    flat_map::flat_map(self, f)
  }

  #[inline]
  fn try_flat_map<R, F>(self, f: F) -> Stream<R>
  where
    R: 'static,
    F: Fn(T) -> Result<Stream<R>, RxError> + Send + Sync + 'static,
  {
    flat_map::try_flat_map(self, f)
  }

  #[inline]
  fn subscribe_on<SD>(self, scheduler: SD) -> Stream<T>
  where
    SD: Scheduler + 'static,
  {
    subscribe_on::subscribe_on(self, scheduler)
  }

  #[inline]
  fn observe_on<SD>(self, scheduler: SD) -> Stream<T>
  where
    T: Send,
    SD: Scheduler + 'static,
  {
    observe_on::observe_on(self, scheduler)
  }

  #[inline]
  fn complete_status(self) -> (Stream<T>, Arc<CompleteStatus>) {
    complete_status::complete_status(self)
  }
}
