use std::{
  fmt::{Debug, Formatter},
  sync::Arc,
};

use crate::{
  error::{catch_fault, RxError},
  observer::{Observer, Subscriber},
  subscription::{SafeObserver, Subscription},
};

type SubscribeFn<T> = dyn Fn(Subscriber<T>) -> Result<(), RxError> + Send + Sync;

/// A recipe for producing a sequence of `T` followed by one terminal signal.
///
/// A `Stream` is inert: nothing runs until [`subscribe`](Stream::subscribe)
/// is called, and every subscribe call starts an independent run of the
/// subscription function. Cloning is cheap and shares the function.
pub struct Stream<T> {
  subscribe_fn: Arc<SubscribeFn<T>>,
}

impl<T> Clone for Stream<T> {
  fn clone(&self) -> Self { Stream { subscribe_fn: self.subscribe_fn.clone() } }
}

impl<T> Debug for Stream<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str("Stream") }
}

impl<T: 'static> Stream<T> {
  /// Creates a stream from a subscription function.
  ///
  /// The function receives the consumer of one subscription. Returning
  /// `Err` (or panicking) before a terminal signal was sent delivers that
  /// error to the consumer.
  ///
  /// ```rust
  /// use rxstream::prelude::*;
  ///
  /// let numbers = Stream::create(|s: Subscriber<i32>| {
  ///   s.next(1);
  ///   s.next(2);
  ///   s.complete();
  ///   Ok(())
  /// });
  /// numbers.subscribe(FnObserver::new(|v: i32| println!("{}", v)));
  /// ```
  pub fn create<F>(subscribe_fn: F) -> Self
  where
    F: Fn(Subscriber<T>) -> Result<(), RxError> + Send + Sync + 'static,
  {
    Stream { subscribe_fn: Arc::new(subscribe_fn) }
  }

  /// Runs the subscription function on the calling thread with `observer`
  /// wrapped in a cancellation-aware guard.
  ///
  /// The returned subscription is live immediately, even if the producer
  /// keeps running on another thread.
  pub fn subscribe<O>(&self, observer: O) -> Subscription
  where
    O: Observer<T> + 'static,
  {
    let subscription = Subscription::default();
    let subscriber = Subscriber::new(SafeObserver::new(observer, subscription.clone()));
    if let Err(err) = catch_fault(|| (self.subscribe_fn)(subscriber.clone())) {
      subscriber.error(err);
    }
    subscription
  }
}
