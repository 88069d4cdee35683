use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use crate::{error::RxError, gate::TerminalGate, observer::Observer};

/// A handle to suppress further delivery to one subscription.
pub trait SubscriptionLike {
  /// Stops delivery to the consumer. Calling it more than once has no
  /// further effect.
  fn dispose(&self);

  fn is_disposed(&self) -> bool;
}

/// Subscription returns from `Stream::subscribe` to allow disposing.
///
/// Disposal is delivery-side only: the producer is not told to stop, the
/// guard installed at the subscribe point just stops forwarding.
#[derive(Clone, Debug, Default)]
pub struct Subscription {
  disposed: Arc<AtomicBool>,
}

impl Subscription {
  /// Activates "RAII" behavior for this subscription. That means
  /// `dispose()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `dispose()` is called immediately, which is probably not what you
  /// want!
  pub fn dispose_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard::new(self) }
}

impl SubscriptionLike for Subscription {
  #[inline]
  fn dispose(&self) { self.disposed.store(true, Ordering::Release); }

  #[inline]
  fn is_disposed(&self) -> bool { self.disposed.load(Ordering::Acquire) }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be disposed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(Subscription);

impl SubscriptionGuard {
  pub fn new(subscription: Subscription) -> SubscriptionGuard { SubscriptionGuard(subscription) }
}

impl SubscriptionLike for SubscriptionGuard {
  #[inline]
  fn dispose(&self) { self.0.dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.is_disposed() }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) { self.0.dispose() }
}

/// The guard wrapped around the consumer at every subscribe point.
///
/// Forwards nothing once the subscription is disposed or once a terminal
/// signal went through.
pub(crate) struct SafeObserver<O> {
  observer: O,
  subscription: Subscription,
  gate: TerminalGate,
}

impl<O> SafeObserver<O> {
  pub(crate) fn new(observer: O, subscription: Subscription) -> Self {
    SafeObserver { observer, subscription, gate: TerminalGate::new() }
  }

  #[inline]
  fn is_open(&self) -> bool { !self.subscription.is_disposed() && !self.gate.is_closed() }
}

impl<T, O> Observer<T> for SafeObserver<O>
where
  O: Observer<T>,
{
  fn next(&self, value: T) {
    if self.is_open() {
      self.observer.next(value);
    }
  }

  fn error(&self, err: RxError) {
    if !self.subscription.is_disposed() && self.gate.close() {
      self.observer.error(err);
    }
  }

  fn complete(&self) {
    if !self.subscription.is_disposed() && self.gate.close() {
      self.observer.complete();
    }
  }
}
