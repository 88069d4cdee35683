//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use std::{
  fmt::{Debug, Formatter},
  sync::Arc,
};

use crate::error::RxError;

// ============================================================================
// Observer Trait
// ============================================================================

/// The consumer of a stream.
///
/// An observer receives zero or more `next` calls followed by at most one
/// terminal signal, `error` or `complete`. All methods take `&self` because
/// one observer may be fed from several threads at once (for example by the
/// inner streams of a `flat_map`); implementations use interior mutability
/// for their own state.
pub trait Observer<T>: Send + Sync {
  /// Receive the next value from the stream.
  fn next(&self, value: T);

  /// Receive the error that terminates the stream.
  fn error(&self, err: RxError);

  /// Receive the completion of the stream.
  fn complete(&self);
}

impl<T, O> Observer<T> for Arc<O>
where
  O: Observer<T> + ?Sized,
{
  #[inline]
  fn next(&self, value: T) { (**self).next(value) }

  #[inline]
  fn error(&self, err: RxError) { (**self).error(err) }

  #[inline]
  fn complete(&self) { (**self).complete() }
}

// ============================================================================
// Subscriber - type-erased, cloneable observer handle
// ============================================================================

/// The observer handed to a subscription function.
///
/// A `Subscriber` hides the concrete observer chain behind a trait object
/// so that neither the subscription function nor the `Stream` type has to
/// name it. Cloning is an `Arc` clone; every clone feeds the same consumer.
pub struct Subscriber<T> {
  inner: Arc<dyn Observer<T>>,
}

impl<T> Subscriber<T> {
  pub fn new<O>(observer: O) -> Self
  where
    O: Observer<T> + 'static,
  {
    Subscriber { inner: Arc::new(observer) }
  }
}

impl<T> Clone for Subscriber<T> {
  fn clone(&self) -> Self { Subscriber { inner: self.inner.clone() } }
}

impl<T> Debug for Subscriber<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str("Subscriber") }
}

impl<T> Observer<T> for Subscriber<T> {
  #[inline]
  fn next(&self, value: T) { self.inner.next(value) }

  #[inline]
  fn error(&self, err: RxError) { self.inner.error(err) }

  #[inline]
  fn complete(&self) { self.inner.complete() }
}

// ============================================================================
// FnObserver - Closure adapter
// ============================================================================

fn ignore_error(_: RxError) {}

fn ignore_complete() {}

/// An observer assembled from closures.
///
/// ```rust
/// use rxstream::prelude::*;
///
/// let observer = FnObserver::new(|v: i32| println!("{}", v))
///   .on_error(|e| eprintln!("{}", e))
///   .on_complete(|| println!("done"));
/// factory::of(1).subscribe(observer);
/// ```
///
/// Errors and completion are ignored unless handlers are supplied.
#[derive(Clone)]
pub struct FnObserver<N, E = fn(RxError), C = fn()> {
  next: N,
  error: E,
  complete: C,
}

impl<N> FnObserver<N> {
  pub fn new<T>(next: N) -> Self
  where
    N: Fn(T) + Send + Sync,
  {
    FnObserver {
      next,
      error: ignore_error as fn(RxError),
      complete: ignore_complete as fn(),
    }
  }
}

impl<N, E, C> FnObserver<N, E, C> {
  pub fn on_error<E2>(self, error: E2) -> FnObserver<N, E2, C>
  where
    E2: Fn(RxError) + Send + Sync,
  {
    FnObserver { next: self.next, error, complete: self.complete }
  }

  pub fn on_complete<C2>(self, complete: C2) -> FnObserver<N, E, C2>
  where
    C2: Fn() + Send + Sync,
  {
    FnObserver { next: self.next, error: self.error, complete }
  }
}

impl<T, N, E, C> Observer<T> for FnObserver<N, E, C>
where
  N: Fn(T) + Send + Sync,
  E: Fn(RxError) + Send + Sync,
  C: Fn() + Send + Sync,
{
  #[inline]
  fn next(&self, value: T) { (self.next)(value) }

  #[inline]
  fn error(&self, err: RxError) { (self.error)(err) }

  #[inline]
  fn complete(&self) { (self.complete)() }
}

// ============================================================================
// Tests
// ============================================================================
