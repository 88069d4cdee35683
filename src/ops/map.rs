use std::sync::Arc;

use crate::{
  error::{catch_fault, RxError},
  gate::TerminalGate,
  observer::{Observer, Subscriber},
  stream::Stream,
};

/// Creates a new stream which calls a closure on each element and uses
/// its return as the value.
///
/// A panic inside `f` terminates the stream with [`RxError::Panic`].
pub fn map<T, R, F>(source: Stream<T>, f: F) -> Stream<R>
where
  T: 'static,
  R: 'static,
  F: Fn(T) -> R + Send + Sync + 'static,
{
  try_map(source, move |v| Ok(f(v)))
}

/// Like [`map`], but the closure may fail. The first `Err` is delivered as
/// the stream's error and the triggering value is dropped.
pub fn try_map<T, R, F>(source: Stream<T>, f: F) -> Stream<R>
where
  T: 'static,
  R: 'static,
  F: Fn(T) -> Result<R, RxError> + Send + Sync + 'static,
{
  let func = Arc::new(f);
  Stream::create(move |observer| {
    source.subscribe(MapObserver {
      observer,
      func: func.clone(),
      gate: TerminalGate::new(),
    });
    Ok(())
  })
}

pub struct MapObserver<R, F> {
  observer: Subscriber<R>,
  func: Arc<F>,
  gate: TerminalGate,
}

impl<R, F> MapObserver<R, F> {
  fn fail(&self, err: RxError) {
    if self.gate.close() {
      self.observer.error(err);
    }
  }
}

impl<T, R, F> Observer<T> for MapObserver<R, F>
where
  F: Fn(T) -> Result<R, RxError> + Send + Sync,
{
  fn next(&self, value: T) {
    if self.gate.is_closed() {
      return;
    }
    match catch_fault(|| (self.func)(value)) {
      Ok(mapped) => self.observer.next(mapped),
      Err(err) => self.fail(err),
    }
  }

  fn error(&self, err: RxError) { self.fail(err) }

  fn complete(&self) {
    if self.gate.close() {
      self.observer.complete();
    }
  }
}
