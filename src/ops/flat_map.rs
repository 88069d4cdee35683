use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

use crate::{
  error::{catch_fault, RxError},
  gate::TerminalGate,
  observer::{Observer, Subscriber},
  stream::Stream,
};

/// Maps every item to an inner stream and merges the inner streams.
///
/// Inner streams are subscribed as soon as they are produced, so their
/// values may interleave in any order. The result completes once the
/// source and every inner stream have completed.
pub fn flat_map<T, R, F>(source: Stream<T>, f: F) -> Stream<R>
where
  T: 'static,
  R: 'static,
  F: Fn(T) -> Stream<R> + Send + Sync + 'static,
{
  try_flat_map(source, move |v| Ok(f(v)))
}

/// Like [`flat_map`], but producing the inner stream may fail.
pub fn try_flat_map<T, R, F>(source: Stream<T>, f: F) -> Stream<R>
where
  T: 'static,
  R: 'static,
  F: Fn(T) -> Result<Stream<R>, RxError> + Send + Sync + 'static,
{
  let func = Arc::new(f);
  Stream::create(move |observer| {
    let state = Arc::new(MergeState::new(observer));
    source.subscribe(FlatMapOuterObserver { state, func: func.clone() });
    Ok(())
  })
}

/// Keeps track of how many streams are still running for one subscription.
///
/// `active` starts at one for the outer stream; every inner stream adds one
/// before it is subscribed and gives it back when it completes.
pub struct MergeState<R> {
  observer: Subscriber<R>,
  gate: TerminalGate,
  active: AtomicUsize,
}

impl<R> MergeState<R> {
  fn new(observer: Subscriber<R>) -> Self {
    MergeState {
      observer,
      gate: TerminalGate::new(),
      active: AtomicUsize::new(1),
    }
  }

  fn register_new_stream(&self) { self.active.fetch_add(1, Ordering::AcqRel); }

  fn emit(&self, value: R) {
    if !self.gate.is_closed() {
      self.observer.next(value);
    }
  }

  fn fail(&self, err: RxError) {
    if self.gate.close() {
      self.observer.error(err);
    }
  }

  fn stream_completed(&self) {
    if self.active.fetch_sub(1, Ordering::AcqRel) == 1 && self.gate.close() {
      self.observer.complete();
    }
  }
}

pub struct FlatMapOuterObserver<R, F> {
  state: Arc<MergeState<R>>,
  func: Arc<F>,
}

impl<T, R, F> Observer<T> for FlatMapOuterObserver<R, F>
where
  R: 'static,
  F: Fn(T) -> Result<Stream<R>, RxError> + Send + Sync,
{
  fn next(&self, value: T) {
    if self.state.gate.is_closed() {
      return;
    }
    match catch_fault(|| (self.func)(value)) {
      Ok(inner) => {
        // count before subscribing, a synchronous inner stream completes
        // inside `subscribe`
        self.state.register_new_stream();
        inner.subscribe(FlatMapInnerObserver { state: self.state.clone() });
      }
      Err(err) => self.state.fail(err),
    }
  }

  fn error(&self, err: RxError) { self.state.fail(err) }

  fn complete(&self) { self.state.stream_completed() }
}

pub struct FlatMapInnerObserver<R> {
  state: Arc<MergeState<R>>,
}

impl<R> Observer<R> for FlatMapInnerObserver<R> {
  fn next(&self, value: R) { self.state.emit(value) }

  fn error(&self, err: RxError) { self.state.fail(err) }

  fn complete(&self) { self.state.stream_completed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::sync::{Arc, Mutex};

  #[derive(Default)]
  struct Events {
    values: Mutex<Vec<i32>>,
    errors: Mutex<Vec<RxError>>,
    completes: Mutex<usize>,
  }

  impl Observer<i32> for Events {
    fn next(&self, value: i32) { self.values.lock().unwrap().push(value) }

    fn error(&self, err: RxError) { self.errors.lock().unwrap().push(err) }

    fn complete(&self) { *self.completes.lock().unwrap() += 1 }
  }

  #[test]
  fn merges_synchronous_inner_streams() {
    let events = Arc::new(Events::default());
    factory::from_iter(vec![1, 2])
      .flat_map(|x| factory::from_iter(vec![x, x + 10]))
      .subscribe(events.clone());

    assert_eq!(*events.values.lock().unwrap(), vec![1, 11, 2, 12]);
    assert_eq!(*events.completes.lock().unwrap(), 1);
    assert!(events.errors.lock().unwrap().is_empty());
  }

  #[test]
  fn waits_for_late_inner_completion() {
    let pending: Arc<Mutex<Vec<Subscriber<i32>>>> = Arc::new(Mutex::new(vec![]));
    let c_pending = pending.clone();
    let events = Arc::new(Events::default());
    factory::from_iter(vec![1, 2])
      .flat_map(move |x| {
        let pending = c_pending.clone();
        Stream::create(move |s| {
          s.next(x);
          pending.lock().unwrap().push(s);
          Ok(())
        })
      })
      .subscribe(events.clone());

    // outer completed, both inner streams still open
    assert_eq!(*events.values.lock().unwrap(), vec![1, 2]);
    assert_eq!(*events.completes.lock().unwrap(), 0);

    let inner = std::mem::take(&mut *pending.lock().unwrap());
    inner[0].complete();
    assert_eq!(*events.completes.lock().unwrap(), 0);
    inner[1].next(20);
    inner[1].complete();
    assert_eq!(*events.values.lock().unwrap(), vec![1, 2, 20]);
    assert_eq!(*events.completes.lock().unwrap(), 1);
  }

  #[test]
  fn inner_error_drops_later_values() {
    let pending: Arc<Mutex<Vec<Subscriber<i32>>>> = Arc::new(Mutex::new(vec![]));
    let c_pending = pending.clone();
    let events = Arc::new(Events::default());
    factory::from_iter(vec![1, 2])
      .flat_map(move |x| {
        let pending = c_pending.clone();
        Stream::create(move |s| {
          pending.lock().unwrap().push(s);
          if x == 2 {
            return Err(RxError::msg("inner failed"));
          }
          Ok(())
        })
      })
      .subscribe(events.clone());

    assert_eq!(*events.errors.lock().unwrap(), vec![RxError::msg("inner failed")]);

    // the first inner stream keeps running but its output is discarded
    let inner = std::mem::take(&mut *pending.lock().unwrap());
    inner[0].next(100);
    inner[0].complete();
    assert!(events.values.lock().unwrap().is_empty());
    assert_eq!(*events.completes.lock().unwrap(), 0);
    assert_eq!(events.errors.lock().unwrap().len(), 1);
  }

  #[test]
  fn mapping_fault_terminates() {
    let events = Arc::new(Events::default());
    factory::from_iter(1..=3)
      .try_flat_map(|x| if x == 2 { Err(RxError::msg("no stream")) } else { Ok(factory::of(x)) })
      .subscribe(events.clone());

    assert_eq!(*events.values.lock().unwrap(), vec![1]);
    assert_eq!(*events.errors.lock().unwrap(), vec![RxError::msg("no stream")]);
    assert_eq!(*events.completes.lock().unwrap(), 0);
  }

  #[test]
  fn outer_error_wins_over_completion() {
    let events = Arc::new(Events::default());
    Stream::create(|s: Subscriber<i32>| {
      s.next(1);
      s.error(RxError::msg("outer"));
      Ok(())
    })
    .flat_map(factory::of)
    .subscribe(events.clone());

    assert_eq!(*events.values.lock().unwrap(), vec![1]);
    assert_eq!(*events.errors.lock().unwrap(), vec![RxError::msg("outer")]);
    assert_eq!(*events.completes.lock().unwrap(), 0);
  }

  #[test]
  fn empty_source_completes() {
    let events = Arc::new(Events::default());
    factory::empty::<i32>().flat_map(factory::of).subscribe(events.clone());
    assert_eq!(*events.completes.lock().unwrap(), 1);
  }
}
