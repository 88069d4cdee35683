use std::sync::Arc;

use crate::{
  error::{catch_fault, RxError},
  gate::TerminalGate,
  observer::{Observer, Subscriber},
  stream::Stream,
};

/// Emit only those items from a stream that pass a predicate test.
pub fn filter<T, F>(source: Stream<T>, predicate: F) -> Stream<T>
where
  T: 'static,
  F: Fn(&T) -> bool + Send + Sync + 'static,
{
  try_filter(source, move |v| Ok(predicate(v)))
}

/// Like [`filter`], but the predicate may fail, terminating the stream.
pub fn try_filter<T, F>(source: Stream<T>, predicate: F) -> Stream<T>
where
  T: 'static,
  F: Fn(&T) -> Result<bool, RxError> + Send + Sync + 'static,
{
  let predicate = Arc::new(predicate);
  Stream::create(move |observer| {
    source.subscribe(FilterObserver {
      observer,
      predicate: predicate.clone(),
      gate: TerminalGate::new(),
    });
    Ok(())
  })
}

pub struct FilterObserver<T, F> {
  observer: Subscriber<T>,
  predicate: Arc<F>,
  gate: TerminalGate,
}

impl<T, F> Observer<T> for FilterObserver<T, F>
where
  F: Fn(&T) -> Result<bool, RxError> + Send + Sync,
{
  fn next(&self, value: T) {
    if self.gate.is_closed() {
      return;
    }
    match catch_fault(|| (self.predicate)(&value)) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
      Err(err) => self.error(err),
    }
  }

  fn error(&self, err: RxError) {
    if self.gate.close() {
      self.observer.error(err);
    }
  }

  fn complete(&self) {
    if self.gate.close() {
      self.observer.complete();
    }
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::sync::{Arc, Mutex};

  #[test]
  fn shared_source_filters_independently() {
    let evens = Arc::new(Mutex::new(vec![]));
    let c_evens = evens.clone();
    let source = factory::from_iter(1..=5);
    source.clone().filter(|v| v % 2 == 0).subscribe(FnObserver::new(move |v| {
      c_evens.lock().unwrap().push(v);
    }));

    let odds = Arc::new(Mutex::new(vec![]));
    let c_odds = odds.clone();
    source.filter(|v| v % 2 == 1).subscribe(FnObserver::new(move |v| {
      c_odds.lock().unwrap().push(v);
    }));

    assert_eq!(*evens.lock().unwrap(), vec![2, 4]);
    assert_eq!(*odds.lock().unwrap(), vec![1, 3, 5]);
  }

  #[test]
  fn completes_after_filtering() {
    let completed = Arc::new(Mutex::new(false));
    let c_completed = completed.clone();
    factory::from_iter(vec![1, 3, 5])
      .filter(|v| v % 2 == 0)
      .subscribe(
        FnObserver::new(|_: i32| panic!("nothing should pass"))
          .on_complete(move || *c_completed.lock().unwrap() = true),
      );
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn predicate_fault_terminates() {
    let values = Arc::new(Mutex::new(vec![]));
    let errors = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_values, c_errors, c_completed) = (values.clone(), errors.clone(), completed.clone());
    factory::from_iter(1..=5)
      .try_filter(|v| if *v < 3 { Ok(true) } else { Err(RxError::msg("filter error")) })
      .subscribe(
        FnObserver::new(move |v| c_values.lock().unwrap().push(v))
          .on_error(move |e| c_errors.lock().unwrap().push(e))
          .on_complete(move || *c_completed.lock().unwrap() = true),
      );

    assert_eq!(*values.lock().unwrap(), vec![1, 2]);
    assert_eq!(*errors.lock().unwrap(), vec![RxError::msg("filter error")]);
    assert!(!*completed.lock().unwrap());
  }

  #[test]
  fn panicking_predicate_becomes_error() {
    let values = Arc::new(Mutex::new(vec![]));
    let errors = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (c_values, c_errors, c_completed) = (values.clone(), errors.clone(), completed.clone());
    factory::from_iter(1..=5)
      .filter(|v| if *v == 2 { panic!("bad predicate") } else { true })
      .subscribe(
        FnObserver::new(move |v| c_values.lock().unwrap().push(v))
          .on_error(move |e| c_errors.lock().unwrap().push(e))
          .on_complete(move || *c_completed.lock().unwrap() = true),
      );

    assert_eq!(*values.lock().unwrap(), vec![1]);
    assert_eq!(*errors.lock().unwrap(), vec![RxError::Panic("bad predicate".into())]);
    assert!(!*completed.lock().unwrap());
  }
}
