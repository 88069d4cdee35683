//! Ready-made streams.

use crate::{error::RxError, observer::Observer, stream::Stream};

/// Emits `value` once, then completes.
pub fn of<T>(value: T) -> Stream<T>
where
  T: Clone + Send + Sync + 'static,
{
  Stream::create(move |s| {
    s.next(value.clone());
    s.complete();
    Ok(())
  })
}

/// Emits every item of `iter` in order, then completes.
///
/// The iterable is cloned for each subscription so the stream can be
/// subscribed to repeatedly.
pub fn from_iter<I>(iter: I) -> Stream<I::Item>
where
  I: IntoIterator + Clone + Send + Sync + 'static,
  I::Item: 'static,
{
  Stream::create(move |s| {
    for v in iter.clone() {
      s.next(v);
    }
    s.complete();
    Ok(())
  })
}

/// Completes without emitting.
pub fn empty<T: 'static>() -> Stream<T> {
  Stream::create(|s| {
    s.complete();
    Ok(())
  })
}

/// Terminates with `err` without emitting.
pub fn throw<T: 'static>(err: RxError) -> Stream<T> {
  Stream::create(move |s| {
    s.error(err.clone());
    Ok(())
  })
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::sync::{Arc, Mutex};

  #[derive(Default)]
  struct Events {
    values: Mutex<Vec<i32>>,
    errors: Mutex<Vec<RxError>>,
    completed: Mutex<bool>,
  }

  impl Observer<i32> for Events {
    fn next(&self, value: i32) { self.values.lock().unwrap().push(value) }

    fn error(&self, err: RxError) { self.errors.lock().unwrap().push(err) }

    fn complete(&self) { *self.completed.lock().unwrap() = true }
  }

  #[test]
  fn of_emits_once() {
    let events = Arc::new(Events::default());
    factory::of(5).subscribe(events.clone());
    assert_eq!(*events.values.lock().unwrap(), vec![5]);
    assert!(*events.completed.lock().unwrap());
  }

  #[test]
  fn from_iter_is_repeatable() {
    let stream = factory::from_iter(1..4);
    let events = Arc::new(Events::default());
    stream.subscribe(events.clone());
    stream.subscribe(events.clone());
    assert_eq!(*events.values.lock().unwrap(), vec![1, 2, 3, 1, 2, 3]);
  }

  #[test]
  fn empty_and_throw() {
    let events = Arc::new(Events::default());
    factory::empty::<i32>().subscribe(events.clone());
    assert!(events.values.lock().unwrap().is_empty());
    assert!(*events.completed.lock().unwrap());

    let events = Arc::new(Events::default());
    factory::throw::<i32>(RxError::msg("nope")).subscribe(events.clone());
    assert_eq!(*events.errors.lock().unwrap(), vec![RxError::msg("nope")]);
    assert!(!*events.completed.lock().unwrap());
  }
}
