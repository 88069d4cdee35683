use std::sync::Arc;

use crate::{
  error::RxError,
  observer::{Observer, Subscriber},
  scheduler::{Scheduler, Task},
  stream::Stream,
};

/// Re-emits all notifications from `source` on `scheduler`.
///
/// Only the delivery to the downstream consumer moves; the producer keeps
/// running wherever it already runs.
pub fn observe_on<T, SD>(source: Stream<T>, scheduler: SD) -> Stream<T>
where
  T: Send + 'static,
  SD: Scheduler + 'static,
{
  let scheduler = Arc::new(scheduler);
  Stream::create(move |observer| {
    source.subscribe(ObserveOnObserver { observer, scheduler: scheduler.clone() });
    Ok(())
  })
}

pub struct ObserveOnObserver<T, SD> {
  observer: Subscriber<T>,
  scheduler: Arc<SD>,
}

impl<T, SD: Scheduler> ObserveOnObserver<T, SD> {
  fn schedule(&self, task: Task) {
    if let Err(err) = self.scheduler.execute(task) {
      self.observer.error(RxError::Scheduler(err));
    }
  }
}

impl<T, SD> Observer<T> for ObserveOnObserver<T, SD>
where
  T: Send + 'static,
  SD: Scheduler,
{
  fn next(&self, value: T) {
    let observer = self.observer.clone();
    self.schedule(Box::new(move || observer.next(value)));
  }

  fn error(&self, err: RxError) {
    let observer = self.observer.clone();
    self.schedule(Box::new(move || observer.error(err)));
  }

  fn complete(&self) {
    let observer = self.observer.clone();
    self.schedule(Box::new(move || observer.complete()));
  }
}
