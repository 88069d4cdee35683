use std::sync::Arc;

use crate::{scheduler::Scheduler, stream::Stream};

/// Specify the scheduler on which the stream will operate.
///
/// The subscription function of `source`, and therefore all of its
/// producer-side work, runs as a task on `scheduler` instead of the thread
/// calling `subscribe`. If the scheduler refuses the task the consumer
/// receives [`RxError::Scheduler`](crate::error::RxError::Scheduler).
pub fn subscribe_on<T, SD>(source: Stream<T>, scheduler: SD) -> Stream<T>
where
  T: 'static,
  SD: Scheduler + 'static,
{
  let scheduler = Arc::new(scheduler);
  Stream::create(move |observer| {
    let source = source.clone();
    scheduler.execute(Box::new(move || {
      source.subscribe(observer);
    }))?;
    Ok(())
  })
}

#[cfg(all(test, feature = "futures-scheduler", feature = "tokio-scheduler"))]
mod test {
  use crate::prelude::*;
  use std::{
    sync::{Arc, Mutex},
    thread,
  };

  #[test]
  fn thread_pool() {
    let pool = IoScheduler::new().unwrap();
    let res = Arc::new(Mutex::new(vec![]));
    let c_res = res.clone();
    let thread = Arc::new(Mutex::new(vec![]));
    let c_thread = thread.clone();
    let (stream, status) = factory::from_iter(1..5).subscribe_on(pool).complete_status();
    stream.subscribe(FnObserver::new(move |v| {
      c_res.lock().unwrap().push(v);
      c_thread.lock().unwrap().push(thread::current().id());
    }));

    CompleteStatus::wait_for_end(&status);
    assert!(status.is_completed());
    assert_eq!(*res.lock().unwrap(), (1..5).collect::<Vec<_>>());
    assert_ne!(thread.lock().unwrap()[0], thread::current().id());
  }

  #[test]
  fn producer_runs_on_scheduler_thread() {
    let scheduler = ComputationScheduler::new().unwrap();
    let producer_thread = Arc::new(Mutex::new(None));
    let c_producer_thread = producer_thread.clone();
    let (stream, status) = Stream::create(move |s: Subscriber<i32>| {
      *c_producer_thread.lock().unwrap() = Some(thread::current().id());
      s.next(99);
      s.complete();
      Ok(())
    })
    .subscribe_on(scheduler)
    .complete_status();
    stream.subscribe(FnObserver::new(|_| {}));

    CompleteStatus::wait_for_end(&status);
    let producer = producer_thread.lock().unwrap().unwrap();
    assert_ne!(producer, thread::current().id());
  }

  #[test]
  fn rejected_subscription_reports_error() {
    let scheduler = SingleScheduler::new().unwrap();
    scheduler.shutdown();
    let errors = Arc::new(Mutex::new(vec![]));
    let c_errors = errors.clone();
    factory::of(1)
      .subscribe_on(scheduler)
      .subscribe(FnObserver::new(|_| {}).on_error(move |e| c_errors.lock().unwrap().push(e)));

    assert_eq!(
      *errors.lock().unwrap(),
      vec![RxError::Scheduler(SchedulerError::Shutdown { scheduler: "single" })]
    );
  }
}
