use futures::{executor::block_on, task::AtomicWaker, Future};

use crate::{
  error::RxError,
  observer::{Observer, Subscriber},
  stream::Stream,
};
use std::{
  pin::Pin,
  sync::{
    atomic::{AtomicI8, Ordering},
    Arc,
  },
  task::{Context, Poll},
};

/// Records whether a stream has terminated, and lets a thread wait for it.
#[derive(Debug, Default)]
pub struct CompleteStatus {
  flag: AtomicI8,
  waker: AtomicWaker,
}

/// Returns a stream mirroring `source` together with the status its
/// terminal signal is recorded into.
///
/// The status is shared by every subscription of the returned stream; the
/// first terminal signal to pass through sets it.
pub fn complete_status<T: 'static>(source: Stream<T>) -> (Stream<T>, Arc<CompleteStatus>) {
  let status = Arc::new(CompleteStatus::default());
  let c_status = status.clone();
  let stream = Stream::create(move |observer| {
    source.subscribe(StatusObserver { observer, status: c_status.clone() });
    Ok(())
  });
  (stream, status)
}

pub struct StatusObserver<T> {
  observer: Subscriber<T>,
  status: Arc<CompleteStatus>,
}

impl<T> Observer<T> for StatusObserver<T> {
  #[inline]
  fn next(&self, value: T) { self.observer.next(value) }

  fn error(&self, err: RxError) {
    self.observer.error(err);
    self.status.finish(-1);
  }

  fn complete(&self) {
    self.observer.complete();
    self.status.finish(1);
  }
}

impl CompleteStatus {
  fn finish(&self, flag: i8) {
    if self.flag.compare_exchange(0, flag, Ordering::AcqRel, Ordering::Acquire).is_ok() {
      self.waker.wake();
    }
  }

  /// return true if the stream completed or emit an error.
  pub fn is_closed(&self) -> bool { self.flag.load(Ordering::Acquire) != 0 }

  /// return true if the stream completed.
  pub fn is_completed(&self) -> bool { self.flag.load(Ordering::Acquire) > 0 }

  /// return true if the stream emit an error.
  pub fn error_occur(&self) -> bool { self.flag.load(Ordering::Acquire) < 0 }

  /// Wait until the stream complete or an error occur.
  pub fn wait_for_end(this: &Arc<Self>) { block_on(StatusFuture(this.clone())); }
}

struct StatusFuture(Arc<CompleteStatus>);

impl Future for StatusFuture {
  type Output = ();

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    if self.0.is_closed() {
      return Poll::Ready(());
    }
    self.0.waker.register(cx.waker());
    // the terminal signal may have landed between the check and `register`
    if self.0.is_closed() {
      Poll::Ready(())
    } else {
      Poll::Pending
    }
  }
}
