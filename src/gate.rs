use std::sync::atomic::{AtomicBool, Ordering};

/// A one-shot flag deciding which terminal signal wins.
///
/// Every operator that forwards `error` or `complete` owns one gate per
/// subscription. The first caller of [`close`](TerminalGate::close) gets
/// `true` and is the only one allowed to deliver a terminal signal.
#[derive(Debug, Default)]
pub struct TerminalGate(AtomicBool);

impl TerminalGate {
  #[inline]
  pub fn new() -> Self { Self::default() }

  /// Closes the gate, returning `true` only for the call that closed it.
  #[inline]
  pub fn close(&self) -> bool {
    self.0.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_ok()
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.load(Ordering::Acquire) }
}
