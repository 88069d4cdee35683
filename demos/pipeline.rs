//! Runs a small pipeline across all three schedulers.
//!
//! Numbers are produced on the io pool, processed on the computation pool
//! and printed from the single worker. Set `RUST_LOG=rxstream=debug` to see
//! the scheduler lifecycle.

use std::{thread, time::Duration};

use rxstream::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), SchedulerError> {
  tracing_subscriber::registry()
    .with(fmt::layer())
    .with(EnvFilter::from_default_env())
    .init();

  let io = IoScheduler::new()?;
  let computation = ComputationScheduler::new()?;
  let single = SingleScheduler::new()?;

  let c_computation = computation.clone();
  let (stream, status) = Stream::create(|s: Subscriber<i32>| {
    for i in 1..=5 {
      s.next(i);
    }
    s.complete();
    Ok(())
  })
  .subscribe_on(io.clone())
  .filter(|i| i % 2 == 0)
  .map(|i| format!("Value: {}", i))
  .flat_map(move |v| {
    Stream::create(move |s: Subscriber<String>| {
      // simulated work
      thread::sleep(Duration::from_millis(100));
      s.next(format!("{} (processed)", v));
      s.complete();
      Ok(())
    })
    .subscribe_on(c_computation.clone())
  })
  .observe_on(single.clone())
  .complete_status();

  stream.subscribe(
    FnObserver::new(|item: String| {
      let current = thread::current();
      println!("{} -> {}", current.name().unwrap_or("<unnamed>"), item);
    })
    .on_error(|err| eprintln!("pipeline failed: {}", err))
    .on_complete(|| println!("All done!")),
  );

  CompleteStatus::wait_for_end(&status);
  single.shutdown();
  computation.shutdown();
  io.shutdown();
  Ok(())
}
