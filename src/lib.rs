//! # rxstream: push-based reactive streams
//!
//! A [`Stream`] is an inert recipe: nothing happens until it is subscribed,
//! and every subscription runs the recipe again from scratch. Operators
//! wrap a stream into a new one, and schedulers move the work to other
//! threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxstream::prelude::*;
//!
//! factory::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(FnObserver::new(|v: i32| println!("Value: {}", v)));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Stream`] | The stream value, built by [`Stream::create`] or [`factory`] |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to stop delivery to an active subscription |
//! | [`Scheduler`] | Runs tasks for `subscribe_on` and `observe_on` |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `ComputationScheduler` and
//!   `SingleScheduler`, built on the `futures` thread pool
//! - **`tokio-scheduler`** (default): `IoScheduler`, built on the tokio
//!   blocking pool
//!
//! [`Stream`]: stream::Stream
//! [`Stream::create`]: stream::Stream::create
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler

pub mod error;
pub mod factory;
pub mod gate;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod scheduler;
pub mod stream;
pub mod subscription;

pub use prelude::*;
