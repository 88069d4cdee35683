pub use crate::error::{RxError, SchedulerError};
pub use crate::factory;
pub use crate::observer::{FnObserver, Observer, Subscriber};
pub use crate::ops::{CompleteStatus, StreamExt};
pub use crate::scheduler::{PoolConfig, Scheduler, Task};
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::{ComputationScheduler, SingleScheduler};
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::IoScheduler;
pub use crate::stream::Stream;
pub use crate::subscription::{Subscription, SubscriptionGuard, SubscriptionLike};
