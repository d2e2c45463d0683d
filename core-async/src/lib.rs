//! Runtime abstraction layer for the playlist core.
//!
//! Every `core-*` and `bridge-*` crate goes through this crate for spawning,
//! timers, locks and filesystem probes instead of depending on Tokio
//! directly. Timers follow Tokio's clock, so orchestrator tests can run under
//! a paused runtime.
//!
//! # Modules
//!
//! - `task`: task spawning and the [`TaskSlot`](task::TaskSlot) handle used
//!   for single background loops
//! - `time`: sleep, intervals, timeouts and the bounded [`wait_until`](time::wait_until) poll
//! - `sync`: async-aware locks and channels
//! - `fs`: async filesystem probes
//!
//! # Examples
//!
//! ```rust
//! use core_async::task;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let handle = task::spawn(async {
//!         sleep(Duration::from_millis(10)).await;
//!         42
//!     });
//!     assert_eq!(handle.await.unwrap(), 42);
//! }
//! ```

pub mod fs;
pub mod sync;
pub mod task;
pub mod time;

pub use task::{spawn, TaskSlot};
pub use time::{sleep, wait_until, Duration, Instant};
