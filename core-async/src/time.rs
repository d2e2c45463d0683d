//! Time-related abstractions.
//!
//! Re-exports Tokio's timer primitives together with Tokio's [`Instant`], so
//! that code measured against it follows the runtime clock. Under
//! `#[tokio::test(start_paused = true)]` the clock auto-advances, which keeps
//! poll-based logic deterministic in tests.
//!
//! # Examples
//!
//! ```rust
//! use core_async::time::{sleep, Duration, Instant};
//!
//! async fn example() {
//!     let start = Instant::now();
//!     sleep(Duration::from_millis(20)).await;
//!     assert!(start.elapsed() >= Duration::from_millis(20));
//! }
//! ```

pub use std::time::Duration;
pub use tokio::time::error::Elapsed;
pub use tokio::time::{
    interval, interval_at, sleep, sleep_until, timeout, Instant, Interval, MissedTickBehavior,
    Sleep, Timeout,
};

/// Polls `condition` every `step` until it holds or `limit` has elapsed.
///
/// Returns `true` if the condition was observed, `false` on timeout. The
/// condition is checked once before the first sleep, so an already satisfied
/// condition returns without suspending.
///
/// # Examples
///
/// ```rust
/// use core_async::time::{wait_until, Duration};
///
/// # async fn example() {
/// let ready = wait_until(|| true, Duration::from_millis(50), Duration::from_secs(1)).await;
/// assert!(ready);
/// # }
/// ```
pub async fn wait_until<F>(mut condition: F, step: Duration, limit: Duration) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + limit;
    loop {
        if condition() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        sleep(step.min(deadline - now)).await;
    }
}

/// Creates an interval whose first tick fires one `period` from now.
///
/// Tokio's plain [`interval`] ticks immediately; poll loops that sample a
/// resource just after starting it want the first sample delayed instead.
/// Missed ticks are delayed rather than bursted.
pub fn delayed_interval(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
