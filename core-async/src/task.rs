//! Task spawning and single-task ownership.
//!
//! [`spawn`] is a plain pass-through to the runtime. [`TaskSlot`] owns at
//! most one background task at a time: arming it again, clearing it, or
//! dropping it aborts whatever was running before. The playlist completion
//! monitor lives in one of these, which is what guarantees a poll loop is
//! never left running without a track behind it.
//!
//! # Examples
//!
//! ```rust
//! use core_async::task::TaskSlot;
//! use core_async::time::{sleep, Duration};
//!
//! async fn example() {
//!     let slot = TaskSlot::new();
//!     slot.spawn(async { sleep(Duration::from_secs(60)).await });
//!     assert!(slot.is_active());
//!     slot.abort();
//!     assert!(!slot.is_active());
//! }
//! ```

use parking_lot::Mutex;
use std::future::Future;

pub use tokio::task::{spawn_blocking, yield_now, JoinError, JoinHandle};

/// Spawns a new asynchronous task on the current runtime.
///
/// The task may run on a different worker thread; the returned handle can be
/// awaited for the output.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(future)
}

/// Holder for at most one background task.
#[derive(Debug, Default)]
pub struct TaskSlot {
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `future` into the slot, aborting the previous occupant.
    ///
    /// Returns `true` if a still-running task was aborted.
    pub fn spawn<F>(&self, future: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.replace(spawn(future))
    }

    /// Stores an already spawned task, aborting the previous occupant.
    pub fn replace(&self, handle: JoinHandle<()>) -> bool {
        let previous = self.handle.lock().replace(handle);
        Self::abort_handle(previous)
    }

    /// Aborts the current occupant, if any.
    ///
    /// Returns `true` if a still-running task was aborted. Aborting a task from
    /// inside itself is allowed; it stops at its next suspension point.
    pub fn abort(&self) -> bool {
        let previous = self.handle.lock().take();
        Self::abort_handle(previous)
    }

    /// Returns `true` while the occupant has not finished.
    pub fn is_active(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    fn abort_handle(handle: Option<JoinHandle<()>>) -> bool {
        match handle {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.get_mut().take() {
            handle.abort();
        }
    }
}

/// Result type for task operations.
pub type Result<T> = std::result::Result<T, JoinError>;
