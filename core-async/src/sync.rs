//! Synchronization primitives.
//!
//! These are Tokio's async-aware primitives: guards may be held across
//! `.await` points without blocking the executor. Code that only needs a
//! short critical section with no suspension should prefer a synchronous
//! lock (the playlist state uses `parking_lot`).
//!
//! # Examples
//!
//! ```rust
//! use core_async::sync::Mutex;
//!
//! async fn example() {
//!     let gate = Mutex::new(());
//!     let held = gate.try_lock().expect("free");
//!     assert!(gate.try_lock().is_err());
//!     drop(held);
//! }
//! ```

pub use tokio::sync::{
    broadcast, mpsc, oneshot, watch, Mutex, MutexGuard, Notify, OwnedMutexGuard, RwLock,
    TryLockError,
};
