//! Integration tests for core-async on the Tokio runtime.

use core_async::sync::Mutex;
use core_async::task::{self, TaskSlot};
use core_async::time::{self, Duration, Instant};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_task_spawn() {
    let handle = task::spawn(async { 42 });
    assert_eq!(handle.await.unwrap(), 42);
}

#[tokio::test(start_paused = true)]
async fn test_sleep_follows_runtime_clock() {
    let start = Instant::now();
    time::sleep(Duration::from_millis(500)).await;
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_returns_immediately_when_satisfied() {
    let start = Instant::now();
    let ok = time::wait_until(|| true, Duration::from_millis(50), Duration::from_secs(1)).await;
    assert!(ok);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_times_out() {
    let start = Instant::now();
    let ok = time::wait_until(|| false, Duration::from_millis(50), Duration::from_millis(1000)).await;
    assert!(!ok);
    assert!(start.elapsed() >= Duration::from_millis(1000));
    assert!(start.elapsed() < Duration::from_millis(1100));
}

#[tokio::test(start_paused = true)]
async fn test_wait_until_observes_later_change() {
    let gate = Arc::new(Mutex::new(()));
    let held = gate.clone().lock_owned().await;

    task::spawn(async move {
        time::sleep(Duration::from_millis(120)).await;
        drop(held);
    });

    let probe = gate.clone();
    let ok = time::wait_until(
        move || probe.try_lock().is_ok(),
        Duration::from_millis(50),
        Duration::from_secs(1),
    )
    .await;
    assert!(ok);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_interval_skips_immediate_tick() {
    let start = Instant::now();
    let mut ticker = time::delayed_interval(Duration::from_millis(500));
    ticker.tick().await;
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_task_slot_replaces_previous_task() {
    let counter = Arc::new(AtomicUsize::new(0));
    let slot = TaskSlot::new();

    let first = counter.clone();
    slot.spawn(async move {
        time::sleep(Duration::from_secs(10)).await;
        first.fetch_add(1, Ordering::SeqCst);
    });
    assert!(slot.is_active());

    let second = counter.clone();
    let aborted = slot.spawn(async move {
        second.fetch_add(10, Ordering::SeqCst);
    });
    assert!(aborted);

    time::sleep(Duration::from_secs(20)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 10);
    assert!(!slot.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_task_slot_abort_and_drop() {
    let counter = Arc::new(AtomicUsize::new(0));

    let slot = TaskSlot::new();
    let c = counter.clone();
    slot.spawn(async move {
        time::sleep(Duration::from_secs(1)).await;
        c.fetch_add(1, Ordering::SeqCst);
    });
    assert!(slot.abort());
    assert!(!slot.abort());

    {
        let dropped = TaskSlot::new();
        let c = counter.clone();
        dropped.spawn(async move {
            time::sleep(Duration::from_secs(1)).await;
            c.fetch_add(1, Ordering::SeqCst);
        });
    }

    time::sleep(Duration::from_secs(2)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_is_file() {
    let dir = std::env::temp_dir();
    assert!(!core_async::fs::is_file(&dir).await);
    assert!(!core_async::fs::is_file(dir.join("definitely-not-here-7f3a.wav")).await);
}
