//! Completion detection.
//!
//! The playback resource has no end-of-track callback, so completion is
//! inferred by sampling [`PlaybackResource::is_playing`]. The detection
//! strategy sits behind [`CompletionMonitor`]; [`PollingMonitor`] is the
//! default and a push-based monitor can replace it for engines that do emit
//! events.
//!
//! A monitor only reports what it observed. Deciding whether an observed stop
//! is a natural completion (as opposed to a pause or a manual stop racing the
//! poll) is the orchestrator's job, using the generation carried by every
//! signal.

use bridge_traits::playback::PlaybackResource;
use core_async::task::TaskSlot;
use core_async::time::{delayed_interval, Duration};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What a monitor observed for the watch identified by `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionSignal {
    /// The resource reported that it is no longer producing audio.
    Finished { generation: u64 },
    /// The status query failed; the watch ended without a verdict.
    Failed { generation: u64, message: String },
}

impl CompletionSignal {
    pub fn generation(&self) -> u64 {
        match self {
            CompletionSignal::Finished { generation }
            | CompletionSignal::Failed { generation, .. } => *generation,
        }
    }
}

/// Callback invoked by a monitor. Runs on the monitor's task and must not block.
pub type CompletionHandler = Arc<dyn Fn(CompletionSignal) + Send + Sync>;

/// Watches a playback resource for the end of the current track.
///
/// At most one watch is active. Arming replaces the previous watch, and a
/// watch ends by itself after delivering one signal.
pub trait CompletionMonitor: Send + Sync {
    fn arm(&self, resource: Arc<dyn PlaybackResource>, generation: u64, on_signal: CompletionHandler);

    /// Cancel the active watch, if any. No signal is delivered for it.
    fn disarm(&self);

    fn is_armed(&self) -> bool;
}

/// Samples `is_playing()` on a fixed period.
///
/// The first sample is taken one period after arming, giving the resource
/// time to start producing audio.
pub struct PollingMonitor {
    period: Duration,
    task: TaskSlot,
}

impl PollingMonitor {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            task: TaskSlot::new(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl fmt::Debug for PollingMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingMonitor")
            .field("period", &self.period)
            .field("armed", &self.is_armed())
            .finish()
    }
}

impl CompletionMonitor for PollingMonitor {
    fn arm(&self, resource: Arc<dyn PlaybackResource>, generation: u64, on_signal: CompletionHandler) {
        let period = self.period;
        let replaced = self.task.spawn(async move {
            let mut ticker = delayed_interval(period);
            loop {
                ticker.tick().await;
                match resource.is_playing().await {
                    Ok(true) => trace!(generation, "Track still playing"),
                    Ok(false) => {
                        debug!(generation, "Resource went quiet");
                        on_signal(CompletionSignal::Finished { generation });
                        break;
                    }
                    Err(e) => {
                        warn!(generation, error = %e, "Status query failed, stopping monitor");
                        on_signal(CompletionSignal::Failed {
                            generation,
                            message: e.to_string(),
                        });
                        break;
                    }
                }
            }
        });
        trace!(generation, replaced, period_ms = period.as_millis() as u64, "Monitor armed");
    }

    fn disarm(&self) {
        if self.task.abort() {
            trace!("Monitor disarmed");
        }
    }

    fn is_armed(&self) -> bool {
        self.task.is_active()
    }
}
