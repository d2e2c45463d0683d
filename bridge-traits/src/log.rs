//! Host log forwarding.
//!
//! The core logs through `tracing`. A host that wants those lines in its own
//! pipeline (a UI log pane, a now-playing ticker, a journal) implements
//! [`LoggerSink`]; `core_runtime::logging` turns every event that passes the
//! filter into a [`PlaybackLogRecord`] and hands it over synchronously.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::platform::PlatformSendSync;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name, as accepted by `EnvFilter` directives.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One forwarded log event.
///
/// The fields the orchestrator attaches to track-scoped events are lifted
/// out of the key/value bag so a sink can match on them without parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackLogRecord {
    pub level: LogLevel,
    pub at: DateTime<Utc>,
    /// `tracing` target, e.g. `core_playback::orchestrator`
    pub target: String,
    pub message: String,
    /// 0-based position of the track the event is about
    pub index: Option<usize>,
    /// Track label or file name (`track` or `file` field)
    pub track: Option<String>,
    /// Monitor generation the event belongs to
    pub generation: Option<u64>,
    /// Every other recorded field, rendered as text
    pub fields: BTreeMap<String, String>,
}

impl PlaybackLogRecord {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            at: Utc::now(),
            target: target.into(),
            message: message.into(),
            index: None,
            track: None,
            generation: None,
            fields: BTreeMap::new(),
        }
    }

    /// Record a field, routing the playlist keys into their typed slots.
    ///
    /// A playlist key whose value does not parse stays in `fields`.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "index" => match value.parse() {
                Ok(index) => self.index = Some(index),
                Err(_) => {
                    self.fields.insert(key, value);
                }
            },
            "generation" => match value.parse() {
                Ok(generation) => self.generation = Some(generation),
                Err(_) => {
                    self.fields.insert(key, value);
                }
            },
            "track" | "file" => self.track = Some(value),
            _ => {
                self.fields.insert(key, value);
            }
        }
        self
    }

    /// True when the event names a specific track.
    pub fn is_track_scoped(&self) -> bool {
        self.index.is_some() || self.track.is_some()
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// Receives log records from the core.
///
/// Called on the thread that emitted the event, so implementations should
/// hand off anything slow (file or network writes) rather than block.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::log::{LoggerSink, LogLevel, PlaybackLogRecord};
///
/// struct Ticker;
///
/// impl LoggerSink for Ticker {
///     fn accept(&self, record: PlaybackLogRecord) {
///         if let Some(index) = record.index {
///             eprintln!("#{} {}", index + 1, record.message);
///         }
///     }
/// }
/// ```
pub trait LoggerSink: PlatformSendSync {
    fn accept(&self, record: PlaybackLogRecord);

    /// Records below this level are never built.
    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}
