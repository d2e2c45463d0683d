//! # Playlist Configuration
//!
//! Timing and behavior knobs for the playlist orchestrator.
//!
//! ## Overview
//!
//! Every value has a default, so `PlaylistConfig::default()` is a working
//! configuration. Hosts override individual values through the builder or by
//! deserializing JSON, where missing keys fall back to the same defaults.
//! Both paths end in [`PlaylistConfig::validate`], which rejects timings that
//! would make the orchestrator spin or hang.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::PlaylistConfig;
//!
//! let config = PlaylistConfig::builder()
//!     .poll_interval_ms(250)
//!     .looping(true)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.poll_interval().as_millis(), 250);
//! ```
//!
//! ```
//! use core_runtime::config::PlaylistConfig;
//!
//! let config = PlaylistConfig::from_json(r#"{ "initial_volume": 0.5 }"#).unwrap();
//! assert_eq!(config.settle_delay_ms, 100);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for any single timing value (one minute).
const MAX_TIMING_MS: u64 = 60_000;

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_settle_delay_ms() -> u64 {
    100
}

fn default_transition_delay_ms() -> u64 {
    50
}

fn default_idle_timeout_ms() -> u64 {
    1000
}

fn default_idle_poll_ms() -> u64 {
    50
}

fn default_initial_volume() -> f32 {
    1.0
}

fn default_event_buffer_size() -> usize {
    100
}

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Period at which the completion monitor samples the playback resource.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Pause between stopping an audible track and loading the next one.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Pause between advancing the index and starting the next track.
    #[serde(default = "default_transition_delay_ms")]
    pub transition_delay_ms: u64,

    /// How long navigation waits for an in-flight load to finish.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Step between checks while waiting for idle.
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u64,

    /// Wrap to the first track after the last one.
    #[serde(default)]
    pub looping: bool,

    /// Volume applied to the resource when the orchestrator is built.
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,

    /// Capacity of the broadcast event bus.
    #[serde(default = "default_event_buffer_size")]
    pub event_buffer_size: usize,
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            transition_delay_ms: default_transition_delay_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            idle_poll_ms: default_idle_poll_ms(),
            looping: false,
            initial_volume: default_initial_volume(),
            event_buffer_size: default_event_buffer_size(),
        }
    }
}

impl PlaylistConfig {
    /// Creates a new builder seeded with the defaults.
    pub fn builder() -> PlaylistConfigBuilder {
        PlaylistConfigBuilder::default()
    }

    /// Parses a JSON document and validates the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlaylistConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Poll interval and idle step are non-zero
    /// - No timing exceeds one minute
    /// - The idle step does not exceed the idle timeout
    /// - Initial volume lies in `0.0..=1.0`
    /// - Event buffer is non-empty
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(Error::Config(
                "Poll interval must be greater than 0ms".to_string(),
            ));
        }

        if self.idle_poll_ms == 0 {
            return Err(Error::Config(
                "Idle poll step must be greater than 0ms".to_string(),
            ));
        }

        let timings = [
            ("Poll interval", self.poll_interval_ms),
            ("Settle delay", self.settle_delay_ms),
            ("Transition delay", self.transition_delay_ms),
            ("Idle timeout", self.idle_timeout_ms),
            ("Idle poll step", self.idle_poll_ms),
        ];
        for (name, value) in timings {
            if value > MAX_TIMING_MS {
                return Err(Error::Config(format!(
                    "{} exceeds maximum of 60 seconds (60,000ms)",
                    name
                )));
            }
        }

        if self.idle_poll_ms > self.idle_timeout_ms {
            return Err(Error::Config(
                "Idle poll step cannot be longer than the idle timeout".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(Error::Config(format!(
                "Initial volume must be between 0.0 and 1.0, got {}",
                self.initial_volume
            )));
        }

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn idle_poll(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }
}

/// Builder for constructing [`PlaylistConfig`] instances.
///
/// Unset values keep their defaults; [`build()`](PlaylistConfigBuilder::build)
/// validates the result.
#[derive(Debug, Default)]
pub struct PlaylistConfigBuilder {
    config: PlaylistConfig,
}

impl PlaylistConfigBuilder {
    /// Sets the completion monitor period.
    ///
    /// Default: 500 ms
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms;
        self
    }

    /// Sets the delay after interrupting an audible track.
    ///
    /// Default: 100 ms
    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.config.settle_delay_ms = ms;
        self
    }

    /// Default: 50 ms
    pub fn transition_delay_ms(mut self, ms: u64) -> Self {
        self.config.transition_delay_ms = ms;
        self
    }

    /// Default: 1000 ms
    pub fn idle_timeout_ms(mut self, ms: u64) -> Self {
        self.config.idle_timeout_ms = ms;
        self
    }

    /// Default: 50 ms
    pub fn idle_poll_ms(mut self, ms: u64) -> Self {
        self.config.idle_poll_ms = ms;
        self
    }

    pub fn looping(mut self, enabled: bool) -> Self {
        self.config.looping = enabled;
        self
    }

    /// Sets the volume applied when the orchestrator is built.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::PlaylistConfig;
    ///
    /// assert!(PlaylistConfig::builder().initial_volume(1.5).build().is_err());
    /// ```
    pub fn initial_volume(mut self, volume: f32) -> Self {
        self.config.initial_volume = volume;
        self
    }

    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.config.event_buffer_size = size;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<PlaylistConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlaylistConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.settle_delay(), Duration::from_millis(100));
        assert_eq!(config.transition_delay(), Duration::from_millis(50));
        assert_eq!(config.idle_timeout(), Duration::from_millis(1000));
        assert_eq!(config.idle_poll(), Duration::from_millis(50));
        assert!(!config.looping);
        assert_eq!(config.initial_volume, 1.0);
    }

    #[test]
    fn test_builder_overrides() {
        let config = PlaylistConfig::builder()
            .poll_interval_ms(200)
            .settle_delay_ms(0)
            .transition_delay_ms(0)
            .looping(true)
            .initial_volume(0.25)
            .event_buffer_size(8)
            .build()
            .unwrap();

        assert_eq!(config.poll_interval_ms, 200);
        assert_eq!(config.settle_delay_ms, 0);
        assert!(config.looping);
        assert_eq!(config.initial_volume, 0.25);
        assert_eq!(config.event_buffer_size, 8);
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let result = PlaylistConfig::builder().poll_interval_ms(0).build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Poll interval must be greater than 0ms"));
    }

    #[test]
    fn test_excessive_timing_rejected() {
        let result = PlaylistConfig::builder().settle_delay_ms(120_000).build();
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Settle delay exceeds maximum"));
    }

    #[test]
    fn test_idle_step_longer_than_timeout_rejected() {
        let result = PlaylistConfig::builder()
            .idle_timeout_ms(100)
            .idle_poll_ms(200)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_initial_volume_range() {
        assert!(PlaylistConfig::builder().initial_volume(-0.1).build().is_err());
        assert!(PlaylistConfig::builder().initial_volume(1.01).build().is_err());
        assert!(PlaylistConfig::builder().initial_volume(0.0).build().is_ok());
        assert!(PlaylistConfig::builder().initial_volume(f32::NAN).build().is_err());
    }

    #[test]
    fn test_zero_event_buffer_rejected() {
        assert!(PlaylistConfig::builder().event_buffer_size(0).build().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = PlaylistConfig::from_json(r#"{ "looping": true, "poll_interval_ms": 100 }"#)
            .unwrap();
        assert!(config.looping);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.idle_timeout_ms, 1000);
        assert_eq!(config.event_buffer_size, 100);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            PlaylistConfig::from_json("{ not json"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            PlaylistConfig::from_json(r#"{ "idle_poll_ms": 0 }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_serialize_round_trip_keeps_values() {
        let config = PlaylistConfig::builder().looping(true).build().unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PlaylistConfig::from_json(&json).unwrap(), config);
    }
}
