use crate::error::{PlatformError, PlatformResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`RdevEngine`](super::RdevEngine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdevEngineConfig {
    /// How often the run loop checks for a stop request while idle
    /// (milliseconds).
    pub poll_interval_ms: u64,
    /// Capacity of the per-run event channel. Events arriving while it is
    /// full are dropped.
    pub channel_capacity: usize,
    /// Emit `KeyTyped` after `KeyPressed` when the platform reports text.
    pub synthesize_typed: bool,
    /// Emit `MouseClicked` after a release that was not a drag.
    pub synthesize_clicks: bool,
    /// Report moves with a button held as `MouseDragged`.
    pub synthesize_drags: bool,
    /// Presses of the same button within this window count as one
    /// multi-click (milliseconds).
    pub multi_click_ms: u64,
    /// Reported scroll amount per wheel notch.
    pub wheel_amount: u16,
}

impl Default for RdevEngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            channel_capacity: 1024,
            synthesize_typed: true,
            synthesize_clicks: true,
            synthesize_drags: true,
            multi_click_ms: 500,
            wheel_amount: 3,
        }
    }
}

impl RdevEngineConfig {
    pub fn validate(&self) -> PlatformResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(PlatformError::InvalidConfig(
                "poll_interval_ms must be greater than 0".into(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(PlatformError::InvalidConfig(
                "channel_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RdevEngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = RdevEngineConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PlatformError::InvalidConfig(_))));

        let config = RdevEngineConfig {
            channel_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RdevEngineConfig =
            serde_json::from_str(r#"{ "poll_interval_ms": 20, "synthesize_typed": false }"#)
                .unwrap();
        assert_eq!(config.poll_interval_ms, 20);
        assert!(!config.synthesize_typed);
        assert_eq!(config.channel_capacity, 1024);
        assert_eq!(config.multi_click_ms, 500);
    }
}
