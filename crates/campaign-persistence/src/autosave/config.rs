//! Auto-save configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Inactivity delay before a draft is committed.
pub const AUTOSAVE_DELAY_MS: u64 = 2000;

/// How long the "saved" notification stays visible.
pub const NOTIFICATION_DISPLAY_MS: u64 = 1400;

/// Configuration for auto-save behavior.
///
/// Read once when a controller is built; the values never change per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoSaveConfig {
    /// Whether the inactivity timer commits drafts.
    ///
    /// Save, dismiss and teardown always flush regardless of this flag.
    pub enabled: bool,

    /// Debounce delay in milliseconds.
    ///
    /// After a change, the controller waits this long before committing.
    /// Additional changes reset the timer.
    pub debounce_ms: u64,

    /// How long the "saved" notification stays up, in milliseconds.
    pub notification_ms: u64,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: AUTOSAVE_DELAY_MS,
            notification_ms: NOTIFICATION_DISPLAY_MS,
        }
    }
}

impl AutoSaveConfig {
    /// Create a config whose inactivity timer never commits.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Debounce delay as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Notification display time as a [`Duration`].
    pub fn notification(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AutoSaveConfig::default();
        assert!(config.enabled);
        assert_eq!(config.debounce_ms, 2000);
        assert_eq!(config.notification_ms, 1400);
    }

    #[test]
    fn test_disabled_keeps_timings() {
        let config = AutoSaveConfig::disabled();
        assert!(!config.enabled);
        assert_eq!(config.debounce(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AutoSaveConfig = serde_json::from_str(r#"{"debounce_ms": 500}"#).unwrap();
        assert_eq!(config.debounce_ms, 500);
        assert!(config.enabled);
        assert_eq!(config.notification_ms, NOTIFICATION_DISPLAY_MS);
    }
}
