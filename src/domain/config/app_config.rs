//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::RecordingsDir;

/// Share command used when none is configured
#[cfg(target_os = "macos")]
pub const DEFAULT_SHARE_COMMAND: &str = "open";

/// Share command used when none is configured
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_SHARE_COMMAND: &str = "xdg-open";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub recordings_dir: Option<String>,
    pub notify: Option<bool>,
    pub share_command: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            recordings_dir: Some(RecordingsDir::default_path().to_string_lossy().to_string()),
            notify: Some(true),
            share_command: Some(DEFAULT_SHARE_COMMAND.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            recordings_dir: other.recordings_dir.or(self.recordings_dir),
            notify: other.notify.or(self.notify),
            share_command: other.share_command.or(self.share_command),
        }
    }

    /// Get the recordings directory, or the default if not set
    pub fn recordings_dir_or_default(&self) -> RecordingsDir {
        self.recordings_dir
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| RecordingsDir::new(PathBuf::from(s)))
            .unwrap_or_default()
    }

    /// Get notify setting, or true if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(true)
    }

    /// Get share command, or the platform default if not set
    pub fn share_command_or_default(&self) -> &str {
        self.share_command
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SHARE_COMMAND)
    }
}
