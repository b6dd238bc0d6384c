//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod permission;
pub mod recorder;
pub mod sharer;

// Re-export common types
pub use config::ConfigStore;
pub use notifier::{
    ActionSink, ActionTarget, NotificationError, NotificationIcon, Notifier, ShareNotification,
    StatusNotification,
};
pub use permission::{PermissionCallback, PermissionLauncher, MICROPHONE_PERMISSION};
pub use recorder::{AudioDevice, CaptureHandle, RecordingError};
pub use sharer::{FileSharer, ShareError};
