//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod command;
pub mod config;
pub mod error;
pub mod notification;
pub mod recording;

// Re-export common types
pub use command::ServiceCommand;
pub use config::AppConfig;
pub use error::*;
pub use notification::{render_share, render_status, ShareNotification, StatusNotification};
pub use recording::{
    ElapsedTime, RecorderState, RecordingFile, RecordingSession, RecordingsDir, SessionSnapshot,
};
