//! Application layer - Use cases and port interfaces
//!
//! Contains the recording service, the permission bridge and the share
//! use case, plus trait definitions for external system interactions.

pub mod permission;
pub mod ports;
pub mod service;
pub mod share;
pub mod ticker;

// Re-export use cases
pub use permission::{PermissionBridge, PermissionError};
pub use service::{CommandOutcome, RecordingService, ServiceConfig, ServiceEvent};
pub use share::{ShareRecordingError, ShareRecordingUseCase};
pub use ticker::Ticker;
