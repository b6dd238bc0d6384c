//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like cpal, the desktop
//! notification server and the config file.

pub mod config;
pub mod notification;
pub mod permission;
pub mod recording;
pub mod share;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NotifyRustNotifier};
pub use permission::ConsentFilePermissions;
pub use recording::CpalAudioDevice;
pub use share::CommandSharer;
