//! Notification infrastructure module
//!
//! Desktop notifications through notify-rust.

mod notify_rust;

pub use notify_rust::{NotifyRustNotifier, DEFAULT_ACTION};

use crate::application::ports::{ActionSink, Notifier};

/// Create the default notifier for the current platform
pub fn create_notifier(sink: ActionSink) -> Box<dyn Notifier> {
    Box::new(NotifyRustNotifier::new(sink))
}
