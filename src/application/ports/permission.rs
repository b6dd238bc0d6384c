//! Permission platform port

use std::sync::Arc;

/// Permission needed to capture audio
pub const MICROPHONE_PERMISSION: &str = "microphone";

/// Callback the platform invokes with the user's answer
pub type PermissionCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Callback-based permission API.
///
/// The result callback is handed over once, when the launcher is created;
/// `launch` only starts the request and returns immediately.
pub trait PermissionLauncher: Send + Sync {
    /// Whether the permission has already been granted
    fn is_granted(&self, permission: &str) -> bool;

    /// Ask the user. The registered callback fires exactly once with the answer.
    fn launch(&self, permission: &str);
}
