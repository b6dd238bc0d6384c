//! Awaitable permission requests
//!
//! Wraps a callback-based [`PermissionLauncher`] so callers can simply
//! `await` the answer. The bridge holds a single slot: one request may be
//! in flight at a time, and the launcher's callback resolves it exactly once.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::oneshot;

use super::ports::{PermissionCallback, PermissionLauncher};

/// Permission request errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("A permission request is already in progress")]
    RequestInFlight,

    #[error("Permission request was abandoned without an answer")]
    Abandoned,
}

type PendingSlot = Arc<Mutex<Option<oneshot::Sender<bool>>>>;

/// One-shot bridge from a callback-based permission API to an awaitable result
pub struct PermissionBridge<L: PermissionLauncher> {
    launcher: L,
    pending: PendingSlot,
}

impl<L: PermissionLauncher> PermissionBridge<L> {
    /// Register the result callback and build the launcher around it.
    ///
    /// The callback forwards the answer to whichever request is pending;
    /// answers that arrive with nothing pending are dropped.
    pub fn register<F>(make_launcher: F) -> Self
    where
        F: FnOnce(PermissionCallback) -> L,
    {
        let pending: PendingSlot = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&pending);

        let callback: PermissionCallback = Arc::new(move |granted| {
            let sender = slot.lock().unwrap_or_else(|e| e.into_inner()).take();
            if let Some(sender) = sender {
                let _ = sender.send(granted);
            }
        });

        Self {
            launcher: make_launcher(callback),
            pending,
        }
    }

    /// Get the underlying launcher
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Whether a request is waiting for its answer
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Request a permission and wait for the answer.
    ///
    /// Resolves to `true` immediately, without launching anything, when the
    /// permission is already granted.
    pub async fn request_and_wait(&self, permission: &str) -> Result<bool, PermissionError> {
        if self.launcher.is_granted(permission) {
            return Ok(true);
        }

        let receiver = {
            let mut slot = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            if slot.is_some() {
                return Err(PermissionError::RequestInFlight);
            }
            let (sender, receiver) = oneshot::channel();
            *slot = Some(sender);
            receiver
        };

        self.launcher.launch(permission);

        receiver.await.map_err(|_| PermissionError::Abandoned)
    }
}
