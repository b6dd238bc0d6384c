//! Notification adapter using notify-rust
//!
//! On freedesktop systems the status notification keeps one server id and
//! is replaced in place on every render. Button presses are reported by a
//! waiter thread and forwarded to the [`ActionSink`]. Elsewhere the
//! notifications are shown without buttons.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    ActionSink, ActionTarget, NotificationError, Notifier, ShareNotification, StatusNotification,
};
use crate::domain::notification::{NotificationAction, APP_TITLE};

/// Action key the server reports when the notification body is clicked
pub const DEFAULT_ACTION: &str = "default";

/// Notifier backed by the desktop notification server
pub struct NotifyRustNotifier {
    app_name: String,
    sink: ActionSink,
    /// Server id of the status notification, 0 before the first show
    status_id: Arc<AtomicU32>,
    /// Thread currently waiting on the status notification
    status_waiter: Arc<WaiterSlot>,
}

impl NotifyRustNotifier {
    /// Create a notifier that reports button presses to `sink`
    pub fn new(sink: ActionSink) -> Self {
        Self {
            app_name: APP_TITLE.to_string(),
            sink,
            status_id: Arc::new(AtomicU32::new(0)),
            status_waiter: Arc::new(WaiterSlot::default()),
        }
    }
}

/// Single slot for the status notification's action waiter.
///
/// Each claim gets its own ticket and only that ticket can free the slot,
/// so a waiter that finishes late never frees a slot its successor holds.
#[derive(Debug, Default)]
#[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
struct WaiterSlot {
    holder: AtomicU64,
    next_ticket: AtomicU64,
}

#[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
impl WaiterSlot {
    /// Claim the slot, returning the ticket if it was free
    fn claim(&self) -> Option<u64> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.holder
            .compare_exchange(0, ticket, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| ticket)
    }

    /// Free the slot if `ticket` still holds it
    fn release(&self, ticket: u64) {
        let _ = self
            .holder
            .compare_exchange(ticket, 0, Ordering::SeqCst, Ordering::SeqCst);
    }
}

/// Map an action key reported by the server to its target
fn resolve_action(actions: &[NotificationAction], key: &str) -> Option<ActionTarget> {
    actions
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.target.clone())
}

#[cfg(all(unix, not(target_os = "macos")))]
mod backend {
    use super::*;
    use notify_rust::{Hint, Notification, Timeout};

    pub fn show_status(
        app_name: &str,
        notification: &StatusNotification,
        sink: ActionSink,
        status_id: &AtomicU32,
        status_waiter: &Arc<WaiterSlot>,
    ) -> Result<(), NotificationError> {
        let mut builder = Notification::new();
        builder
            .appname(app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .icon(notification.icon.icon_name());

        if notification.ongoing {
            builder.hint(Hint::Resident(true)).timeout(Timeout::Never);
        }
        if notification.alert_once {
            builder.hint(Hint::SuppressSound(true));
        }
        for action in &notification.actions {
            builder.action(&action.key, &action.label);
        }

        let id = status_id.load(Ordering::SeqCst);
        if id != 0 {
            builder.id(id);
        }

        let handle = builder
            .show()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;
        status_id.store(handle.id(), Ordering::SeqCst);

        // One waiter per status notification; it exits after the first press
        // and the re-render that follows the press starts the next one.
        let Some(ticket) = status_waiter.claim() else {
            return Ok(());
        };
        let actions = notification.actions.clone();
        let waiter = Arc::clone(status_waiter);
        std::thread::spawn(move || {
            handle.wait_for_action(|key| {
                waiter.release(ticket);
                if let Some(target) = resolve_action(&actions, key) {
                    sink(target);
                }
            });
            // No-op unless the server dropped us without reporting a key
            waiter.release(ticket);
        });

        Ok(())
    }

    pub fn show_share(
        app_name: &str,
        notification: &ShareNotification,
        sink: ActionSink,
    ) -> Result<(), NotificationError> {
        let handle = Notification::new()
            .appname(app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .icon(notification.icon.icon_name())
            .action(DEFAULT_ACTION, &notification.action.label)
            .action(&notification.action.key, &notification.action.label)
            .show()
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        let target = notification.action.target.clone();
        let key = notification.action.key.clone();
        std::thread::spawn(move || {
            handle.wait_for_action(|pressed| {
                if pressed == key || pressed == DEFAULT_ACTION {
                    sink(target);
                }
            });
        });

        Ok(())
    }

    pub fn close_status(app_name: &str, status_id: &AtomicU32) -> Result<(), NotificationError> {
        let id = status_id.swap(0, Ordering::SeqCst);
        if id == 0 {
            return Ok(());
        }

        // Only a handle can close, so take one over the same id
        Notification::new()
            .appname(app_name)
            .summary(app_name)
            .id(id)
            .show()
            .map_err(|e| NotificationError::CloseFailed(e.to_string()))?
            .close();

        Ok(())
    }
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
mod backend {
    use super::*;
    use notify_rust::Notification;

    pub fn show_status(
        app_name: &str,
        notification: &StatusNotification,
        _sink: ActionSink,
        _status_id: &AtomicU32,
        _status_waiter: &Arc<WaiterSlot>,
    ) -> Result<(), NotificationError> {
        Notification::new()
            .appname(app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }

    pub fn show_share(
        app_name: &str,
        notification: &ShareNotification,
        _sink: ActionSink,
    ) -> Result<(), NotificationError> {
        Notification::new()
            .appname(app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))
    }

    pub fn close_status(_app_name: &str, _status_id: &AtomicU32) -> Result<(), NotificationError> {
        Ok(())
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn show_status(&self, notification: &StatusNotification) -> Result<(), NotificationError> {
        let app_name = self.app_name.clone();
        let notification = notification.clone();
        let sink = Arc::clone(&self.sink);
        let status_id = Arc::clone(&self.status_id);
        let status_waiter = Arc::clone(&self.status_waiter);

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            backend::show_status(&app_name, &notification, sink, &status_id, &status_waiter)
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }

    async fn show_share(&self, notification: &ShareNotification) -> Result<(), NotificationError> {
        let app_name = self.app_name.clone();
        let notification = notification.clone();
        let sink = Arc::clone(&self.sink);

        tokio::task::spawn_blocking(move || backend::show_share(&app_name, &notification, sink))
            .await
            .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }

    async fn close_status(&self) -> Result<(), NotificationError> {
        let app_name = self.app_name.clone();
        let status_id = Arc::clone(&self.status_id);

        tokio::task::spawn_blocking(move || backend::close_status(&app_name, &status_id))
            .await
            .map_err(|e| NotificationError::CloseFailed(format!("Task join error: {}", e)))?
    }
}
