//! Notification port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use crate::domain::notification::{
    ActionTarget, NotificationAction, NotificationIcon, ShareNotification, StatusNotification,
};

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to show notification: {0}")]
    SendFailed(String),

    #[error("Failed to close notification: {0}")]
    CloseFailed(String),
}

/// Receives the target of every action button the user presses.
/// Called from whatever thread the notification backend reports on.
pub type ActionSink = Arc<dyn Fn(ActionTarget) + Send + Sync>;

/// Port for the service's notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show the status notification, replacing the previous one in place.
    async fn show_status(&self, notification: &StatusNotification) -> Result<(), NotificationError>;

    /// Show a one-shot "recording saved" notification.
    async fn show_share(&self, notification: &ShareNotification) -> Result<(), NotificationError>;

    /// Remove the status notification.
    async fn close_status(&self) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn show_status(&self, notification: &StatusNotification) -> Result<(), NotificationError> {
        self.as_ref().show_status(notification).await
    }

    async fn show_share(&self, notification: &ShareNotification) -> Result<(), NotificationError> {
        self.as_ref().show_share(notification).await
    }

    async fn close_status(&self) -> Result<(), NotificationError> {
        self.as_ref().close_status().await
    }
}
