//! Notification payloads
//!
//! Rendering is a pure function of the session snapshot. The status
//! notification is rebuilt from scratch after every state change and every
//! tick; the adapter decides how to replace it on screen.

use crate::domain::command::ServiceCommand;
use crate::domain::recording::{RecorderState, RecordingFile, SessionSnapshot};

/// Title used on every notification
pub const APP_TITLE: &str = "NotiMic";

/// Action key of the share notification's single button
pub const SHARE_ACTION: &str = "share";

/// Notification icon types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationIcon {
    Idle,
    Recording,
    Paused,
    Saved,
}

impl NotificationIcon {
    /// Get the freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Idle => "audio-input-microphone",
            Self::Recording => "media-record",
            Self::Paused => "media-playback-pause",
            Self::Saved => "document-save",
        }
    }
}

/// What an action button does when pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Re-enter the service with a command
    Command(ServiceCommand),
    /// Share a finished recording
    Share { file_name: String },
}

/// One button on a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    /// Identifier reported back by the notification server
    pub key: String,
    /// Button label
    pub label: String,
    pub target: ActionTarget,
}

impl NotificationAction {
    fn command(cmd: ServiceCommand, label: &str) -> Self {
        Self {
            key: cmd.as_str().to_string(),
            label: label.to_string(),
            target: ActionTarget::Command(cmd),
        }
    }
}

/// The persistent status notification shown while the service runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotification {
    pub title: String,
    pub body: String,
    pub icon: NotificationIcon,
    /// Not dismissible and never times out
    pub ongoing: bool,
    /// Suppress repeated alert sounds on re-render
    pub alert_once: bool,
    pub actions: Vec<NotificationAction>,
}

impl StatusNotification {
    /// Find the action with the given key
    pub fn action(&self, key: &str) -> Option<&NotificationAction> {
        self.actions.iter().find(|a| a.key == key)
    }
}

/// One-shot notification announcing a finished recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareNotification {
    pub title: String,
    pub body: String,
    pub icon: NotificationIcon,
    pub file_name: String,
    pub action: NotificationAction,
}

/// Render the status notification for a session snapshot
pub fn render_status(snapshot: &SessionSnapshot) -> StatusNotification {
    let (icon, toggle_label, state_text) = match snapshot.state {
        RecorderState::Idle => (NotificationIcon::Idle, "Record", "Ready"),
        RecorderState::Recording => (NotificationIcon::Recording, "Pause", "Recording"),
        RecorderState::Paused => (NotificationIcon::Paused, "Resume", "Paused"),
    };

    StatusNotification {
        title: format!("{} - {}", APP_TITLE, state_text),
        body: format!("Time: {}", snapshot.elapsed),
        icon,
        ongoing: true,
        alert_once: true,
        actions: vec![
            NotificationAction::command(ServiceCommand::StartPause, toggle_label),
            NotificationAction::command(ServiceCommand::Stop, "Stop"),
            NotificationAction::command(ServiceCommand::Kill, "Quit"),
        ],
    }
}

/// Render the share notification for a finalized recording
pub fn render_share(file: &RecordingFile) -> ShareNotification {
    ShareNotification {
        title: format!("{} - Recording saved", APP_TITLE),
        body: format!("{}\nClick to share", file.file_name()),
        icon: NotificationIcon::Saved,
        file_name: file.file_name().to_string(),
        action: NotificationAction {
            key: SHARE_ACTION.to_string(),
            label: "Share".to_string(),
            target: ActionTarget::Share {
                file_name: file.file_name().to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::{ElapsedTime, RecordingsDir};

    fn snapshot(state: RecorderState, secs: u64) -> SessionSnapshot {
        SessionSnapshot {
            state,
            elapsed: ElapsedTime::from_secs(secs),
        }
    }

    #[test]
    fn status_shows_elapsed_time() {
        let n = render_status(&snapshot(RecorderState::Recording, 65));
        assert_eq!(n.body, "Time: 01:05");
        assert!(n.ongoing);
        assert!(n.alert_once);
    }

    #[test]
    fn status_toggle_label_follows_state() {
        let recording = render_status(&snapshot(RecorderState::Recording, 1));
        let paused = render_status(&snapshot(RecorderState::Paused, 1));
        let idle = render_status(&snapshot(RecorderState::Idle, 0));

        assert_eq!(recording.action("start_pause").unwrap().label, "Pause");
        assert_eq!(paused.action("start_pause").unwrap().label, "Resume");
        assert_eq!(idle.action("start_pause").unwrap().label, "Record");
        assert_eq!(recording.icon, NotificationIcon::Recording);
        assert_eq!(paused.icon, NotificationIcon::Paused);
        assert_eq!(idle.icon, NotificationIcon::Idle);
    }

    #[test]
    fn status_actions_map_to_commands() {
        let n = render_status(&snapshot(RecorderState::Idle, 0));
        let targets: Vec<_> = n.actions.iter().map(|a| a.target.clone()).collect();
        assert_eq!(
            targets,
            vec![
                ActionTarget::Command(ServiceCommand::StartPause),
                ActionTarget::Command(ServiceCommand::Stop),
                ActionTarget::Command(ServiceCommand::Kill),
            ]
        );
        for action in &n.actions {
            assert_eq!(ServiceCommand::parse(&action.key).map(ActionTarget::Command), Some(action.target.clone()));
        }
    }

    #[test]
    fn render_is_pure() {
        let s = snapshot(RecorderState::Paused, 12);
        assert_eq!(render_status(&s), render_status(&s));
    }

    #[test]
    fn share_references_file() {
        let dir = RecordingsDir::new("/data/Records");
        let file = dir.resolve("1700.flac").unwrap();
        let n = render_share(&file);

        assert_eq!(n.file_name, "1700.flac");
        assert_eq!(n.action.key, SHARE_ACTION);
        assert_eq!(
            n.action.target,
            ActionTarget::Share {
                file_name: "1700.flac".to_string()
            }
        );
        assert!(n.body.contains("Click to share"));
    }

    #[test]
    fn icon_names() {
        assert_eq!(NotificationIcon::Idle.icon_name(), "audio-input-microphone");
        assert_eq!(NotificationIcon::Recording.icon_name(), "media-record");
    }
}
