//! Commands accepted by the recording service

use std::fmt;

/// A command delivered to the running service, either from a notification
/// action or over IPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCommand {
    /// Start when idle, pause when recording, resume when paused
    StartPause,
    /// Start or resume; ignored while already recording
    Start,
    /// Pause; ignored unless recording
    Pause,
    /// Finalize the recording and reset the timer
    Stop,
    /// Release everything and terminate the service
    Kill,
}

impl ServiceCommand {
    /// All commands, in the order their buttons are shown
    pub const ALL: [ServiceCommand; 5] = [
        Self::StartPause,
        Self::Start,
        Self::Pause,
        Self::Stop,
        Self::Kill,
    ];

    /// Wire name of the command
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartPause => "start_pause",
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Kill => "kill",
        }
    }

    /// Parse a wire name. Unrecognized names yield `None` and are ignored
    /// by the service.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.as_str() == name.trim())
    }
}

impl fmt::Display for ServiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
