//! Recording session state machine

use std::fmt;
use thiserror::Error;

use super::elapsed::ElapsedTime;

/// Recorder states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecorderState {
    #[default]
    Idle,
    Recording,
    Paused,
}

impl RecorderState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Paused => "paused",
        }
    }

    /// Whether the session is actively capturing (the tick is running)
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Recording)
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: RecorderState,
    pub action: String,
}

/// Point-in-time copy of the session, used for rendering and status queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub state: RecorderState,
    pub elapsed: ElapsedTime,
}

impl SessionSnapshot {
    /// Whether the session is actively capturing
    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.state, self.elapsed.as_secs())
    }
}

/// Recording session entity.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> PAUSED (pause)
///   PAUSED -> RECORDING (resume)
///   RECORDING | PAUSED -> IDLE (stop)
///
/// Elapsed time only advances while RECORDING and is reset to zero by stop.
#[derive(Debug, Default)]
pub struct RecordingSession {
    state: RecorderState,
    elapsed: ElapsedTime,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Get elapsed recording time
    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    /// Copy the current state and elapsed time
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            elapsed: self.elapsed,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == RecorderState::Idle
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    pub fn is_paused(&self) -> bool {
        self.state == RecorderState::Paused
    }

    /// Transition from IDLE to RECORDING
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecorderState::Idle {
            return Err(self.invalid("start recording"));
        }
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// Transition from RECORDING to PAUSED
    pub fn pause(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecorderState::Recording {
            return Err(self.invalid("pause recording"));
        }
        self.state = RecorderState::Paused;
        Ok(())
    }

    /// Transition from PAUSED to RECORDING
    pub fn resume(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != RecorderState::Paused {
            return Err(self.invalid("resume recording"));
        }
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// Transition from RECORDING or PAUSED to IDLE.
    ///
    /// Elapsed time is reset even when the transition itself is rejected.
    pub fn stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.elapsed = ElapsedTime::zero();
        if self.state == RecorderState::Idle {
            return Err(self.invalid("stop recording"));
        }
        self.state = RecorderState::Idle;
        Ok(())
    }

    /// Advance elapsed time by one tick. Returns false (and changes nothing)
    /// unless the session is recording.
    pub fn tick(&mut self) -> bool {
        if self.state != RecorderState::Recording {
            return false;
        }
        self.elapsed = self.elapsed.advanced();
        true
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }
}
