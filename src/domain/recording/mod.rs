//! Recording session, elapsed time and recorded file references

pub mod elapsed;
pub mod file;
pub mod session;

pub use elapsed::ElapsedTime;
pub use file::{RecordingFile, RecordingsDir};
pub use session::{InvalidStateTransition, RecorderState, RecordingSession, SessionSnapshot};
