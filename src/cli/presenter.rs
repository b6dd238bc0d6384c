//! CLI presenter for output formatting

use colored::*;

use crate::application::CommandOutcome;
use crate::domain::recording::SessionSnapshot;

/// Severity of a presenter line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
}

/// Presenter for CLI output formatting
#[derive(Debug, Default, Clone, Copy)]
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print at the given level
    pub fn log(&self, level: Level, message: &str) {
        match level {
            Level::Info => self.info(message),
            Level::Success => self.success(message),
            Level::Warn => self.warn(message),
            Level::Error => self.error(message),
        }
    }

    /// Output text to stdout (command results only)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Report what a service command did
    pub fn outcome(&self, outcome: &CommandOutcome) {
        for (level, message) in describe_outcome(outcome) {
            self.log(level, &message);
        }
    }

    /// Print service status
    pub fn service_status(&self, snapshot: &SessionSnapshot) {
        eprintln!(
            "{} Service: {} ({})",
            "●".cyan(),
            snapshot.state.as_str(),
            snapshot.elapsed
        );
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

/// Lines to print for a command outcome
pub fn describe_outcome(outcome: &CommandOutcome) -> Vec<(Level, String)> {
    let mut lines = Vec::new();
    match outcome {
        CommandOutcome::Started {
            file,
            capture_error,
        } => {
            lines.push((Level::Info, "Recording started".to_string()));
            if let Some(file) = file {
                lines.push((Level::Info, format!("Writing {}", file.path().display())));
            }
            if let Some(e) = capture_error {
                lines.push((Level::Warn, format!("Could not prepare capture: {}", e)));
            }
        }
        CommandOutcome::Resumed => lines.push((Level::Info, "Recording resumed".to_string())),
        CommandOutcome::Paused => lines.push((Level::Info, "Recording paused".to_string())),
        CommandOutcome::Stopped {
            saved,
            finalize_error,
        }
        | CommandOutcome::Killed {
            saved,
            finalize_error,
        } => {
            if let Some(file) = saved {
                lines.push((Level::Success, format!("Saved {}", file.path().display())));
            }
            if let Some(e) = finalize_error {
                lines.push((Level::Error, format!("Recording lost: {}", e)));
            }
            if matches!(outcome, CommandOutcome::Killed { .. }) {
                lines.push((Level::Info, "Shutting down".to_string()));
            } else {
                lines.push((Level::Info, "Recording stopped".to_string()));
            }
        }
        CommandOutcome::Ignored(e) => lines.push((Level::Warn, e.to_string())),
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::RecordingError;
    use crate::domain::recording::{RecordingFile, RecordingSession, RecordingsDir};

    #[test]
    fn started_with_file() {
        let file = RecordingFile::at_timestamp(&RecordingsDir::new("/rec"), 42);
        let lines = describe_outcome(&CommandOutcome::Started {
            file: Some(file),
            capture_error: None,
        });
        assert_eq!(lines.len(), 2);
        assert!(lines[1].1.contains("/rec/42.flac"));
    }

    #[test]
    fn capture_failure_is_a_warning() {
        let lines = describe_outcome(&CommandOutcome::Started {
            file: None,
            capture_error: Some(RecordingError::NoAudioDevice),
        });
        assert!(lines.iter().any(|(level, _)| *level == Level::Warn));
    }

    #[test]
    fn ignored_command_explains_why() {
        let err = RecordingSession::new().pause().unwrap_err();
        let lines = describe_outcome(&CommandOutcome::Ignored(err));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::Warn);
        assert!(lines[0].1.contains("cannot pause recording while idle"));
    }

    #[test]
    fn killed_reports_shutdown() {
        let lines = describe_outcome(&CommandOutcome::Killed {
            saved: None,
            finalize_error: None,
        });
        assert_eq!(lines, vec![(Level::Info, "Shutting down".to_string())]);
    }
}
