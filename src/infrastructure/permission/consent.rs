//! Terminal consent prompt backed by marker files
//!
//! A permission counts as granted once `<consent_dir>/<permission>.granted`
//! exists. Requests ask on the terminal from a blocking task and write the
//! marker when the user agrees.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::{PermissionCallback, PermissionLauncher};

/// Question asked before the first recording
pub const CONSENT_PROMPT: &str = "Allow NotiMic to record from the microphone? [y/N] ";

/// Reads one answer line
pub type AnswerSource = Arc<dyn Fn() -> std::io::Result<String> + Send + Sync>;

/// Permission launcher that asks once and remembers the answer on disk
pub struct ConsentFilePermissions {
    consent_dir: PathBuf,
    callback: PermissionCallback,
    answers: AnswerSource,
}

impl ConsentFilePermissions {
    /// Ask on stderr and read the answer from stdin
    pub fn new(consent_dir: impl Into<PathBuf>, callback: PermissionCallback) -> Self {
        Self::with_answer_source(consent_dir, callback, Arc::new(read_stdin_answer))
    }

    /// Take answers from `answers` instead of the terminal
    pub fn with_answer_source(
        consent_dir: impl Into<PathBuf>,
        callback: PermissionCallback,
        answers: AnswerSource,
    ) -> Self {
        Self {
            consent_dir: consent_dir.into(),
            callback,
            answers,
        }
    }

    /// Default location: `<data_dir>/notimic`
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("notimic")
    }

    /// Path of the marker file for a permission
    pub fn marker_path(&self, permission: &str) -> PathBuf {
        marker_path(&self.consent_dir, permission)
    }
}

fn marker_path(dir: &Path, permission: &str) -> PathBuf {
    dir.join(format!("{}.granted", permission))
}

fn read_stdin_answer() -> std::io::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{}", CONSENT_PROMPT)?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl PermissionLauncher for ConsentFilePermissions {
    fn is_granted(&self, permission: &str) -> bool {
        self.marker_path(permission).exists()
    }

    fn launch(&self, permission: &str) {
        let marker = self.marker_path(permission);
        let callback = Arc::clone(&self.callback);
        let answers = Arc::clone(&self.answers);

        tokio::task::spawn_blocking(move || {
            // EOF or a read error counts as "no"
            let granted = answers().map(|a| is_affirmative(&a)).unwrap_or(false);

            if granted {
                let persisted = marker
                    .parent()
                    .map_or(Ok(()), |dir| std::fs::create_dir_all(dir))
                    .and_then(|_| std::fs::write(&marker, b""));
                if let Err(e) = persisted {
                    eprintln!("Could not remember consent ({}): {}", marker.display(), e);
                }
            }

            callback(granted);
        });
    }
}
