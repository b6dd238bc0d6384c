//! PID file guarding against a second service instance

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process;

use nix::sys::signal::kill;
use nix::unistd::Pid;

/// File name of the PID file
const PID_FILE_NAME: &str = "notimic.pid";

/// PID file for the running service
pub struct PidFile {
    path: PathBuf,
    acquired: bool,
}

impl PidFile {
    /// Create a PID file manager, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(PID_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(PID_FILE_NAME));
        Self::with_path(path)
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            acquired: false,
        }
    }

    /// Get the PID file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// PID of a live process holding the file, if any.
    /// A file naming a dead process is removed.
    pub fn is_running(&self) -> Option<u32> {
        let mut file = File::open(&self.path).ok()?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).ok()?;

        let pid: u32 = contents.trim().parse().ok()?;

        // Signal 0 only checks that the process exists
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(_) => Some(pid),
            Err(nix::errno::Errno::ESRCH) => {
                let _ = fs::remove_file(&self.path);
                None
            }
            // EPERM: alive, owned by someone else
            Err(nix::errno::Errno::EPERM) => Some(pid),
            Err(_) => None,
        }
    }

    /// Acquire the PID file (fails if another service is running)
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        if let Some(pid) = self.is_running() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PidFileError::WriteFailed(format!("Failed to create PID directory: {}", e))
            })?;
        }

        let mut file = File::create(&self.path).map_err(|e| {
            PidFileError::WriteFailed(format!("Failed to create PID file: {}", e))
        })?;

        write!(file, "{}", process::id())
            .map_err(|e| PidFileError::WriteFailed(format!("Failed to write PID: {}", e)))?;

        self.acquired = true;
        Ok(())
    }

    /// Release the PID file if this instance holds it
    pub fn release(&mut self) -> Result<(), PidFileError> {
        if !self.acquired {
            return Ok(());
        }
        self.acquired = false;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                PidFileError::RemoveFailed(format!("Failed to remove PID file: {}", e))
            })?;
        }
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("NotiMic is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}
