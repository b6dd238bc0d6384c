//! Recorded file reference and the recordings directory

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::error::InvalidFileNameError;

/// Extension of saved recordings
pub const RECORDING_EXTENSION: &str = "flac";

/// Name of the recordings directory inside the application data directory
pub const RECORDINGS_DIR_NAME: &str = "Records";

/// Reference to one recording on disk: a timestamp-derived file name inside
/// the recordings directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingFile {
    file_name: String,
    path: PathBuf,
}

impl RecordingFile {
    /// Name a recording after its capture-start time (milliseconds since epoch)
    pub fn at_timestamp(dir: &RecordingsDir, timestamp_ms: u64) -> Self {
        let file_name = format!("{}.{}", timestamp_ms, RECORDING_EXTENSION);
        let path = dir.path().join(&file_name);
        Self { file_name, path }
    }

    /// Name a recording after the current time
    pub fn now(dir: &RecordingsDir) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::at_timestamp(dir, now)
    }

    /// Get the bare file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the full path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The fixed directory recordings are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingsDir {
    path: PathBuf,
}

impl RecordingsDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data_dir>/notimic/Records`
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("notimic")
            .join(RECORDINGS_DIR_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory if it does not exist yet
    pub fn ensure_exists(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.path)
    }

    /// Resolve a file name inside this directory.
    ///
    /// Only bare names are accepted; whether the file exists is not checked.
    pub fn resolve(&self, file_name: &str) -> Result<RecordingFile, InvalidFileNameError> {
        let bare = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| *n == file_name);

        match bare {
            Some(name) if name != ".." => Ok(RecordingFile {
                file_name: name.to_string(),
                path: self.path.join(name),
            }),
            _ => Err(InvalidFileNameError {
                input: file_name.to_string(),
            }),
        }
    }
}

impl Default for RecordingsDir {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
