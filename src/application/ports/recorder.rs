//! Audio capture port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::RecordingFile;

/// Recording errors
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("Failed to open output file: {0}")]
    OutputFile(#[from] std::io::Error),

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Failed to start capture: {0}")]
    StartFailed(String),

    #[error("Failed to encode recording: {0}")]
    EncodeFailed(String),

    #[error("Failed to write recording: {0}")]
    WriteFailed(String),
}

/// Port for the microphone: opens capture handles bound to an output file.
#[async_trait]
pub trait AudioDevice: Send + Sync {
    /// Open the output file and start capturing into it.
    ///
    /// # Arguments
    /// * `file` - Where the finalized recording will be written
    ///
    /// # Returns
    /// A live capture handle, or an error if the file or device could not be prepared
    async fn open(&self, file: RecordingFile) -> Result<Box<dyn CaptureHandle>, RecordingError>;
}

/// An open recording session bound to one output file.
///
/// Pausing and resuming keep the same file; `finalize` flushes everything
/// to disk and releases the device.
#[async_trait]
pub trait CaptureHandle: Send + Sync {
    /// The file this handle writes to
    fn file(&self) -> &RecordingFile;

    /// Suspend capture in place
    fn pause(&mut self);

    /// Resume a paused capture
    fn resume(&mut self);

    /// Stop capturing, write the file and release the device
    async fn finalize(&mut self) -> Result<RecordingFile, RecordingError>;
}
