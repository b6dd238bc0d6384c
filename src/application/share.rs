//! Share a finished recording

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::error::InvalidFileNameError;
use crate::domain::recording::RecordingsDir;

use super::ports::{FileSharer, ShareError};

/// Errors from the share use case
#[derive(Debug, Error)]
pub enum ShareRecordingError {
    #[error(transparent)]
    InvalidName(#[from] InvalidFileNameError),

    #[error("{source} ({})", path.display())]
    Share {
        path: PathBuf,
        #[source]
        source: ShareError,
    },
}

/// Resolves a recording by file name and hands it to the platform sharer.
///
/// The file is not checked for existence; whatever the sharer does with a
/// missing path is its own business.
pub struct ShareRecordingUseCase<S: FileSharer> {
    sharer: S,
    recordings: RecordingsDir,
}

impl<S: FileSharer> ShareRecordingUseCase<S> {
    pub fn new(sharer: S, recordings: RecordingsDir) -> Self {
        Self { sharer, recordings }
    }

    /// Resolve the absolute path of a recording
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, ShareRecordingError> {
        let file = self.recordings.resolve(file_name)?;
        Ok(std::path::absolute(file.path()).unwrap_or_else(|_| file.path().to_path_buf()))
    }

    /// Share the recording, returning the path that was handed over
    pub async fn share(&self, file_name: &str) -> Result<PathBuf, ShareRecordingError> {
        let path = self.resolve(file_name)?;
        self.sharer
            .share(&path)
            .await
            .map_err(|source| ShareRecordingError::Share {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingSharer {
        shared: Arc<Mutex<Vec<PathBuf>>>,
        fail: bool,
    }

    #[async_trait]
    impl FileSharer for RecordingSharer {
        async fn share(&self, path: &Path) -> Result<(), ShareError> {
            self.shared.lock().unwrap().push(path.to_path_buf());
            if self.fail {
                return Err(ShareError::CommandNotFound("xdg-open".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn shares_resolved_absolute_path() {
        let sharer = RecordingSharer::default();
        let use_case =
            ShareRecordingUseCase::new(sharer.clone(), RecordingsDir::new("/data/Records"));

        let path = use_case.share("1700.flac").await.unwrap();

        assert_eq!(path, PathBuf::from("/data/Records/1700.flac"));
        assert_eq!(*sharer.shared.lock().unwrap(), vec![path]);
    }

    #[tokio::test]
    async fn missing_file_is_still_shared() {
        let tmp = tempfile::tempdir().unwrap();
        let sharer = RecordingSharer::default();
        let use_case = ShareRecordingUseCase::new(sharer.clone(), RecordingsDir::new(tmp.path()));

        assert!(use_case.share("gone.flac").await.is_ok());
        assert_eq!(sharer.shared.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_name_is_rejected_before_sharing() {
        let sharer = RecordingSharer::default();
        let use_case =
            ShareRecordingUseCase::new(sharer.clone(), RecordingsDir::new("/data/Records"));

        let err = use_case.share("../../etc/passwd").await.unwrap_err();
        assert!(matches!(err, ShareRecordingError::InvalidName(_)));
        assert!(sharer.shared.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sharer_failure_carries_path() {
        let sharer = RecordingSharer {
            fail: true,
            ..Default::default()
        };
        let use_case = ShareRecordingUseCase::new(sharer, RecordingsDir::new("/data/Records"));

        let err = use_case.share("1700.flac").await.unwrap_err();
        assert!(err.to_string().contains("/data/Records/1700.flac"));
    }
}
