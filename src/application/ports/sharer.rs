//! File sharing port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Sharing errors
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    #[error("Share command not found: {0}")]
    CommandNotFound(String),

    #[error("Failed to share file: {0}")]
    Failed(String),
}

/// Port for handing a file to the platform's share facility
#[async_trait]
pub trait FileSharer: Send + Sync {
    /// Offer the file to the user.
    ///
    /// # Arguments
    /// * `path` - Absolute path of the file
    async fn share(&self, path: &Path) -> Result<(), ShareError>;
}
