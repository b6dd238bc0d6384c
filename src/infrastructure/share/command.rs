//! Share adapter that opens the file with an external command

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{FileSharer, ShareError};
use crate::domain::config::DEFAULT_SHARE_COMMAND;

/// Hands files to a program such as `xdg-open` or `open`
pub struct CommandSharer {
    program: String,
}

impl CommandSharer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for CommandSharer {
    fn default() -> Self {
        Self::new(DEFAULT_SHARE_COMMAND)
    }
}

#[async_trait]
impl FileSharer for CommandSharer {
    async fn share(&self, path: &Path) -> Result<(), ShareError> {
        let status = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ShareError::CommandNotFound(self.program.clone())
                } else {
                    ShareError::Failed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(ShareError::Failed(format!(
                "{} exited with status: {}",
                self.program, status
            )));
        }

        Ok(())
    }
}
