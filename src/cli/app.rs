//! Shared CLI plumbing: exit codes, config merging and the share command

use std::env;
use std::process::ExitCode;

use crate::application::ports::ConfigStore;
use crate::application::{ShareRecordingError, ShareRecordingUseCase};
use crate::domain::config::AppConfig;
use crate::infrastructure::{CommandSharer, XdgConfigStore};

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the recordings directory
pub const RECORDINGS_DIR_ENV: &str = "NOTIMIC_RECORDINGS_DIR";

/// Config taken from the environment
pub fn env_config() -> AppConfig {
    AppConfig {
        recordings_dir: env::var(RECORDINGS_DIR_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            Presenter::new().warn(&format!("Ignoring config file: {}", e));
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Share a recording from the command line
pub async fn run_share(file_name: &str, config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let use_case = ShareRecordingUseCase::new(
        CommandSharer::new(config.share_command_or_default()),
        config.recordings_dir_or_default(),
    );

    match use_case.share(file_name).await {
        Ok(path) => {
            presenter.info(&format!("Shared {}", path.display()));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e @ ShareRecordingError::InvalidName(_)) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_USAGE_ERROR)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
