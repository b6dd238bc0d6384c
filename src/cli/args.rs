//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::command::ServiceCommand;

/// NotiMic - background microphone recorder with a live notification
#[derive(Parser, Debug)]
#[command(name = "notimic")]
#[command(version)]
#[command(about = "Background microphone recorder controlled from a desktop notification")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the recording service in the foreground
    Run {
        /// Start recording immediately
        #[arg(short = 'r', long)]
        record: bool,

        /// Do not show desktop notifications
        #[arg(long)]
        no_notify: bool,

        /// Directory to write recordings to
        #[arg(long, value_name = "DIR")]
        recordings_dir: Option<PathBuf>,
    },
    /// Start, pause or resume recording
    StartPause,
    /// Start recording, or resume if paused
    Start,
    /// Pause recording
    Pause,
    /// Stop recording and save the file
    Stop,
    /// Stop the service, saving any recording in progress
    Kill,
    /// Show service state and elapsed seconds
    Status,
    /// Share a saved recording
    Share {
        /// Recording file name, e.g. 1700000000000.flac
        file_name: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// The IPC request line for service control commands
    pub fn ipc_request(&self) -> Option<&'static str> {
        match self {
            Self::StartPause => Some(ServiceCommand::StartPause.as_str()),
            Self::Start => Some(ServiceCommand::Start.as_str()),
            Self::Pause => Some(ServiceCommand::Pause.as_str()),
            Self::Stop => Some(ServiceCommand::Stop.as_str()),
            Self::Kill => Some(ServiceCommand::Kill.as_str()),
            Self::Status => Some(STATUS_REQUEST),
            _ => None,
        }
    }
}

/// IPC request asking for the current state
pub const STATUS_REQUEST: &str = "status";

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed options for `notimic run`
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub record: bool,
    pub notify: bool,
    pub recordings_dir: PathBuf,
    pub share_command: String,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["recordings_dir", "notify", "share_command"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_defaults() {
        let cli = Cli::parse_from(["notimic", "run"]);
        match cli.command {
            Commands::Run {
                record, no_notify, ..
            } => {
                assert!(!record);
                assert!(!no_notify);
            }
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::parse_from([
            "notimic",
            "run",
            "--record",
            "--no-notify",
            "--recordings-dir",
            "/tmp/rec",
        ]);
        match cli.command {
            Commands::Run {
                record,
                no_notify,
                recordings_dir,
            } => {
                assert!(record);
                assert!(no_notify);
                assert_eq!(recordings_dir, Some(PathBuf::from("/tmp/rec")));
            }
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn control_commands_map_to_requests() {
        let cases = [
            ("start-pause", "start_pause"),
            ("start", "start"),
            ("pause", "pause"),
            ("stop", "stop"),
            ("kill", "kill"),
            ("status", "status"),
        ];
        for (arg, request) in cases {
            let cli = Cli::parse_from(["notimic", arg]);
            assert_eq!(cli.command.ipc_request(), Some(request), "{}", arg);
        }
    }

    #[test]
    fn local_commands_have_no_request() {
        let cli = Cli::parse_from(["notimic", "share", "1.flac"]);
        assert_eq!(cli.command.ipc_request(), None);
        assert!(matches!(cli.command, Commands::Share { file_name } if file_name == "1.flac"));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["notimic", "config", "set", "notify", "false"]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "notify");
            assert_eq!(value, "false");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["notimic"]).is_err());
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("recordings_dir"));
        assert!(is_valid_config_key("share_command"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
