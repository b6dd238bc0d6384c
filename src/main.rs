//! NotiMic CLI entry point

use std::process::ExitCode;

use clap::Parser;

use notimic::cli::{
    app::{load_merged_config, run_share, EXIT_ERROR},
    args::{Cli, Commands, RunOptions},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    daemon_cmd::handle_daemon_command,
    presenter::Presenter,
};
use notimic::domain::config::AppConfig;
use notimic::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    if let Some(request) = cli.command.ipc_request() {
        if let Err(e) = handle_daemon_command(request, &presenter).await {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Share { file_name } => {
            let config = load_merged_config(AppConfig::empty()).await;
            run_share(&file_name, &config).await
        }
        Commands::Run {
            record,
            no_notify,
            recordings_dir,
        } => {
            let cli_config = AppConfig {
                recordings_dir: recordings_dir.map(|p| p.to_string_lossy().to_string()),
                notify: if no_notify { Some(false) } else { None },
                share_command: None,
            };
            let config = load_merged_config(cli_config).await;

            let options = RunOptions {
                record,
                notify: config.notify_or_default(),
                recordings_dir: config.recordings_dir_or_default().path().to_path_buf(),
                share_command: config.share_command_or_default().to_string(),
            };

            run_daemon(options).await
        }
        // Control commands were answered over IPC above
        _ => ExitCode::SUCCESS,
    }
}
