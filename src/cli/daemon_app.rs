//! Service runner for `notimic run`

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::application::ports::{
    ActionSink, AudioDevice, FileSharer, Notifier, MICROPHONE_PERMISSION,
};
use crate::application::{
    PermissionBridge, RecordingService, ServiceConfig, ServiceEvent, ShareRecordingUseCase,
};
use crate::domain::command::ServiceCommand;
use crate::domain::recording::{RecordingsDir, SessionSnapshot};
use crate::infrastructure::{
    create_notifier, CommandSharer, ConsentFilePermissions, CpalAudioDevice,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::RunOptions;
use super::ipc::create_ipc_server;
use super::pid_file::PidFile;
use super::presenter::Presenter;
use super::signals::ServiceEvents;

/// Snapshot published for status queries
pub type SharedSnapshot = Arc<Mutex<SessionSnapshot>>;

/// Run the recording service until it is killed
pub async fn run_daemon(options: RunOptions) -> ExitCode {
    let presenter = Presenter::new();

    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    // Ask for the microphone before anything is shown
    let permissions = PermissionBridge::register(|callback| {
        ConsentFilePermissions::new(ConsentFilePermissions::default_dir(), callback)
    });
    match permissions.request_and_wait(MICROPHONE_PERMISSION).await {
        Ok(true) => {}
        Ok(false) => {
            presenter.error("Microphone permission denied");
            return ExitCode::from(EXIT_ERROR);
        }
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let recordings_dir = RecordingsDir::new(&options.recordings_dir);
    if let Err(e) = recordings_dir.ensure_exists() {
        presenter.warn(&format!(
            "Cannot create {}: {}",
            recordings_dir.path().display(),
            e
        ));
    }

    let (mut events, event_tx) = match ServiceEvents::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let notifier = create_notifier(action_sink(event_tx.clone()));

    let mut ipc_server = create_ipc_server();
    if let Err(e) = ipc_server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    let socket = ipc_server.path();

    let shared: SharedSnapshot = Arc::new(Mutex::new(SessionSnapshot::default()));
    let server_task = {
        let shared = Arc::clone(&shared);
        let tx = event_tx.clone();
        tokio::spawn(async move {
            let result = ipc_server
                .run(
                    tx,
                    Box::new(move || *shared.lock().unwrap_or_else(|e| e.into_inner())),
                )
                .await;
            if let Err(e) = result {
                eprintln!("IPC server stopped: {}", e);
            }
        })
    };

    let config = ServiceConfig {
        recordings_dir: recordings_dir.clone(),
        enable_notify: options.notify,
    };
    let mut service = RecordingService::new(CpalAudioDevice::new(), notifier, config, event_tx);
    let sharer = Arc::new(ShareRecordingUseCase::new(
        CommandSharer::new(options.share_command),
        recordings_dir,
    ));

    service.start_service().await;
    report_notification_errors(&mut service, &presenter);
    presenter.service_status(&service.snapshot());
    presenter.info(&format!(
        "PID: {} | Socket: {} | SIGINT: exit",
        std::process::id(),
        socket
    ));

    if options.record {
        let outcome = service.handle_command(ServiceCommand::Start).await;
        presenter.outcome(&outcome);
        report_notification_errors(&mut service, &presenter);
    }

    let clean = service_loop(&mut service, &mut events, &sharer, &presenter, &shared).await;

    // Dropping the server removes the socket file
    server_task.abort();
    let _ = server_task.await;
    let _ = pid_file.release();

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Forward notification button presses into the event channel.
/// Called from the notification waiter threads, so it must not block.
pub fn action_sink(tx: mpsc::Sender<ServiceEvent>) -> ActionSink {
    Arc::new(move |target| {
        let _ = tx.try_send(ServiceEvent::from(target));
    })
}

/// Drive the service from its event channel.
///
/// Shares run on their own task; the share program may stay open for as
/// long as the user likes while recording continues.
///
/// Returns `true` when the service was killed or shut down, `false` if
/// every sender went away first.
pub async fn service_loop<D, N, S>(
    service: &mut RecordingService<D, N>,
    events: &mut ServiceEvents,
    sharer: &Arc<ShareRecordingUseCase<S>>,
    presenter: &Presenter,
    shared: &SharedSnapshot,
) -> bool
where
    D: AudioDevice,
    N: Notifier,
    S: FileSharer + 'static,
{
    loop {
        publish(shared, service.snapshot());

        let Some(event) = events.recv().await else {
            return false;
        };

        let terminal = match event {
            ServiceEvent::Command(cmd) => {
                let outcome = service.handle_command(cmd).await;
                presenter.outcome(&outcome);
                outcome.is_terminal()
            }
            ServiceEvent::Tick(generation) => {
                service.on_tick(generation).await;
                false
            }
            ServiceEvent::Share(file_name) => {
                let sharer = Arc::clone(sharer);
                let presenter = *presenter;
                tokio::spawn(async move {
                    share_recording(&sharer, &file_name, &presenter).await;
                });
                false
            }
            ServiceEvent::Shutdown => {
                let outcome = service.handle_command(ServiceCommand::Kill).await;
                presenter.outcome(&outcome);
                true
            }
        };

        report_notification_errors(service, presenter);
        if terminal {
            publish(shared, service.snapshot());
            return true;
        }
    }
}

fn report_notification_errors<D: AudioDevice, N: Notifier>(
    service: &mut RecordingService<D, N>,
    presenter: &Presenter,
) {
    for e in service.take_notification_errors() {
        presenter.warn(&e.to_string());
    }
}

async fn share_recording<S: FileSharer>(
    sharer: &ShareRecordingUseCase<S>,
    file_name: &str,
    presenter: &Presenter,
) {
    match sharer.resolve(file_name) {
        Ok(path) => presenter.info(&format!("Sharing {}", path.display())),
        Err(e) => {
            presenter.warn(&e.to_string());
            return;
        }
    }
    if let Err(e) = sharer.share(file_name).await {
        presenter.warn(&format!("Share failed: {}", e));
    }
}

fn publish(shared: &SharedSnapshot, snapshot: SessionSnapshot) {
    *shared.lock().unwrap_or_else(|e| e.into_inner()) = snapshot;
}
