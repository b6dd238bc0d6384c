//! Background recording service
//!
//! Owns the recording session, the capture handle and the ticker. All
//! mutation happens through `&mut self` on the task that drives the
//! service loop, so there is exactly one owner for every piece of state.

use tokio::sync::mpsc;

use crate::domain::command::ServiceCommand;
use crate::domain::notification::{render_share, render_status, ActionTarget};
use crate::domain::recording::{
    ElapsedTime, InvalidStateTransition, RecordingFile, RecordingSession, RecordingsDir,
    SessionSnapshot,
};

use super::ports::{AudioDevice, CaptureHandle, NotificationError, Notifier, RecordingError};
use super::ticker::Ticker;

/// Everything the service loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    /// A transport command from a notification button or IPC
    Command(ServiceCommand),
    /// A timer tick, tagged with the generation of the timer that sent it
    Tick(u64),
    /// The share button of a "recording saved" notification was pressed
    Share(String),
    /// SIGINT/SIGTERM
    Shutdown,
}

impl From<ActionTarget> for ServiceEvent {
    fn from(target: ActionTarget) -> Self {
        match target {
            ActionTarget::Command(cmd) => Self::Command(cmd),
            ActionTarget::Share { file_name } => Self::Share(file_name),
        }
    }
}

/// Configuration for the recording service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Where new recordings are written
    pub recordings_dir: RecordingsDir,
    /// Whether to show notifications
    pub enable_notify: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            recordings_dir: RecordingsDir::default(),
            enable_notify: true,
        }
    }
}

/// What a command did
#[derive(Debug)]
pub enum CommandOutcome {
    /// Idle -> Recording. `capture_error` is set when the capture handle
    /// could not be prepared; the session runs anyway, without a file.
    Started {
        file: Option<RecordingFile>,
        capture_error: Option<RecordingError>,
    },
    /// Paused -> Recording
    Resumed,
    /// Recording -> Paused
    Paused,
    /// Recording | Paused -> Idle
    Stopped {
        saved: Option<RecordingFile>,
        finalize_error: Option<RecordingError>,
    },
    /// The command does not apply in the current state
    Ignored(InvalidStateTransition),
    /// The service released everything and must terminate
    Killed {
        saved: Option<RecordingFile>,
        finalize_error: Option<RecordingError>,
    },
}

impl CommandOutcome {
    /// Whether the service loop should exit
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Killed { .. })
    }
}

/// The recording service
pub struct RecordingService<D, N>
where
    D: AudioDevice,
    N: Notifier,
{
    device: D,
    notifier: N,
    config: ServiceConfig,
    session: RecordingSession,
    capture: Option<Box<dyn CaptureHandle>>,
    ticker: Ticker,
    events: mpsc::Sender<ServiceEvent>,
    notify_errors: Vec<NotificationError>,
    notify_failing: bool,
}

impl<D, N> RecordingService<D, N>
where
    D: AudioDevice,
    N: Notifier,
{
    /// Create a new service. Ticks are posted to `events`, which should feed
    /// back into the loop driving this service.
    pub fn new(
        device: D,
        notifier: N,
        config: ServiceConfig,
        events: mpsc::Sender<ServiceEvent>,
    ) -> Self {
        Self {
            device,
            notifier,
            config,
            session: RecordingSession::new(),
            capture: None,
            ticker: Ticker::new(ElapsedTime::tick_period()),
            events,
            notify_errors: Vec::new(),
            notify_failing: false,
        }
    }

    /// Show the initial status notification
    pub async fn start_service(&mut self) {
        self.render().await;
    }

    /// Current state and elapsed time
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// File of the open capture handle, if any
    pub fn capture_file(&self) -> Option<&RecordingFile> {
        self.capture.as_ref().map(|c| c.file())
    }

    /// Whether the ticker is running
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    /// Drain notification failures collected since the last call.
    ///
    /// A failing notification server is reported once, not on every
    /// tick, until a notification is shown successfully again.
    pub fn take_notification_errors(&mut self) -> Vec<NotificationError> {
        std::mem::take(&mut self.notify_errors)
    }

    /// Apply a command and re-render the status notification
    pub async fn handle_command(&mut self, command: ServiceCommand) -> CommandOutcome {
        let outcome = match command {
            ServiceCommand::StartPause if self.session.is_recording() => self.pause(),
            ServiceCommand::StartPause | ServiceCommand::Start => self.start_or_resume().await,
            ServiceCommand::Pause => self.pause(),
            ServiceCommand::Stop => self.stop().await,
            ServiceCommand::Kill => return self.kill().await,
        };

        self.render().await;
        outcome
    }

    /// Handle a tick. Ticks from a cancelled timer, or arriving while not
    /// recording, change nothing. Returns whether elapsed time advanced.
    pub async fn on_tick(&mut self, generation: u64) -> bool {
        if !self.ticker.is_current(generation) {
            return false;
        }
        if !self.session.tick() {
            return false;
        }
        self.render().await;
        true
    }

    async fn start_or_resume(&mut self) -> CommandOutcome {
        if self.session.is_paused() {
            if let Err(e) = self.session.resume() {
                return CommandOutcome::Ignored(e);
            }
            if let Some(capture) = self.capture.as_mut() {
                capture.resume();
            }
            self.ticker.start(self.events.clone());
            return CommandOutcome::Resumed;
        }

        // Rejected while already recording, so a second handle is never opened
        if let Err(e) = self.session.start() {
            return CommandOutcome::Ignored(e);
        }
        self.ticker.start(self.events.clone());

        let file = RecordingFile::now(&self.config.recordings_dir);
        match self.device.open(file).await {
            Ok(capture) => {
                let file = capture.file().clone();
                self.capture = Some(capture);
                CommandOutcome::Started {
                    file: Some(file),
                    capture_error: None,
                }
            }
            Err(e) => CommandOutcome::Started {
                file: None,
                capture_error: Some(e),
            },
        }
    }

    fn pause(&mut self) -> CommandOutcome {
        if let Err(e) = self.session.pause() {
            return CommandOutcome::Ignored(e);
        }
        self.ticker.cancel();
        if let Some(capture) = self.capture.as_mut() {
            capture.pause();
        }
        CommandOutcome::Paused
    }

    async fn stop(&mut self) -> CommandOutcome {
        let transition = self.session.stop();
        self.ticker.cancel();
        if let Err(e) = transition {
            return CommandOutcome::Ignored(e);
        }

        let (saved, finalize_error) = self.release_capture().await;
        if let Some(file) = &saved {
            if self.config.enable_notify {
                let result = self.notifier.show_share(&render_share(file)).await;
                self.record_notify(result);
            }
        }

        CommandOutcome::Stopped {
            saved,
            finalize_error,
        }
    }

    async fn kill(&mut self) -> CommandOutcome {
        self.ticker.cancel();
        let (saved, finalize_error) = self.release_capture().await;

        if self.config.enable_notify {
            let result = self.notifier.close_status().await;
            self.record_notify(result);
        }

        CommandOutcome::Killed {
            saved,
            finalize_error,
        }
    }

    async fn release_capture(&mut self) -> (Option<RecordingFile>, Option<RecordingError>) {
        match self.capture.take() {
            Some(mut capture) => match capture.finalize().await {
                Ok(file) => (Some(file), None),
                Err(e) => (None, Some(e)),
            },
            None => (None, None),
        }
    }

    async fn render(&mut self) {
        if self.config.enable_notify {
            let notification = render_status(&self.session.snapshot());
            let result = self.notifier.show_status(&notification).await;
            self.record_notify(result);
        }
    }

    fn record_notify(&mut self, result: Result<(), NotificationError>) {
        match result {
            Ok(()) => self.notify_failing = false,
            Err(e) => {
                if !self.notify_failing {
                    self.notify_errors.push(e);
                }
                self.notify_failing = true;
            }
        }
    }
}
