//! Service event channel and OS signal handling

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

use crate::application::ServiceEvent;

/// Capacity of the service event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Receiving end of the service loop's event channel
///
/// SIGINT/SIGTERM arrive here as [`ServiceEvent::Shutdown`]; the IPC server,
/// the notification buttons and the ticker send through the returned sender.
pub struct ServiceEvents {
    receiver: mpsc::Receiver<ServiceEvent>,
}

impl ServiceEvents {
    /// Create the channel and start listening for shutdown signals
    pub fn new() -> Result<(Self, mpsc::Sender<ServiceEvent>), std::io::Error> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            let _ = tx_int.send(ServiceEvent::Shutdown).await;
        });

        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            let _ = tx_term.send(ServiceEvent::Shutdown).await;
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Wrap an existing receiver without installing signal handlers
    pub fn from_receiver(receiver: mpsc::Receiver<ServiceEvent>) -> Self {
        Self { receiver }
    }

    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<ServiceEvent> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::ServiceCommand;

    #[tokio::test]
    async fn forwards_sent_events() {
        let (mut events, tx) = ServiceEvents::new().unwrap();
        tx.send(ServiceEvent::Command(ServiceCommand::Stop))
            .await
            .unwrap();

        assert_eq!(
            events.recv().await,
            Some(ServiceEvent::Command(ServiceCommand::Stop))
        );
    }
}
