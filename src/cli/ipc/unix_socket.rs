//! Unix Domain Socket communication for service control

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use super::{IpcClient, IpcServer, StateFn};
use crate::application::ServiceEvent;
use crate::cli::args::STATUS_REQUEST;
use crate::domain::command::ServiceCommand;
use crate::domain::recording::SessionSnapshot;

/// File name of the control socket
const SOCKET_FILE_NAME: &str = "notimic.sock";

/// Pause after a failed accept before trying again
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join(SOCKET_FILE_NAME))
            .unwrap_or_else(|_| std::env::temp_dir().join(SOCKET_FILE_NAME));
        Self { path }
    }

    /// Use an explicit socket path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Unix Domain Socket server for service commands
pub struct UnixSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl UnixSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }
}

impl Drop for UnixSocketServer {
    fn drop(&mut self) {
        if self.listener.is_some() {
            self.cleanup();
        }
    }
}

#[async_trait]
impl IpcServer for UnixSocketServer {
    fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    fn path(&self) -> String {
        self.socket_path.path().to_string_lossy().to_string()
    }

    async fn run(&self, tx: mpsc::Sender<ServiceEvent>, state_fn: StateFn) -> io::Result<()> {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    let state = state_fn();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, tx, state).await {
                            eprintln!("Socket connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("Socket accept error: {}", e);
                    // Persistent errors (EMFILE) would otherwise spin
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                }
            }
        }
    }

    fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

/// Map a request line to the event it triggers and the response line
pub fn respond(request: &str, state: SessionSnapshot) -> (Option<ServiceEvent>, String) {
    let request = request.trim();
    if request == STATUS_REQUEST {
        return (None, state.to_string());
    }
    match ServiceCommand::parse(request) {
        Some(cmd) => (Some(ServiceEvent::Command(cmd)), "ok".to_string()),
        None => (None, "error: unknown command".to_string()),
    }
}

/// Handle a single client connection
async fn handle_connection(
    stream: UnixStream,
    tx: mpsc::Sender<ServiceEvent>,
    current_state: SessionSnapshot,
) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    reader.read_line(&mut line).await?;

    let (event, response) = respond(&line, current_state);
    let response = match event {
        Some(event) => match tx.send(event).await {
            Ok(()) => response,
            Err(_) => "error: service is shutting down".to_string(),
        },
        None => response,
    };

    writer.write_all(format!("{}\n", response).as_bytes()).await?;
    writer.flush().await?;

    Ok(())
}

/// Unix Domain Socket client for sending commands to the service
pub struct UnixSocketClient {
    socket_path: SocketPath,
}

impl UnixSocketClient {
    /// Create a new socket client
    pub fn new(socket_path: SocketPath) -> Self {
        Self { socket_path }
    }
}

#[async_trait]
impl IpcClient for UnixSocketClient {
    fn is_service_running(&self) -> bool {
        self.socket_path.exists()
    }

    async fn send_command(&self, cmd: &str) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(format!("{}\n", cmd).as_bytes()).await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response = String::new();
        reader.read_line(&mut response).await?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::{ElapsedTime, RecorderState};

    fn recording(secs: u64) -> SessionSnapshot {
        SessionSnapshot {
            state: RecorderState::Recording,
            elapsed: ElapsedTime::from_secs(secs),
        }
    }

    #[test]
    fn socket_path_uses_xdg_runtime_dir() {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("notimic.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("notimic.sock"));

        let socket_path = SocketPath::new();
        assert_eq!(socket_path.path(), path.as_path());
    }

    #[test]
    fn respond_to_status() {
        let (event, response) = respond("status\n", recording(12));
        assert!(event.is_none());
        assert_eq!(response, "recording 12");
    }

    #[test]
    fn respond_to_commands() {
        for cmd in ServiceCommand::ALL {
            let (event, response) = respond(cmd.as_str(), SessionSnapshot::default());
            assert_eq!(event, Some(ServiceEvent::Command(cmd)));
            assert_eq!(response, "ok");
        }
    }

    #[test]
    fn respond_to_unknown() {
        let (event, response) = respond("toggle", SessionSnapshot::default());
        assert!(event.is_none());
        assert_eq!(response, "error: unknown command");
    }

    #[tokio::test]
    async fn server_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let socket = SocketPath::with_path(tmp.path().join("test.sock"));

        let mut server = UnixSocketServer::new(socket.clone());
        server.bind().unwrap();
        let server = std::sync::Arc::new(server);

        let (tx, mut rx) = mpsc::channel(8);
        let task = {
            let server = std::sync::Arc::clone(&server);
            tokio::spawn(async move { server.run(tx, Box::new(|| recording(3))).await })
        };

        let client = UnixSocketClient::new(socket.clone());
        assert!(client.is_service_running());

        assert_eq!(client.send_command("status").await.unwrap(), "recording 3\n");
        assert_eq!(client.send_command("stop").await.unwrap(), "ok\n");
        assert_eq!(
            rx.recv().await,
            Some(ServiceEvent::Command(ServiceCommand::Stop))
        );
        assert_eq!(
            client.send_command("bogus").await.unwrap(),
            "error: unknown command\n"
        );

        task.abort();
    }

    #[tokio::test]
    async fn every_command_reaches_the_service_channel() {
        let tmp = tempfile::tempdir().unwrap();
        let socket = SocketPath::with_path(tmp.path().join("cmds.sock"));

        let mut server = UnixSocketServer::new(socket.clone());
        server.bind().unwrap();
        let server = std::sync::Arc::new(server);

        let (tx, mut rx) = mpsc::channel(8);
        let task = {
            let server = std::sync::Arc::clone(&server);
            tokio::spawn(async move { server.run(tx, Box::new(SessionSnapshot::default)).await })
        };

        let client = UnixSocketClient::new(socket);
        for cmd in ServiceCommand::ALL {
            assert_eq!(client.send_command(cmd.as_str()).await.unwrap(), "ok\n");
            assert_eq!(rx.recv().await, Some(ServiceEvent::Command(cmd)));
        }

        task.abort();
    }

    #[tokio::test]
    async fn command_after_service_exit_reports_shutdown() {
        let tmp = tempfile::tempdir().unwrap();
        let socket = SocketPath::with_path(tmp.path().join("closed.sock"));

        let mut server = UnixSocketServer::new(socket.clone());
        server.bind().unwrap();
        let server = std::sync::Arc::new(server);

        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let task = {
            let server = std::sync::Arc::clone(&server);
            tokio::spawn(async move { server.run(tx, Box::new(SessionSnapshot::default)).await })
        };

        let client = UnixSocketClient::new(socket);
        assert_eq!(
            client.send_command("kill").await.unwrap(),
            "error: service is shutting down\n"
        );
        assert_eq!(client.send_command("status").await.unwrap(), "idle 0\n");

        task.abort();
    }

    #[tokio::test]
    async fn stale_socket_is_replaced_on_bind() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("stale.sock");
        std::fs::write(&path, b"").unwrap();

        let mut server = UnixSocketServer::new(SocketPath::with_path(&path));
        assert!(server.bind().is_ok());
    }
}
