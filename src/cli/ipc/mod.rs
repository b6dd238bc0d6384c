//! IPC (Inter-Process Communication) module for service control
//!
//! One request line in, one response line out, over a Unix domain socket.

mod unix_socket;

pub use unix_socket::{respond, SocketPath, UnixSocketClient, UnixSocketServer};

use std::io;
use tokio::sync::mpsc;

use crate::application::ServiceEvent;
use crate::domain::recording::SessionSnapshot;

/// State function type for IPC servers
pub type StateFn = Box<dyn Fn() -> SessionSnapshot + Send + Sync>;

/// Trait for IPC servers that listen for service commands
#[async_trait::async_trait]
pub trait IpcServer: Send + Sync {
    /// Bind to the IPC endpoint
    fn bind(&mut self) -> io::Result<()>;

    /// Get the path/name of the IPC endpoint
    fn path(&self) -> String;

    /// Accept and handle connections
    ///
    /// Runs until the task is aborted. Each command is forwarded to `tx`;
    /// `state_fn` answers status queries.
    async fn run(&self, tx: mpsc::Sender<ServiceEvent>, state_fn: StateFn) -> io::Result<()>;

    /// Cleanup IPC resources
    fn cleanup(&self);
}

/// Trait for IPC clients that send commands to the service
#[async_trait::async_trait]
pub trait IpcClient: Send + Sync {
    /// Check if the service appears to be running (endpoint exists)
    fn is_service_running(&self) -> bool;

    /// Send a request and receive the response line
    async fn send_command(&self, cmd: &str) -> io::Result<String>;
}

/// Create the IPC server at the default endpoint
pub fn create_ipc_server() -> Box<dyn IpcServer> {
    Box::new(UnixSocketServer::new(SocketPath::new()))
}

/// Create the IPC client for the default endpoint
pub fn create_ipc_client() -> Box<dyn IpcClient> {
    Box::new(UnixSocketClient::new(SocketPath::new()))
}
