//! Control commands - sends requests to the running service via IPC

use super::args::STATUS_REQUEST;
use super::ipc::{create_ipc_client, IpcClient};
use super::presenter::Presenter;

/// Message shown when no service is listening
pub const NOT_RUNNING: &str = "No service running. Start with: notimic run";

/// Send one request line to the running service
pub async fn handle_daemon_command(request: &str, presenter: &Presenter) -> Result<(), String> {
    send_request(create_ipc_client().as_ref(), request, presenter).await
}

async fn send_request(
    client: &dyn IpcClient,
    request: &str,
    presenter: &Presenter,
) -> Result<(), String> {
    if !client.is_service_running() {
        return Err(NOT_RUNNING.to_string());
    }

    let response = client
        .send_command(request)
        .await
        .map_err(|e| format!("Failed to communicate with service: {}", e))?;

    let response = response.trim();
    if let Some(stripped) = response.strip_prefix("error:") {
        return Err(stripped.trim().to_string());
    }

    if request == STATUS_REQUEST {
        presenter.output(response);
    } else {
        presenter.info(&format!("Command sent: {}", request));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io;

    struct FakeClient {
        running: bool,
        response: &'static str,
    }

    #[async_trait]
    impl IpcClient for FakeClient {
        fn is_service_running(&self) -> bool {
            self.running
        }

        async fn send_command(&self, _cmd: &str) -> io::Result<String> {
            Ok(self.response.to_string())
        }
    }

    #[tokio::test]
    async fn not_running_is_reported() {
        let client = FakeClient {
            running: false,
            response: "",
        };
        let err = send_request(&client, "stop", &Presenter::new())
            .await
            .unwrap_err();
        assert_eq!(err, NOT_RUNNING);
    }

    #[tokio::test]
    async fn error_response_becomes_err() {
        let client = FakeClient {
            running: true,
            response: "error: unknown command\n",
        };
        let err = send_request(&client, "bogus", &Presenter::new())
            .await
            .unwrap_err();
        assert_eq!(err, "unknown command");
    }

    #[tokio::test]
    async fn ok_response_succeeds() {
        let client = FakeClient {
            running: true,
            response: "ok\n",
        };
        assert!(send_request(&client, "start", &Presenter::new()).await.is_ok());
    }
}
