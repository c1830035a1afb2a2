//! IPC server for the Pomodoro daemon.
//!
//! Unix domain socket transport carrying JSON requests and responses;
//! requests are dispatched to the [`TimerEngine`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::types::{IpcRequest, IpcResponse};

use super::timer::TimerEngine;

// ============================================================================
// Constants
// ============================================================================

/// Maximum request size in bytes
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Socket binding error
    #[error("Failed to bind socket: {0}")]
    Bind(String),

    /// Read error
    #[error("Failed to read request: {0}")]
    Read(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix domain socket IPC server.
pub struct IpcServer {
    listener: UnixListener,
    /// Socket path (removed again on drop)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// A stale socket file at the path is removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .map_err(|e| IpcError::Bind(e.to_string()))
            .with_context(|| format!("Cannot listen on {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Applies a read timeout to avoid a stuck client blocking the
    /// accept loop.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = vec![0u8; MAX_REQUEST_SIZE];

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::Read(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            anyhow::bail!("Connection closed by client");
        }

        let request: IpcRequest = serde_json::from_slice(&buffer[..n])
            .context("Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the timer engine.
pub struct RequestHandler {
    engine: Arc<Mutex<TimerEngine>>,
}

impl RequestHandler {
    /// Creates a new request handler for the given engine.
    pub fn new(engine: Arc<Mutex<TimerEngine>>) -> Self {
        Self { engine }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::Status => self.handle_status().await,
        }
    }

    async fn handle_start(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.start() {
            Ok(()) => IpcResponse::success("Session started", Some(engine.snapshot())),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    async fn handle_reset(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        match engine.reset() {
            Ok(()) => IpcResponse::success("Timer reset", Some(engine.snapshot())),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;
        IpcResponse::success("", Some(engine.snapshot()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    use crate::daemon::timer::TimerEvent;

    fn create_temp_socket_path() -> PathBuf {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sock");
        // Keep the directory so it's not deleted
        std::mem::forget(dir);
        path
    }

    fn create_engine() -> (Arc<Mutex<TimerEngine>>, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = TimerEngine::new(tx);
        (Arc::new(Mutex::new(engine)), rx)
    }

    mod ipc_server_tests {
        use super::*;

        #[tokio::test]
        async fn test_server_creation() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path);

            assert!(server.is_ok());
            assert!(socket_path.exists());
        }

        #[tokio::test]
        async fn test_server_removes_existing_socket() {
            let socket_path = create_temp_socket_path();
            std::fs::write(&socket_path, "stale").unwrap();

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
        }

        #[tokio::test]
        async fn test_server_creates_parent_directory() {
            let dir = tempfile::tempdir().unwrap();
            let socket_path = dir.path().join("subdir").join("test.sock");

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
            assert!(socket_path.parent().unwrap().exists());
        }

        #[tokio::test]
        async fn test_receive_request() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let client_handle = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let mut stream = UnixStream::connect(&client_path).await.unwrap();
                stream
                    .write_all(br#"{"command":"status"}"#)
                    .await
                    .unwrap();
                stream.flush().await.unwrap();
            });

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await.unwrap();

            assert!(matches!(request, IpcRequest::Status));
            client_handle.await.unwrap();
        }

        #[tokio::test]
        async fn test_send_response() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let client_handle = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let mut stream = UnixStream::connect(&client_path).await.unwrap();

                let mut buffer = vec![0u8; 4096];
                let n = stream.read(&mut buffer).await.unwrap();
                serde_json::from_slice::<IpcResponse>(&buffer[..n]).unwrap()
            });

            let mut stream = server.accept().await.unwrap();
            let response = IpcResponse::success("Test message", None);
            IpcServer::send_response(&mut stream, &response)
                .await
                .unwrap();

            let received = client_handle.await.unwrap();
            assert_eq!(received.status, "success");
            assert_eq!(received.message, "Test message");
        }

        #[tokio::test]
        async fn test_receive_request_invalid_json() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client_handle = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let mut stream = UnixStream::connect(&client_path).await.unwrap();
                stream.write_all(b"not valid json").await.unwrap();
                stream.flush().await.unwrap();
            });

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await;

            assert!(request.is_err());
        }

        #[tokio::test]
        async fn test_connection_closed_without_data() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let stream = UnixStream::connect(&client_path).await.unwrap();
                drop(stream);
            });

            let mut stream = server.accept().await.unwrap();
            let result = IpcServer::receive_request(&mut stream).await;

            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_server_drop_cleanup() {
            let socket_path = create_temp_socket_path();

            {
                let _server = IpcServer::new(&socket_path).unwrap();
                assert!(socket_path.exists());
            }

            assert!(!socket_path.exists());
        }
    }

    mod request_handler_tests {
        use super::*;

        #[tokio::test]
        async fn test_handle_status_initial() {
            let (engine, _rx) = create_engine();
            let handler = RequestHandler::new(engine);

            let response = handler.handle(IpcRequest::Status).await;

            assert_eq!(response.status, "success");
            let data = response.data.unwrap();
            assert_eq!(data.state, Some("idle".to_string()));
            assert_eq!(data.remaining_seconds, Some(0));
            assert_eq!(data.repetition_count, Some(1));
        }

        #[tokio::test]
        async fn test_handle_start() {
            let (engine, _rx) = create_engine();
            let handler = RequestHandler::new(engine);

            let response = handler.handle(IpcRequest::Start).await;

            assert_eq!(response.status, "success");
            assert_eq!(response.message, "Session started");

            let data = response.data.unwrap();
            assert_eq!(data.state, Some("work".to_string()));
            assert_eq!(data.remaining_seconds, Some(25 * 60));
            assert_eq!(data.repetition_count, Some(2));
        }

        #[tokio::test]
        async fn test_handle_start_already_running() {
            let (engine, _rx) = create_engine();
            let handler = RequestHandler::new(engine);

            handler.handle(IpcRequest::Start).await;
            let response = handler.handle(IpcRequest::Start).await;

            assert_eq!(response.status, "error");
            assert!(response.message.contains("already running"));
        }

        #[tokio::test]
        async fn test_handle_reset() {
            let (engine, _rx) = create_engine();
            let handler = RequestHandler::new(engine);

            handler.handle(IpcRequest::Start).await;
            let response = handler.handle(IpcRequest::Reset).await;

            assert_eq!(response.status, "success");
            assert_eq!(response.message, "Timer reset");

            let data = response.data.unwrap();
            assert_eq!(data.state, Some("idle".to_string()));
            assert_eq!(data.remaining_seconds, Some(0));
            assert_eq!(data.repetition_count, Some(1));
            assert_eq!(data.tally, Some(String::new()));
        }

        #[tokio::test]
        async fn test_handle_reset_when_idle_succeeds() {
            let (engine, _rx) = create_engine();
            let handler = RequestHandler::new(engine);

            let first = handler.handle(IpcRequest::Reset).await;
            let second = handler.handle(IpcRequest::Reset).await;

            assert_eq!(first.status, "success");
            assert_eq!(second.status, "success");

            let data = second.data.unwrap();
            assert_eq!(data.state, Some("idle".to_string()));
            assert_eq!(data.repetition_count, Some(1));
        }
    }

    mod integration_tests {
        use super::*;

        #[tokio::test]
        async fn test_full_ipc_flow() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();
            let (engine, _rx) = create_engine();
            let handler = RequestHandler::new(engine);

            let client_path = socket_path.clone();
            let client_handle = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let mut stream = UnixStream::connect(&client_path).await.unwrap();

                stream.write_all(br#"{"command":"start"}"#).await.unwrap();
                stream.flush().await.unwrap();

                let mut buffer = vec![0u8; 4096];
                let n = stream.read(&mut buffer).await.unwrap();
                serde_json::from_slice::<IpcResponse>(&buffer[..n]).unwrap()
            });

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await.unwrap();
            let response = handler.handle(request).await;
            IpcServer::send_response(&mut stream, &response)
                .await
                .unwrap();

            let client_response = client_handle.await.unwrap();
            assert_eq!(client_response.status, "success");

            let data = client_response.data.unwrap();
            assert_eq!(data.state, Some("work".to_string()));
            assert_eq!(data.remaining_seconds, Some(1500));
        }

        #[tokio::test]
        async fn test_command_sequence() {
            let (engine, _rx) = create_engine();
            let handler = RequestHandler::new(engine);

            let sequence = [
                (r#"{"command":"start"}"#, "work"),
                (r#"{"command":"reset"}"#, "idle"),
                (r#"{"command":"status"}"#, "idle"),
                (r#"{"command":"start"}"#, "work"),
            ];

            for (cmd_json, expected_state) in sequence {
                let request: IpcRequest = serde_json::from_str(cmd_json).unwrap();
                let response = handler.handle(request).await;

                assert_eq!(response.status, "success", "command: {}", cmd_json);
                let data = response.data.unwrap();
                assert_eq!(
                    data.state,
                    Some(expected_state.to_string()),
                    "command: {}",
                    cmd_json
                );
            }
        }
    }
}
