// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

// Wake Console - Remote Service Client
// HTTP client for the power-control backend (`/status` and `/<command>`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::RemoteServiceConfig;
use crate::error::{Error, Result};
use crate::types::{ActionResponse, StatusResponse};

/// Remote control service consumed by the status controller.
///
/// The production implementation is [`RemoteClient`]; tests script this
/// trait to drive the controller through every resolution order.
#[async_trait]
pub trait RemoteControlService: Send + Sync {
    /// Query whether the controlled host is currently reachable
    async fn fetch_status(&self) -> Result<StatusResponse>;

    /// Send a command (e.g. "start") to the service
    async fn send_command(&self, command: &str) -> Result<()>;
}

/// Reqwest-based client for the remote control service.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
}

/// Commands are interpolated into the request path, so only short
/// lowercase ASCII tokens are accepted.
pub fn validate_command(command: &str) -> Result<()> {
    if command.is_empty() || command.len() > 32 {
        return Err(Error::InvalidCommand(command.to_string()));
    }
    if !command.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(Error::InvalidCommand(command.to_string()));
    }
    Ok(())
}

impl RemoteClient {
    /// Create a client for the configured service address.
    ///
    /// The base URL is built once here and reused for every request.
    pub fn new(config: &RemoteServiceConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    /// Base URL used for requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RemoteControlService for RemoteClient {
    async fn fetch_status(&self) -> Result<StatusResponse> {
        let url = format!("{}/status", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus(response.status().as_u16()));
        }

        let status: StatusResponse = response.json().await?;
        if let Some(error) = &status.error {
            tracing::warn!("Remote service reports a configuration problem: {error}");
        }
        Ok(status)
    }

    async fn send_command(&self, command: &str) -> Result<()> {
        validate_command(command)?;

        let url = format!("{}/{}", self.base_url, command);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!("Command '{command}' dispatched");
            Ok(())
        } else {
            let message = response
                .json::<ActionResponse>()
                .await
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            Err(Error::Action {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a canned HTTP response on a loopback port and return the
    /// matching service config.
    async fn spawn_stub(status_line: &'static str, body: &'static str) -> RemoteServiceConfig {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        RemoteServiceConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn test_validate_command() {
        assert!(validate_command("start").is_ok());
        assert!(validate_command("shutdown").is_ok());

        assert!(validate_command("").is_err());
        assert!(validate_command("Start").is_err());
        assert!(validate_command("start now").is_err());
        assert!(validate_command("../status").is_err());
        assert!(validate_command(&"x".repeat(64)).is_err());
    }

    #[tokio::test]
    async fn test_fetch_status_online() {
        let config = spawn_stub("HTTP/1.1 200 OK", r#"{"online": true}"#).await;
        let client = RemoteClient::new(&config).unwrap();

        let status = client.fetch_status().await.unwrap();
        assert!(status.online);
    }

    #[tokio::test]
    async fn test_fetch_status_offline() {
        let config = spawn_stub("HTTP/1.1 200 OK", r#"{"online": false}"#).await;
        let client = RemoteClient::new(&config).unwrap();

        let status = client.fetch_status().await.unwrap();
        assert!(!status.online);
    }

    #[tokio::test]
    async fn test_fetch_status_http_error() {
        let config = spawn_stub("HTTP/1.1 502 Bad Gateway", "{}").await;
        let client = RemoteClient::new(&config).unwrap();

        match client.fetch_status().await {
            Err(Error::HttpStatus(502)) => {}
            other => panic!("expected HttpStatus(502), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_status_malformed_body() {
        let config = spawn_stub("HTTP/1.1 200 OK", "not json at all").await;
        let client = RemoteClient::new(&config).unwrap();

        match client.fetch_status().await {
            Err(Error::MalformedResponse(_)) => {}
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_status_connection_refused() {
        // Bind a port, then drop the listener so nothing answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = RemoteServiceConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            request_timeout_secs: 5,
        };
        let client = RemoteClient::new(&config).unwrap();

        match client.fetch_status().await {
            Err(Error::Transport(_)) => {}
            other => panic!("expected Transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_command_success() {
        let config = spawn_stub("HTTP/1.1 200 OK", r#"{"action": "start", "result": "sent"}"#).await;
        let client = RemoteClient::new(&config).unwrap();

        client.send_command("start").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_command_failure_surfaces_message() {
        let config = spawn_stub(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"action": "start", "result": "error", "message": "PC_MAC not configured"}"#,
        )
        .await;
        let client = RemoteClient::new(&config).unwrap();

        match client.send_command("start").await {
            Err(Error::Action { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "PC_MAC not configured");
            }
            other => panic!("expected Action error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_command_rejects_bad_token() {
        let config = RemoteServiceConfig::default();
        let client = RemoteClient::new(&config).unwrap();

        // Rejected before any request is made
        match client.send_command("../admin").await {
            Err(Error::InvalidCommand(_)) => {}
            other => panic!("expected InvalidCommand, got {other:?}"),
        }
    }
}
