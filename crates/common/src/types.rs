// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

// Wake Console - Shared Types
// Connection state machine and remote service wire types

use serde::{Deserialize, Serialize};

/// Connection state of the controlled host as seen by the console.
///
/// `Checking` is the only initial state. Every poll or action resolution
/// moves the machine into exactly one of the four states; there is no
/// terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No poll has resolved yet
    Checking,
    /// Last resolved poll reported the host reachable
    Online,
    /// Last resolved poll reported the host unreachable (clean answer)
    Offline,
    /// Last resolution failed; the cause is kept for richer UIs but all
    /// causes render identically by default
    Error(ErrorCause),
}

impl ConnectionState {
    /// Whether the state counts as an error, regardless of cause
    pub fn is_error(&self) -> bool {
        matches!(self, ConnectionState::Error(_))
    }
}

/// Why a resolution ended in the `Error` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCause {
    /// Host unreachable, timeout, connection reset
    Transport,
    /// Non-2xx response or malformed body
    Protocol,
}

/// Response body of `GET /status`.
///
/// The backend includes `error` when it is misconfigured (e.g. no target
/// address set) while still answering 200 with `online: false`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub online: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response body of `GET /<command>`.
///
/// Only consulted on failure, to extract a human-readable message; a 2xx
/// status alone means dispatch success.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    pub action: String,
    pub result: String,
    #[serde(default)]
    pub message: Option<String>,
}
