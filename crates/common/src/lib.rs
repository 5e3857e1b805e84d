// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

// Wake Console - Common Library
// Shared types, error taxonomy, configuration, and the remote service client

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{validate_command, RemoteClient, RemoteControlService};
pub use config::{ConsoleConfig, RemoteServiceConfig, Theme};
pub use error::{Error, Result};
pub use types::{ActionResponse, ConnectionState, ErrorCause, StatusResponse};
