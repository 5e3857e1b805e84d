// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

//! Framework-agnostic core for Wake Console
//!
//! This crate contains the status controller, event-handler trait, and view
//! models shared by all presentation layers. It knows nothing about how the
//! state is rendered; it only guarantees consistent state transitions.

pub mod controller;
pub mod events;
pub mod view_models;

// Re-export commonly used types
pub use controller::{StatusController, DEFAULT_POLL_INTERVAL, START_COMMAND};
pub use events::{NoopStatusHandler, StatusEventHandler};
pub use view_models::{StatusColor, StatusViewModel};

// Re-export types from the common crate for convenience
pub use wake_console_common::{ConnectionState, ErrorCause, RemoteControlService};
