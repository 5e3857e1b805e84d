// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

//! Event handling traits

use wake_console_common::ConnectionState;

/// Framework-agnostic event handler trait
///
/// Presentation layers implement this to react to controller transitions
/// and update their UI accordingly. Callbacks are invoked outside the
/// controller's lock, on the task that resolved the poll or action.
pub trait StatusEventHandler: Send + Sync {
    /// Called when the connection state actually changes (repeated
    /// identical poll results do not fire this)
    fn on_state_changed(&self, state: ConnectionState);

    /// Called when an action starts (`Some(command)`) or resolves (`None`)
    fn on_pending_changed(&self, pending: Option<&str>);
}

/// Handler for consumers that read controller state through its getters
/// instead of reacting to events.
pub struct NoopStatusHandler;

impl StatusEventHandler for NoopStatusHandler {
    fn on_state_changed(&self, _state: ConnectionState) {}
    fn on_pending_changed(&self, _pending: Option<&str>) {}
}
