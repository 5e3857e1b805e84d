// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

//! Status controller - the polling and action-dispatch state machine
//!
//! The controller owns the connection state and the pending-action marker,
//! polls the remote service on a fixed interval, and serializes resolutions
//! through a monotonically increasing sequence number: a resolution is
//! applied only if it is newer than the last applied one, so a slow poll
//! can never overwrite the result of a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use wake_console_common::{ConnectionState, RemoteControlService};

use crate::events::StatusEventHandler;

/// Default status poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// The wake command understood by the remote service
pub const START_COMMAND: &str = "start";

/// Client-side controller for the remote power-control service.
///
/// Cheap to clone; all clones share the same state. `refresh_status` and
/// `dispatch_action` never fail: every outcome, including transport
/// failures, becomes a state transition.
#[derive(Clone)]
pub struct StatusController {
    service: Arc<dyn RemoteControlService>,
    handler: Arc<dyn StatusEventHandler>,
    shared: Arc<Shared>,
}

struct Shared {
    /// Sequence source for status resolutions; allocated at issue time
    next_seq: AtomicU64,
    state: Mutex<ControllerState>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

struct ControllerState {
    connection: ConnectionState,
    pending_action: Option<String>,
    /// Highest sequence applied so far
    applied_seq: u64,
    /// Cleared on stop(); late resolutions check this before applying
    active: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl StatusController {
    /// Create a controller over the given service.
    ///
    /// The initial state is `Checking`; no poll is issued until
    /// [`refresh_status`](Self::refresh_status) or [`start`](Self::start)
    /// is called.
    pub fn new(
        service: Arc<dyn RemoteControlService>,
        handler: Arc<dyn StatusEventHandler>,
    ) -> Self {
        Self {
            service,
            handler,
            shared: Arc::new(Shared {
                next_seq: AtomicU64::new(0),
                state: Mutex::new(ControllerState {
                    connection: ConnectionState::Checking,
                    pending_action: None,
                    applied_seq: 0,
                    active: true,
                    last_updated: None,
                }),
                poll_task: Mutex::new(None),
            }),
        }
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.shared.state.lock().unwrap().connection.clone()
    }

    /// Command currently in flight, if any
    pub fn pending_action(&self) -> Option<String> {
        self.shared.state.lock().unwrap().pending_action.clone()
    }

    /// Whether the UI should allow dispatching an action right now.
    ///
    /// Dispatch is gated on both the pending marker and the current state:
    /// the action brings the host online, so it is pointless while the
    /// host already is.
    pub fn can_dispatch(&self) -> bool {
        let state = self.shared.state.lock().unwrap();
        state.pending_action.is_none() && state.connection != ConnectionState::Online
    }

    /// When the most recent resolution was applied
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.shared.state.lock().unwrap().last_updated
    }

    /// Poll the remote service once and fold the result into the state.
    ///
    /// Never returns an error: `online: true` becomes `Online`,
    /// `online: false` becomes `Offline`, and any failure becomes
    /// `Error` with its cause attached.
    pub async fn refresh_status(&self) {
        let seq = self.allocate_seq();
        let next = match self.service.fetch_status().await {
            Ok(status) if status.online => ConnectionState::Online,
            Ok(_) => ConnectionState::Offline,
            Err(e) => {
                tracing::warn!("Status poll failed: {e}");
                ConnectionState::Error(e.cause())
            }
        };
        self.apply_resolution(seq, next);
    }

    /// Send a command to the remote service.
    ///
    /// The pending marker is set for the whole duration of the dispatch
    /// and cleared exactly once on every exit path. On success the
    /// controller immediately re-polls to converge on the true post-action
    /// state; on failure it transitions to `Error`. The dispatch-failure
    /// transition goes through the same sequence gate as polls, so a later
    /// poll always supersedes a stale dispatch error.
    pub async fn dispatch_action(&self, command: &str) {
        {
            let mut state = self.shared.state.lock().unwrap();
            if let Some(pending) = &state.pending_action {
                tracing::warn!("Dispatching '{command}' while '{pending}' is still pending");
            }
            if state.connection == ConnectionState::Online {
                tracing::warn!("Dispatching '{command}' while the host is already online");
            }
            state.pending_action = Some(command.to_string());
        }
        self.handler.on_pending_changed(Some(command));

        match self.service.send_command(command).await {
            Ok(()) => {
                tracing::debug!("Command '{command}' accepted, converging on fresh status");
                self.refresh_status().await;
            }
            Err(e) => {
                tracing::warn!("Command '{command}' failed: {e}");
                let seq = self.allocate_seq();
                self.apply_resolution(seq, ConnectionState::Error(e.cause()));
            }
        }

        self.shared.state.lock().unwrap().pending_action = None;
        self.handler.on_pending_changed(None);
    }

    /// Start the recurring poll task: one poll immediately, then one per
    /// interval. A previous poll task, if any, is replaced.
    pub fn start(&self, poll_interval: Duration) {
        self.shared.state.lock().unwrap().active = true;

        let controller = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                controller.refresh_status().await;
            }
        });

        if let Some(old) = self.shared.poll_task.lock().unwrap().replace(handle) {
            old.abort();
        }
    }

    /// Tear the controller down: cancel the poll timer and deactivate the
    /// sequence gate. In-flight requests are not awaited; their late
    /// resolutions are dropped instead of mutating a stopped controller.
    pub fn stop(&self) {
        self.shared.state.lock().unwrap().active = false;
        if let Some(handle) = self.shared.poll_task.lock().unwrap().take() {
            handle.abort();
        }
    }

    fn allocate_seq(&self) -> u64 {
        self.shared.next_seq.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn apply_resolution(&self, seq: u64, next: ConnectionState) {
        let changed = {
            let mut state = self.shared.state.lock().unwrap();
            if !state.active {
                tracing::debug!("Dropping resolution seq {seq} after teardown");
                return;
            }
            if seq <= state.applied_seq {
                tracing::debug!(
                    "Dropping stale resolution seq {seq} (already applied {})",
                    state.applied_seq
                );
                return;
            }
            state.applied_seq = seq;
            state.last_updated = Some(Utc::now());
            if state.connection != next {
                state.connection = next.clone();
                true
            } else {
                false
            }
        };

        if changed {
            self.handler.on_state_changed(next);
        }
    }
}
