// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Wake Console Contributors

//! View models - Data structures prepared for UI display

use wake_console_common::{ConnectionState, ErrorCause};

use crate::controller::START_COMMAND;

/// Console status prepared for UI display
#[derive(Debug, Clone)]
pub struct StatusViewModel {
    pub state: ConnectionState,
    pub status_text: String,
    pub status_icon: &'static str,
    pub status_color: StatusColor,
    pub action_enabled: bool,
    pub action_label: String,
}

/// Status color for UI indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,  // Online
    Orange, // Checking
    Red,    // Error
    Gray,   // Offline
}

impl StatusViewModel {
    /// Create a view model from the current state and pending action
    pub fn from_state(state: &ConnectionState, pending: Option<&str>) -> Self {
        let action_enabled = pending.is_none() && *state != ConnectionState::Online;
        let action_label = if pending == Some(START_COMMAND) {
            "Starting...".to_string()
        } else {
            "Start System".to_string()
        };

        Self {
            state: state.clone(),
            status_text: Self::status_text_for(state).to_string(),
            status_icon: Self::status_icon_for(state),
            status_color: Self::status_color_for(state),
            action_enabled,
            action_label,
        }
    }

    /// Human-readable status text.
    ///
    /// All error causes collapse to one rendering; use
    /// [`status_detail_for`](Self::status_detail_for) for the cause.
    pub fn status_text_for(state: &ConnectionState) -> &'static str {
        match state {
            ConnectionState::Checking => "Checking...",
            ConnectionState::Online => "Online",
            ConnectionState::Offline => "Offline",
            ConnectionState::Error(_) => "Connection Error",
        }
    }

    /// Status indicator glyph
    pub fn status_icon_for(state: &ConnectionState) -> &'static str {
        match state {
            ConnectionState::Checking => "◐",
            ConnectionState::Online | ConnectionState::Offline => "●",
            ConnectionState::Error(_) => "⚠",
        }
    }

    /// Status color based on current state
    pub fn status_color_for(state: &ConnectionState) -> StatusColor {
        match state {
            ConnectionState::Online => StatusColor::Green,
            ConnectionState::Offline => StatusColor::Gray,
            ConnectionState::Checking => StatusColor::Orange,
            ConnectionState::Error(_) => StatusColor::Red,
        }
    }

    /// Cause detail for UIs that want more than the collapsed rendering
    pub fn status_detail_for(state: &ConnectionState) -> Option<&'static str> {
        match state {
            ConnectionState::Error(ErrorCause::Transport) => Some("host unreachable"),
            ConnectionState::Error(ErrorCause::Protocol) => Some("bad response from service"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_online_disables_action() {
        let vm = StatusViewModel::from_state(&ConnectionState::Online, None);
        assert_eq!(vm.status_text, "Online");
        assert_eq!(vm.status_color, StatusColor::Green);
        assert!(!vm.action_enabled);
    }

    #[test]
    fn test_offline_enables_action() {
        let vm = StatusViewModel::from_state(&ConnectionState::Offline, None);
        assert_eq!(vm.status_text, "Offline");
        assert_eq!(vm.status_color, StatusColor::Gray);
        assert!(vm.action_enabled);
        assert_eq!(vm.action_label, "Start System");
    }

    #[test]
    fn test_pending_relabels_and_disables_action() {
        let vm = StatusViewModel::from_state(&ConnectionState::Offline, Some("start"));
        assert!(!vm.action_enabled);
        assert_eq!(vm.action_label, "Starting...");
    }

    #[test]
    fn test_error_causes_render_identically() {
        let transport =
            StatusViewModel::from_state(&ConnectionState::Error(ErrorCause::Transport), None);
        let protocol =
            StatusViewModel::from_state(&ConnectionState::Error(ErrorCause::Protocol), None);

        assert_eq!(transport.status_text, protocol.status_text);
        assert_eq!(transport.status_color, protocol.status_color);
        // The action is available again so the user can retry
        assert!(transport.action_enabled);

        // The cause is still there for richer UIs
        assert_ne!(
            StatusViewModel::status_detail_for(&transport.state),
            StatusViewModel::status_detail_for(&protocol.state)
        );
    }
}
