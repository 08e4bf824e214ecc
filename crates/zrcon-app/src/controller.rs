//! Connection lifecycle state machine.
//!
//! This module defines the [`ConnectionController`], which tracks whether the
//! console has a live, announced session with the server.
//!
//! This is a pure state machine: it consumes decoded
//! [`LifecycleEvent`](zrcon_proto::LifecycleEvent)s and produces
//! [`ControllerAction`]s for the loop to execute.
//!
//! # Transitions
//!
//! ```text
//!   Disconnected --connect()--> Connecting --Connected--> Registered
//!        ^                                                    |
//!        +------------------- Disconnected -------------------+
//!        |
//!        +--Connected (transport reconnected)--> Registered
//! ```
//!
//! The register handshake is sent at most once per physical connection. The
//! `handshake_sent` flag is only cleared when the transport reports
//! `Disconnected`, so a duplicate `Connected` notification cannot re-announce.
//!
//! Failure events (connect, bind, accept) never change state. The transport
//! retries on its own and the controller just keeps listening.

use zrcon_proto::{EventKind, LifecycleEvent};

use crate::{ConnectionState, ControllerAction};

/// Connection lifecycle state machine.
#[derive(Debug, Clone, Default)]
pub struct ConnectionController {
    /// Current state.
    state: ConnectionState,
    /// Register payload already sent on the current physical connection.
    handshake_sent: bool,
}

impl ConnectionController {
    /// Create a controller in the `Disconnected` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the handshake went out on the current connection.
    pub fn handshake_sent(&self) -> bool {
        self.handshake_sent
    }

    /// Start connecting. Only valid from `Disconnected`.
    pub fn connect(&mut self) -> Vec<ControllerAction> {
        if self.state != ConnectionState::Disconnected {
            tracing::debug!(state = ?self.state, "connect ignored");
            return vec![];
        }

        self.transition(ConnectionState::Connecting);
        vec![ControllerAction::Connect, ControllerAction::StateChanged(self.state)]
    }

    /// Process a lifecycle event and return actions.
    pub fn handle(&mut self, event: &LifecycleEvent) -> Vec<ControllerAction> {
        match event.kind {
            EventKind::Connected => self.handle_connected(),
            EventKind::Disconnected => {
                self.handshake_sent = false;
                if self.state == ConnectionState::Disconnected {
                    return vec![];
                }
                self.transition(ConnectionState::Disconnected);
                vec![ControllerAction::StateChanged(self.state)]
            },
            EventKind::Accepted
            | EventKind::AcceptFailed
            | EventKind::BindFailed
            | EventKind::Closed
            | EventKind::CloseFailed
            | EventKind::ConnectDelayed
            | EventKind::ConnectRetried
            | EventKind::Listening
            | EventKind::MonitorStopped
            | EventKind::Unknown(_) => vec![],
        }
    }

    fn handle_connected(&mut self) -> Vec<ControllerAction> {
        match self.state {
            ConnectionState::Registered => {
                tracing::debug!("duplicate connect notification, handshake already sent");
                vec![]
            },
            ConnectionState::Connecting | ConnectionState::Disconnected => {
                if self.handshake_sent {
                    return vec![];
                }
                self.handshake_sent = true;
                self.transition(ConnectionState::Registered);
                vec![ControllerAction::SendHandshake, ControllerAction::StateChanged(self.state)]
            },
        }
    }

    fn transition(&mut self, next: ConnectionState) {
        tracing::debug!(from = ?self.state, to = ?next, "connection state");
        self.state = next;
    }
}
