//! Side-effects requested by the connection controller.
//!
//! The [`crate::ConnectionController`] never touches the socket. It returns
//! [`ControllerAction`]s and the loop that owns the transport executes them
//! in order.

use crate::ConnectionState;

/// Actions produced by the controller state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerAction {
    /// Open the outbound connection (credentials already configured).
    Connect,

    /// Send the register payload to announce this client.
    SendHandshake,

    /// Connection state changed; refresh anything that shows it.
    StateChanged(ConnectionState),
}
