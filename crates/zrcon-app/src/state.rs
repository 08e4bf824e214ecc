//! Observable connection state.

use std::fmt;

/// Connection state as seen by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No session with the server.
    #[default]
    Disconnected,
    /// Connect issued, waiting for the transport to report success.
    Connecting,
    /// Connected and announced with the register handshake.
    Registered,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "Disconnected",
            Self::Connecting => "Connecting...",
            Self::Registered => "Registered",
        };
        f.write_str(label)
    }
}
