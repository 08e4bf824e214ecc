//! Application-layer constants shared by the console and the stats listener.

use std::{fmt, time::Duration};

/// Payload announcing the console to the server after each connect.
pub const REGISTER_PAYLOAD: &[u8] = b"register";

/// Default rcon endpoint of a local server.
pub const DEFAULT_RCON_ENDPOINT: &str = "tcp://127.0.0.1:27961";

/// Default stats endpoint of a local server.
pub const DEFAULT_STATS_ENDPOINT: &str = "tcp://127.0.0.1:27960";

/// Default readable-poll timeout of the interactive console.
pub const RCON_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Default readable-poll timeout of the stats listener.
pub const STATS_POLL_TIMEOUT: Duration = Duration::from_millis(1000);

/// Which server socket a client talks to.
///
/// The role fixes both the PLAIN username and the ZAP authentication domain,
/// so the server can apply a different password policy per socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Interactive remote console.
    Rcon,
    /// Read-only statistics feed.
    Stats,
}

impl Role {
    /// PLAIN username sent with the password.
    #[must_use]
    pub fn username(self) -> &'static str {
        self.as_str()
    }

    /// ZAP domain the server authenticates against.
    #[must_use]
    pub fn auth_domain(self) -> &'static str {
        self.as_str()
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Rcon => "rcon",
            Self::Stats => "stats",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
