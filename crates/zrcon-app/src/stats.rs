//! Read-only stats feed listener.
//!
//! Same polling skeleton as the [`crate::Console`] without the input path or
//! the handshake: poll, report monitor events, drain and log every message.
//! Stats messages are JSON documents; anything else is logged as text.

use std::time::Duration;

use crate::{ConnectionConfig, Transport, TransportError, check_monitor};

/// Listener for the server's stats publisher.
pub struct StatsListener<T: Transport> {
    transport: T,
    poll_timeout: Duration,
}

impl<T: Transport> StatsListener<T> {
    /// Create a listener over a subscribed transport.
    pub fn new(transport: T, config: &ConnectionConfig) -> Self {
        Self { transport, poll_timeout: config.poll_timeout }
    }

    /// Connect and listen until the process exits.
    ///
    /// # Errors
    ///
    /// Returns an error only if the connection cannot be set up.
    pub fn run(mut self) -> Result<(), TransportError> {
        tracing::info!("Connecting SUB to {}", self.transport.endpoint());
        self.transport.connect()?;

        loop {
            self.run_iteration();
        }
    }

    /// Run one poll cycle. Returns the number of messages logged.
    pub fn run_iteration(&mut self) -> usize {
        let readable = self.transport.poll_readable(self.poll_timeout).unwrap_or_else(|e| {
            tracing::warn!("{e}");
            false
        });

        check_monitor(&mut self.transport);

        if !readable {
            return 0;
        }

        let mut logged = 0;
        loop {
            match self.transport.try_recv() {
                Ok(Some(message)) => {
                    tracing::info!("{}", render_stats(&message));
                    logged += 1;
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::info!("{e}");
                    break;
                },
            }
        }
        logged
    }
}

/// Pretty-print a stats message, falling back to lossy text.
fn render_stats(message: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(message)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|e| {
            tracing::debug!("stats message is not JSON: {e}");
            String::from_utf8_lossy(message).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_pretty_printed() {
        let rendered = render_stats(br#"{"TYPE":"PLAYER_CONNECT","DATA":{"NAME":"anarki"}}"#);
        assert_eq!(
            rendered,
            "{\n  \"DATA\": {\n    \"NAME\": \"anarki\"\n  },\n  \"TYPE\": \"PLAYER_CONNECT\"\n}"
        );
    }

    #[test]
    fn non_json_falls_back_to_text() {
        assert_eq!(render_stats(b"not json"), "not json");
    }
}
