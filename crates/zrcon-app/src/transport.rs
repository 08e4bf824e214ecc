//! Transport trait for abstracting the socket and its monitor.
//!
//! The [`Transport`] trait decouples the console loop from zmq. The
//! production implementation lives in `zrcon-client`; tests script their own.
//!
//! All receive operations are non-blocking. "Nothing available" is `Ok(None)`
//! and never an error, so callers can drain until `None` without inspecting
//! error kinds.

use std::time::Duration;

use thiserror::Error;

/// Transport errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Socket creation or option configuration failed.
    #[error("socket setup failed: {0}")]
    Setup(String),

    /// Sending a message failed.
    #[error("send failed: {0}")]
    Send(String),

    /// Receiving a message failed.
    #[error("receive failed: {0}")]
    Recv(String),

    /// Polling the socket failed.
    #[error("poll failed: {0}")]
    Poll(String),

    /// Reading from the monitor channel failed.
    #[error("monitor failed: {0}")]
    Monitor(String),
}

/// Raw two-frame monitor notification, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRecord {
    /// Binary kind + value frame.
    pub record: Vec<u8>,
    /// Endpoint frame.
    pub endpoint: Vec<u8>,
}

/// One outbound connection with a paired monitor channel.
///
/// Identity and credentials are fixed at construction, before
/// [`connect`](Transport::connect) runs.
pub trait Transport {
    /// Endpoint this transport connects to.
    fn endpoint(&self) -> &str;

    /// Start connecting. Reconnects after this are the transport's business.
    ///
    /// # Errors
    ///
    /// Returns an error if the connect request is rejected (bad endpoint,
    /// closed context).
    fn connect(&mut self) -> Result<(), TransportError>;

    /// Block up to `timeout` for the socket to become readable.
    ///
    /// # Errors
    ///
    /// Returns an error if the poll itself fails.
    fn poll_readable(&mut self, timeout: Duration) -> Result<bool, TransportError>;

    /// Take one pending monitor notification, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the monitor channel fails.
    fn try_recv_event(&mut self) -> Result<Option<MonitorRecord>, TransportError>;

    /// Take one pending inbound message, if any.
    ///
    /// # Errors
    ///
    /// Returns an error for receive failures other than "no data".
    fn try_recv(&mut self) -> Result<Option<Vec<u8>>, TransportError>;

    /// Queue a message for the server without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be queued.
    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}
