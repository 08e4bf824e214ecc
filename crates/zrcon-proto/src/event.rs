//! Socket monitor events.
//!
//! A zmq socket monitor reports connection changes as a two-frame message.
//! The first frame is a fixed binary record, the second carries the affected
//! endpoint as text:
//!
//! ```text
//! frame 1: | kind: u16 LE | value: u32 LE | (anything after byte 6 is ignored)
//! frame 2: | endpoint bytes ... |
//! ```
//!
//! The kind table below covers the events libzmq 4.x reports for connecting
//! sockets. Newer libzmq versions add codes; those decode to
//! [`EventKind::Unknown`] instead of failing.

use std::{borrow::Cow, fmt};

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::errors::{DecodeError, Result};

/// Fixed 6-byte head of a monitor record (little endian).
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
struct EventHeader {
    kind: [u8; 2],  // u16 event code
    value: [u8; 4], // u32 event value (fd, errno or retry interval)
}

impl EventHeader {
    const SIZE: usize = 6;

    fn new(kind: u16, value: u32) -> Self {
        Self { kind: kind.to_le_bytes(), value: value.to_le_bytes() }
    }

    fn kind(&self) -> u16 {
        u16::from_le_bytes(self.kind)
    }

    fn value(&self) -> u32 {
        u32::from_le_bytes(self.value)
    }
}

/// Kind of a connection lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Peer connection accepted on a bound socket.
    Accepted,
    /// Accepting a peer connection failed.
    AcceptFailed,
    /// Binding the socket failed.
    BindFailed,
    /// Connection closed.
    Closed,
    /// Closing the connection failed.
    CloseFailed,
    /// Outbound connection established.
    Connected,
    /// Synchronous connect failed, the transport retries asynchronously.
    ConnectDelayed,
    /// Reconnect attempt scheduled.
    ConnectRetried,
    /// Established session dropped.
    Disconnected,
    /// Socket bound and listening.
    Listening,
    /// Monitor detached from the socket.
    MonitorStopped,
    /// Code missing from the table, passed through verbatim.
    Unknown(u16),
}

impl EventKind {
    const CONNECTED: u16 = 0x0001;
    const CONNECT_DELAYED: u16 = 0x0002;
    const CONNECT_RETRIED: u16 = 0x0004;
    const LISTENING: u16 = 0x0008;
    const BIND_FAILED: u16 = 0x0010;
    const ACCEPTED: u16 = 0x0020;
    const ACCEPT_FAILED: u16 = 0x0040;
    const CLOSED: u16 = 0x0080;
    const CLOSE_FAILED: u16 = 0x0100;
    const DISCONNECTED: u16 = 0x0200;
    const MONITOR_STOPPED: u16 = 0x0400;

    /// Map a raw event code to its kind.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            Self::CONNECTED => Self::Connected,
            Self::CONNECT_DELAYED => Self::ConnectDelayed,
            Self::CONNECT_RETRIED => Self::ConnectRetried,
            Self::LISTENING => Self::Listening,
            Self::BIND_FAILED => Self::BindFailed,
            Self::ACCEPTED => Self::Accepted,
            Self::ACCEPT_FAILED => Self::AcceptFailed,
            Self::CLOSED => Self::Closed,
            Self::CLOSE_FAILED => Self::CloseFailed,
            Self::DISCONNECTED => Self::Disconnected,
            Self::MONITOR_STOPPED => Self::MonitorStopped,
            other => Self::Unknown(other),
        }
    }

    /// Raw event code.
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::Connected => Self::CONNECTED,
            Self::ConnectDelayed => Self::CONNECT_DELAYED,
            Self::ConnectRetried => Self::CONNECT_RETRIED,
            Self::Listening => Self::LISTENING,
            Self::BindFailed => Self::BIND_FAILED,
            Self::Accepted => Self::ACCEPTED,
            Self::AcceptFailed => Self::ACCEPT_FAILED,
            Self::Closed => Self::CLOSED,
            Self::CloseFailed => Self::CLOSE_FAILED,
            Self::Disconnected => Self::DISCONNECTED,
            Self::MonitorStopped => Self::MONITOR_STOPPED,
            Self::Unknown(code) => code,
        }
    }

    /// Symbolic name used in logs. Unknown kinds render as their decimal code.
    #[must_use]
    pub fn name(self) -> Cow<'static, str> {
        let name = match self {
            Self::Accepted => "EVENT_ACCEPTED",
            Self::AcceptFailed => "EVENT_ACCEPT_FAILED",
            Self::BindFailed => "EVENT_BIND_FAILED",
            Self::Closed => "EVENT_CLOSED",
            Self::CloseFailed => "EVENT_CLOSE_FAILED",
            Self::Connected => "EVENT_CONNECTED",
            Self::ConnectDelayed => "EVENT_CONNECT_DELAYED",
            Self::ConnectRetried => "EVENT_CONNECT_RETRIED",
            Self::Disconnected => "EVENT_DISCONNECTED",
            Self::Listening => "EVENT_LISTENING",
            Self::MonitorStopped => "EVENT_MONITOR_STOPPED",
            Self::Unknown(code) => return Cow::Owned(code.to_string()),
        };
        Cow::Borrowed(name)
    }

    /// Whether the event reports a failed socket operation.
    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::AcceptFailed | Self::BindFailed | Self::CloseFailed)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A decoded monitor notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// What happened.
    pub kind: EventKind,
    /// Event-specific value (file descriptor, errno or retry interval).
    pub value: u32,
    /// Endpoint the event refers to, verbatim from the second frame.
    pub endpoint: Vec<u8>,
}

impl LifecycleEvent {
    /// Minimum length of the first monitor frame.
    pub const RECORD_SIZE: usize = EventHeader::SIZE;

    /// Decode a monitor notification from its two frames.
    ///
    /// # Errors
    ///
    /// - `DecodeError::MalformedEvent` if `record` is shorter than 6 bytes.
    pub fn decode(record: &[u8], endpoint: &[u8]) -> Result<Self> {
        let header = EventHeader::ref_from_prefix(record)
            .map_err(|_| DecodeError::MalformedEvent {
                expected: Self::RECORD_SIZE,
                actual: record.len(),
            })?
            .0;

        Ok(Self {
            kind: EventKind::from_code(header.kind()),
            value: header.value(),
            endpoint: endpoint.to_vec(),
        })
    }

    /// Fixed-layout record for this event's kind and value.
    #[must_use]
    pub fn header_bytes(&self) -> [u8; Self::RECORD_SIZE] {
        let header = EventHeader::new(self.kind.code(), self.value);
        let mut bytes = [0u8; Self::RECORD_SIZE];
        bytes.copy_from_slice(header.as_bytes());
        bytes
    }

    /// Endpoint as text, replacing invalid UTF-8.
    #[must_use]
    pub fn endpoint_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.endpoint)
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} endpoint {}", self.kind, self.value, self.endpoint_lossy())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn record(kind: u16, value: u32) -> Vec<u8> {
        let mut bytes = kind.to_le_bytes().to_vec();
        bytes.extend_from_slice(&value.to_le_bytes());
        bytes
    }

    #[test]
    fn decodes_connected() {
        let event = LifecycleEvent::decode(&record(0x0001, 17), b"tcp://127.0.0.1:27961")
            .expect("should decode");

        assert_eq!(event.kind, EventKind::Connected);
        assert_eq!(event.value, 17);
        assert_eq!(event.endpoint_lossy(), "tcp://127.0.0.1:27961");
    }

    #[test]
    fn decodes_every_table_entry() {
        let table = [
            (0x0001, EventKind::Connected),
            (0x0002, EventKind::ConnectDelayed),
            (0x0004, EventKind::ConnectRetried),
            (0x0008, EventKind::Listening),
            (0x0010, EventKind::BindFailed),
            (0x0020, EventKind::Accepted),
            (0x0040, EventKind::AcceptFailed),
            (0x0080, EventKind::Closed),
            (0x0100, EventKind::CloseFailed),
            (0x0200, EventKind::Disconnected),
            (0x0400, EventKind::MonitorStopped),
        ];

        for (code, kind) in table {
            let event = LifecycleEvent::decode(&record(code, 0), b"").expect("should decode");
            assert_eq!(event.kind, kind);
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = record(0x0200, 5);
        bytes.extend_from_slice(&[0xFF; 4]);

        let event = LifecycleEvent::decode(&bytes, b"").expect("should decode");
        assert_eq!(event.kind, EventKind::Disconnected);
        assert_eq!(event.value, 5);
    }

    #[test]
    fn reject_short_record() {
        let result = LifecycleEvent::decode(&[0x01, 0x00, 0x00], b"");
        assert_eq!(result, Err(DecodeError::MalformedEvent { expected: 6, actual: 3 }));
    }

    #[test]
    fn names_match_monitor_constants() {
        assert_eq!(EventKind::Connected.name(), "EVENT_CONNECTED");
        assert_eq!(EventKind::MonitorStopped.to_string(), "EVENT_MONITOR_STOPPED");
        assert_eq!(EventKind::Unknown(4096).to_string(), "4096");
    }

    #[test]
    fn display_includes_value_and_endpoint() {
        let event =
            LifecycleEvent::decode(&record(0x0004, 100), b"tcp://h:1").expect("should decode");
        assert_eq!(event.to_string(), "EVENT_CONNECT_RETRIED 100 endpoint tcp://h:1");
    }

    #[test]
    fn failure_kinds() {
        assert!(EventKind::BindFailed.is_failure());
        assert!(EventKind::AcceptFailed.is_failure());
        assert!(EventKind::CloseFailed.is_failure());
        assert!(!EventKind::Disconnected.is_failure());
        assert!(!EventKind::Unknown(0x0040 << 8).is_failure());
    }

    proptest! {
        #[test]
        fn fixed_fields_round_trip(record in prop::collection::vec(any::<u8>(), 6..32)) {
            let event = LifecycleEvent::decode(&record, b"").expect("should decode");
            prop_assert_eq!(&event.header_bytes()[..], &record[..6]);
        }

        #[test]
        fn short_records_never_decode(record in prop::collection::vec(any::<u8>(), 0..6)) {
            let is_malformed = matches!(
                LifecycleEvent::decode(&record, b""),
                Err(DecodeError::MalformedEvent { .. })
            );
            prop_assert!(is_malformed);
        }

        #[test]
        fn unknown_codes_pass_through(code in any::<u16>()) {
            prop_assume!(!code.is_power_of_two() || code > 0x0400);
            let kind = EventKind::from_code(code);
            prop_assert_eq!(kind, EventKind::Unknown(code));
            prop_assert_eq!(kind.code(), code);
        }
    }
}
