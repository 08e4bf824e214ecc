//! zmq transport for zrcon.
//!
//! Provides [`ZmqTransport`], the socket side of the connection: a DEALER
//! socket for the rcon console or a SUB socket for the stats feed, each with
//! a PAIR socket attached to its monitor. All protocol decisions stay in
//! [`zrcon_app`]; this crate only moves bytes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod transport;

pub use transport::{ZmqTransport, default_identity, libzmq_version};
