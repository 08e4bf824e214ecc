//! Application layer for zrcon
//!
//! Sans-IO state machines and generic loops for the remote console and the
//! stats listener. Platform I/O sits behind two traits so the same loop runs
//! against a real zmq socket and a terminal in production, and against
//! scripted fakes in tests.
//!
//! # Components
//!
//! - [`ConnectionController`]: connection lifecycle and register handshake
//! - [`Console`]: the poll / monitor / input / inbound scheduling loop
//! - [`StatsListener`]: read-only variant of the loop for the stats feed
//! - [`Transport`]: socket plus monitor channel abstraction
//! - [`Display`]: styled output sink
//! - [`input_queue`]: hand-off of completed lines from the input thread
//! - [`InputState`]: single-line editor driven by [`KeyInput`]

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod config;
mod console;
mod controller;
mod display;
mod input;
mod monitor;
mod queue;
mod state;
mod stats;
mod transport;

pub use action::ControllerAction;
pub use config::{ConnectionConfig, Credentials};
pub use console::{Console, ConsoleError, IterationReport};
pub use controller::ConnectionController;
pub use display::Display;
pub use input::{InputLine, InputState, KeyInput};
pub use monitor::check_monitor;
pub use queue::{ConsoleInput, InputReceiver, InputSender, input_queue};
pub use state::ConnectionState;
pub use stats::StatsListener;
pub use transport::{MonitorRecord, Transport, TransportError};
