//! Wire-level pieces of the zrcon remote console.
//!
//! Two small parsers that everything else builds on:
//!
//! - [`LifecycleEvent`]: decodes the binary records a zmq socket monitor emits
//!   when the underlying connection changes state.
//! - [`format_message`]: turns a raw server console message into
//!   [`StyledRun`]s by interpreting the caret color markup (`^1red^7`).
//!
//! Both are pure functions over byte slices. Neither performs I/O or logging;
//! callers decide what to do with the results.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod event;
pub mod format;
mod protocol;

pub use errors::DecodeError;
pub use event::{EventKind, LifecycleEvent};
pub use format::{FormattedMessage, StyledRun, StyledRuns, format_message};
pub use protocol::{
    DEFAULT_RCON_ENDPOINT, DEFAULT_STATS_ENDPOINT, RCON_POLL_TIMEOUT, REGISTER_PAYLOAD, Role,
    STATS_POLL_TIMEOUT,
};
