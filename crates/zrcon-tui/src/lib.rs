//! Terminal UI for zrcon
//!
//! A thin shell over [`zrcon_app::Console`] that provides the terminal side:
//! a [`TerminalDisplay`] implementing [`zrcon_app::Display`], the keyboard
//! [`collector`] thread, and a [`logging`] sink that lands `tracing` output in
//! the output pane. Connection handling and scheduling live in `zrcon-app`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod collector;
pub mod logging;
pub mod output;
pub mod terminal;
pub mod ui;

pub use logging::{LogSink, log_channel};
pub use output::OutputBuffer;
pub use terminal::{TerminalDisplay, TerminalError};
pub use ui::ConsoleView;
