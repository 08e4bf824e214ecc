//! Display trait for abstracting styled output.

use zrcon_proto::StyledRuns;

use crate::ConnectionState;

/// Styled output sink for the console loop.
///
/// The loop decides *what* to show; implementations decide *how* (layout,
/// scrolling, keeping the input cursor where the user is typing).
pub trait Display {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Append one server message.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output device fails.
    fn print(&mut self, runs: StyledRuns<'_>) -> Result<(), Self::Error>;

    /// Redraw anything that changed, including the in-progress input line.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn refresh(&mut self, state: ConnectionState) -> Result<(), Self::Error>;
}
