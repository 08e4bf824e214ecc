//! Terminal display for the console.
//!
//! Implements the [`Display`] trait with ratatui over crossterm. Server
//! output is appended to the [`ConsoleView`]; each refresh pulls in pending
//! log records and the latest edit from the input thread, then redraws.

use std::io::{self, Stdout, stdout};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::watch;
use zrcon_app::{ConnectionState, Display, InputLine};
use zrcon_proto::StyledRuns;

use crate::{ConsoleView, logging::LogReceiver, ui};

/// Terminal display errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Full-screen terminal display.
///
/// Raw mode and the alternate screen are entered on construction and
/// restored on drop.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: ConsoleView,
    logs: LogReceiver,
    input: watch::Receiver<InputLine>,
}

impl TerminalDisplay {
    /// Take over the terminal.
    pub fn new(
        view: ConsoleView,
        logs: LogReceiver,
        input: watch::Receiver<InputLine>,
    ) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, view, logs, input })
    }
}

impl Display for TerminalDisplay {
    type Error = TerminalError;

    fn print(&mut self, runs: StyledRuns<'_>) -> Result<(), Self::Error> {
        self.view.output.push_runs(runs);
        Ok(())
    }

    fn refresh(&mut self, state: ConnectionState) -> Result<(), Self::Error> {
        self.view.state = state;
        while let Ok(record) = self.logs.try_recv() {
            self.view.output.push_log(&record);
        }
        self.view.input.clone_from(&self.input.borrow());

        self.terminal.draw(|frame| ui::render(frame, &self.view))?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
