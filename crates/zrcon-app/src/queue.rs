//! Hand-off of user input from the input thread to the console loop.
//!
//! The producer blocks on the terminal, the consumer must never block. An
//! unbounded channel gives a wait-free push and a non-blocking pop; depth is
//! bounded in practice by typing speed.

use tokio::sync::mpsc::{self, error::TryRecvError};

/// Item on the input queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// A completed, non-empty command line.
    Line(String),
    /// The user asked to quit.
    Interrupt,
}

/// Producer end, owned by the input thread.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: mpsc::UnboundedSender<ConsoleInput>,
}

/// Consumer end, owned by the console loop.
#[derive(Debug)]
pub struct InputReceiver {
    rx: mpsc::UnboundedReceiver<ConsoleInput>,
}

/// Create a connected sender/receiver pair.
pub fn input_queue() -> (InputSender, InputReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InputSender { tx }, InputReceiver { rx })
}

impl InputSender {
    /// Queue a completed line. Empty lines are dropped.
    ///
    /// Returns `false` once the console has gone away.
    pub fn push_line(&self, line: impl Into<String>) -> bool {
        let line = line.into();
        if line.is_empty() {
            return !self.tx.is_closed();
        }
        self.tx.send(ConsoleInput::Line(line)).is_ok()
    }

    /// Ask the console to stop.
    pub fn interrupt(&self) -> bool {
        self.tx.send(ConsoleInput::Interrupt).is_ok()
    }
}

impl InputReceiver {
    /// Pop the oldest pending item without blocking.
    ///
    /// Once every sender is gone the input surface is dead, which reads as
    /// an [`ConsoleInput::Interrupt`].
    pub fn try_pop(&mut self) -> Option<ConsoleInput> {
        match self.rx.try_recv() {
            Ok(input) => Some(input),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(ConsoleInput::Interrupt),
        }
    }
}
