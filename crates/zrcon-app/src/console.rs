//! Console loop.
//!
//! The [`Console`] is a single-threaded cooperative scheduler. Each iteration:
//!
//! 1. Polls the socket for readable data, bounded by the poll timeout. This
//!    is the only place the loop blocks.
//! 2. Takes at most one monitor notification and feeds it to the
//!    [`ConnectionController`].
//! 3. Drains every queued input line to the server.
//! 4. If the poll saw data, drains every available inbound message through
//!    the formatter to the [`Display`].
//! 5. Refreshes the display.
//!
//! The order is fixed: a handshake triggered by a fresh connection always
//! leaves before queued user commands, and commands leave before any time is
//! spent rendering.

use std::time::Duration;

use thiserror::Error;
use zrcon_proto::{LifecycleEvent, REGISTER_PAYLOAD, format_message};

use crate::{
    ConnectionConfig, ConnectionController, ConsoleInput, ControllerAction, Display,
    InputReceiver, Transport, TransportError, check_monitor,
};

/// Console errors.
#[derive(Debug, Error)]
pub enum ConsoleError<E: std::error::Error + 'static> {
    /// The connection could not be set up.
    #[error("connection setup failed: {0}")]
    Setup(#[from] TransportError),

    /// The display failed.
    #[error("display error: {0}")]
    Display(#[source] E),
}

/// What one loop iteration did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationReport {
    /// The poll reported readable data.
    pub readable: bool,
    /// Monitor event processed this iteration.
    pub event: Option<LifecycleEvent>,
    /// The register handshake was sent this iteration.
    pub handshake_sent: bool,
    /// Input lines sent to the server.
    pub lines_sent: usize,
    /// Inbound messages handed to the display.
    pub messages_rendered: usize,
    /// The user asked to quit.
    pub interrupted: bool,
}

/// Interactive console over a transport and a display.
pub struct Console<T, D>
where
    T: Transport,
    D: Display,
{
    transport: T,
    display: D,
    controller: ConnectionController,
    input: InputReceiver,
    poll_timeout: Duration,
}

impl<T, D> Console<T, D>
where
    T: Transport,
    D: Display,
{
    /// Create a console. Nothing is connected until [`run`](Self::run) or
    /// [`connect`](Self::connect).
    pub fn new(transport: T, display: D, input: InputReceiver, config: &ConnectionConfig) -> Self {
        Self {
            transport,
            display,
            controller: ConnectionController::new(),
            input,
            poll_timeout: config.poll_timeout,
        }
    }

    /// Connect and run until the user interrupts.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be set up or the display
    /// fails. Transport trouble after startup is logged, not returned.
    pub fn run(mut self) -> Result<(), ConsoleError<D::Error>> {
        self.connect()?;

        loop {
            let report = self.run_iteration()?;
            if report.interrupted {
                break;
            }
        }

        Ok(())
    }

    /// Issue the initial connect.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the connect or the display
    /// fails.
    pub fn connect(&mut self) -> Result<(), ConsoleError<D::Error>> {
        let actions = self.controller.connect();
        self.execute(actions)?;
        Ok(())
    }

    /// Run exactly one scheduling cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the display fails.
    pub fn run_iteration(&mut self) -> Result<IterationReport, ConsoleError<D::Error>> {
        let mut report = IterationReport {
            readable: self.poll_readable(),
            ..IterationReport::default()
        };

        if let Some(event) = check_monitor(&mut self.transport) {
            let actions = self.controller.handle(&event);
            report.handshake_sent = self.execute(actions)?;
            report.event = Some(event);
        }

        let (lines_sent, interrupted) = self.drain_input();
        report.lines_sent = lines_sent;
        if interrupted {
            report.interrupted = true;
            return Ok(report);
        }

        if report.readable {
            report.messages_rendered = self.drain_inbound()?;
        }

        self.display.refresh(self.controller.state()).map_err(ConsoleError::Display)?;
        Ok(report)
    }

    /// Controller driving this console.
    pub fn controller(&self) -> &ConnectionController {
        &self.controller
    }

    /// Display this console writes to.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Transport this console owns.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn poll_readable(&mut self) -> bool {
        self.transport.poll_readable(self.poll_timeout).unwrap_or_else(|e| {
            tracing::warn!("{e}");
            false
        })
    }

    /// Execute controller actions. Returns whether a handshake went out.
    fn execute(&mut self, actions: Vec<ControllerAction>) -> Result<bool, ConsoleError<D::Error>> {
        let mut handshake_sent = false;

        for action in actions {
            match action {
                ControllerAction::Connect => {
                    tracing::info!("Connecting to {}", self.transport.endpoint());
                    self.transport.connect()?;
                },
                ControllerAction::SendHandshake => {
                    // application layer protocol: announce ourselves
                    tracing::info!("Registering with the server.");
                    match self.transport.send(REGISTER_PAYLOAD) {
                        Ok(()) => handshake_sent = true,
                        Err(e) => tracing::warn!("register: {e}"),
                    }
                },
                ControllerAction::StateChanged(state) => {
                    self.display.refresh(state).map_err(ConsoleError::Display)?;
                },
            }
        }

        Ok(handshake_sent)
    }

    /// Send every queued line. Returns the count sent and whether an
    /// interrupt was seen.
    fn drain_input(&mut self) -> (usize, bool) {
        let mut sent = 0;

        while let Some(input) = self.input.try_pop() {
            match input {
                ConsoleInput::Line(line) => {
                    if let Err(e) = self.transport.send(line.as_bytes()) {
                        tracing::warn!("dropping command {line:?}: {e}");
                        break;
                    }
                    sent += 1;
                },
                ConsoleInput::Interrupt => return (sent, true),
            }
        }

        (sent, false)
    }

    /// Render every available inbound message. Stops at the first transport
    /// error; the next iteration picks up where this one left off.
    fn drain_inbound(&mut self) -> Result<usize, ConsoleError<D::Error>> {
        let mut rendered = 0;

        loop {
            match self.transport.try_recv() {
                Ok(Some(message)) => {
                    if message.is_empty() {
                        continue;
                    }
                    let formatted = format_message(&message);
                    self.display.print(formatted.runs()).map_err(ConsoleError::Display)?;
                    rendered += 1;
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::info!("{e}");
                    break;
                },
            }
        }

        Ok(rendered)
    }
}
