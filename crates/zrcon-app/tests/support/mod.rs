//! Scripted transport and recording display shared by the loop tests.
//!
//! Both fakes append to one journal so tests can assert on the global order
//! of side-effects across the socket and the screen.

#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, io, rc::Rc, time::Duration};

use zrcon_app::{ConnectionState, Display, MonitorRecord, Transport, TransportError};
use zrcon_proto::{EventKind, StyledRuns};

/// Observable side-effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Transport connect issued.
    Connect,
    /// Monitor record handed to the loop.
    Event(EventKind),
    /// Payload sent to the server.
    Sent(String),
    /// Message printed, runs flattened to text.
    Printed(String),
    /// Display refreshed with this state.
    Refresh(ConnectionState),
}

/// Shared, ordered record of side-effects.
pub type Journal = Rc<RefCell<Vec<Step>>>;

/// New empty journal.
pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Journal without display refreshes.
pub fn io_steps(journal: &Journal) -> Vec<Step> {
    journal.borrow().iter().filter(|s| !matches!(s, Step::Refresh(_))).cloned().collect()
}

/// Monitor record for an event kind.
pub fn monitor_record(kind: EventKind) -> MonitorRecord {
    let mut record = kind.code().to_le_bytes().to_vec();
    record.extend_from_slice(&0u32.to_le_bytes());
    MonitorRecord { record, endpoint: b"tcp://127.0.0.1:27961".to_vec() }
}

/// Transport driven by queued script entries.
pub struct ScriptedTransport {
    journal: Journal,
    /// Poll results, consumed one per poll. Empty means "readable if inbound
    /// data is queued".
    pub polls: VecDeque<bool>,
    /// Pending monitor records.
    pub events: VecDeque<MonitorRecord>,
    /// Pending inbound results.
    pub inbound: VecDeque<Result<Vec<u8>, TransportError>>,
    /// Number of upcoming sends that fail.
    pub failing_sends: usize,
    /// Fail the connect call.
    pub fail_connect: bool,
    /// Timeouts passed to `poll_readable`.
    pub poll_timeouts: Vec<Duration>,
}

impl ScriptedTransport {
    /// Empty script writing to `journal`.
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: Rc::clone(journal),
            polls: VecDeque::new(),
            events: VecDeque::new(),
            inbound: VecDeque::new(),
            failing_sends: 0,
            fail_connect: false,
            poll_timeouts: Vec::new(),
        }
    }

    /// Queue a monitor event.
    pub fn push_event(&mut self, kind: EventKind) {
        self.events.push_back(monitor_record(kind));
    }

    /// Queue an inbound message.
    pub fn push_inbound(&mut self, message: &[u8]) {
        self.inbound.push_back(Ok(message.to_vec()));
    }
}

impl Transport for ScriptedTransport {
    fn endpoint(&self) -> &str {
        "tcp://127.0.0.1:27961"
    }

    fn connect(&mut self) -> Result<(), TransportError> {
        if self.fail_connect {
            return Err(TransportError::Setup("Invalid argument".into()));
        }
        self.journal.borrow_mut().push(Step::Connect);
        Ok(())
    }

    fn poll_readable(&mut self, timeout: Duration) -> Result<bool, TransportError> {
        self.poll_timeouts.push(timeout);
        Ok(self.polls.pop_front().unwrap_or(!self.inbound.is_empty()))
    }

    fn try_recv_event(&mut self) -> Result<Option<MonitorRecord>, TransportError> {
        let record = self.events.pop_front();
        if let Some(raw) = &record
            && let Ok(event) = zrcon_proto::LifecycleEvent::decode(&raw.record, &raw.endpoint)
        {
            self.journal.borrow_mut().push(Step::Event(event.kind));
        }
        Ok(record)
    }

    fn try_recv(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        self.inbound.pop_front().transpose()
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        if self.failing_sends > 0 {
            self.failing_sends -= 1;
            return Err(TransportError::Send("Resource temporarily unavailable".into()));
        }
        let text = String::from_utf8_lossy(payload).into_owned();
        self.journal.borrow_mut().push(Step::Sent(text));
        Ok(())
    }
}

/// Display that records what it was asked to show.
pub struct RecordingDisplay {
    journal: Journal,
    /// Bold flag of each printed message.
    pub bold: Vec<bool>,
}

impl RecordingDisplay {
    /// Display writing to `journal`.
    pub fn new(journal: &Journal) -> Self {
        Self { journal: Rc::clone(journal), bold: Vec::new() }
    }
}

impl Display for RecordingDisplay {
    type Error = io::Error;

    fn print(&mut self, runs: StyledRuns<'_>) -> Result<(), io::Error> {
        let runs: Vec<_> = runs.collect();
        self.bold.push(runs.iter().any(|r| r.bold));
        let text = runs.into_iter().map(|r| r.text).collect();
        self.journal.borrow_mut().push(Step::Printed(text));
        Ok(())
    }

    fn refresh(&mut self, state: ConnectionState) -> Result<(), io::Error> {
        self.journal.borrow_mut().push(Step::Refresh(state));
        Ok(())
    }
}
