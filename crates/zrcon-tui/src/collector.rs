//! Keyboard input thread.
//!
//! Blocks on [`crossterm::event::read`] on its own thread, edits the line
//! with [`InputState`], queues completed lines for the console loop and
//! publishes the line being edited so the display can draw it. The thread is
//! never joined; it ends with the process.

use std::{
    io,
    ops::ControlFlow,
    thread::{self, JoinHandle},
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::watch;
use zrcon_app::{InputLine, InputSender, InputState, KeyInput};

/// Input collector state.
pub struct Collector {
    state: InputState,
    queue: InputSender,
    line: watch::Sender<InputLine>,
}

impl Collector {
    /// Collector feeding `queue` and publishing edits on `line`.
    pub fn new(queue: InputSender, line: watch::Sender<InputLine>) -> Self {
        Self { state: InputState::new(), queue, line }
    }

    /// Handle one terminal event. Breaks when the collector should stop.
    pub fn handle_event(&mut self, event: &Event) -> ControlFlow<()> {
        let Event::Key(key) = event else {
            return ControlFlow::Continue(());
        };
        if key.kind != KeyEventKind::Press {
            return ControlFlow::Continue(());
        }

        if is_quit(key) {
            self.queue.interrupt();
            return ControlFlow::Break(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return ControlFlow::Continue(());
        }

        let Some(input) = convert_key(key.code) else {
            return ControlFlow::Continue(());
        };

        if let Some(line) = self.state.handle_key(input)
            && !self.queue.push_line(line)
        {
            return ControlFlow::Break(());
        }

        self.line.send_replace(self.state.snapshot());
        ControlFlow::Continue(())
    }

    fn run(mut self) {
        loop {
            match event::read() {
                Ok(event) => {
                    if self.handle_event(&event).is_break() {
                        break;
                    }
                },
                Err(e) => {
                    tracing::warn!("input: {e}");
                    self.queue.interrupt();
                    break;
                },
            }
        }
    }
}

/// Start the collector thread.
///
/// # Errors
///
/// Returns an error if the thread cannot be spawned.
pub fn spawn(queue: InputSender, line: watch::Sender<InputLine>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("zrcon-input".to_string())
        .spawn(move || Collector::new(queue, line).run())
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c' | 'd') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Convert crossterm `KeyCode` to `KeyInput`.
fn convert_key(code: KeyCode) -> Option<KeyInput> {
    match code {
        KeyCode::Char(c) => Some(KeyInput::Char(c)),
        KeyCode::Enter => Some(KeyInput::Enter),
        KeyCode::Backspace => Some(KeyInput::Backspace),
        KeyCode::Delete => Some(KeyInput::Delete),
        KeyCode::Left => Some(KeyInput::Left),
        KeyCode::Right => Some(KeyInput::Right),
        KeyCode::Up => Some(KeyInput::Up),
        KeyCode::Down => Some(KeyInput::Down),
        KeyCode::Home => Some(KeyInput::Home),
        KeyCode::End => Some(KeyInput::End),
        _ => None,
    }
}
