//! UI rendering
//!
//! Rendering functions that turn a [`ConsoleView`] into terminal output using
//! ratatui widgets. Nothing here does I/O.
//!
//! Layout, top to bottom: header, output pane, divider, prompt, status bar.

mod input;
mod output;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use zrcon_app::{ConnectionConfig, ConnectionState, InputLine};

use crate::OutputBuffer;

/// Everything the screen shows.
#[derive(Debug, Clone)]
pub struct ConsoleView {
    /// Endpoint shown in the header.
    pub endpoint: String,
    /// Socket identity shown in the status bar.
    pub identity: Option<String>,
    /// Connection state shown in the status bar.
    pub state: ConnectionState,
    /// Output pane contents.
    pub output: OutputBuffer,
    /// Line being edited.
    pub input: InputLine,
}

impl ConsoleView {
    /// Fresh view for a connection, keeping `scrollback` output lines.
    pub fn new(config: &ConnectionConfig, scrollback: usize) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            identity: config.identity.clone(),
            state: ConnectionState::default(),
            output: OutputBuffer::new(scrollback),
            input: InputLine::default(),
        }
    }
}

/// Render the entire UI.
pub fn render(frame: &mut Frame, view: &ConsoleView) {
    const HEADER_HEIGHT: u16 = 1;
    const OUTPUT_MIN_HEIGHT: u16 = 1;
    const DIVIDER_HEIGHT: u16 = 1;
    const INPUT_HEIGHT: u16 = 1;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(OUTPUT_MIN_HEIGHT),
            Constraint::Length(DIVIDER_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, output_area, divider_area, input_area, status_area] = chunks.as_ref()
    else {
        return;
    };

    let header = Paragraph::new(Line::from(format!("Quake Live rcon: {}", view.endpoint)))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, *header_area);

    output::render(frame, &view.output, *output_area);

    let divider = "\u{2500}".repeat(usize::from(divider_area.width));
    frame.render_widget(Paragraph::new(divider), *divider_area);

    input::render(frame, &view.input, *input_area);
    status::render(frame, view, *status_area);
}
