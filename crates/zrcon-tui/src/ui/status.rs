//! Status bar
//!
//! Displays connection state and socket identity.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use zrcon_app::ConnectionState;

use super::ConsoleView;

/// Render the status bar.
pub fn render(frame: &mut Frame, view: &ConsoleView, area: Rect) {
    let style = match view.state {
        ConnectionState::Disconnected => Style::default().fg(Color::Red),
        ConnectionState::Connecting => Style::default().fg(Color::Yellow),
        ConnectionState::Registered => {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        },
    };
    let connection_status = Span::styled(view.state.to_string(), style);

    let identity =
        view.identity.as_deref().map_or_else(String::new, |id| format!(" | Identity: {id}"));

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(identity, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
