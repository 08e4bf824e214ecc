//! Output pane
//!
//! Shows the newest server output and log lines that fit.

use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use crate::OutputBuffer;

/// Render the output pane.
pub fn render(frame: &mut Frame, output: &OutputBuffer, area: Rect) {
    let visible = output.tail(usize::from(area.height));
    frame.render_widget(Paragraph::new(visible), area);
}
