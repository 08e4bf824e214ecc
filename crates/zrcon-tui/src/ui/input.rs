//! Input line
//!
//! Displays the line being edited behind a `> ` prompt, with the cursor.

use ratatui::{Frame, layout::Rect, widgets::Paragraph};
use zrcon_app::InputLine;

const PROMPT: &str = "> ";
const PROMPT_WIDTH: u16 = 2;

/// Render the input line.
pub fn render(frame: &mut Frame, input: &InputLine, area: Rect) {
    let paragraph = Paragraph::new(format!("{PROMPT}{}", input.text));
    frame.render_widget(paragraph, area);

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + 1);
    let cursor_offset = u16::try_from(input.cursor).unwrap_or(u16::MAX).min(available_width);
    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);

    frame.set_cursor_position((cursor_x, area.y));
}
