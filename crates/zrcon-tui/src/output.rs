//! Output pane contents
//!
//! Server messages arrive as per-character [`StyledRun`]s. The buffer folds
//! them into ratatui lines, merging neighbouring characters of the same style
//! into one span, and keeps at most `capacity` completed lines.

use std::collections::VecDeque;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use zrcon_proto::StyledRun;

/// Terminal color for a markup color index.
///
/// 5 and 6 are swapped relative to the usual ANSI order, matching what the
/// game console shows.
pub fn palette(index: u8) -> Option<Color> {
    match index {
        1 => Some(Color::Red),
        2 => Some(Color::Green),
        3 => Some(Color::Yellow),
        4 => Some(Color::Blue),
        5 => Some(Color::Cyan),
        6 => Some(Color::Magenta),
        _ => None,
    }
}

/// Style for one run.
pub fn run_style(color: u8, bold: bool) -> Style {
    let style = palette(color).map_or_else(Style::default, |c| Style::default().fg(c));
    if bold { style.add_modifier(Modifier::BOLD) } else { style }
}

const LOG_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Bounded scrollback for the output pane.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    lines: VecDeque<Line<'static>>,
    /// Spans of the line still being written (no newline yet).
    partial: Vec<Span<'static>>,
    capacity: usize,
}

impl OutputBuffer {
    /// Empty buffer keeping at most `capacity` completed lines.
    pub fn new(capacity: usize) -> Self {
        Self { lines: VecDeque::new(), partial: Vec::new(), capacity: capacity.max(1) }
    }

    /// Append server output. A `\n` inside a run ends the current line.
    pub fn push_runs<I>(&mut self, runs: I)
    where
        I: IntoIterator<Item = StyledRun>,
    {
        for run in runs {
            let style = run_style(run.color, run.bold);
            for (i, piece) in run.text.split('\n').enumerate() {
                if i > 0 {
                    self.finish_line();
                }
                if !piece.is_empty() {
                    self.append(piece, style);
                }
            }
        }
    }

    /// Append a log record on lines of its own.
    pub fn push_log(&mut self, record: &str) {
        if !self.partial.is_empty() {
            self.finish_line();
        }
        for line in record.lines() {
            self.partial.push(Span::styled(line.to_string(), LOG_STYLE));
            self.finish_line();
        }
    }

    /// Completed lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &Line<'static>> {
        self.lines.iter()
    }

    /// The last `height` lines including the unfinished one.
    pub fn tail(&self, height: usize) -> Vec<Line<'static>> {
        let partial = (!self.partial.is_empty()).then(|| Line::from(self.partial.clone()));
        let total = self.lines.len() + usize::from(partial.is_some());
        let skip = total.saturating_sub(height);
        self.lines.iter().cloned().chain(partial).skip(skip).collect()
    }

    fn append(&mut self, text: &str, style: Style) {
        match self.partial.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push_str(text),
            _ => self.partial.push(Span::styled(text.to_string(), style)),
        }
    }

    fn finish_line(&mut self) {
        let spans = std::mem::take(&mut self.partial);
        self.lines.push_back(Line::from(spans));
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}
