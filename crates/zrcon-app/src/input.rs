//! Terminal-agnostic line editing.
//!
//! [`InputState`] owns the command line being typed (buffer, cursor, history)
//! and turns [`KeyInput`]s into completed lines. It knows nothing about the
//! terminal library feeding it.

/// Keyboard input abstraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (submit line).
    Enter,
    /// Backspace key (delete character before cursor).
    Backspace,
    /// Delete key (delete character at cursor).
    Delete,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key (older history entry).
    Up,
    /// Down arrow key (newer history entry).
    Down,
    /// Home key (cursor to start).
    Home,
    /// End key (cursor to end).
    End,
}

/// Snapshot of the line being edited, for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    /// Current text.
    pub text: String,
    /// Cursor position in characters.
    pub cursor: usize,
}

/// Single-line editor with submit history.
#[derive(Debug, Default)]
pub struct InputState {
    /// Text buffer for user input.
    buffer: String,
    /// Cursor position, in characters.
    cursor: usize,
    /// Previously submitted lines, oldest first.
    history: Vec<String>,
    /// Index into `history` while browsing. `None` when editing a fresh line.
    history_pos: Option<usize>,
}

impl InputState {
    /// Create a new empty input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text in the input buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Current cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Copy of the current line for rendering.
    pub fn snapshot(&self) -> InputLine {
        InputLine { text: self.buffer.clone(), cursor: self.cursor }
    }

    /// Handle a key input event.
    ///
    /// Returns the completed line when Enter submits a non-empty buffer.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<String> {
        match key {
            KeyInput::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.buffer.insert(at, c);
                self.cursor = self.cursor.saturating_add(1);
            },
            KeyInput::Backspace => {
                if self.cursor > 0 {
                    self.cursor = self.cursor.saturating_sub(1);
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_offset(self.cursor);
                    self.buffer.remove(at);
                }
            },
            KeyInput::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            },
            KeyInput::Right => {
                if self.cursor < self.len() {
                    self.cursor = self.cursor.saturating_add(1);
                }
            },
            KeyInput::Home => {
                self.cursor = 0;
            },
            KeyInput::End => {
                self.cursor = self.len();
            },
            KeyInput::Up => self.history_back(),
            KeyInput::Down => self.history_forward(),
            KeyInput::Enter => return self.submit(),
        }
        None
    }

    /// Take the buffer as a completed line and reset for the next one.
    fn submit(&mut self) -> Option<String> {
        let text = std::mem::take(&mut self.buffer);
        self.cursor = 0;
        self.history_pos = None;

        if text.is_empty() {
            return None;
        }

        if self.history.last() != Some(&text) {
            self.history.push(text.clone());
        }
        Some(text)
    }

    fn history_back(&mut self) {
        let Some(last) = self.history.len().checked_sub(1) else {
            return;
        };
        let pos = self.history_pos.map_or(last, |pos| pos.saturating_sub(1));
        self.load_history(pos);
    }

    fn history_forward(&mut self) {
        let Some(pos) = self.history_pos else {
            return;
        };
        let next = pos.saturating_add(1);
        if next < self.history.len() {
            self.load_history(next);
        } else {
            self.history_pos = None;
            self.buffer.clear();
            self.cursor = 0;
        }
    }

    fn load_history(&mut self, pos: usize) {
        if let Some(entry) = self.history.get(pos) {
            self.buffer.clone_from(entry);
            self.cursor = self.len();
            self.history_pos = Some(pos);
        }
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.buffer.char_indices().nth(cursor).map_or(self.buffer.len(), |(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut InputState, text: &str) {
        for c in text.chars() {
            input.handle_key(KeyInput::Char(c));
        }
    }

    #[test]
    fn char_input_adds_to_buffer() {
        let mut input = InputState::new();

        input.handle_key(KeyInput::Char('h'));
        input.handle_key(KeyInput::Char('i'));

        assert_eq!(input.buffer(), "hi");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_removes_char() {
        let mut input = InputState::new();

        type_str(&mut input, "ab");
        input.handle_key(KeyInput::Backspace);

        assert_eq!(input.buffer(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn enter_returns_line_and_clears_buffer() {
        let mut input = InputState::new();

        type_str(&mut input, "status");
        let line = input.handle_key(KeyInput::Enter);

        assert_eq!(line.as_deref(), Some("status"));
        assert!(input.buffer().is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn enter_on_empty_buffer_returns_nothing() {
        let mut input = InputState::new();
        assert_eq!(input.handle_key(KeyInput::Enter), None);
    }

    #[test]
    fn cursor_movement() {
        let mut input = InputState::new();

        type_str(&mut input, "abc");

        input.handle_key(KeyInput::Home);
        assert_eq!(input.cursor(), 0);

        input.handle_key(KeyInput::End);
        assert_eq!(input.cursor(), 3);

        input.handle_key(KeyInput::Left);
        assert_eq!(input.cursor(), 2);

        input.handle_key(KeyInput::Right);
        input.handle_key(KeyInput::Right);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn insert_and_delete_mid_line() {
        let mut input = InputState::new();

        type_str(&mut input, "map");
        input.handle_key(KeyInput::Home);
        input.handle_key(KeyInput::Delete);
        type_str(&mut input, "M");

        assert_eq!(input.buffer(), "Map");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn multibyte_characters() {
        let mut input = InputState::new();

        type_str(&mut input, "sé");
        input.handle_key(KeyInput::Left);
        type_str(&mut input, "ü");
        input.handle_key(KeyInput::End);
        input.handle_key(KeyInput::Backspace);

        assert_eq!(input.buffer(), "sü");
        assert_eq!(input.snapshot(), InputLine { text: "sü".into(), cursor: 2 });
    }

    #[test]
    fn history_browsing() {
        let mut input = InputState::new();

        type_str(&mut input, "status");
        input.handle_key(KeyInput::Enter);
        type_str(&mut input, "serverinfo");
        input.handle_key(KeyInput::Enter);

        input.handle_key(KeyInput::Up);
        assert_eq!(input.buffer(), "serverinfo");
        input.handle_key(KeyInput::Up);
        assert_eq!(input.buffer(), "status");
        input.handle_key(KeyInput::Up);
        assert_eq!(input.buffer(), "status");

        input.handle_key(KeyInput::Down);
        assert_eq!(input.buffer(), "serverinfo");
        input.handle_key(KeyInput::Down);
        assert!(input.buffer().is_empty());
    }

    #[test]
    fn repeated_lines_stored_once() {
        let mut input = InputState::new();

        for _ in 0..3 {
            type_str(&mut input, "status");
            input.handle_key(KeyInput::Enter);
        }

        input.handle_key(KeyInput::Up);
        input.handle_key(KeyInput::Up);
        assert_eq!(input.buffer(), "status");
        input.handle_key(KeyInput::Down);
        assert!(input.buffer().is_empty());
    }
}
