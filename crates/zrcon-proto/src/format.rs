//! Console message markup.
//!
//! Server console output carries its own in-band styling: `^` followed by a
//! digit `0`-`7` switches the foreground color for the rest of the message.
//! A `^` followed by anything else is literal text. Two wrapper forms also
//! show up on the wire:
//!
//! - `broadcast: <text>`: a server-wide announcement, rendered bold.
//! - `print "<text>"\n`: a quoted print command echoed back verbatim.
//!
//! [`format_message`] strips the wrappers and [`FormattedMessage::runs`]
//! lazily interprets the color markup.

use std::{iter::FusedIterator, str::Chars};

const BROADCAST_PREFIX: &str = "broadcast:";
const BROADCAST_SKIP: usize = 11;
const PRINT_PREFIX: &str = "print \"";
const PRINT_SKIP: usize = 7;
const PRINT_TRAILER: usize = 2;

const LITERAL_NEWLINE: &str = "\\n";
const CONTROL_BYTE: char = '\u{19}';
const ESCAPE: char = '^';

/// Color index 7 (white) renders as the terminal default.
const WHITE: u8 = 7;

/// A span of text sharing one color and weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    /// Text of the run.
    pub text: String,
    /// Color index, `0` (default) to `6`.
    pub color: u8,
    /// Bold weight.
    pub bold: bool,
}

/// A server message with its wrappers removed, ready for markup parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    text: String,
    bold: bool,
}

impl FormattedMessage {
    /// Message text, color markup still in place.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether every run of this message is bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Parse the color markup, one run per visible character.
    pub fn runs(&self) -> StyledRuns<'_> {
        StyledRuns {
            chars: self.text.chars(),
            color: 0,
            escape: false,
            pending: None,
            bold: self.bold,
        }
    }

    /// Runs with adjacent same-style characters merged.
    pub fn coalesced(&self) -> Vec<StyledRun> {
        let mut merged: Vec<StyledRun> = Vec::new();
        for run in self.runs() {
            match merged.last_mut() {
                Some(last) if last.color == run.color && last.bold == run.bold => {
                    last.text.push_str(&run.text);
                },
                _ => merged.push(run),
            }
        }
        merged
    }
}

/// Strip transport artifacts and wrappers from a raw server message.
///
/// Never fails: invalid UTF-8 is replaced rather than rejected so a single
/// garbled message cannot stall the display.
pub fn format_message(raw: &[u8]) -> FormattedMessage {
    let text = String::from_utf8_lossy(raw)
        .replace(LITERAL_NEWLINE, "")
        .replace(CONTROL_BYTE, "");

    let (text, bold) = if text.starts_with(BROADCAST_PREFIX) {
        (skip_chars(&text, BROADCAST_SKIP).to_owned(), true)
    } else {
        (text, false)
    };

    let text = if text.starts_with(PRINT_PREFIX) {
        let body = skip_chars(&text, PRINT_SKIP);
        let mut unwrapped = drop_last_chars(body, PRINT_TRAILER).to_owned();
        unwrapped.push('\n');
        unwrapped
    } else {
        text
    };

    FormattedMessage { text, bold }
}

fn skip_chars(text: &str, count: usize) -> &str {
    text.char_indices().nth(count).map_or("", |(idx, _)| &text[idx..])
}

fn drop_last_chars(text: &str, count: usize) -> &str {
    match count.checked_sub(1) {
        None => text,
        Some(back) => text.char_indices().rev().nth(back).map_or("", |(idx, _)| &text[..idx]),
    }
}

/// Lazy iterator over the styled characters of a message.
///
/// State machine over two registers: the current color and whether the
/// previous character was an unconsumed `^`. A dangling `^` at the end of
/// input produces nothing.
#[derive(Debug, Clone)]
pub struct StyledRuns<'a> {
    chars: Chars<'a>,
    color: u8,
    escape: bool,
    pending: Option<char>,
    bold: bool,
}

impl StyledRuns<'_> {
    fn run(&self, ch: char) -> StyledRun {
        StyledRun { text: ch.to_string(), color: self.color, bold: self.bold }
    }
}

impl Iterator for StyledRuns<'_> {
    type Item = StyledRun;

    fn next(&mut self) -> Option<StyledRun> {
        if let Some(ch) = self.pending.take() {
            return Some(self.run(ch));
        }

        loop {
            let ch = self.chars.next()?;

            if self.escape {
                self.escape = false;
                if let Some(digit) = ch.to_digit(10)
                    && digit <= u32::from(WHITE)
                {
                    let color = digit as u8;
                    self.color = if color == WHITE { 0 } else { color };
                    continue;
                }
                // Not a color selector: the caret was literal.
                self.pending = Some(ch);
                return Some(self.run(ESCAPE));
            }

            if ch == ESCAPE {
                self.escape = true;
                continue;
            }

            return Some(self.run(ch));
        }
    }
}

impl FusedIterator for StyledRuns<'_> {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn run(text: &str, color: u8, bold: bool) -> StyledRun {
        StyledRun { text: text.to_owned(), color, bold }
    }

    #[test]
    fn color_switches() {
        let message = format_message(b"^1Hello^7World");
        assert_eq!(message.coalesced(), vec![run("Hello", 1, false), run("World", 0, false)]);
    }

    #[test]
    fn one_run_per_character() {
        let message = format_message(b"^3ab");
        let runs: Vec<_> = message.runs().collect();
        assert_eq!(runs, vec![run("a", 3, false), run("b", 3, false)]);
    }

    #[test]
    fn dangling_caret_is_dropped() {
        assert_eq!(format_message(b"^").runs().count(), 0);

        let message = format_message(b"abc^");
        assert_eq!(message.coalesced(), vec![run("abc", 0, false)]);
    }

    #[test]
    fn caret_before_non_digit_is_literal() {
        let message = format_message(b"^2a^xb");
        let runs: Vec<_> = message.runs().collect();
        assert_eq!(
            runs,
            vec![run("a", 2, false), run("^", 2, false), run("x", 2, false), run("b", 2, false)]
        );
    }

    #[test]
    fn digits_above_seven_are_literal() {
        let message = format_message(b"^8");
        assert_eq!(message.coalesced(), vec![run("^8", 0, false)]);
    }

    #[test]
    fn double_caret_emits_both() {
        let message = format_message(b"^^1");
        assert_eq!(message.coalesced(), vec![run("^^1", 0, false)]);
    }

    #[test]
    fn broadcast_is_bold() {
        let message = format_message(b"broadcast: wins!");
        assert!(message.is_bold());
        assert_eq!(message.text(), "wins!");
        assert!(message.runs().all(|r| r.bold));
        assert_eq!(message.coalesced(), vec![run("wins!", 0, true)]);
    }

    #[test]
    fn bare_broadcast_prefix_is_empty() {
        let message = format_message(b"broadcast:");
        assert!(message.is_bold());
        assert_eq!(message.runs().count(), 0);
    }

    #[test]
    fn print_is_unwrapped() {
        let message = format_message(b"print \"^1Player^7 connected\"\n");
        assert_eq!(message.text(), "^1Player^7 connected\n");
        assert_eq!(
            message.coalesced(),
            vec![run("Player", 1, false), run(" connected\n", 0, false)]
        );
    }

    #[test]
    fn short_print_keeps_only_newline() {
        assert_eq!(format_message(b"print \"a").text(), "\n");
    }

    #[test]
    fn broadcast_wrapping_print() {
        let message = format_message(b"broadcast: print \"hi\"\n");
        assert!(message.is_bold());
        assert_eq!(message.text(), "hi\n");
    }

    #[test]
    fn artifacts_are_stripped() {
        let message = format_message(b"a\\nb\x19c");
        assert_eq!(message.text(), "abc");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let message = format_message(&[b'o', b'k', 0xFF, b'!']);
        assert_eq!(message.text(), "ok\u{FFFD}!");
    }

    #[test]
    fn empty_message_has_no_runs() {
        assert_eq!(format_message(b"").runs().count(), 0);
    }

    proptest! {
        #[test]
        fn plain_text_is_one_default_run_per_char(text in "[^\\^\\\\\u{19}]{0,64}") {
            prop_assume!(!text.starts_with(BROADCAST_PREFIX) && !text.starts_with(PRINT_PREFIX));
            let message = format_message(text.as_bytes());
            let runs: Vec<_> = message.runs().collect();

            prop_assert_eq!(runs.len(), text.chars().count());
            for (run, ch) in runs.iter().zip(text.chars()) {
                prop_assert_eq!(run.color, 0);
                prop_assert!(!run.bold);
                prop_assert_eq!(run.text.clone(), ch.to_string());
            }
        }

        #[test]
        fn colors_stay_in_palette(raw in prop::collection::vec(any::<u8>(), 0..256)) {
            let message = format_message(&raw);
            for run in message.runs() {
                prop_assert!(run.color < WHITE);
                prop_assert_eq!(run.bold, message.is_bold());
            }
        }

        #[test]
        fn coalescing_preserves_text(raw in prop::collection::vec(any::<u8>(), 0..256)) {
            let message = format_message(&raw);
            let flat: String = message.runs().map(|r| r.text).collect();
            let merged: String = message.coalesced().into_iter().map(|r| r.text).collect();
            prop_assert_eq!(flat, merged);
        }
    }
}
