//! Fuzz target for console message formatting
//!
//! # Strategy
//!
//! - Raw bytes straight off the socket, including invalid UTF-8
//! - Wrapper prefixes (`broadcast:`, `print "`) with short or empty bodies
//! - Dense `^` markup, trailing `^`, multibyte characters after `^`
//!
//! # Invariants
//!
//! - Formatting and run iteration MUST never panic
//! - Every run MUST carry a color index in `0..=6`
//! - Every run MUST share the message's bold flag
//! - Coalesced runs MUST concatenate to the same text as the raw runs

#![no_main]

use libfuzzer_sys::fuzz_target;
use zrcon_proto::format_message;

fuzz_target!(|data: &[u8]| {
    let message = format_message(data);

    let mut text = String::new();
    for run in message.runs() {
        assert!(run.color <= 6);
        assert_eq!(run.bold, message.is_bold());
        text.push_str(&run.text);
    }

    let coalesced: String = message.coalesced().into_iter().map(|run| run.text).collect();
    assert_eq!(coalesced, text);
});
