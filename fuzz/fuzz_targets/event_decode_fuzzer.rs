//! Fuzz target for monitor record decoding
//!
//! # Strategy
//!
//! - Record length: empty, short of the header, exact, oversized
//! - Kind code: every libzmq event, unknown codes, zero, `u16::MAX`
//! - Endpoint frame: arbitrary bytes, including invalid UTF-8
//!
//! # Invariants
//!
//! - Records shorter than 6 bytes MUST return `DecodeError::MalformedEvent`
//! - Decoding MUST never panic
//! - A decoded event MUST re-encode to the first 6 bytes of the record
//! - Unknown kind codes MUST survive the round trip unchanged

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use zrcon_proto::{DecodeError, EventKind, LifecycleEvent};

#[derive(Debug, Arbitrary)]
struct Input {
    record: Vec<u8>,
    endpoint: Vec<u8>,
}

fuzz_target!(|input: Input| {
    match LifecycleEvent::decode(&input.record, &input.endpoint) {
        Ok(event) => {
            assert!(input.record.len() >= LifecycleEvent::RECORD_SIZE);
            assert_eq!(&event.header_bytes()[..], &input.record[..LifecycleEvent::RECORD_SIZE]);
            assert_eq!(EventKind::from_code(event.kind.code()), event.kind);
            assert_eq!(event.endpoint, input.endpoint);
            let _ = event.to_string();
        },
        Err(DecodeError::MalformedEvent { expected, actual }) => {
            assert_eq!(expected, LifecycleEvent::RECORD_SIZE);
            assert_eq!(actual, input.record.len());
            assert!(actual < expected);
        },
    }
});
