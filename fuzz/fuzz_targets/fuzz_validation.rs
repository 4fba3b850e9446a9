//! Fuzz testing for honeypot request parsing and validation.
//!
//! Honeypot bodies are attacker-controlled by definition. This target checks
//! that parsing, validation and reply generation never panic on arbitrary
//! bytes, and that every accepted message is echoed verbatim.
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_validation
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use rakshak_honeypot::models::HoneypotMessageRequest;
use rakshak_honeypot::services::{EchoResponder, Responder};
use rakshak_honeypot::validation::{Validate, validate_message};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = validate_message(s);
    }

    if let Ok(request) = serde_json::from_slice::<HoneypotMessageRequest>(data) {
        if request.validate().is_ok() {
            let reply = EchoResponder::new().respond(&request);
            assert!(reply.contains(&request.message));
        } else {
            assert!(request.message.is_empty());
        }
    }
});
