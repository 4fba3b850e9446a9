//! Reply generation for honeypot messages.
//!
//! The [`Responder`] trait is the seam where an analysis or LLM backend
//! would plug in. The only implementation today is [`EchoResponder`], which
//! acknowledges the message with a fixed template.

use tracing::trace;

use crate::models::HoneypotMessageRequest;

/// Produces the reply sent back to whoever hit the honeypot.
pub trait Responder: Send + Sync {
    /// Generate a reply for `request`.
    fn respond(&self, request: &HoneypotMessageRequest) -> String;
}

/// Placeholder responder that echoes the message back verbatim.
///
/// Output is a pure function of the message: identical input yields a
/// byte-identical reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoResponder;

impl EchoResponder {
    pub fn new() -> Self {
        Self
    }
}

impl Responder for EchoResponder {
    fn respond(&self, request: &HoneypotMessageRequest) -> String {
        trace!(message_len = request.message.len(), "Generating echo reply");
        format!(
            "Received your message: '{}'. How can I help you further?",
            request.message
        )
    }
}
