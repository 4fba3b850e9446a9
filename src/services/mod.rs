mod responder;

pub use responder::{EchoResponder, Responder};
