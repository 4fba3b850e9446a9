mod extract;
pub mod health;
pub mod honeypot;

pub use extract::ValidatedJson;
pub use health::health_check;
pub use honeypot::receive_message;
