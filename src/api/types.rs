//! API response types
//!
//! The inbound [`ChatRequest`](crate::conversation::ChatRequest) lives with
//! the state machine, since its field presence is what drives stage
//! selection.

use serde::Serialize;

/// Response carrying the bot's reply text
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
