//! HTTP API for the weather chatbot.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::conversation::Chatbot;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chatbot: Arc<Chatbot>,
}

impl AppState {
    pub fn new(chatbot: Chatbot) -> Self {
        Self {
            chatbot: Arc::new(chatbot),
        }
    }
}
