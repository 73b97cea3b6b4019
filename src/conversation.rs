//! The conversation state machine.
//!
//! A turn is routed through three layers:
//!
//! 1. [`Stage::select`] — a pure guard table that maps the session record
//!    plus the request's populated fields to exactly one stage.
//! 2. [`Chatbot::respond`] — the effectful dispatcher that runs the chosen
//!    stage's handler, mutating the session and calling lookup services.
//! 3. `intent` — keyword matching that turns a weather snapshot and a
//!    free-text question into a reply.

mod engine;
mod intent;
mod stage;

pub use engine::Chatbot;
pub use stage::{ChatRequest, Stage};
