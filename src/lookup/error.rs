//! Lookup error types.

use thiserror::Error;

/// Error from a geocoding or weather lookup.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LookupError {
    pub kind: LookupErrorKind,
    pub message: String,
}

/// Coarse classification of lookup failures, mostly for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// Transport-level failure: connect error, timeout, aborted body read.
    Network,
    /// The upstream rejected our credentials.
    Auth,
    /// The upstream answered with a non-success status.
    Upstream,
    /// The response arrived but could not be interpreted.
    Decode,
}

impl LookupError {
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Auth, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Upstream, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Decode, message)
    }
}
