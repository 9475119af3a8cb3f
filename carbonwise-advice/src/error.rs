//! Failure cases of an advice request

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdviceError {
    /// The endpoint answered with a non-success status.
    #[error("advice endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Connect, timeout, or read failure before a usable response arrived.
    #[error("advice request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status, but no `choices[0].message.content` in the body.
    #[error("malformed advice response: {0}")]
    MalformedResponse(String),
}

impl AdviceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AdviceError::Status { status, .. } => Some(*status),
            AdviceError::Transport(e) => e.status().map(|s| s.as_u16()),
            AdviceError::MalformedResponse(_) => None,
        }
    }

    /// Short user-facing line, e.g. `Error getting advice: 429`.
    pub fn legacy_message(&self) -> String {
        match self.status() {
            Some(code) => format!("Error getting advice: {code}"),
            None => format!("Error getting advice: {self}"),
        }
    }
}
