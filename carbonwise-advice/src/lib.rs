//! carbonwise-advice: prompt construction and the chat-completion advice client.

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{AdviceClient, AdviceConfig, ChatMessage, ChatRequest};
pub use error::AdviceError;
pub use prompt::{build_prompt, ADVICE_INSTRUCTIONS};
