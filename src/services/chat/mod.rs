//! Chat provider abstraction
//!
//! Wraps a generative-text API as a lazy, finite stream of text
//! fragments. One in-flight stream per request; cancellation is simply
//! dropping the stream, which aborts the underlying transfer.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;
#[cfg(test)]
use mockall::automock;

use crate::{error::AppResult, models::ChatMessage};

pub mod gemini;

pub use gemini::GeminiChat;

/// Stream of text fragments from the model. A mid-stream failure
/// surfaces as an `Err` item after whatever text already arrived; the
/// stream ends there.
pub type ChatTokenStream = Pin<Box<dyn Stream<Item = AppResult<String>> + Send>>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Opens a model stream for the conversation history plus one new
    /// user message. Fails up front on configuration or connection
    /// errors, before any bytes stream.
    async fn stream_chat(
        &self,
        history: &[ChatMessage],
        user_message: &str,
    ) -> AppResult<ChatTokenStream>;
}
