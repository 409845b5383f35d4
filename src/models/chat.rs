use serde::{Deserialize, Serialize};

use super::MediaKind;

/// One turn of the conversation history. Created by the client, sent
/// verbatim to the chat provider, never persisted server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A structured recommendation extracted from chat output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecCard {
    pub title: String,
    /// Release year as text; `"N/A"` when the model does not know it.
    pub year: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub reason: String,
}

/// Derived view of a chat buffer: plain text interleaved with cards.
///
/// Recomputed from the raw accumulated text on every parse pass; the raw
/// buffer stays the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplaySegment {
    Text { content: String },
    Rec { card: RecCard },
}
