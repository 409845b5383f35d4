//! Google Gemini chat client
//!
//! https://ai.google.dev/api/generate-content

use std::time::Duration;

use async_trait::async_trait;
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use tokio_stream::StreamExt;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ChatMessage, ChatRole},
    services::chat::{ChatProvider, ChatTokenStream},
};

const GEMINI_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const SYSTEM_PROMPT: &str = "You are a movie and anime recommendation expert. Based on the user's mood, preferences, and conversation, suggest specific titles with brief reasons why they'd enjoy each one. Always include a mix of popular and hidden gems. Ask follow-up questions to refine recommendations.

When recommending titles, use this exact format for each recommendation (one per line):
[REC]Title###Year###Type###Reason[/REC]
- Title: exact movie/TV/anime name
- Year: release year (e.g. 2024) or N/A if unknown
- Type: exactly one of movie, tv, or anime
- Reason: 1-2 sentences why they'd enjoy it

Example: [REC]Spirited Away###2001###anime###A beautiful Studio Ghibli film about a girl lost in a spirit world, perfect for when you want something magical and heartfelt.[/REC]

You may recommend multiple titles in one response. Use [REC]...[/REC] only for actual recommendations. Keep your tone friendly and conversational.";

#[derive(Clone)]
pub struct GeminiChat {
    http_client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl GeminiChat {
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: config.gemini_api_key.clone(),
            api_url: config.gemini_api_url.clone(),
        }
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not set".to_string()))
    }

    fn build_request(&self, history: &[ChatMessage], user_message: &str) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = history
            .iter()
            .map(|msg| GeminiContent {
                role: match msg.role {
                    ChatRole::Assistant => "model",
                    ChatRole::User => "user",
                }
                .to_string(),
                parts: vec![GeminiPart {
                    text: msg.content.clone(),
                }],
            })
            .collect();

        contents.push(GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: user_message.to_string(),
            }],
        });

        GeminiRequest {
            contents,
            system_instruction: Some(GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: SYSTEM_PROMPT.to_string(),
                }],
            }),
        }
    }
}

#[async_trait]
impl ChatProvider for GeminiChat {
    async fn stream_chat(
        &self,
        history: &[ChatMessage],
        user_message: &str,
    ) -> AppResult<ChatTokenStream> {
        let key = self.api_key()?;
        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.api_url, GEMINI_MODEL, key
        );

        let payload = self.build_request(history, user_message);

        let response = self
            .http_client
            .post(&url)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        Ok(Box::pin(text_stream(response.bytes_stream())))
    }
}

/// Turns the raw SSE byte stream into a stream of text fragments.
///
/// Events are separated by blank lines; each `data: ` payload is one JSON
/// response chunk whose candidate text parts are yielded in order. A
/// transport or decode failure ends the stream with one `Err` item.
fn text_stream(
    byte_stream: impl Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static,
) -> impl Stream<Item = AppResult<String>> + Send {
    async_stream::stream! {
        tokio::pin!(byte_stream);
        let mut buffer = String::new();

        while let Some(chunk) = byte_stream.next().await {
            match chunk {
                Ok(bytes) => {
                    buffer.push_str(&String::from_utf8_lossy(&bytes));

                    while let Some(pos) = buffer.find("\n\n") {
                        let event = buffer[..pos].to_string();
                        buffer = buffer[pos + 2..].to_string();

                        for line in event.lines() {
                            let Some(data) = line.strip_prefix("data: ") else {
                                continue;
                            };

                            match serde_json::from_str::<GeminiResponse>(data) {
                                Ok(response) => {
                                    for text in response.text_parts() {
                                        if !text.is_empty() {
                                            yield Ok(text);
                                        }
                                    }
                                }
                                Err(e) => {
                                    yield Err(AppError::ExternalApi(format!(
                                        "invalid Gemini stream payload: {e}"
                                    )));
                                    return;
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    yield Err(AppError::HttpClient(e));
                    return;
                }
            }
        }
    }
}

// ============================================================
// Gemini API Types
// ============================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    fn text_parts(self) -> Vec<String> {
        self.candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .map(|p| p.text)
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> GeminiChat {
        let config = Config {
            tmdb_api_key: None,
            gemini_api_key: Some("test-key".to_string()),
            tmdb_api_url: "http://test.local".to_string(),
            jikan_api_url: "http://test.local".to_string(),
            gemini_api_url: "http://test.local".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        };
        GeminiChat::new(&config)
    }

    #[test]
    fn test_build_request_maps_roles_and_appends_user_message() {
        let provider = test_provider();
        let history = vec![
            ChatMessage {
                role: ChatRole::User,
                content: "Something cozy?".to_string(),
            },
            ChatMessage {
                role: ChatRole::Assistant,
                content: "How about a slice-of-life anime?".to_string(),
            },
        ];

        let request = provider.build_request(&history, "Yes please");

        assert_eq!(request.contents.len(), 3);
        assert_eq!(request.contents[0].role, "user");
        assert_eq!(request.contents[1].role, "model");
        assert_eq!(request.contents[2].role, "user");
        assert_eq!(request.contents[2].parts[0].text, "Yes please");
        assert!(request.system_instruction.is_some());
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let provider = test_provider();
        let request = provider.build_request(&[], "Hi");
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("systemInstruction").is_some());
        assert!(json.get("contents").is_some());
    }

    #[test]
    fn test_response_text_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Try " }, { "text": "Dark." }]
                }
            }]
        });

        let response: GeminiResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.text_parts(), vec!["Try ", "Dark."]);
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text_parts().is_empty());
    }

    #[tokio::test]
    async fn test_text_stream_parses_sse_events() {
        let bytes: Vec<Result<bytes::Bytes, reqwest::Error>> = vec![
            Ok(bytes::Bytes::from(
                "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hello \"}]}}]}\n\n",
            )),
            Ok(bytes::Bytes::from(
                "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"world\"}]}}]}\n\n",
            )),
        ];

        let stream = text_stream(tokio_stream::iter(bytes));
        tokio::pin!(stream);

        let mut collected = String::new();
        while let Some(item) = stream.next().await {
            collected.push_str(&item.unwrap());
        }
        assert_eq!(collected, "Hello world");
    }

    #[tokio::test]
    async fn test_text_stream_event_split_across_chunks() {
        let bytes: Vec<Result<bytes::Bytes, reqwest::Error>> = vec![
            Ok(bytes::Bytes::from(
                "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"He",
            )),
            Ok(bytes::Bytes::from("llo\"}]}}]}\n\n")),
        ];

        let stream = text_stream(tokio_stream::iter(bytes));
        tokio::pin!(stream);

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first, "Hello");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_text_stream_invalid_payload_yields_error() {
        let bytes: Vec<Result<bytes::Bytes, reqwest::Error>> =
            vec![Ok(bytes::Bytes::from("data: not json\n\n"))];

        let stream = text_stream(tokio_stream::iter(bytes));
        tokio::pin!(stream);

        let item = stream.next().await.unwrap();
        assert!(item.is_err());
        assert!(stream.next().await.is_none());
    }
}
