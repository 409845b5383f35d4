use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Extension, Json,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tokio_stream::StreamExt;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::ChatMessage,
    state::AppState,
};

/// Handler for the streaming chat endpoint
///
/// The response body is the raw model output, chunk by chunk, with any
/// in-band `[REC]` markers left for the client to parse. A failure after
/// streaming has started cannot change the status line anymore, so it is
/// folded into the body as an `[ERROR]{json}[/ERROR]` sentinel.
pub async fn chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let Some(user_message) = body
        .get("userMessage")
        .and_then(Value::as_str)
        .map(str::to_owned)
    else {
        return Err(AppError::InvalidInput("userMessage is required".to_string()));
    };

    let history: Vec<ChatMessage> = match body.get("messages") {
        Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
            AppError::InvalidInput("messages must be a list of {role, content} entries".to_string())
        })?,
        None => Vec::new(),
    };

    tracing::info!(
        request_id = %request_id,
        history_len = history.len(),
        "Opening chat stream"
    );

    let mut tokens = state.chat.stream_chat(&history, &user_message).await?;

    let body_stream = async_stream::stream! {
        while let Some(token) = tokens.next().await {
            match token {
                Ok(text) => yield Ok::<Bytes, std::convert::Infallible>(Bytes::from(text)),
                Err(e) => {
                    tracing::error!(error = %e, "Chat stream failed mid-flight");
                    let payload = json!({ "error": e.to_string() });
                    yield Ok(Bytes::from(format!("[ERROR]{payload}[/ERROR]")));
                    break;
                }
            }
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(e.to_string()))
}
