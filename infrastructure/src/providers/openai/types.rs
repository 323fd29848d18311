//! Wire types for the chat completions API and their mapping to port types

use serde::{Deserialize, Serialize};
use voicelog_application::{AiFailure, CompletionRequest};

// ─── Request ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Build the request body: optional system message, then the user prompt.
pub fn build_request<'a>(
    model: &'a str,
    temperature: f32,
    request: &'a CompletionRequest,
) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system_context.as_deref() {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: &request.prompt,
    });

    ChatRequest {
        model,
        messages,
        max_tokens: request.max_output_tokens,
        temperature,
    }
}

// ─── Response ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Text of the first choice, trimmed. A missing content field reads as empty.
pub fn extract_reply(response: ChatResponse) -> Result<String, AiFailure> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AiFailure::ServiceError("response contained no choices".to_string()))?;

    Ok(choice
        .message
        .content
        .map(|text| text.trim().to_string())
        .unwrap_or_default())
}

/// Pull `error.message` out of an error body, if it has one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
}

/// Map a non-success HTTP status to a failure kind.
pub fn failure_for_status(status: u16, message: String) -> AiFailure {
    match status {
        401 | 403 => AiFailure::AuthFailed(message),
        429 => AiFailure::RateLimited(message),
        400 | 404 | 422 => AiFailure::InvalidRequest(message),
        _ => AiFailure::ServiceError(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_with_system_context() {
        let request = CompletionRequest::new("what is on screen?", 300)
            .with_system_context("You are a screen assistant.");
        let body = build_request("gpt-3.5-turbo", 0.7, &request);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "what is on screen?");
    }

    #[test]
    fn test_build_request_without_system_context() {
        let request = CompletionRequest::new("hi", 150);
        let body = build_request("m", 0.0, &request);
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
    }

    #[test]
    fn test_extract_reply_trims_first_choice() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  hello \n"}},
                           {"message":{"content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(response).unwrap(), "hello");
    }

    #[test]
    fn test_extract_reply_null_content_is_empty() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert_eq!(extract_reply(response).unwrap(), "");
    }

    #[test]
    fn test_extract_reply_without_choices() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_reply(response),
            Err(AiFailure::ServiceError(_))
        ));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"error":{"message":"bad key","type":"auth"}}"#).as_deref(),
            Some("bad key")
        );
        assert!(error_message("<html>gateway</html>").is_none());
    }

    #[test]
    fn test_failure_for_status() {
        let m = || "x".to_string();
        assert!(matches!(failure_for_status(401, m()), AiFailure::AuthFailed(_)));
        assert!(matches!(failure_for_status(403, m()), AiFailure::AuthFailed(_)));
        assert!(matches!(failure_for_status(429, m()), AiFailure::RateLimited(_)));
        assert!(matches!(failure_for_status(400, m()), AiFailure::InvalidRequest(_)));
        assert!(matches!(failure_for_status(404, m()), AiFailure::InvalidRequest(_)));
        assert!(matches!(failure_for_status(500, m()), AiFailure::ServiceError(_)));
        assert!(matches!(failure_for_status(503, m()), AiFailure::ServiceError(_)));
    }
}
