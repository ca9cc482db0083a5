//! Minimal client for the Claude Messages API.

use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const MODEL: &str = "claude-sonnet-4-5-20250929";
pub const MAX_TOKENS: u32 = 1500;
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
pub struct MessagesRequest {
    pub model: &'static str,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

impl MessagesRequest {
    /// One user-role message against the fixed model and token ceiling.
    pub fn single_user(content: String) -> Self {
        Self {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content,
            }],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

/// Only the fields the relay reads. Kept loosely typed so an unexpected
/// shape reads as "no text" instead of a decode failure.
#[derive(Debug)]
pub struct MessagesResponse {
    pub content: Value,
    /// `None` when the key is absent; an explicit `null` is kept.
    pub usage: Option<Value>,
}

impl From<Value> for MessagesResponse {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(mut fields) => Self {
                content: fields.remove("content").unwrap_or(Value::Null),
                usage: fields.remove("usage"),
            },
            _ => Self {
                content: Value::Null,
                usage: None,
            },
        }
    }
}

impl MessagesResponse {
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .get(0)?
            .get("text")?
            .as_str()
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl ErrorEnvelope {
    fn into_message(self) -> Option<String> {
        self.error
            .and_then(|detail| detail.message)
            .filter(|message| !message.is_empty())
    }
}

/// Anything unparseable becomes an empty envelope.
fn parse_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .unwrap_or_default()
        .into_message()
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[source] InvalidHeaderValue),
    #[error("failed to send request to Claude API: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Claude API returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("failed to decode Claude API response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    api_url: String,
}

impl ClaudeClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    pub async fn create_message(
        &self,
        api_key: &str,
        request: &MessagesRequest,
    ) -> Result<MessagesResponse, UpstreamError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        let mut key_value = HeaderValue::from_str(api_key).map_err(UpstreamError::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert("x-api-key", key_value);

        let response = self
            .http
            .post(&self.api_url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status,
                message: parse_error_message(&body),
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(UpstreamError::Decode)?;
        Ok(MessagesResponse::from(body))
    }
}
