use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use tracing::{error, info, warn};

use crate::error::{RelayError, UPSTREAM_FALLBACK_MESSAGE};
use crate::upstream::{MessagesRequest, UpstreamError, MODEL};
use crate::AppState;

use super::models::{ErrorResponse, GenerateRequest, ScriptMetadata, ScriptResponse};

const INPUT_SEPARATOR: &str = "\n\nRaw Input:\n";

pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ScriptResponse>, RelayError> {
    let request = GenerateRequest::from_json(&body).ok_or(RelayError::MissingInput)?;
    let input = request.input.as_str();

    let Some(api_key) = state.config.api_key.as_deref() else {
        error!("CLAUDE_API_KEY is not set, cannot call Claude API");
        return Err(RelayError::MissingApiKey);
    };

    let system_prompt = request
        .system_prompt
        .as_deref()
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or(state.config.system_prompt.as_str());

    info!(
        input_len = input.len(),
        custom_prompt = request.system_prompt.is_some(),
        "calling Claude API to generate script"
    );

    let message = MessagesRequest::single_user(compose_prompt(system_prompt, input));
    let response = state
        .client
        .create_message(api_key, &message)
        .await
        .map_err(|err| upstream_failure(err, state.config.development))?;

    let Some(script) = response.first_text().map(str::to_string) else {
        warn!(
            blocks = response.content.as_array().map_or(0, Vec::len),
            "no script text in Claude response"
        );
        return Err(RelayError::MissingScript);
    };

    info!(script_len = script.len(), "script generated");

    Ok(Json(ScriptResponse {
        script,
        metadata: ScriptMetadata {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            model: MODEL.to_string(),
            tokens_used: response.usage,
        },
    }))
}

pub async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
            details: None,
        }),
    )
        .into_response()
}

fn compose_prompt(system_prompt: &str, input: &str) -> String {
    format!("{system_prompt}{INPUT_SEPARATOR}{input}")
}

fn upstream_failure(err: UpstreamError, development: bool) -> RelayError {
    match err {
        UpstreamError::Status { status, message } => {
            error!(%status, message = message.as_deref().unwrap_or(""), "Claude API error");
            RelayError::Upstream {
                status,
                message: message.unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string()),
            }
        }
        other => {
            error!(error = %other, "error generating script");
            RelayError::Internal {
                details: development.then(|| other.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_puts_input_after_separator() {
        assert_eq!(
            compose_prompt("Write a script.", "I lost my keys twice"),
            "Write a script.\n\nRaw Input:\nI lost my keys twice"
        );
    }

    #[test]
    fn upstream_status_without_message_uses_fallback() {
        let err = upstream_failure(
            UpstreamError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                message: None,
            },
            false,
        );
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "Claude API error: Failed to generate script");
    }

    #[test]
    fn internal_details_follow_development_flag() {
        let bad_key = || {
            UpstreamError::InvalidApiKey(
                reqwest::header::HeaderValue::from_str("bad\nkey").unwrap_err(),
            )
        };

        match upstream_failure(bad_key(), false) {
            RelayError::Internal { details } => assert!(details.is_none()),
            other => panic!("unexpected {other:?}"),
        }
        match upstream_failure(bad_key(), true) {
            RelayError::Internal { details } => {
                assert!(details.unwrap().contains("API key"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
