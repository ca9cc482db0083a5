use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ErrorResponse;

pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to generate script";

/// Every way a relay call can fail, mapped onto its HTTP status.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Missing required field: input")]
    MissingInput,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Server configuration error: Missing API key")]
    MissingApiKey,
    #[error("Claude API error: {message}")]
    Upstream { status: StatusCode, message: String },
    #[error("Failed to extract script from AI response")]
    MissingScript,
    /// `details` is only populated in development mode.
    #[error("Failed to generate script. Please try again.")]
    Internal { details: Option<String> },
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingInput => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream { status, .. } => *status,
            Self::MissingApiKey | Self::MissingScript | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let details = match self {
            Self::Internal { details } => details,
            _ => None,
        };
        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(error: RelayError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn statuses_follow_error_class() {
        assert_eq!(RelayError::MissingInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(RelayError::MissingApiKey.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(RelayError::MissingScript.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            RelayError::Upstream {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: "x".into()
            }
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn upstream_error_embeds_message() {
        let (status, body) = body_json(RelayError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            message: "invalid x-api-key".into(),
        })
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Claude API error: invalid x-api-key");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn internal_details_only_when_present() {
        let (_, hidden) = body_json(RelayError::Internal { details: None }).await;
        assert_eq!(hidden["error"], "Failed to generate script. Please try again.");
        assert!(hidden.get("details").is_none());

        let (_, shown) = body_json(RelayError::Internal {
            details: Some("connection refused".into()),
        })
        .await;
        assert_eq!(shown["details"], "connection refused");
    }
}
