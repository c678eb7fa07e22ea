use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::shared::constants::{INVALID_RESPONSE_MESSAGE, NETWORK_ERROR_MESSAGE};

/// Classification of an [`ApiError`], used by callers to pick a policy
/// (logout, retry prompt, inline message) without inspecting status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No response was received from the server
    Network,
    /// The request was cancelled before a response was read
    Cancelled,
    /// The request body could not be encoded; nothing was sent
    InvalidRequest,
    /// A 2xx response whose body could not be decoded
    InvalidResponse,
    /// 401 or 403
    Unauthorized,
    /// Any other non-2xx response
    Http,
}

/// Uniform error shape for every API client call.
///
/// `status` is `0` for failures that never produced a usable HTTP response.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: u16,
    pub data: Option<Value>,
    kind: ApiErrorKind,
}

impl ApiError {
    pub fn network() -> Self {
        Self {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: 0,
            data: None,
            kind: ApiErrorKind::Network,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            message: "Request cancelled".to_string(),
            status: 0,
            data: None,
            kind: ApiErrorKind::Cancelled,
        }
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self {
            message: "Failed to encode request".to_string(),
            status: 0,
            data: Some(Value::String(detail.into())),
            kind: ApiErrorKind::InvalidRequest,
        }
    }

    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self {
            message: INVALID_RESPONSE_MESSAGE.to_string(),
            status: 0,
            data: Some(Value::String(detail.into())),
            kind: ApiErrorKind::InvalidResponse,
        }
    }

    /// Build an error from a non-2xx response.
    ///
    /// `body` is the raw response text. A JSON body with a string `detail`
    /// supplies the message; a non-JSON body falls back to the status text.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP Error {}", status.as_u16()));

        let (message, data) = match serde_json::from_str::<Value>(body) {
            Ok(json) => {
                let message = json
                    .get("detail")
                    .and_then(Value::as_str)
                    .filter(|detail| !detail.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP Error {}", status.as_u16()));
                (message, json)
            }
            Err(_) => (
                status_text.clone(),
                serde_json::json!({ "detail": status_text }),
            ),
        };

        let kind = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Http
        };

        Self {
            message,
            status: status.as_u16(),
            data: Some(data),
            kind,
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_becomes_message() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"Place already exists"}"#,
        );
        assert_eq!(err.message, "Place already exists");
        assert_eq!(err.status, 400);
        assert_eq!(err.kind(), ApiErrorKind::Http);
        assert!(err.data.is_some());
    }

    #[test]
    fn test_non_json_body_falls_back_to_status_text() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.message, "Bad Gateway");
        assert_eq!(err.status, 502);
    }

    #[test]
    fn test_structured_detail_keeps_data() {
        let body = r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#;
        let err = ApiError::from_response(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.message, "HTTP Error 422");
        assert!(err.data.unwrap()["detail"].is_array());
    }

    #[test]
    fn test_unauthorized_kinds() {
        assert!(ApiError::from_response(StatusCode::UNAUTHORIZED, "").is_unauthorized());
        assert!(ApiError::from_response(StatusCode::FORBIDDEN, "").is_unauthorized());
        assert!(!ApiError::from_response(StatusCode::NOT_FOUND, "").is_unauthorized());
    }

    #[test]
    fn test_network_error_has_status_zero() {
        let err = ApiError::network();
        assert_eq!(err.status, 0);
        assert_eq!(err.kind(), ApiErrorKind::Network);
        assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
    }
}
