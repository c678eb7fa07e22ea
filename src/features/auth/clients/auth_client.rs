use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::core::error::{ApiError, ApiErrorKind};
use crate::features::auth::dtos::{
    LoginRequestDto, RegisterRequestDto, RegisterResponseDto, TokenResponseDto, UserDto,
};
use crate::modules::http::{ApiClient, ApiRequest};

/// Outcome of the current-user lookup.
///
/// The client only reports what happened; deciding to drop the session on
/// `Unauthorized` is left to the caller.
#[derive(Debug, Clone)]
pub enum CurrentUser {
    Authenticated(UserDto),
    Unauthorized(ApiError),
    NetworkError(ApiError),
    HttpError(ApiError),
}

impl CurrentUser {
    fn from_error(error: ApiError) -> Self {
        match error.kind() {
            ApiErrorKind::Unauthorized => Self::Unauthorized(error),
            ApiErrorKind::Network | ApiErrorKind::Cancelled => Self::NetworkError(error),
            ApiErrorKind::InvalidRequest | ApiErrorKind::InvalidResponse | ApiErrorKind::Http => {
                Self::HttpError(error)
            }
        }
    }
}

/// Auth endpoints of the backend
#[derive(Clone)]
pub struct AuthClient {
    api: Arc<ApiClient>,
    cancel: Option<CancellationToken>,
}

impl AuthClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api, cancel: None }
    }

    /// A copy of this client whose requests are abandoned once `token` fires
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            api: Arc::clone(&self.api),
            cancel: Some(token),
        }
    }

    pub async fn register(&self, dto: &RegisterRequestDto) -> Result<RegisterResponseDto, ApiError> {
        tracing::debug!("Registering user: {}", dto.username);
        let request = ApiRequest::post("/register")
            .multipart(dto.form_fields())
            .cancel_on(self.cancel.clone());
        self.api.request_as(request).await
    }

    /// Exchange credentials for a bearer token. Does not persist it.
    pub async fn login(&self, dto: &LoginRequestDto) -> Result<TokenResponseDto, ApiError> {
        tracing::debug!("Logging in user: {}", dto.username);
        let request = ApiRequest::post("/login")
            .multipart(dto.form_fields())
            .cancel_on(self.cancel.clone());
        self.api.request_as(request).await
    }

    pub async fn current_user(&self) -> CurrentUser {
        let request = ApiRequest::get("/me").cancel_on(self.cancel.clone());
        match self.api.request_as::<UserDto>(request).await {
            Ok(user) => CurrentUser::Authenticated(user),
            Err(e) => CurrentUser::from_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_current_user_classification() {
        let unauthorized = ApiError::from_response(StatusCode::FORBIDDEN, "");
        assert!(matches!(
            CurrentUser::from_error(unauthorized),
            CurrentUser::Unauthorized(_)
        ));

        assert!(matches!(
            CurrentUser::from_error(ApiError::network()),
            CurrentUser::NetworkError(_)
        ));

        let server = ApiError::from_response(StatusCode::NOT_FOUND, r#"{"detail":"x"}"#);
        let outcome = CurrentUser::from_error(server);
        match outcome {
            CurrentUser::HttpError(e) => assert_eq!(e.status, 404),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
