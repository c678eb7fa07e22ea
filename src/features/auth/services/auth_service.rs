use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::clients::{AuthClient, CurrentUser};
use crate::features::auth::dtos::{
    LoginRequestDto, RegisterRequestDto, RegisterResponseDto, TokenResponseDto, UserDto,
};
use crate::modules::session::SessionStore;
use crate::shared::validation::format_validation_errors;

/// Session policy on top of the auth endpoints (register, login, logout)
pub struct AuthService {
    client: AuthClient,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(client: AuthClient, session: Arc<dyn SessionStore>) -> Self {
        Self { client, session }
    }

    pub async fn register(&self, dto: RegisterRequestDto) -> Result<RegisterResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        let response = self.client.register(&dto).await?;
        tracing::info!("Registered user: {}", dto.username);
        Ok(response)
    }

    /// Log in and persist the returned token.
    ///
    /// An empty `access_token` is returned as-is but never stored.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenResponseDto> {
        dto.validate()
            .map_err(|e| AppError::Validation(format_validation_errors(&e)))?;

        let token = self.client.login(&dto).await?;
        if token.access_token.is_empty() {
            tracing::warn!("Login for {} returned no access token", dto.username);
            return Ok(token);
        }

        self.session.set_token(&token.access_token).await?;
        tracing::info!("User {} logged in", dto.username);
        Ok(token)
    }

    /// Look up the current user.
    ///
    /// A 401/403 clears the stored token before the original error is returned.
    pub async fn current_user(&self) -> Result<UserDto> {
        match self.client.current_user().await {
            CurrentUser::Authenticated(user) => Ok(user),
            CurrentUser::Unauthorized(error) => {
                tracing::warn!(
                    "Session rejected by server (HTTP {}), logging out",
                    error.status
                );
                if let Err(e) = self.session.clear().await {
                    tracing::error!("Failed to clear rejected session: {}", e);
                }
                Err(error.into())
            }
            CurrentUser::NetworkError(error) | CurrentUser::HttpError(error) => Err(error.into()),
        }
    }

    /// Resolve the stored session on startup.
    ///
    /// Every failure is treated as "not logged in".
    pub async fn restore_session(&self) -> Option<UserDto> {
        if !self.is_authenticated().await {
            return None;
        }

        match self.current_user().await {
            Ok(user) => {
                tracing::info!("Session restored for {}", user.username);
                Some(user)
            }
            Err(e) => {
                tracing::warn!("Could not restore session: {}", e);
                None
            }
        }
    }

    pub async fn logout(&self) -> Result<()> {
        self.session.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.token().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ApiConfig;
    use crate::modules::http::ApiClient;
    use crate::modules::session::MemorySessionStore;
    use crate::shared::test_helpers::{spawn_backend, unreachable_base_url, RequestLog};
    use axum::extract::Multipart;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    fn router() -> Router {
        Router::new()
            .route(
                "/login",
                post(|mut multipart: Multipart| async move {
                    let mut password = String::new();
                    while let Some(field) = multipart.next_field().await.unwrap() {
                        if field.name() == Some("password") {
                            password = field.text().await.unwrap();
                        }
                    }
                    if password == "secreto" {
                        Ok(Json(json!({ "access_token": "good-token", "token_type": "bearer" })))
                    } else if password == "sin-token" {
                        Ok(Json(json!({ "access_token": "", "token_type": "bearer" })))
                    } else {
                        Err((
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "detail": "Credenciales incorrectas" })),
                        ))
                    }
                }),
            )
            .route(
                "/register",
                post(|| async { Json(json!({ "msg": "Usuario registrado exitosamente" })) }),
            )
            .route(
                "/me",
                get(|headers: HeaderMap| async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();
                    match auth {
                        "Bearer good-token" => Ok(Json(json!({
                            "username": "ana",
                            "email": "ana@example.com",
                            "avatar": null
                        }))),
                        "Bearer broken-token" => Err((
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({ "detail": "boom" })),
                        )),
                        _ => Err((
                            StatusCode::UNAUTHORIZED,
                            Json(json!({ "detail": "Token inválido" })),
                        )),
                    }
                }),
            )
    }

    async fn service_with(
        base_url: &str,
        session: Arc<MemorySessionStore>,
    ) -> AuthService {
        let api = ApiClient::new(&ApiConfig::new(base_url).unwrap(), session.clone());
        AuthService::new(AuthClient::new(Arc::new(api)), session)
    }

    async fn setup(token: Option<&str>) -> (AuthService, Arc<MemorySessionStore>, RequestLog) {
        let (base_url, log) = spawn_backend(router()).await;
        let session = Arc::new(match token {
            Some(t) => MemorySessionStore::with_token(t),
            None => MemorySessionStore::new(),
        });
        (service_with(&base_url, session.clone()).await, session, log)
    }

    fn login(password: &str) -> LoginRequestDto {
        LoginRequestDto {
            username: "ana".to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let (service, session, _) = setup(None).await;

        let token = service.login(login("secreto")).await.unwrap();
        assert_eq!(token.access_token, "good-token");
        assert_eq!(session.token().await.as_deref(), Some("good-token"));
        assert!(service.is_authenticated().await);

        let user = service.current_user().await.unwrap();
        assert_eq!(user.username, "ana");
    }

    #[tokio::test]
    async fn test_empty_access_token_is_not_stored() {
        let (service, session, log) = setup(None).await;

        let token = service.login(login("sin-token")).await.unwrap();
        assert!(token.access_token.is_empty());
        assert!(session.token().await.is_none());
        assert!(!service.is_authenticated().await);

        // later requests go out without a bearer header
        assert!(service.current_user().await.is_err());
        assert_eq!(log.last().unwrap().authorization, None);
    }

    #[tokio::test]
    async fn test_failed_login_keeps_session_empty() {
        let (service, session, _) = setup(None).await;

        let err = service.login(login("incorrecta")).await.unwrap_err();
        match err {
            AppError::Api(e) => {
                assert_eq!(e.status, 401);
                assert_eq!(e.message, "Credenciales incorrectas");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(session.token().await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_login_form_is_not_sent() {
        let (service, _, log) = setup(None).await;

        let err = service.login(login("123")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(log.all().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_token_is_cleared_and_error_returned() {
        let (service, session, _) = setup(Some("expired-token")).await;

        let err = service.current_user().await.unwrap_err();
        match err {
            AppError::Api(e) => {
                assert_eq!(e.status, 401);
                assert_eq!(e.message, "Token inválido");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(session.token().await.is_none());
    }

    #[tokio::test]
    async fn test_server_error_keeps_token() {
        let (service, session, _) = setup(Some("broken-token")).await;

        assert!(service.current_user().await.is_err());
        assert_eq!(session.token().await.as_deref(), Some("broken-token"));
    }

    #[tokio::test]
    async fn test_restore_session() {
        let (service, _, log) = setup(None).await;
        assert!(service.restore_session().await.is_none());
        assert!(log.all().is_empty(), "no token means no request");

        let (service, _, _) = setup(Some("good-token")).await;
        assert_eq!(service.restore_session().await.unwrap().username, "ana");

        let (service, session, _) = setup(Some("expired-token")).await;
        assert!(service.restore_session().await.is_none());
        assert!(session.token().await.is_none());
    }

    #[tokio::test]
    async fn test_restore_session_swallows_network_errors() {
        let base_url = unreachable_base_url().await;
        let session = Arc::new(MemorySessionStore::with_token("good-token"));
        let service = service_with(&base_url, session.clone()).await;

        assert!(service.restore_session().await.is_none());
        assert_eq!(session.token().await.as_deref(), Some("good-token"));
    }

    #[tokio::test]
    async fn test_register_and_idempotent_logout() {
        let (service, session, _) = setup(Some("good-token")).await;

        let response = service
            .register(RegisterRequestDto {
                username: "beto".to_string(),
                password: "secreto".to_string(),
                confirm_password: "secreto".to_string(),
                avatar: None,
            })
            .await
            .unwrap();
        assert!(response.msg.is_some());

        service.logout().await.unwrap();
        service.logout().await.unwrap();
        assert!(session.token().await.is_none());
    }
}
