//! HTTP client for the places backend
//!
//! Every call goes through [`ApiClient::request`], which attaches the bearer
//! token, honours cancellation and folds all failures into [`ApiError`].

use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::core::config::ApiConfig;
use crate::core::error::ApiError;
use crate::modules::session::SessionStore;

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart form with text fields
    Multipart(Vec<(String, String)>),
}

/// A single call against the backend
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    body: RequestBody,
    cancel: Option<CancellationToken>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: RequestBody::Empty,
            cancel: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| {
            warn!("Failed to encode request body: {}", e);
            ApiError::invalid_request(e.to_string())
        })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Abandon the call as soon as `token` is cancelled
    pub fn cancel_on(mut self, token: Option<CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

}

/// Backend client with session-aware authorization
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
            session,
        }
    }

    /// Execute a request.
    ///
    /// Resolves to `None` for `204 No Content`, otherwise to the decoded JSON
    /// body.
    pub async fn request(&self, request: ApiRequest) -> Result<Option<Value>, ApiError> {
        let ApiRequest {
            method,
            endpoint,
            body,
            cancel,
        } = request;

        let url = format!("{}{}", self.base_url, endpoint);
        let mut builder = self.http.request(method.clone(), &url);

        if let Some(token) = self.session.token().await {
            builder = builder.bearer_auth(token);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                builder.multipart(form)
            }
        };

        debug!("API request: {} {}", method, url);

        let exchange = async {
            let response = builder.send().await.map_err(|e| {
                warn!("API request {} {} failed: {}", method, url, e);
                ApiError::network()
            })?;
            Self::read_response(response).await
        };

        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("API request cancelled: {} {}", method, url);
                        Err(ApiError::cancelled())
                    }
                    result = exchange => result,
                }
            }
            None => exchange.await,
        }
    }

    /// Execute a request and decode the body into `T`
    pub async fn request_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let value = self.request(request).await?.unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| {
            warn!("Failed to decode API response: {}", e);
            ApiError::invalid_response(e.to_string())
        })
    }

    async fn read_response(response: Response) -> Result<Option<Value>, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_response(status, &body);
            warn!("API error: HTTP {} - {}", status, error.message);
            return Err(error);
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!("Failed to read API response body: {}", e);
            ApiError::network()
        })?;

        serde_json::from_slice::<Value>(&bytes)
            .map(Some)
            .map_err(|e| ApiError::invalid_response(e.to_string()))
    }
}
