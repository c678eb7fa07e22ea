use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequestDto {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(skip_serializing)]
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar: Option<String>,
}

impl RegisterRequestDto {
    /// Multipart fields for `POST /register`
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ];
        if let Some(avatar) = self.avatar.as_ref().filter(|a| !a.is_empty()) {
            fields.push(("avatar".to_string(), avatar.clone()));
        }
        fields
    }
}

/// Login form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl LoginRequestDto {
    /// Multipart fields for `POST /login`
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

/// Response of `POST /register`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterResponseDto {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Response of `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponseDto {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Current user as returned by `GET /me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
