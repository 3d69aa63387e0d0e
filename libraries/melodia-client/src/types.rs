//! Request and response bodies that only the client needs.

use melodia_core::User;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    /// Username or email
    pub identifier: String,
    pub password: String,
}

/// Request body for `POST /api/auth/register` and `/api/auth/create-admin`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Result of a successful login: the bearer token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: User,
}

impl LoginResponse {
    /// Parse a login body.
    ///
    /// Accepts `{data: {token, user}}`, `{data: {token, ...user fields}}`
    /// and the same shapes without the `data` envelope.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        let data = unwrap_envelope(value);
        let token = data
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string);
        let user = user_from_value(data)?;
        Some(Self { token, user })
    }
}

/// Extract the user carried by a body, either nested under `user` or inline.
pub(crate) fn user_from_value(data: Value) -> Option<User> {
    let user_value = match data.get("user") {
        Some(nested @ Value::Object(_)) => nested.clone(),
        _ => data,
    };
    serde_json::from_value(user_value).ok()
}

/// Strip the `{success, message, data}` envelope when present.
pub(crate) fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(|d| !d.is_null()) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

// =============================================================================
// Favorites / Admin Types
// =============================================================================

/// Response of `GET /api/favorites/{id}/check`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FavoriteCheck {
    #[serde(default)]
    pub is_favorite: bool,
}

/// Request body for `PUT /api/admin/users/{id}/status`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserStatusRequest {
    pub is_active: bool,
}

// =============================================================================
// Upload Types
// =============================================================================

/// Metadata sent alongside an uploaded media file.
#[derive(Debug, Clone)]
pub struct UploadMetadata {
    pub title: String,
    pub artist: String,
}
