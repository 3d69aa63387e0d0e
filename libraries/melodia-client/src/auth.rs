//! Authentication endpoints.
//!
//! These are raw calls. Token persistence and session state are the
//! [`SessionStore`](crate::SessionStore)'s job.

use crate::client::{decode_json, MusicClient};
use crate::error::{AuthError, ClientError, Result};
use crate::types::{unwrap_envelope, user_from_value, LoginRequest, LoginResponse, RegisterRequest};
use melodia_core::User;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Authentication client for the Melodia backend.
pub struct AuthClient<'a> {
    client: &'a MusicClient,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(client: &'a MusicClient) -> Self {
        Self { client }
    }

    /// Login with a username or email and a password.
    ///
    /// 400/401/403/404 answers become [`AuthError::InvalidCredentials`].
    pub async fn login(&self, identifier: &str, password: &str) -> Result<LoginResponse> {
        debug!(identifier = %identifier, "Attempting login");

        let request = LoginRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };

        let body: Value = match self
            .client
            .send_json(Method::POST, "/api/auth/login", &request)
            .await
        {
            Ok(body) => body,
            Err(ClientError::Http(e)) if matches!(e.status, 400 | 401 | 403 | 404) => {
                warn!(status = e.status, "Login failed: invalid credentials");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let login = LoginResponse::from_value(body).ok_or_else(|| {
            ClientError::ParseError("Login response carried no user".to_string())
        })?;

        info!(username = %login.user.username, user_id = %login.user.id, "Login successful");
        Ok(login)
    }

    /// Register a new account. Does not log in.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        self.create_account("/api/auth/register", username, email, password)
            .await
    }

    /// Create an administrator account.
    pub async fn create_admin(&self, username: &str, email: &str, password: &str) -> Result<()> {
        self.create_account("/api/auth/create-admin", username, email, password)
            .await
    }

    async fn create_account(
        &self,
        path: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<()> {
        debug!(username = %username, path = %path, "Registering account");

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| ClientError::ParseError(e.to_string()))?;

        match self.client.send_empty(Method::POST, path, Some(body)).await {
            Ok(()) => {
                info!(username = %username, "Account registered");
                Ok(())
            }
            Err(ClientError::Http(e)) => {
                warn!(status = e.status, "Registration rejected");
                Err(AuthError::RegistrationFailed(e.display_message()).into())
            }
            Err(e) => Err(e),
        }
    }

    /// Invalidate the session on the backend.
    pub async fn logout(&self) -> Result<()> {
        self.client
            .send_empty(Method::POST, "/api/auth/logout", None)
            .await
    }

    /// Current identity of the stored token (`GET /api/auth/me`).
    pub async fn me(&self) -> Result<User> {
        let response = self
            .client
            .request(Method::GET, "/api/auth/me", None)
            .await?;
        let body: Value = decode_json(response, "/api/auth/me").await?;

        user_from_value(unwrap_envelope(body))
            .ok_or_else(|| ClientError::ParseError("Identity response carried no user".to_string()))
    }
}
