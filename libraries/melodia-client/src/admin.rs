//! Administrator operations.
//!
//! The backend enforces the ADMIN role; these calls fail with a 401/403
//! [`HttpError`](crate::HttpError) for anyone else.

use crate::client::{segment, MusicClient};
use crate::error::{ClientError, Result};
use crate::types::UserStatusRequest;
use melodia_core::{DashboardStats, NewTrack, Track, TrackId, User, UserId};
use reqwest::Method;
use serde_json::Value;
use tracing::info;

/// Admin client for the Melodia backend.
pub struct AdminClient<'a> {
    client: &'a MusicClient,
}

impl<'a> AdminClient<'a> {
    pub(crate) fn new(client: &'a MusicClient) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        self.client.get_json("/api/admin/dashboard").await
    }

    /// Cache statistics; free-form JSON.
    pub async fn cache_stats(&self) -> Result<Value> {
        self.client.get_json("/api/admin/cache/stats").await
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.client.get_json("/api/admin/users").await
    }

    /// Enable or disable an account.
    pub async fn set_user_status(&self, id: &UserId, active: bool) -> Result<()> {
        let path = format!("/api/admin/users/{}/status", segment(id.as_str()));
        let body = serde_json::to_value(UserStatusRequest { is_active: active })
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        self.client.send_empty(Method::PUT, &path, Some(body)).await?;
        info!(user_id = %id, active, "User status updated");
        Ok(())
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        let path = format!("/api/admin/users/{}", segment(id.as_str()));
        self.client.send_empty(Method::DELETE, &path, None).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Replace a track's metadata.
    pub async fn update_song(&self, id: &TrackId, track: &NewTrack) -> Result<Track> {
        let path = format!("/api/admin/songs/{}", segment(id.as_str()));
        self.client.send_json(Method::PUT, &path, track).await
    }

    /// Clear the rate-limit bucket of `identifier` (user or address).
    pub async fn reset_rate_limit(&self, identifier: &str) -> Result<()> {
        let path = format!("/api/admin/rate-limit/reset/{}", segment(identifier));
        self.client.send_empty(Method::POST, &path, None).await?;
        info!(identifier = %identifier, "Rate limit reset");
        Ok(())
    }
}
