//! Per-user favorites.

use crate::client::{segment, MusicClient};
use crate::error::Result;
use crate::types::FavoriteCheck;
use melodia_core::{Favorite, Track, TrackId};
use reqwest::Method;
use tracing::{debug, info};

/// Favorites client for the Melodia backend.
pub struct FavoritesClient<'a> {
    client: &'a MusicClient,
}

impl<'a> FavoritesClient<'a> {
    pub(crate) fn new(client: &'a MusicClient) -> Self {
        Self { client }
    }

    /// Tracks the current user has marked.
    pub async fn list(&self) -> Result<Vec<Track>> {
        self.client.get_json("/api/user/songs/favorites").await
    }

    /// Mark a track.
    pub async fn add(&self, id: &TrackId) -> Result<()> {
        let body = serde_json::to_value(Favorite::for_track(id.clone()))
            .map_err(|e| crate::ClientError::ParseError(e.to_string()))?;
        self.client
            .send_empty(Method::POST, "/api/favorites", Some(body))
            .await?;
        info!(track_id = %id, "Favorite added");
        Ok(())
    }

    /// Unmark a track.
    pub async fn remove(&self, id: &TrackId) -> Result<()> {
        let path = format!("/api/favorites/{}", segment(id.as_str()));
        self.client.send_empty(Method::DELETE, &path, None).await?;
        info!(track_id = %id, "Favorite removed");
        Ok(())
    }

    /// Whether the current user has marked `id`.
    ///
    /// Any failed check reads as "not a favorite".
    pub async fn is_favorite(&self, id: &TrackId) -> bool {
        let path = format!("/api/favorites/{}/check", segment(id.as_str()));
        match self.client.get_json::<FavoriteCheck>(&path).await {
            Ok(check) => check.is_favorite,
            Err(e) => {
                debug!(track_id = %id, error = %e, "Favorite check failed");
                false
            }
        }
    }

    /// Flip the favorite state of `id` and return the new state.
    ///
    /// Check-then-act: two concurrent toggles for the same user race and
    /// the last one wins.
    pub async fn toggle_favorite(&self, id: &TrackId) -> Result<bool> {
        if self.is_favorite(id).await {
            self.remove(id).await?;
            Ok(false)
        } else {
            self.add(id).await?;
            Ok(true)
        }
    }
}
