//! Song catalogue operations.

use crate::client::{decode_json, query_value, segment, MusicClient};
use crate::error::{ClientError, Result};
use crate::types::UploadMetadata;
use melodia_core::{NewTrack, Track, TrackId};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Song client for the Melodia backend.
pub struct SongsClient<'a> {
    client: &'a MusicClient,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(client: &'a MusicClient) -> Self {
        Self { client }
    }

    /// All tracks.
    pub async fn list(&self) -> Result<Vec<Track>> {
        let tracks: Vec<Track> = self.client.get_json("/api/songs").await?;
        debug!(tracks = tracks.len(), "Fetched songs");
        Ok(tracks)
    }

    /// Tracks matching `query` (title, artist, album).
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let path = format!("/api/songs/search?q={}", query_value(query));
        let tracks: Vec<Track> = self.client.get_json(&path).await?;
        debug!(query = %query, results = tracks.len(), "Search complete");
        Ok(tracks)
    }

    /// Most recently added tracks.
    pub async fn recent(&self) -> Result<Vec<Track>> {
        self.client.get_json("/api/songs/recent").await
    }

    /// Most played tracks.
    pub async fn popular(&self) -> Result<Vec<Track>> {
        self.client.get_json("/api/songs/popular").await
    }

    /// Create track metadata without uploading media.
    pub async fn create(&self, track: &NewTrack) -> Result<Track> {
        let created: Track = self
            .client
            .send_json(Method::POST, "/api/songs", track)
            .await?;
        info!(track_id = %created.id, title = %created.title, "Track created");
        Ok(created)
    }

    /// Delete a track.
    pub async fn delete(&self, id: &TrackId) -> Result<()> {
        let path = format!("/api/songs/{}", segment(id.as_str()));
        self.client.send_empty(Method::DELETE, &path, None).await?;
        info!(track_id = %id, "Track deleted");
        Ok(())
    }

    /// Server-side favorite toggle (`PUT /api/songs/{id}/favorite`).
    ///
    /// Returns whatever the backend answers with.
    pub async fn toggle_favorite_flag(&self, id: &TrackId) -> Result<Value> {
        let path = format!("/api/songs/{}/favorite", segment(id.as_str()));
        let response = self.client.request(Method::PUT, &path, None).await?;
        decode_json(response, &path).await
    }

    /// Upload a media file from disk.
    pub async fn upload(&self, file_path: &Path, metadata: &UploadMetadata) -> Result<Track> {
        if !file_path.exists() {
            return Err(ClientError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("track")
            .to_string();

        let mut file = File::open(file_path).await?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;

        self.upload_bytes(&file_name, contents, metadata).await
    }

    /// Upload in-memory media as multipart form data (`file`, `title`, `artist`).
    ///
    /// The content type (with its boundary) is left to the multipart encoder.
    pub async fn upload_bytes(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        metadata: &UploadMetadata,
    ) -> Result<Track> {
        let size = contents.len();
        debug!(file = %file_name, size, "Uploading track");

        let file_part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(mime_type_for_file(Path::new(file_name)))?;

        let form = Form::new()
            .part("file", file_part)
            .text("title", metadata.title.clone())
            .text("artist", metadata.artist.clone());

        let builder = self
            .client
            .builder(Method::POST, "/api/songs/upload")
            .multipart(form);
        let response = self.client.send(builder).await?;
        let track: Track = decode_json(response, "/api/songs/upload").await?;

        info!(track_id = %track.id, file = %file_name, size, "Track uploaded");
        Ok(track)
    }
}

/// Get MIME type for an audio file.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("mp3") => "audio/mpeg",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("opus") => "audio/opus",
        Some("wav") => "audio/wav",
        Some("m4a" | "aac") => "audio/mp4",
        _ => "application/octet-stream",
    }
}
