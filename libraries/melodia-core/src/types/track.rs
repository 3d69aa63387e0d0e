/// Track domain type
use crate::types::{TrackId, UserId};
use serde::{Deserialize, Serialize};

/// A playable song as returned by the backend.
///
/// Tracks are immutable once fetched. Whoever fetched one owns it; there is
/// no shared cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Genre
    #[serde(default)]
    pub genre: Option<String>,

    /// Duration in seconds, when the uploader supplied one
    #[serde(default)]
    pub duration: Option<f64>,

    /// Media URL the player loads
    pub file_url: String,

    /// Cover artwork URL
    #[serde(default)]
    pub cover_image_url: Option<String>,

    /// Uploader identifier
    #[serde(default)]
    pub uploaded_by: Option<UserId>,

    /// Number of times the track has been played
    #[serde(default)]
    pub play_count: u64,

    /// Creation timestamp as sent by the backend (ISO-8601)
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Track {
    /// Create a track with only the fields playback needs.
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            genre: None,
            duration: None,
            file_url: file_url.into(),
            cover_image_url: None,
            uploaded_by: None,
            play_count: 0,
            created_at: None,
        }
    }
}

/// Metadata-only track creation body (`POST /api/songs`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrack {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Genre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Media URL
    pub file_url: String,

    /// Cover artwork URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl From<&Track> for NewTrack {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            genre: track.genre.clone(),
            duration: track.duration,
            file_url: track.file_url.clone(),
            cover_image_url: track.cover_image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_track() {
        let json = r#"{
            "id": "65a1",
            "title": "Night Drive",
            "artist": "Nova",
            "album": null,
            "genre": "Synthwave",
            "duration": 215,
            "fileUrl": "https://cdn.example.com/65a1.mp3",
            "coverImageUrl": "https://cdn.example.com/65a1.jpg",
            "uploadedBy": 3,
            "playCount": 17,
            "createdAt": "2024-05-01T10:00:00"
        }"#;

        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.id.as_str(), "65a1");
        assert_eq!(track.album, None);
        assert_eq!(track.genre.as_deref(), Some("Synthwave"));
        assert_eq!(track.duration, Some(215.0));
        assert_eq!(track.uploaded_by, Some(UserId::new("3")));
        assert_eq!(track.play_count, 17);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"id": 1, "title": "T", "artist": "A", "fileUrl": "/t.mp3"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.cover_image_url, None);
        assert_eq!(track.uploaded_by, None);
        assert_eq!(track.play_count, 0);
    }

    #[test]
    fn new_track_omits_absent_metadata() {
        let body = NewTrack {
            title: "T".into(),
            artist: "A".into(),
            file_url: "/t.mp3".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"title": "T", "artist": "A", "fileUrl": "/t.mp3"})
        );
    }
}
