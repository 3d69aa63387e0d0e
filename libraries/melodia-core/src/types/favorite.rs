/// Favorite relation
use crate::types::{TrackId, UserId};
use serde::{Deserialize, Serialize};

/// A user-to-track marking. Existence is the only information it carries.
///
/// When sent to `POST /api/favorites` the user is implied by the bearer
/// token, so only `songId` goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Owning user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    /// Marked track
    pub song_id: TrackId,
}

impl Favorite {
    /// Favorite of the authenticated user for `song_id`
    pub fn for_track(song_id: TrackId) -> Self {
        Self {
            user_id: None,
            song_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_only_carries_song_id() {
        let body = serde_json::to_value(Favorite::for_track(TrackId::from(42))).unwrap();
        assert_eq!(body, serde_json::json!({"songId": "42"}));
    }
}
