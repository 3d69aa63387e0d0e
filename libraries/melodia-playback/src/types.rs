//! Core types for playback management

use melodia_core::Track;
use serde::{Deserialize, Serialize};

/// Transport status of the media output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportStatus {
    /// Nothing is playing (no track, ended, or failed)
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

impl RepeatMode {
    /// Next mode in the toggle cycle: off → all → one → off.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Maximum history size (default: 50)
    pub history_size: usize,

    /// Initial volume (0.0-1.0, default: 0.8)
    pub volume: f32,

    /// Initial shuffle state (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: 50,
            volume: 0.8,
            shuffle: false,
            repeat: RepeatMode::Off,
        }
    }
}

/// Point-in-time view of the playback state, published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    pub current: Option<Track>,
    pub status: TransportStatus,
    /// Seconds, as last reported by the media output
    pub elapsed: f64,
    /// Seconds; 0 until the media output reports it
    pub duration: f64,
    pub volume: f32,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// A media load is pending
    pub loading: bool,
    /// Last media error, cleared by the next load
    pub error: Option<String>,
    pub queue_len: usize,
    /// Index of the current track in the queue's play order
    pub queue_position: Option<usize>,
}

impl PlaybackSnapshot {
    pub fn is_playing(&self) -> bool {
        self.status == TransportStatus::Playing
    }

    /// Nothing audible: stopped, paused, muted or at zero volume.
    pub fn is_silent(&self) -> bool {
        self.status != TransportStatus::Playing || self.muted || self.volume == 0.0
    }
}
