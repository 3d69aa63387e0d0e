//! Playback Events
//!
//! Two directions:
//! - [`PlaybackEvent`]: emitted by the controller for UI synchronization
//! - [`MediaEvent`]: reported by the media output back into the controller

use crate::output::LoadTicket;
use crate::types::{RepeatMode, TransportStatus};
use melodia_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Transport status changed (playing, paused, stopped)
    StateChanged {
        status: TransportStatus,
    },

    /// A different track became current
    TrackChanged {
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
    },

    /// Track finished playing naturally (reached end)
    TrackFinished {
        track_id: TrackId,
    },

    /// Elapsed time moved (media report or seek)
    PositionUpdate {
        elapsed: f64,
        duration: f64,
    },

    /// Volume or mute changed
    VolumeChanged {
        volume: f32,
        muted: bool,
    },

    /// Queue contents changed
    QueueChanged {
        length: usize,
    },

    ShuffleChanged {
        enabled: bool,
    },

    RepeatChanged {
        mode: RepeatMode,
    },

    /// The media output failed
    Error {
        message: String,
    },
}

/// Notifications from the media output.
///
/// Each carries the ticket of the load it belongs to; the controller drops
/// any whose ticket is not the current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Metadata is available
    Loaded { ticket: LoadTicket, duration: f64 },

    /// Playback position advanced
    TimeUpdate { ticket: LoadTicket, position: f64 },

    /// Reached the end of the media
    Ended { ticket: LoadTicket },

    /// Loading or playback failed
    Failed { ticket: LoadTicket, message: String },
}

impl MediaEvent {
    pub fn ticket(&self) -> &LoadTicket {
        match self {
            MediaEvent::Loaded { ticket, .. }
            | MediaEvent::TimeUpdate { ticket, .. }
            | MediaEvent::Ended { ticket }
            | MediaEvent::Failed { ticket, .. } => ticket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_wire_shape() {
        let event = PlaybackEvent::TrackChanged {
            track_id: TrackId::new("2"),
            previous_track_id: Some(TrackId::new("1")),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "trackChanged");
        assert_eq!(json["track_id"], "2");
    }

    #[test]
    fn ticket_accessor() {
        let ticket = LoadTicket {
            track_id: TrackId::new("7"),
            generation: 3,
        };
        let event = MediaEvent::Failed {
            ticket: ticket.clone(),
            message: "404".into(),
        };
        assert_eq!(event.ticket(), &ticket);
    }
}
