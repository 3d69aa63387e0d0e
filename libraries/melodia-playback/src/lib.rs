//! Melodia - Playback Management
//!
//! Platform-agnostic "now playing" state machine for Melodia.
//!
//! This crate provides:
//! - Play queue with a separate shuffled play order
//! - Playback history (configurable size)
//! - Repeat modes (Off, All, One)
//! - Volume control (0.0-1.0, mute/unmute)
//! - Seek clamped to the reported duration
//! - Load tickets that discard stale media completions
//!
//! # Architecture
//!
//! `melodia-playback` decodes nothing. The host provides a [`MediaOutput`]
//! (an audio element, a native player) and feeds its notifications back in
//! as [`MediaEvent`]s. [`Player`] is the shared handle the rest of an
//! application holds; it publishes a [`PlaybackSnapshot`] after every
//! command.
//!
//! # Example
//!
//! ```rust
//! use melodia_core::Track;
//! use melodia_playback::{MediaEvent, NullOutput, PlaybackConfig, Player, TransportStatus};
//!
//! let player = Player::new(PlaybackConfig::default(), Box::new(NullOutput));
//!
//! let tracks = vec![
//!     Track::new(1, "Intro", "Artist", "/files/1.mp3"),
//!     Track::new(2, "Outro", "Artist", "/files/2.mp3"),
//! ];
//! player.play_queue(tracks, 0).unwrap();
//!
//! // The output reports the duration for the load it was asked to do
//! let ticket = player.with(|c| c.current_ticket().cloned()).unwrap();
//! player.handle_media_event(MediaEvent::Loaded { ticket, duration: 200.0 });
//!
//! player.seek_to(500.0);
//! let snapshot = player.snapshot();
//! assert_eq!(snapshot.elapsed, 200.0);
//! assert_eq!(snapshot.status, TransportStatus::Playing);
//! ```

mod controller;
mod error;
mod events;
mod history;
mod output;
mod player;
mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{MediaError, PlaybackError, Result};
pub use events::{MediaEvent, PlaybackEvent};
pub use output::{LoadTicket, MediaOutput, NullOutput};
pub use player::Player;
pub use types::{PlaybackConfig, PlaybackSnapshot, RepeatMode, TransportStatus};
pub use volume::clamp_level;
