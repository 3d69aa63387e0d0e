//! Platform-agnostic media output trait
//!
//! Abstracts the thing that actually makes sound (an HTML audio element, a
//! native player, a test double).

use crate::error::MediaError;
use melodia_core::{Track, TrackId};
use serde::{Deserialize, Serialize};

/// Identifies one media load.
///
/// Every load gets a fresh generation, so completions of a load that was
/// superseded (the user skipped before it finished) can be told apart even
/// when the same track is loaded twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket {
    pub track_id: TrackId,
    pub generation: u64,
}

/// Host media output driven by the playback controller.
///
/// Implementors report progress back through
/// [`MediaEvent`](crate::MediaEvent)s tagged with the ticket given to
/// [`load`](Self::load). Errors returned here are recorded in the playback
/// state, never propagated to the caller of a playback command.
pub trait MediaOutput: Send {
    /// Start loading `track.file_url`; playback starts on [`play`](Self::play).
    fn load(&mut self, ticket: &LoadTicket, track: &Track) -> Result<(), MediaError>;

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self) -> Result<(), MediaError>;

    /// Seek to `position` seconds from the start
    fn seek(&mut self, position: f64) -> Result<(), MediaError>;

    /// Stop and release the current media
    fn stop(&mut self) -> Result<(), MediaError>;

    /// Linear volume in [0.0, 1.0]
    fn set_volume(&mut self, volume: f32) -> Result<(), MediaError>;

    fn set_muted(&mut self, muted: bool) -> Result<(), MediaError>;
}

/// Output that accepts every command and produces nothing.
///
/// For headless hosts that only need queue and state management.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl MediaOutput for NullOutput {
    fn load(&mut self, _ticket: &LoadTicket, _track: &Track) -> Result<(), MediaError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn pause(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn seek(&mut self, _position: f64) -> Result<(), MediaError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), MediaError> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<(), MediaError> {
        Ok(())
    }

    fn set_muted(&mut self, _muted: bool) -> Result<(), MediaError> {
        Ok(())
    }
}
