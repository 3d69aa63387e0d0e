//! Shared playback handle
//!
//! Wraps the [`PlaybackController`] for use from many places at once: UI
//! commands, the media output's notification callback, background tasks.
//! Each command runs under one lock, then the resulting snapshot is
//! published on a `watch` channel and the drained events on a `broadcast`
//! channel.

use crate::controller::PlaybackController;
use crate::error::Result;
use crate::events::{MediaEvent, PlaybackEvent};
use crate::output::MediaOutput;
use crate::types::{PlaybackConfig, PlaybackSnapshot};
use melodia_core::Track;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{broadcast, watch};

/// Capacity of the event channel; slow subscribers see `Lagged`.
const EVENT_CAPACITY: usize = 256;

/// Cloneable handle to the one playback controller of the process.
#[derive(Clone)]
pub struct Player {
    controller: Arc<Mutex<PlaybackController>>,
    snapshots: Arc<watch::Sender<PlaybackSnapshot>>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl Player {
    pub fn new(config: PlaybackConfig, output: Box<dyn MediaOutput>) -> Self {
        Self::from_controller(PlaybackController::new(config, output))
    }

    pub fn from_controller(controller: PlaybackController) -> Self {
        let (snapshots, _) = watch::channel(controller.snapshot());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            controller: Arc::new(Mutex::new(controller)),
            snapshots: Arc::new(snapshots),
            events,
        }
    }

    /// Run `f` against the controller, then publish what changed.
    ///
    /// Commands issued inside one call are applied atomically with respect
    /// to media notifications. Publishing happens under the same lock, so
    /// snapshots and events leave in the order the commands ran.
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackController) -> R) -> R {
        let mut controller = self
            .controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let result = f(&mut *controller);

        let events = controller.drain_events();
        if !events.is_empty() {
            self.snapshots.send_replace(controller.snapshot());
            for event in events {
                // No subscribers is fine.
                let _ = self.events.send(event);
            }
        }

        result
    }

    pub fn play_track(&self, track: Track) {
        self.with(|c| c.play_track(track));
    }

    pub fn play_queue(&self, tracks: Vec<Track>, start: usize) -> Result<()> {
        self.with(|c| c.play_queue(tracks, start))
    }

    pub fn toggle_play_pause(&self) {
        self.with(PlaybackController::toggle_play_pause);
    }

    pub fn stop(&self) {
        self.with(PlaybackController::stop);
    }

    pub fn next_song(&self) {
        self.with(PlaybackController::next_song);
    }

    pub fn previous_song(&self) {
        self.with(PlaybackController::previous_song);
    }

    pub fn seek_to(&self, position: f64) {
        self.with(|c| c.seek_to(position));
    }

    pub fn set_volume(&self, volume: f32) {
        self.with(|c| c.set_volume(volume));
    }

    pub fn toggle_mute(&self) {
        self.with(PlaybackController::toggle_mute);
    }

    pub fn toggle_shuffle(&self) {
        self.with(PlaybackController::toggle_shuffle);
    }

    pub fn toggle_repeat(&self) {
        self.with(PlaybackController::toggle_repeat);
    }

    pub fn clear_queue(&self) {
        self.with(PlaybackController::clear_queue);
    }

    /// Feed a media output notification in.
    pub fn handle_media_event(&self, event: MediaEvent) {
        self.with(|c| c.handle_media_event(event));
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Queued tracks in play order
    pub fn queue(&self) -> Vec<Track> {
        self.with(|c| c.queue().into_iter().cloned().collect())
    }

    pub fn history(&self) -> Vec<Track> {
        self.with(|c| c.history().into_iter().cloned().collect())
    }

    /// Latest state, updated after every command that changed something.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshots.subscribe()
    }

    /// Every event, in emission order.
    pub fn events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }
}
