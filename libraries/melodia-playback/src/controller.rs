//! Playback controller - core orchestration
//!
//! Owns the "now playing" state and coordinates queue, history, volume,
//! shuffle and repeat. Every command is best-effort: failures of the media
//! output are recorded in the state and never returned to the caller.
//!
//! Elapsed time is driven only by [`MediaEvent::TimeUpdate`]; the
//! controller runs no timers of its own.

use crate::{
    error::{MediaError, PlaybackError, Result},
    events::{MediaEvent, PlaybackEvent},
    history::History,
    output::{LoadTicket, MediaOutput},
    queue::Queue,
    types::{PlaybackConfig, PlaybackSnapshot, RepeatMode, TransportStatus},
    volume::Volume,
};
use melodia_core::Track;
use rand::thread_rng;
use tracing::{debug, info, warn};

/// Playback controller
///
/// Single owner of the playback state:
/// - Current track, transport status, elapsed time and duration
/// - Play queue with a separate (possibly shuffled) play order
/// - Bounded play history for "previous"
/// - Volume, mute, shuffle and repeat
///
/// Media loads are tagged with a [`LoadTicket`]; completions for any ticket
/// other than the latest are ignored.
pub struct PlaybackController {
    // State
    status: TransportStatus,
    current: Option<Track>,
    elapsed: f64,
    duration: f64,
    loading: bool,
    error: Option<String>,

    // Queue and history
    queue: Queue,
    history: History,

    // Settings
    volume: Volume,
    shuffle: bool,
    repeat: RepeatMode,

    // Media output and the load it is working on
    output: Box<dyn MediaOutput>,
    ticket: Option<LoadTicket>,
    generation: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a controller driving `output`.
    pub fn new(config: PlaybackConfig, output: Box<dyn MediaOutput>) -> Self {
        let mut controller = Self {
            status: TransportStatus::Stopped,
            current: None,
            elapsed: 0.0,
            duration: 0.0,
            loading: false,
            error: None,
            queue: Queue::new(),
            history: History::new(config.history_size),
            volume: Volume::new(config.volume),
            shuffle: config.shuffle,
            repeat: config.repeat,
            output,
            ticket: None,
            generation: 0,
            pending_events: Vec::new(),
        };

        let level = controller.volume.level();
        controller.command("set_volume", |o| o.set_volume(level));
        controller
    }

    // ===== Playback Control =====

    /// Play `track` from the start.
    ///
    /// If the track is in the queue the queue position moves to it,
    /// otherwise it is appended first. The previous track goes to history.
    pub fn play_track(&mut self, track: Track) {
        let index = match self.queue.index_of(&track.id) {
            Some(index) => index,
            None => {
                let index = self.queue.push(track.clone());
                self.emit_queue_changed();
                index
            }
        };
        self.queue.select(index);

        info!(track_id = %track.id, title = %track.title, "Playing track");
        self.load(track, true);
    }

    /// Replace the queue with `tracks` and start playing at `start`.
    ///
    /// History is cleared so "previous" starts fresh within the new queue.
    pub fn play_queue(&mut self, tracks: Vec<Track>, start: usize) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        let track = tracks
            .get(start)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(start))?;

        self.queue.set_tracks(tracks);
        self.queue.select(start);
        if self.shuffle {
            self.queue.shuffle(&mut thread_rng());
        }
        self.history.clear();
        self.emit_queue_changed();

        info!(tracks = self.queue.len(), start, shuffle = self.shuffle, "Queue replaced");
        self.load(track, false);
        Ok(())
    }

    /// Playing ↔ paused.
    ///
    /// With no current track this does nothing. A current track that is
    /// stopped (failed, or restored after an error) is reloaded.
    pub fn toggle_play_pause(&mut self) {
        let Some(current) = self.current.clone() else {
            return;
        };

        match self.status {
            TransportStatus::Playing => {
                self.command("pause", |o| o.pause());
                self.set_status(TransportStatus::Paused);
            }
            TransportStatus::Paused => {
                self.command("play", |o| o.play());
                self.set_status(TransportStatus::Playing);
            }
            TransportStatus::Stopped => {
                debug!(track_id = %current.id, "Reloading stopped track");
                self.load(current, false);
            }
        }
    }

    /// Stop playback
    ///
    /// Clears the current track (but not the queue).
    pub fn stop(&mut self) {
        self.command("stop", |o| o.stop());
        self.current = None;
        self.ticket = None;
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.loading = false;
        self.set_status(TransportStatus::Stopped);
    }

    /// Skip to next track in play order.
    ///
    /// At the end of the queue: repeat=all wraps to the first track,
    /// repeat=one replays the current track, repeat=off stops and clears
    /// the current track.
    pub fn next_song(&mut self) {
        if self.current.is_none() && self.queue.is_empty() {
            return;
        }

        if let Some(index) = self.queue.next_index() {
            self.advance_to(index);
            return;
        }

        match self.repeat {
            RepeatMode::All => match self.queue.first_index() {
                Some(index) => self.advance_to(index),
                None => self.finish(),
            },
            RepeatMode::One if self.current.is_some() => self.restart_current(),
            RepeatMode::One | RepeatMode::Off => self.finish(),
        }
    }

    /// Go back to the most recently played track.
    ///
    /// With an empty history the current track restarts from 0.
    pub fn previous_song(&mut self) {
        match self.history.take_last() {
            Some(track) => {
                if let Some(index) = self.queue.index_of(&track.id) {
                    self.queue.select(index);
                }
                self.load(track, false);
            }
            None if self.current.is_some() => self.restart_current(),
            None => {}
        }
    }

    // ===== Seek =====

    /// Seek to `position` seconds, clamped into [0, duration].
    ///
    /// Transport status is unchanged.
    pub fn seek_to(&mut self, position: f64) {
        if self.current.is_none() {
            return;
        }

        let target = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, self.duration)
        };

        self.elapsed = target;
        self.command("seek", |o| o.seek(target));
        self.emit_position();
    }

    // ===== Volume =====

    /// Set volume, clamped into [0.0, 1.0]. Mute is untouched.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        let level = self.volume.level();
        self.command("set_volume", |o| o.set_volume(level));
        self.emit_volume_changed();
    }

    /// Toggle mute state. Volume is untouched.
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        let muted = self.volume.is_muted();
        self.command("set_muted", |o| o.set_muted(muted));
        self.emit_volume_changed();
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle.
    ///
    /// Enabling builds a random play order starting at the current track;
    /// disabling restores sequence order at the current track.
    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
        if self.shuffle {
            self.queue.shuffle(&mut thread_rng());
        } else {
            self.queue.unshuffle();
        }

        debug!(enabled = self.shuffle, "Shuffle toggled");
        self.pending_events.push(PlaybackEvent::ShuffleChanged {
            enabled: self.shuffle,
        });
    }

    /// Cycle repeat: off → all → one → off.
    pub fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.cycle();

        debug!(mode = ?self.repeat, "Repeat toggled");
        self.pending_events
            .push(PlaybackEvent::RepeatChanged { mode: self.repeat });
    }

    // ===== Queue Management =====

    /// Remove every queued track. The current track keeps playing.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// Queued tracks in play order
    pub fn queue(&self) -> Vec<&Track> {
        self.queue.in_play_order()
    }

    /// Played tracks, oldest first
    pub fn history(&self) -> Vec<&Track> {
        self.history.iter().collect()
    }

    // ===== Media Notifications =====

    /// Apply a notification from the media output.
    ///
    /// Notifications for any load but the latest are dropped.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if self.ticket.as_ref() != Some(event.ticket()) {
            debug!(
                track_id = %event.ticket().track_id,
                generation = event.ticket().generation,
                "Ignoring stale media event"
            );
            return;
        }

        match event {
            MediaEvent::Loaded { duration, .. } => {
                self.duration = seconds(duration);
                self.elapsed = self.elapsed.min(self.duration);
                self.loading = false;
                self.emit_position();
            }
            MediaEvent::TimeUpdate { position, .. } => {
                let position = seconds(position);
                self.elapsed = if self.duration > 0.0 {
                    position.min(self.duration)
                } else {
                    position
                };
                self.emit_position();
            }
            MediaEvent::Ended { ticket } => {
                self.pending_events.push(PlaybackEvent::TrackFinished {
                    track_id: ticket.track_id,
                });
                if self.repeat == RepeatMode::One {
                    self.restart_current();
                } else {
                    self.next_song();
                }
            }
            MediaEvent::Failed { message, .. } => {
                warn!(message = %message, "Media playback failed");
                self.fail(message);
            }
        }
    }

    // ===== State Queries =====

    pub fn status(&self) -> TransportStatus {
        self.status
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    /// Seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Seconds; 0 until the media output reports it
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Ticket of the load media notifications must carry to be applied
    pub fn current_ticket(&self) -> Option<&LoadTicket> {
        self.ticket.as_ref()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            current: self.current.clone(),
            status: self.status,
            elapsed: self.elapsed,
            duration: self.duration,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
            shuffle: self.shuffle,
            repeat: self.repeat,
            loading: self.loading,
            error: self.error.clone(),
            queue_len: self.queue.len(),
            queue_position: self.queue.position(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Make `track` current and start loading it under a fresh ticket.
    fn load(&mut self, track: Track, remember_previous: bool) {
        self.command("stop", |o| o.stop());

        let previous = self.current.take();
        let previous_track_id = previous.as_ref().map(|t| t.id.clone());
        if remember_previous {
            if let Some(previous) = previous {
                self.history.record(previous);
            }
        }

        self.generation += 1;
        let ticket = LoadTicket {
            track_id: track.id.clone(),
            generation: self.generation,
        };
        debug!(track_id = %ticket.track_id, generation = ticket.generation, url = %track.file_url, "Loading media");

        let result = match self.output.load(&ticket, &track) {
            Ok(()) => self.output.play(),
            Err(e) => Err(e),
        };

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });

        self.current = Some(track);
        self.ticket = Some(ticket);
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.loading = true;
        self.error = None;
        self.set_status(TransportStatus::Playing);

        if let Err(e) = result {
            warn!(error = %e, "Media load failed");
            self.fail(e.to_string());
        }
    }

    fn advance_to(&mut self, index: usize) {
        let Some(track) = self.queue.get(index).cloned() else {
            return;
        };
        self.queue.select(index);
        self.load(track, true);
    }

    /// Replay the current track from 0 without touching history.
    fn restart_current(&mut self) {
        if self.status == TransportStatus::Stopped {
            if let Some(track) = self.current.clone() {
                self.load(track, false);
            }
            return;
        }

        self.elapsed = 0.0;
        self.command("seek", |o| o.seek(0.0));
        self.command("play", |o| o.play());
        self.set_status(TransportStatus::Playing);
        self.emit_position();
    }

    /// End of queue with nothing to wrap to.
    fn finish(&mut self) {
        self.command("stop", |o| o.stop());
        if let Some(track) = self.current.take() {
            self.history.record(track);
        }
        self.queue.reset_cursor();
        self.ticket = None;
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.loading = false;

        info!("Reached end of queue");
        self.set_status(TransportStatus::Stopped);
    }

    /// The current load failed: keep the track, stop, remember why.
    fn fail(&mut self, message: String) {
        self.ticket = None;
        self.loading = false;
        self.error = Some(message.clone());
        self.pending_events.push(PlaybackEvent::Error { message });
        self.set_status(TransportStatus::Stopped);
    }

    /// Run a media output command; failures are recorded, not returned.
    fn command<F>(&mut self, name: &str, f: F)
    where
        F: FnOnce(&mut dyn MediaOutput) -> std::result::Result<(), MediaError>,
    {
        if let Err(e) = f(self.output.as_mut()) {
            warn!(command = name, error = %e, "Media output command failed");
            let message = e.to_string();
            self.error = Some(message.clone());
            self.pending_events.push(PlaybackEvent::Error { message });
        }
    }

    fn set_status(&mut self, status: TransportStatus) {
        let changed = self.status != status;
        self.status = status;
        if changed {
            self.pending_events
                .push(PlaybackEvent::StateChanged { status });
        }
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            elapsed: self.elapsed,
            duration: self.duration,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }
}

/// Media-reported seconds: anything non-finite or negative reads as 0.
fn seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
