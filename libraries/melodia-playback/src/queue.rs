//! Play queue
//!
//! The queue keeps tracks in insertion order and walks them through a
//! separate play order (a permutation of indices). Shuffle only replaces
//! the play order, so the track list and the current track's identity are
//! never disturbed.

use crate::shuffle::{natural_order, shuffled_order};
use melodia_core::{Track, TrackId};
use rand::Rng;

/// Ordered tracks plus a cursor into the play order.
///
/// Invariant: `cursor` is `None` or a valid index into `order`, and `order`
/// is always a permutation of `0..tracks.len()`.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    order: Vec<usize>,
    cursor: Option<usize>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all tracks. Play order resets to sequence order with no
    /// current position.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.order = natural_order(tracks.len());
        self.tracks = tracks;
        self.cursor = None;
    }

    /// Append a track to the end of both the sequence and the play order.
    ///
    /// Returns its sequence index.
    pub fn push(&mut self, track: Track) -> usize {
        let index = self.tracks.len();
        self.tracks.push(track);
        self.order.push(index);
        index
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.order.clear();
        self.cursor = None;
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Sequence index of the first track with `id`
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Make the track at sequence `index` current. Returns false if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        match self.order.iter().position(|&i| i == index) {
            Some(pos) => {
                self.cursor = Some(pos);
                true
            }
            None => false,
        }
    }

    /// Forget the current position (the next track is the first in play order).
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Sequence index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.cursor.and_then(|pos| self.order.get(pos).copied())
    }

    /// Position of the current track within the play order
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    /// Sequence index of the track after the current one in play order,
    /// or `None` at the end.
    pub fn next_index(&self) -> Option<usize> {
        let pos = match self.cursor {
            Some(pos) => pos + 1,
            None => 0,
        };
        self.order.get(pos).copied()
    }

    /// Sequence index of the first track in play order
    pub fn first_index(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Replace the play order with a random one that starts at the current
    /// track (if any).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let current = self.current_index();
        self.order = shuffled_order(self.tracks.len(), current, rng);
        self.cursor = current.map(|_| 0);
    }

    /// Restore sequence order, keeping the current track current.
    pub fn unshuffle(&mut self) {
        let current = self.current_index();
        self.order = natural_order(self.tracks.len());
        self.cursor = current;
    }

    /// Tracks in play order
    pub fn in_play_order(&self) -> Vec<&Track> {
        self.order.iter().filter_map(|&i| self.tracks.get(i)).collect()
    }

    /// Tracks in sequence order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_tracks(count: usize) -> Vec<Track> {
        (1..=count)
            .map(|i| Track::new(i as i64, format!("Track {}", i), "Artist", format!("/files/{}.mp3", i)))
            .collect()
    }

    fn ids(tracks: &[&Track]) -> Vec<String> {
        tracks.iter().map(|t| t.id.to_string()).collect()
    }

    #[test]
    fn walks_sequence_order() {
        let mut queue = Queue::new();
        queue.set_tracks(create_tracks(3));

        assert_eq!(queue.current_index(), None);
        assert_eq!(queue.next_index(), Some(0));

        assert!(queue.select(0));
        assert_eq!(queue.next_index(), Some(1));

        assert!(queue.select(2));
        assert_eq!(queue.next_index(), None);
        assert_eq!(queue.first_index(), Some(0));
    }

    #[test]
    fn select_out_of_range() {
        let mut queue = Queue::new();
        queue.set_tracks(create_tracks(2));
        assert!(!queue.select(5));
        assert_eq!(queue.position(), None);
    }

    #[test]
    fn push_appends_to_play_order() {
        let mut queue = Queue::new();
        queue.set_tracks(create_tracks(2));
        queue.select(1);

        let index = queue.push(Track::new(99, "New", "Artist", "/files/99.mp3"));

        assert_eq!(index, 2);
        assert_eq!(queue.next_index(), Some(2));
        assert_eq!(queue.index_of(&TrackId::new("99")), Some(2));
    }

    #[test]
    fn shuffle_keeps_current_first_and_tracks_intact() {
        let mut queue = Queue::new();
        queue.set_tracks(create_tracks(10));
        queue.select(4);

        queue.shuffle(&mut StdRng::seed_from_u64(9));

        assert_eq!(queue.current_index(), Some(4));
        assert_eq!(queue.position(), Some(0));
        assert_eq!(ids(&queue.tracks().iter().collect::<Vec<_>>())[4], "5");

        let mut played = ids(&queue.in_play_order());
        played.sort();
        let mut expected: Vec<String> = (1..=10).map(|i| i.to_string()).collect();
        expected.sort();
        assert_eq!(played, expected);
    }

    #[test]
    fn unshuffle_restores_sequence_at_current() {
        let mut queue = Queue::new();
        queue.set_tracks(create_tracks(5));
        queue.select(3);
        queue.shuffle(&mut StdRng::seed_from_u64(5));

        queue.unshuffle();

        assert_eq!(queue.current_index(), Some(3));
        assert_eq!(queue.position(), Some(3));
        assert_eq!(queue.next_index(), Some(4));
        assert_eq!(ids(&queue.in_play_order()), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut queue = Queue::new();
        queue.set_tracks(create_tracks(3));
        queue.select(1);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        assert_eq!(queue.next_index(), None);
    }
}
