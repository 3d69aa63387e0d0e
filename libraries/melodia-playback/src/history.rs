//! Bounded record of played tracks, consumed by "previous".

use melodia_core::Track;
use std::collections::VecDeque;

/// Tracks that were playing when playback moved on, newest at the back.
///
/// A capacity of 0 disables recording.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Track>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `track` as played, evicting the oldest entries past capacity.
    pub fn record(&mut self, track: Track) {
        if self.capacity == 0 {
            return;
        }
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(track);
    }

    /// Remove and return the most recently played track.
    pub fn take_last(&mut self) -> Option<Track> {
        self.entries.pop_back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, format!("Track {id}"), "Artist", format!("/files/{id}.mp3"))
    }

    fn ids(history: &History) -> Vec<&str> {
        history.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn take_last_walks_backwards() {
        let mut history = History::new(10);
        for id in ["a", "b", "c"] {
            history.record(track(id));
        }

        assert_eq!(history.take_last().map(|t| t.id), Some("c".into()));
        assert_eq!(history.take_last().map(|t| t.id), Some("b".into()));
        assert_eq!(ids(&history), vec!["a"]);
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut history = History::new(3);
        for id in ["1", "2", "3", "4", "5"] {
            history.record(track(id));
        }

        assert_eq!(ids(&history), vec!["3", "4", "5"]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = History::new(0);
        history.record(track("1"));

        assert!(history.take_last().is_none());
    }

    #[test]
    fn clear_empties() {
        let mut history = History::new(5);
        history.record(track("1"));
        history.clear();

        assert_eq!(history.iter().count(), 0);
    }
}
