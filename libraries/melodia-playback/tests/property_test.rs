//! Property-based tests for the playback controller
//!
//! Uses proptest to verify invariants across many random inputs and
//! command sequences.

use melodia_core::Track;
use melodia_playback::{
    MediaEvent, NullOutput, PlaybackConfig, PlaybackController, TransportStatus,
};
use proptest::prelude::*;

// ===== Helpers =====

fn queue_of(len: usize) -> Vec<Track> {
    (1..=len as i64)
        .map(|i| Track::new(i, format!("Track {}", i), "Artist", format!("/files/{}.mp3", i)))
        .collect()
}

fn controller() -> PlaybackController {
    PlaybackController::new(PlaybackConfig::default(), Box::new(NullOutput))
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Previous,
    TogglePlayPause,
    ToggleShuffle,
    ToggleRepeat,
    Seek(f64),
    Volume(f32),
    ToggleMute,
    Ended,
    Loaded(f64),
    PlayIndex(usize),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Next),
        Just(Op::Previous),
        Just(Op::TogglePlayPause),
        Just(Op::ToggleShuffle),
        Just(Op::ToggleRepeat),
        (-100.0f64..1000.0).prop_map(Op::Seek),
        (-2.0f32..2.0).prop_map(Op::Volume),
        Just(Op::ToggleMute),
        Just(Op::Ended),
        (0.0f64..600.0).prop_map(Op::Loaded),
        (0usize..20).prop_map(Op::PlayIndex),
    ]
}

fn apply(controller: &mut PlaybackController, queue: &[Track], op: Op) {
    match op {
        Op::Next => controller.next_song(),
        Op::Previous => controller.previous_song(),
        Op::TogglePlayPause => controller.toggle_play_pause(),
        Op::ToggleShuffle => controller.toggle_shuffle(),
        Op::ToggleRepeat => controller.toggle_repeat(),
        Op::Seek(t) => controller.seek_to(t),
        Op::Volume(v) => controller.set_volume(v),
        Op::ToggleMute => controller.toggle_mute(),
        Op::Ended => {
            if let Some(ticket) = controller.current_ticket().cloned() {
                controller.handle_media_event(MediaEvent::Ended { ticket });
            }
        }
        Op::Loaded(duration) => {
            if let Some(ticket) = controller.current_ticket().cloned() {
                controller.handle_media_event(MediaEvent::Loaded { ticket, duration });
            }
        }
        Op::PlayIndex(i) => {
            if let Some(track) = queue.get(i % queue.len()) {
                controller.play_track(track.clone());
            }
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: any in-range volume reads back unchanged
    #[test]
    fn volume_in_range_round_trips(v in 0.0f32..=1.0) {
        let mut controller = controller();
        controller.set_volume(v);
        prop_assert_eq!(controller.volume(), v);
    }

    /// Property: volume always lands in [0, 1]
    #[test]
    fn volume_always_clamped(v in proptest::num::f32::ANY) {
        let mut controller = controller();
        controller.set_volume(v);
        let level = controller.volume();
        prop_assert!((0.0..=1.0).contains(&level));
    }

    /// Property: mute twice is an exact round trip
    #[test]
    fn mute_round_trip(v in 0.0f32..=1.0) {
        let mut controller = controller();
        controller.set_volume(v);
        controller.toggle_mute();
        controller.toggle_mute();
        prop_assert!(!controller.is_muted());
        prop_assert_eq!(controller.volume(), v);
    }

    /// Property: seek lands inside [0, duration]
    #[test]
    fn seek_within_duration(duration in 0.0f64..3600.0, target in -10_000.0f64..10_000.0) {
        let mut controller = controller();
        controller.play_track(queue_of(1).remove(0));
        let ticket = controller.current_ticket().cloned().unwrap();
        controller.handle_media_event(MediaEvent::Loaded { ticket, duration });

        controller.seek_to(target);

        prop_assert!(controller.elapsed() >= 0.0);
        prop_assert!(controller.elapsed() <= duration);
    }

    /// Property: command sequences never break the state invariants
    #[test]
    fn invariants_hold_under_random_commands(
        len in 1usize..12,
        start in 0usize..12,
        ops in prop::collection::vec(arbitrary_op(), 1..60)
    ) {
        let queue = queue_of(len);
        let mut controller = controller();
        controller.play_queue(queue.clone(), start % len).unwrap();

        for op in ops {
            apply(&mut controller, &queue, op);

            let snapshot = controller.snapshot();

            // Queue contents are never lost or duplicated by shuffle/repeat
            prop_assert_eq!(snapshot.queue_len, len);
            let mut ids: Vec<String> = controller.queue().iter().map(|t| t.id.to_string()).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);

            // Position is unset or valid
            if let Some(pos) = snapshot.queue_position {
                prop_assert!(pos < len);
            }

            // Elapsed stays inside the known duration
            prop_assert!(snapshot.elapsed >= 0.0);
            if snapshot.duration > 0.0 {
                prop_assert!(snapshot.elapsed <= snapshot.duration);
            }

            // Volume stays in range
            prop_assert!((0.0..=1.0).contains(&snapshot.volume));

            // No current track means nothing is playing
            if snapshot.current.is_none() {
                prop_assert_eq!(snapshot.status, TransportStatus::Stopped);
            }

            // History is bounded
            prop_assert!(controller.history().len() <= PlaybackConfig::default().history_size);
        }
    }

    /// Property: with shuffle on, next then previous returns to the same track
    #[test]
    fn shuffled_next_previous_is_stable(len in 2usize..30, start in 0usize..30) {
        let queue = queue_of(len);
        let mut controller = controller();
        controller.play_queue(queue, start % len).unwrap();
        controller.toggle_shuffle();

        let before = controller.current_track().map(|t| t.id.clone());
        controller.next_song();
        controller.previous_song();

        prop_assert_eq!(controller.current_track().map(|t| t.id.clone()), before);
    }
}
