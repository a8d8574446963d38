//! Property-based tests for queue, history, favorites and the controller
//!
//! Uses proptest to verify invariants across many random inputs.

use motify_core::{MediaTime, QueueElement, RepeatOption, Track, TrackId};
use motify_playback::{
    Favorites, HeadlessEngine, History, PlaybackConfig, PlaybackController, Queue,
};
use proptest::prelude::*;
use std::collections::HashSet;
use url::Url;

// ===== Helpers =====

fn track(id: &str) -> Track {
    Track::new(
        TrackId::new(id),
        format!("Title {id}"),
        "Genre",
        Url::parse(&format!("https://cdn.test/{id}.mp3")).unwrap(),
        Url::parse(&format!("https://cdn.test/{id}.jpg")).unwrap(),
        "",
        MediaTime::from_seconds(120.0),
    )
}

fn arbitrary_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,3}", 1..20)
}

fn queue_of(ids: &[String]) -> Queue {
    Queue::from_elements(ids.iter().map(|id| QueueElement::new(track(id))).collect())
}

fn entry_ids(queue: &Queue) -> Vec<motify_core::QueueEntryId> {
    queue.elements().iter().map(|e| e.id).collect()
}

// ===== Property Tests =====

proptest! {
    /// Property: moving entries never loses or duplicates an entry
    #[test]
    fn move_preserves_entries(
        ids in arbitrary_ids(),
        from_seed in prop::collection::vec(any::<prop::sample::Index>(), 1..5),
        to_seed in any::<prop::sample::Index>(),
    ) {
        let mut queue = queue_of(&ids);
        let before: HashSet<_> = entry_ids(&queue).into_iter().collect();

        let from: Vec<usize> = from_seed.iter().map(|i| i.index(ids.len())).collect();
        let to = to_seed.index(ids.len() + 1);
        queue.move_offsets(&from, to).unwrap();

        let after = entry_ids(&queue);
        prop_assert_eq!(after.len(), ids.len());
        let after: HashSet<_> = after.into_iter().collect();
        prop_assert_eq!(before, after);
    }

    /// Property: moved entries keep their relative order
    #[test]
    fn move_keeps_relative_order(
        ids in arbitrary_ids(),
        from_seed in prop::collection::vec(any::<prop::sample::Index>(), 1..5),
        to_seed in any::<prop::sample::Index>(),
    ) {
        let mut queue = queue_of(&ids);
        let original = entry_ids(&queue);

        let mut from: Vec<usize> = from_seed.iter().map(|i| i.index(ids.len())).collect();
        let to = to_seed.index(ids.len() + 1);
        queue.move_offsets(&from, to).unwrap();

        from.sort_unstable();
        from.dedup();
        let moved: Vec<_> = from.iter().map(|&i| original[i]).collect();
        let after = entry_ids(&queue);
        let positions: Vec<_> = moved
            .iter()
            .map(|id| after.iter().position(|x| x == id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[1] == w[0] + 1));
    }

    /// Property: removal takes exactly the requested distinct positions
    #[test]
    fn remove_takes_requested_positions(
        ids in arbitrary_ids(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let mut queue = queue_of(&ids);
        let indices: Vec<usize> = picks.iter().map(|i| i.index(ids.len())).collect();
        let distinct: HashSet<_> = indices.iter().copied().collect();

        let removed = queue.remove_at(&indices).unwrap();

        prop_assert_eq!(removed.len(), distinct.len());
        prop_assert_eq!(queue.len(), ids.len() - distinct.len());
    }

    /// Property: history never exceeds its bound and pops newest first
    #[test]
    fn history_is_bounded(
        max_size in 0usize..20,
        pushes in prop::collection::vec("[a-z]{1,4}", 0..60),
    ) {
        let mut history = History::new(max_size);
        for id in &pushes {
            history.push(track(id));
            prop_assert!(history.len() <= max_size);
        }

        if max_size > 0 {
            if let Some(last) = pushes.last() {
                let popped = history.pop().unwrap();
                prop_assert_eq!(popped.id.as_str(), last.as_str());
            }
        }
    }

    /// Property: favorites never contain duplicates and set/unset round-trips
    #[test]
    fn favorites_round_trip(
        initial in prop::collection::vec("[a-z]{1,2}", 0..10),
        toggled in "[a-z]{1,2}",
    ) {
        let mut favorites = Favorites::from_ids(initial.iter().map(TrackId::new).collect());
        let unique: HashSet<_> = favorites.ids().iter().collect();
        prop_assert_eq!(unique.len(), favorites.len());

        let id = TrackId::new(toggled);
        if !favorites.contains(&id) {
            let before = favorites.clone();
            favorites.set(&id, true);
            prop_assert_eq!(favorites.position(&id), Some(0));
            favorites.set(&id, false);
            prop_assert_eq!(favorites, before);
        }
    }

    /// Property: three repeat-option steps return to the start
    #[test]
    fn repeat_cycle_has_length_three(steps in 0usize..10) {
        let mut option = RepeatOption::NoRepeat;
        for _ in 0..steps {
            option = option.next();
        }
        prop_assert_eq!(option.next().next().next(), option);
    }

    /// Property: play then pause always leaves the track current and paused
    #[test]
    fn play_then_pause(ids in arbitrary_ids(), pick in any::<prop::sample::Index>()) {
        let mut controller = PlaybackController::new(
            PlaybackConfig::default(),
            Box::new(HeadlessEngine::new()),
        );
        let chosen = track(&ids[pick.index(ids.len())]);

        controller.play(chosen.clone()).unwrap();
        controller.pause();

        prop_assert!(!controller.is_playing());
        prop_assert_eq!(controller.current_track_id(), Some(&chosen.id));
    }

    /// Property: next() drains the queue in order, then reports no next track
    #[test]
    fn next_drains_queue_in_order(ids in arbitrary_ids()) {
        let mut controller = PlaybackController::new(
            PlaybackConfig::default(),
            Box::new(HeadlessEngine::new()),
        );
        for id in &ids {
            controller.add_to_end(QueueElement::new(track(id)));
        }

        for id in &ids {
            controller.next().unwrap();
            prop_assert_eq!(controller.current_track_id().unwrap().as_str(), id.as_str());
        }
        prop_assert!(controller.next().is_err());
        prop_assert!(!controller.is_playing());
        prop_assert_eq!(controller.history().len(), ids.len() - 1);
    }
}
