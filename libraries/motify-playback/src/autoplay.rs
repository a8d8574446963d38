//! Autoplay track selection
//!
//! Picks the track to inject when autoplay is on and the queue runs dry.

use motify_core::Track;
use rand::seq::SliceRandom;
use rand::Rng;

/// Choose the track that follows `playing`
///
/// - `playing` is in the catalog: its successor, wrapping after the last track
/// - `playing` is not in the catalog: a uniformly random catalog track
/// - empty catalog: `playing` itself when `self_loop` is set, otherwise nothing
pub fn pick_next<R: Rng + ?Sized>(
    catalog: &[Track],
    playing: &Track,
    rng: &mut R,
    self_loop: bool,
) -> Option<Track> {
    if let Some(index) = catalog.iter().position(|t| t.id == playing.id) {
        return Some(catalog[(index + 1) % catalog.len()].clone());
    }

    if let Some(track) = catalog.choose(rng) {
        tracing::debug!(
            playing = %playing.id,
            picked = %track.id,
            "Playing track not in catalog, picked random track"
        );
        return Some(track.clone());
    }

    if self_loop {
        tracing::warn!(
            track_id = %playing.id,
            "Catalog is empty, autoplay re-queues the playing track"
        );
        Some(playing.clone())
    } else {
        tracing::debug!(track_id = %playing.id, "Catalog is empty, nothing to autoplay");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motify_core::{MediaTime, TrackId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use url::Url;

    fn create_test_track(id: &str) -> Track {
        Track::new(
            TrackId::new(id),
            id.to_uppercase(),
            "Test Genre",
            Url::parse(&format!("https://cdn.test/{id}.mp3")).unwrap(),
            Url::parse(&format!("https://cdn.test/{id}.jpg")).unwrap(),
            "",
            MediaTime::from_seconds(120.0),
        )
    }

    fn catalog() -> Vec<Track> {
        vec![
            create_test_track("x"),
            create_test_track("y"),
            create_test_track("z"),
        ]
    }

    #[test]
    fn successor_in_catalog_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let next = pick_next(&catalog(), &create_test_track("y"), &mut rng, false).unwrap();
        assert_eq!(next.id.as_str(), "z");
    }

    #[test]
    fn successor_wraps_to_first() {
        let mut rng = StdRng::seed_from_u64(7);
        let next = pick_next(&catalog(), &create_test_track("z"), &mut rng, false).unwrap();
        assert_eq!(next.id.as_str(), "x");
    }

    #[test]
    fn unknown_track_picks_from_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let catalog = catalog();
        let next = pick_next(&catalog, &create_test_track("stranger"), &mut rng, false).unwrap();
        assert!(catalog.contains(&next));
    }

    #[test]
    fn empty_catalog_without_self_loop() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_next(&[], &create_test_track("a"), &mut rng, false).is_none());
    }

    #[test]
    fn empty_catalog_with_self_loop() {
        let mut rng = StdRng::seed_from_u64(7);
        let next = pick_next(&[], &create_test_track("a"), &mut rng, true).unwrap();
        assert_eq!(next.id.as_str(), "a");
    }
}
