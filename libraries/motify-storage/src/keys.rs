//! Persisted key names
//!
//! One place for every key the application reads or writes.

/// Ordered list of favorite track ids (most recent first)
pub const FAVORITES: &str = "favorites";

/// Current repeat option
pub const REPEAT_OPTION: &str = "repeat_option";

/// Autoplay toggle
pub const AUTOPLAY: &str = "autoplay";

/// Id of the track loaded in the player
pub const TRACK_PLAYING_ID: &str = "track_playing_id";

/// Cached track catalog
pub const TRACKS: &str = "tracks";

/// Last fetched quote of the day
pub const QUOTE: &str = "quote";

/// Timer activities
pub const ACTIVITIES: &str = "activities";

/// Selected timer activity
pub const SELECTED_ACTIVITY_ID: &str = "selected_activity_id";

/// Moment the running timer was sent to the background
pub const BACKGROUND_TIME: &str = "background_time";

/// Seconds left on the timer when it was sent to the background
pub const REMAINING_TIME: &str = "remaining_time";
