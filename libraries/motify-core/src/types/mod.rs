mod activity;
mod ids;
mod media_time;
mod queue_element;
mod quote;
mod repeat;
mod track;

pub use activity::{Activity, Time};
pub use ids::{QueueEntryId, TrackId};
pub use media_time::{ClockFormat, MediaTime, TIMESCALE};
pub use queue_element::QueueElement;
pub use quote::{next_local_midnight, Quote, QuoteHolder};
pub use repeat::RepeatOption;
pub use track::{RemoteTrackRecord, Track};
