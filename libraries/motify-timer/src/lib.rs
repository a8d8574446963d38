//! MotiFy activity timer
//!
//! Named countdown presets ([`ActivityBook`]) and the countdown itself
//! ([`CountdownTimer`]), including the background/foreground handoff.
//!
//! # Example
//!
//! ```rust
//! use motify_core::Time;
//! use motify_timer::{CountdownTimer, Tick};
//!
//! let mut timer = CountdownTimer::new();
//! timer.set_selected_time(Time::new(0, 1, 0));
//! assert!(timer.start());
//! assert_eq!(timer.tick(), Tick::Counting(Time::new(0, 0, 59)));
//! ```

mod activities;
mod error;
mod timer;

pub use activities::{ActivityBook, NEW_ACTIVITY_NAME};
pub use error::{Result, TimerError};
pub use timer::{BackgroundSnapshot, CountdownTimer, Tick};
