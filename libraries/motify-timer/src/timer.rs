//! Countdown timer
//!
//! A one-second countdown driven either manually with [`CountdownTimer::tick`]
//! or by [`CountdownTimer::run`]. When the app leaves the screen the remaining
//! time is captured in a [`BackgroundSnapshot`] and reconciled against the
//! wall clock on return.

use chrono::{DateTime, Utc};
use motify_core::{KeyValueStore, Time};
use motify_storage::{keys, load, save};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The timer is not running
    Idle,
    /// One second was taken off; holds the new remaining time
    Counting(Time),
    /// The countdown had reached zero and was cancelled
    Finished,
}

/// Timer state saved when the app goes to the background
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSnapshot {
    /// Wall-clock time of backgrounding
    pub background_time: DateTime<Utc>,
    /// Seconds left at that moment
    pub remaining: f64,
}

impl BackgroundSnapshot {
    /// Seconds left at `now`, never negative
    pub fn remaining_at(&self, now: DateTime<Utc>) -> f64 {
        let elapsed = (now - self.background_time).num_milliseconds() as f64 / 1000.0;
        (self.remaining - elapsed.max(0.0)).max(0.0)
    }

    /// Persist under `background_time` / `remaining_time`
    pub async fn save(&self, store: &dyn KeyValueStore) -> motify_core::Result<()> {
        save(store, keys::BACKGROUND_TIME, &self.background_time).await?;
        save(store, keys::REMAINING_TIME, &self.remaining).await
    }

    /// Load and remove a persisted snapshot
    ///
    /// Returns `None` unless both keys hold readable values.
    pub async fn take(store: &dyn KeyValueStore) -> motify_core::Result<Option<Self>> {
        let background_time = load::<DateTime<Utc>>(store, keys::BACKGROUND_TIME).await;
        let remaining = load::<f64>(store, keys::REMAINING_TIME).await;

        store.remove(keys::BACKGROUND_TIME).await?;
        store.remove(keys::REMAINING_TIME).await?;

        match (background_time, remaining) {
            (Ok(Some(background_time)), Ok(Some(remaining))) => Ok(Some(Self {
                background_time,
                remaining,
            })),
            (Ok(None), Ok(None)) => Ok(None),
            _ => {
                warn!("Discarding incomplete background timer state");
                Ok(None)
            }
        }
    }
}

/// Countdown timer state
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    selected_time: Time,
    remaining_time: Time,
    is_running: bool,
    show_timer: bool,
    badge: u32,
    on_screen: bool,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountdownTimer {
    /// Create an idle, on-screen timer
    pub fn new() -> Self {
        Self {
            selected_time: Time::default(),
            remaining_time: Time::default(),
            is_running: false,
            show_timer: false,
            badge: 0,
            on_screen: true,
        }
    }

    /// Duration the next fresh start counts down from
    pub fn selected_time(&self) -> Time {
        self.selected_time
    }

    /// Set the duration for the next fresh start
    pub fn set_selected_time(&mut self, time: Time) {
        self.selected_time = time;
    }

    /// Time left on the current countdown
    pub fn remaining_time(&self) -> Time {
        self.remaining_time
    }

    /// True while ticking
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// True while a countdown is running or paused
    pub fn show_timer(&self) -> bool {
        self.show_timer
    }

    /// Pending completion badge count
    pub fn badge(&self) -> u32 {
        self.badge
    }

    /// Start or resume the countdown
    ///
    /// Does nothing when already running or when the selected time is zero.
    /// A paused countdown resumes from where it stopped. Returns whether the
    /// timer started.
    pub fn start(&mut self) -> bool {
        if self.is_running || self.selected_time.is_zero() {
            return false;
        }
        if !self.show_timer {
            self.remaining_time = self.selected_time;
        }
        self.is_running = true;
        self.show_timer = true;
        debug!(remaining = %self.remaining_time.formatted(), "Timer started");
        true
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> Tick {
        if !self.is_running {
            return Tick::Idle;
        }

        let t = &mut self.remaining_time;
        if t.seconds > 0 {
            t.seconds -= 1;
        } else if t.minutes > 0 {
            t.minutes -= 1;
            t.seconds = 59;
        } else if t.hours > 0 {
            t.hours -= 1;
            t.minutes = 59;
            t.seconds = 59;
        } else {
            if !self.on_screen {
                self.badge = 1;
            }
            self.cancel();
            info!(badge = self.badge, "Timer finished");
            return Tick::Finished;
        }

        trace!(remaining = %t.formatted(), "Tick");
        Tick::Counting(*t)
    }

    /// Stop ticking but keep the remaining time
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Stop and hide the countdown
    pub fn cancel(&mut self) {
        self.is_running = false;
        self.show_timer = false;
    }

    /// The timer view became visible
    pub fn appearing(&mut self) {
        self.on_screen = true;
        self.badge = 0;
    }

    /// The timer view went off screen
    pub fn disappearing(&mut self) {
        self.on_screen = false;
    }

    /// Capture the running countdown before the app is suspended
    pub fn enter_background(&self, now: DateTime<Utc>) -> Option<BackgroundSnapshot> {
        self.is_running.then(|| BackgroundSnapshot {
            background_time: now,
            remaining: self.remaining_time.time_interval() as f64,
        })
    }

    /// Reconcile with the time spent in the background
    ///
    /// Cancels the countdown when it ran out meanwhile.
    pub fn enter_foreground(&mut self, snapshot: &BackgroundSnapshot, now: DateTime<Utc>) {
        let remaining = snapshot.remaining_at(now);
        if remaining > 0.0 {
            self.remaining_time = Time::from_interval(remaining);
        } else {
            self.cancel();
        }
        debug!(remaining, "Timer reconciled after background");
    }

    /// Continue a countdown saved before the app was terminated
    ///
    /// Returns whether the timer restarted.
    pub fn resume_from_snapshot(&mut self, snapshot: &BackgroundSnapshot, now: DateTime<Utc>) -> bool {
        let remaining = snapshot.remaining_at(now);
        if remaining <= 0.0 {
            return false;
        }
        self.selected_time = Time::from_interval(remaining);
        self.start()
    }

    /// Tick once per second until the countdown finishes or stops running
    ///
    /// `on_tick` sees every tick outcome.
    pub async fn run<F>(&mut self, mut on_tick: F) -> Tick
    where
        F: FnMut(Tick),
    {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let tick = self.tick();
            on_tick(tick);
            if !matches!(tick, Tick::Counting(_)) {
                return tick;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn running(time: Time) -> CountdownTimer {
        let mut timer = CountdownTimer::new();
        timer.set_selected_time(time);
        assert!(timer.start());
        timer
    }

    #[test]
    fn start_requires_time() {
        let mut timer = CountdownTimer::new();
        assert!(!timer.start());
        assert!(!timer.is_running());
        assert_eq!(timer.tick(), Tick::Idle);
    }

    #[test]
    fn start_twice_is_ignored() {
        let mut timer = running(Time::new(0, 0, 5));
        timer.tick();
        assert!(!timer.start());
        assert_eq!(timer.remaining_time(), Time::new(0, 0, 4));
    }

    #[test]
    fn tick_borrows_across_units() {
        let mut timer = running(Time::new(1, 0, 0));
        assert_eq!(timer.tick(), Tick::Counting(Time::new(0, 59, 59)));

        let mut timer = running(Time::new(0, 2, 0));
        assert_eq!(timer.tick(), Tick::Counting(Time::new(0, 1, 59)));
    }

    #[test]
    fn finishes_on_tick_after_zero() {
        let mut timer = running(Time::new(0, 0, 1));
        assert_eq!(timer.tick(), Tick::Counting(Time::default()));
        assert!(timer.show_timer());

        assert_eq!(timer.tick(), Tick::Finished);
        assert!(!timer.is_running());
        assert!(!timer.show_timer());
        assert_eq!(timer.badge(), 0);
    }

    #[test]
    fn badge_raised_when_off_screen() {
        let mut timer = running(Time::new(0, 0, 1));
        timer.disappearing();
        timer.tick();
        assert_eq!(timer.tick(), Tick::Finished);
        assert_eq!(timer.badge(), 1);

        timer.appearing();
        assert_eq!(timer.badge(), 0);
    }

    #[test]
    fn pause_then_start_resumes() {
        let mut timer = running(Time::new(0, 1, 0));
        timer.tick();
        timer.pause();
        assert_eq!(timer.tick(), Tick::Idle);
        assert!(timer.show_timer());

        assert!(timer.start());
        assert_eq!(timer.remaining_time(), Time::new(0, 0, 59));

        timer.cancel();
        assert!(timer.start());
        assert_eq!(timer.remaining_time(), Time::new(0, 1, 0));
    }

    #[test]
    fn background_snapshot_only_while_running() {
        let now = Utc::now();
        assert!(CountdownTimer::new().enter_background(now).is_none());

        let timer = running(Time::new(0, 10, 0));
        let snapshot = timer.enter_background(now).unwrap();
        assert_eq!(snapshot.remaining, 600.0);
        assert_eq!(snapshot.background_time, now);
    }

    #[test]
    fn foreground_subtracts_elapsed_time() {
        let now = Utc::now();
        let mut timer = running(Time::new(0, 10, 0));
        let snapshot = timer.enter_background(now).unwrap();

        timer.enter_foreground(&snapshot, now + ChronoDuration::seconds(125));
        assert_eq!(timer.remaining_time(), Time::new(0, 7, 55));
        assert!(timer.is_running());

        timer.enter_foreground(&snapshot, now + ChronoDuration::seconds(601));
        assert!(!timer.is_running());
        assert!(!timer.show_timer());
    }

    #[test]
    fn resume_from_snapshot_restarts() {
        let now = Utc::now();
        let snapshot = BackgroundSnapshot {
            background_time: now - ChronoDuration::seconds(30),
            remaining: 90.0,
        };

        let mut timer = CountdownTimer::new();
        assert!(timer.resume_from_snapshot(&snapshot, now));
        assert_eq!(timer.remaining_time(), Time::new(0, 1, 0));

        let mut expired = CountdownTimer::new();
        assert!(!expired.resume_from_snapshot(&snapshot, now + ChronoDuration::minutes(5)));
        assert!(!expired.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn run_counts_down_to_finish() {
        let mut timer = running(Time::new(0, 0, 3));
        let mut ticks = Vec::new();

        let last = timer.run(|tick| ticks.push(tick)).await;

        assert_eq!(last, Tick::Finished);
        assert_eq!(
            ticks,
            vec![
                Tick::Counting(Time::new(0, 0, 2)),
                Tick::Counting(Time::new(0, 0, 1)),
                Tick::Counting(Time::new(0, 0, 0)),
                Tick::Finished,
            ]
        );
    }
}
