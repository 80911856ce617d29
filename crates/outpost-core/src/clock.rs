//! Simulation clock and game-time tracking.
//!
//! The clock is the single source of truth for all temporal state. It
//! counts raw engine ticks; 60 ticks make one simulated minute, and the
//! minute counter in turn derives the hour, the day and the displayed
//! game time. Minute and hour boundaries are reported to the caller as
//! distinct events, always in chronological order (a tick that crosses an
//! hour boundary reports the minute first, then the hour).
//!
//! The clock carries a reference-counted pause: each outstanding decision
//! request holds one pause reference, and ticks are swallowed while any
//! reference is held. A transport failure releases its reference like a
//! success does, so the clock can never stay paused past the last
//! outstanding request.

use tracing::warn;

/// Engine ticks per simulated minute.
pub const TICKS_PER_MINUTE: u32 = 60;

/// Simulated minutes per hour.
const MINUTES_PER_HOUR: u64 = 60;

/// Simulated minutes per day.
const MINUTES_PER_DAY: u64 = 1440;

/// Boundaries crossed by a single tick, in chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvents {
    /// A simulated minute elapsed on this tick.
    pub minute_elapsed: bool,
    /// A simulated hour elapsed on this tick (implies a minute did too).
    pub hour_elapsed: bool,
}

/// The simulation clock.
///
/// Advances once per engine tick via [`GameClock::advance`]; everything
/// else is derived from the tick and minute counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    /// Ticks accrued toward the next minute boundary.
    subminute_ticks: u32,
    /// Total simulated minutes elapsed since the world started.
    minutes: u64,
    /// Outstanding pause references; ticks are swallowed while nonzero.
    pause_refs: u32,
}

impl GameClock {
    /// Create a clock at Day 1, 00:00.
    pub const fn new() -> Self {
        Self {
            subminute_ticks: 0,
            minutes: 0,
            pause_refs: 0,
        }
    }

    /// Create a clock at an arbitrary minute count (state restoration and
    /// tests).
    pub const fn at_minutes(minutes: u64) -> Self {
        Self {
            subminute_ticks: 0,
            minutes,
            pause_refs: 0,
        }
    }

    /// Advance by one engine tick, reporting any boundaries crossed.
    ///
    /// Returns no events while the clock is paused.
    pub fn advance(&mut self) -> TickEvents {
        if self.is_paused() {
            return TickEvents::default();
        }
        self.subminute_ticks = self.subminute_ticks.saturating_add(1);
        if self.subminute_ticks < TICKS_PER_MINUTE {
            return TickEvents::default();
        }
        self.subminute_ticks = 0;
        self.minutes = self.minutes.saturating_add(1);
        TickEvents {
            minute_elapsed: true,
            hour_elapsed: self
                .minutes
                .checked_rem(MINUTES_PER_HOUR)
                .is_some_and(|rem| rem == 0),
        }
    }

    /// Acquire one pause reference.
    pub fn pause(&mut self) {
        self.pause_refs = self.pause_refs.saturating_add(1);
    }

    /// Release one pause reference.
    ///
    /// An unbalanced release is a caller bug; it is logged and ignored so
    /// the clock cannot be wedged by double-release.
    pub fn resume(&mut self) {
        if self.pause_refs == 0 {
            warn!("clock resume without a matching pause");
            return;
        }
        self.pause_refs = self.pause_refs.saturating_sub(1);
    }

    /// Whether any pause reference is outstanding.
    pub const fn is_paused(&self) -> bool {
        self.pause_refs > 0
    }

    /// Total simulated minutes elapsed.
    pub const fn total_minutes(&self) -> u64 {
        self.minutes
    }

    /// The current day, starting at 1.
    ///
    /// Divisors are nonzero constants; the fallbacks never trigger.
    pub fn day(&self) -> u64 {
        self.minutes
            .checked_div(MINUTES_PER_DAY)
            .unwrap_or(0)
            .saturating_add(1)
    }

    /// The hour of day, 0-23.
    pub fn hour(&self) -> u64 {
        self.minutes
            .checked_rem(MINUTES_PER_DAY)
            .and_then(|of_day| of_day.checked_div(MINUTES_PER_HOUR))
            .unwrap_or(0)
    }

    /// The minute of the hour, 0-59.
    pub fn minute(&self) -> u64 {
        self.minutes.checked_rem(MINUTES_PER_HOUR).unwrap_or(0)
    }

    /// The displayed game time, e.g. `Day 2 07:30`.
    pub fn game_time(&self) -> String {
        format!("Day {} {:02}:{:02}", self.day(), self.hour(), self.minute())
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}
