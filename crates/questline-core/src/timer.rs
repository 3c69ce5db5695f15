//! Time-box timer.
//!
//! Tracks elapsed focus time for the active micro-task session. Wall-clock
//! based with no internal thread: every operation takes an explicit `now`
//! from the injected clock, so elapsed time survives process restarts (the
//! session start instant is serialized) and tests never sleep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Pausable elapsed-time accumulator for one focus session.
///
/// Reset whenever a different micro-task becomes the active quest;
/// partial elapsed time never carries across tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusTimer {
    /// Elapsed milliseconds accumulated across completed run segments.
    #[serde(default)]
    accumulated_ms: u64,
    #[serde(default)]
    running: bool,
    /// Start of the current run segment; `Some` iff running.
    #[serde(default)]
    session_start: Option<DateTime<Utc>>,
}

impl FocusTimer {
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin (or resume) the session. No-op when already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.session_start = Some(now);
        Some(Event::TimerStarted { at: now })
    }

    /// Stop the clock, banking the current segment. No-op when not running.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.accumulated_ms += self.segment_ms(now);
        self.running = false;
        self.session_start = None;
        Some(Event::TimerPaused {
            elapsed_ms: self.accumulated_ms,
            at: now,
        })
    }

    /// Total elapsed milliseconds, including the live segment. No side effects.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        self.accumulated_ms + if self.running { self.segment_ms(now) } else { 0 }
    }

    /// Close out the session: implicit pause, then the elapsed duration
    /// rounded to the nearest whole minute with a floor of 1.
    ///
    /// The floor guarantees every completion contributes a positive amount
    /// to focus-minute totals and keeps the pacing ratio's division sound.
    pub fn finish(&mut self, now: DateTime<Utc>) -> u32 {
        self.pause(now);
        let minutes = ((self.accumulated_ms + 30_000) / 60_000) as u32;
        minutes.max(1)
    }

    /// Back to the initial state, discarding any partial elapsed time.
    pub fn reset(&mut self) {
        *self = FocusTimer::default();
    }

    fn segment_ms(&self, now: DateTime<Utc>) -> u64 {
        match self.session_start {
            Some(start) => (now - start).num_milliseconds().max(0) as u64,
            None => 0,
        }
    }
}
