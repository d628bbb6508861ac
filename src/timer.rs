// Copyright (C) 2025 Dayton Fishell
// Nexel-8 Fantasy Console Interpreter
// This file is part of Nexel-8.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version. See the LICENSE file in the project root for details.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Delay/sound counters and the 60 Hz tick source that drains them.
//!
//! The tick source reads time through [`Clock`] so that hosts get the
//! wall clock ([`SystemClock`]) while tests step time by hand
//! ([`ManualClock`]).

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// One timer period at 60 Hz
pub const TICK_INTERVAL: Duration = Duration::from_nanos(16_666_667);

pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle and give another to the interpreter.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward for this clock and every clone of it
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// 8-bit countdown counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    /// Count both timers down by one, stopping at zero
    pub fn decay(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Host should be beeping
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

/// Decides when a timer tick is due
pub struct TickSource {
    clock: Box<dyn Clock>,
    last_tick: Instant,
}

impl TickSource {
    /// Create a tick source starting from the clock's current time
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let last_tick = clock.now();
        Self { clock, last_tick }
    }

    /// True (at most once per call) when a full interval has passed since the
    /// last tick; the reference then moves to now.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        if now.saturating_duration_since(self.last_tick) >= TICK_INTERVAL {
            self.last_tick = now;
            true
        } else {
            false
        }
    }

    /// Take the current time as the new reference point
    pub fn restart(&mut self) {
        self.last_tick = self.clock.now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decay_floors_at_zero() {
        let mut t = Timers { delay: 1, sound: 0 };
        t.decay();
        assert_eq!(t, Timers { delay: 0, sound: 0 });
        t.decay();
        assert_eq!(t, Timers::default());
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let a = ManualClock::new();
        let b = a.clone();
        let start = b.now();
        a.advance(Duration::from_millis(5));
        assert_eq!(b.now() - start, Duration::from_millis(5));
    }

    #[test]
    fn tick_needs_full_interval() {
        let clock = ManualClock::new();
        let mut ticks = TickSource::new(Box::new(clock.clone()));
        assert!(!ticks.poll());
        clock.advance(Duration::from_millis(16));
        assert!(!ticks.poll());
        clock.advance(Duration::from_millis(1));
        assert!(ticks.poll());
        // reference moved, so no immediate second tick
        assert!(!ticks.poll());
    }

    #[test]
    fn long_gap_is_a_single_tick() {
        let clock = ManualClock::new();
        let mut ticks = TickSource::new(Box::new(clock.clone()));
        clock.advance(Duration::from_secs(1));
        assert!(ticks.poll());
        assert!(!ticks.poll());
    }

    #[test]
    fn sound_active_while_nonzero() {
        let mut t = Timers { delay: 0, sound: 1 };
        assert!(t.sound_active());
        t.decay();
        assert!(!t.sound_active());
    }
}
