use std::time::{Duration, Instant};

pub trait Timed {
    /// Will create a new timer with the given value.
    fn new(value: u8) -> Self;

    /// Will set the value from which the timer shall count down from.
    fn set_value(&mut self, value: u8);

    /// Will get the value that the counter is currently at.
    fn get_value(&self) -> u8;
}

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number given.
/// The counting itself is driven from the outside
/// by calling [`tick`](Timer::tick) at 60Hz.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timed for Timer {
    fn new(value: u8) -> Self {
        Self { value }
    }

    fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    fn get_value(&self) -> u8 {
        self.value
    }
}

impl Timer {
    /// Counts the timer down by one, returns true if this tick moved the timer
    /// from `1` to `0`.
    pub fn tick(&mut self) -> bool {
        match self.value {
            0 => false,
            value => {
                self.value = value - 1;
                self.value == 0
            }
        }
    }
}

/// Keeps track of when the next fixed rate tick is due.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    interval: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            last: start,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Checks if a full interval elapsed since the last tick, if so
    /// the tick is consumed.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}
