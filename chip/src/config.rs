//! Runtime configuration of the emulation.
use std::time::Duration;

use crate::{
    definitions::{cpu, timer},
    framebuffer::SpriteEdge,
};

/// Tunes the speed of the emulation and the drawing behaviour.
///
/// # Example
/// ```rust
/// # use chip::{Config, framebuffer::SpriteEdge};
/// let config = Config::default().with_cpu_hertz(1000).with_sprite_edge(SpriteEdge::Wrap);
/// assert_eq!(config.cycle_duration().as_millis(), 1);
/// assert_eq!(config.sprite_edge, SpriteEdge::Wrap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The amount of instructions run per second
    pub cpu_hertz: u64,
    /// The amount of timer ticks per second
    pub timer_hertz: u64,
    /// What happens to pixels drawn past the display edge
    pub sprite_edge: SpriteEdge,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cpu_hertz: cpu::HERTZ,
            timer_hertz: timer::HERTZ,
            sprite_edge: SpriteEdge::Clip,
        }
    }
}

impl Config {
    pub fn with_cpu_hertz(mut self, hertz: u64) -> Self {
        self.cpu_hertz = hertz;
        self
    }

    pub fn with_timer_hertz(mut self, hertz: u64) -> Self {
        self.timer_hertz = hertz;
        self
    }

    pub fn with_sprite_edge(mut self, edge: SpriteEdge) -> Self {
        self.sprite_edge = edge;
        self
    }

    /// The minimal duration of a single instruction cycle, zero hertz means unthrottled.
    pub fn cycle_duration(&self) -> Duration {
        interval(self.cpu_hertz)
    }

    /// The duration between two timer ticks.
    pub fn timer_interval(&self) -> Duration {
        interval(self.timer_hertz)
    }
}

fn interval(hertz: u64) -> Duration {
    if hertz == 0 {
        Duration::from_secs(0)
    } else {
        Duration::from_nanos(1_000_000_000 / hertz)
    }
}
