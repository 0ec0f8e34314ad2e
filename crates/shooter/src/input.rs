//! Keyboard state polled once per tick

use bitflags::bitflags;
use std::collections::VecDeque;

bitflags! {
    /// Keys held down this tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        /// Move left
        const LEFT = 1 << 0;
        /// Move right
        const RIGHT = 1 << 1;
        /// Move up
        const UP = 1 << 2;
        /// Move down
        const DOWN = 1 << 3;
        /// Fire
        const FIRE = 1 << 4;
        /// Restart the game
        const RESET = 1 << 5;
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::empty()
    }
}

impl Keys {
    /// Horizontal direction, left winning over right
    pub fn horizontal(self) -> f32 {
        if self.contains(Self::LEFT) {
            -1.0
        } else if self.contains(Self::RIGHT) {
            1.0
        } else {
            0.0
        }
    }

    /// Vertical direction, down winning over up
    pub fn vertical(self) -> f32 {
        if self.contains(Self::DOWN) {
            -1.0
        } else if self.contains(Self::UP) {
            1.0
        } else {
            0.0
        }
    }
}

/// Source of key state, read once per tick
pub trait InputSource {
    /// Keys held right now
    fn poll(&mut self) -> Keys;
}

/// Replays a fixed sequence of key states, then holds the idle state
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Keys>,
    idle: Keys,
}

impl ScriptedInput {
    /// No keys ever pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `keys` for `ticks` ticks (builder pattern)
    #[must_use]
    pub fn hold(mut self, keys: Keys, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat(keys).take(ticks));
        self
    }

    /// Keys reported once the script runs out (builder pattern)
    #[must_use]
    pub fn then_idle(mut self, keys: Keys) -> Self {
        self.idle = keys;
        self
    }

    /// Ticks left in the script
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Keys {
        self.frames.pop_front().unwrap_or(self.idle)
    }
}
