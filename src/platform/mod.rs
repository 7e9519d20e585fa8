//! Platform abstraction layer
//!
//! The host supplies:
//! - Held-key polling for paddle control
//! - The blocking yes/no prompt shown when a round ends

pub mod autopilot;

pub use autopilot::Autopilot;

use std::collections::BTreeSet;

/// Keys the game polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Left,
    Right,
    /// Debug shortcut that ends the round as a win
    Win,
}

/// "Is this key currently held"
pub trait InputSource {
    fn is_key_held(&self, key: Key) -> bool;
}

/// A fixed set of held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys(BTreeSet<Key>);

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.0.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.0.remove(&key);
    }

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }
}

impl InputSource for HeldKeys {
    fn is_key_held(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}

/// Blocking end-of-round question
pub trait RoundDialog {
    /// Show `prompt` and wait for the answer; true means play again
    fn ask_play_again(&mut self, prompt: &str) -> bool;
}

/// Horizontal direction requested by the held keys (-1, 0 or 1)
pub fn horizontal_axis(input: &impl InputSource) -> f32 {
    let mut axis = 0.0;
    if input.is_key_held(Key::Left) {
        axis -= 1.0;
    }
    if input.is_key_held(Key::Right) {
        axis += 1.0;
    }
    axis
}
