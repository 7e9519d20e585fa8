//! Bricker - a Breakout-style arcade game
//!
//! Core modules:
//! - `sim`: Headless simulation (object registry, collisions, brick effects, session)
//! - `platform`: Input and dialog seams supplied by the host
//! - `audio`: Sound effect vocabulary and volume handling
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences and command-line grid size

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{GridSize, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    pub const WINDOW_TITLE: &str = "Bricker";

    /// Brick grid used when no (valid) arguments are given
    pub const DEFAULT_BRICKS_PER_ROW: u32 = 8;
    pub const DEFAULT_ROWS: u32 = 7;

    /// Round-end prompts
    pub const WIN_PROMPT: &str = "You win!";
    pub const LOSE_PROMPT: &str = "You lose!";
    pub const PLAY_AGAIN_PROMPT: &str = " Play again?";

    /// Asset paths (loading is the host's job)
    pub const BALL_IMAGE_PATH: &str = "assets/ball.png";
    pub const BALL_SOUND_PATH: &str = "assets/blop.wav";
    pub const PUCK_IMAGE_PATH: &str = "assets/mockBall.png";
    pub const PADDLE_IMAGE_PATH: &str = "assets/paddle.png";
    pub const BRICK_IMAGE_PATH: &str = "assets/brick.png";
    pub const HEART_IMAGE_PATH: &str = "assets/heart.png";
    pub const BACKGROUND_IMAGE_PATH: &str = "assets/DARK_BG2_small.jpeg";

    /// Settings file looked up next to the working directory
    pub const SETTINGS_FILE: &str = "bricker.json";
}

/// Center of a window of the given extent
#[inline]
pub fn window_center(window: Vec2) -> Vec2 {
    window * 0.5
}

/// Unit direction for an angle measured in screen space (y grows downward)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
