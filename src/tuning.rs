//! Data-driven game balance
//!
//! Every numeric knob the simulation reads lives here so a settings file can
//! override it. Defaults reproduce the stock game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield / window extent in pixels
    pub window: Vec2,

    // === Ball ===
    /// Speed along each axis when the ball is served
    pub ball_speed: f32,
    /// Ball diameter
    pub ball_size: f32,

    // === Pucks ===
    /// Puck diameter relative to the ball
    pub puck_relative_size: f32,
    /// Pucks spawned per puck brick
    pub puck_count: u32,

    // === Paddles ===
    pub paddle_speed: f32,
    pub paddle_size: Vec2,
    /// Gap between the paddle center and the bottom edge
    pub paddle_bottom_gap: f32,
    /// Non-wall collisions an extra paddle survives
    pub extra_paddle_max_hits: u32,
    /// Extra paddles alive at once
    pub max_extra_paddles: u32,

    // === Playfield ===
    pub wall_width: f32,
    pub brick_height: f32,
    /// Row spacing is `window.y / brick_spacing_divisor`
    pub brick_spacing_divisor: f32,
    /// Size of the range effect ids are drawn from
    pub effect_kinds: u32,

    // === Hearts ===
    pub heart_size: f32,
    pub heart_fall_speed: f32,

    // === Camera ===
    /// Camera frame relative to the window
    pub camera_zoom: f32,
    /// Ball collisions after which the camera lets go
    pub camera_reset_collisions: u32,

    // === Lives ===
    pub initial_lives: i32,
    pub max_lives: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window: Vec2::new(700.0, 500.0),

            ball_speed: 200.0,
            ball_size: 20.0,

            puck_relative_size: 0.75,
            puck_count: 2,

            paddle_speed: 300.0,
            paddle_size: Vec2::new(100.0, 15.0),
            paddle_bottom_gap: 30.0,
            extra_paddle_max_hits: 4,
            max_extra_paddles: 1,

            wall_width: 10.0,
            brick_height: 15.0,
            brick_spacing_divisor: 100.0,
            effect_kinds: 10,

            heart_size: 20.0,
            heart_fall_speed: 100.0,

            camera_zoom: 1.2,
            camera_reset_collisions: 4,

            initial_lives: 3,
            max_lives: 4,
        }
    }
}

impl Tuning {
    /// Puck diameter derived from the ball size
    pub fn puck_size(&self) -> f32 {
        self.puck_relative_size * self.ball_size
    }

    /// Vertical gap between brick rows
    pub fn brick_spacing(&self) -> f32 {
        self.window.y / self.brick_spacing_divisor
    }

    /// Camera frame extent
    pub fn camera_frame(&self) -> Vec2 {
        self.window * self.camera_zoom
    }
}
