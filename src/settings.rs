//! Game settings and preferences
//!
//! Read from an optional JSON file next to the binary. Anything missing or
//! unreadable falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BRICKS_PER_ROW, DEFAULT_ROWS};
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === Session ===
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Let the built-in autopilot drive the paddles
    pub autopilot: bool,

    /// Gameplay balance
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            seed: None,
            autopilot: true,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Malformed settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Brick grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub bricks_per_row: u32,
    pub rows: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            bricks_per_row: DEFAULT_BRICKS_PER_ROW,
            rows: DEFAULT_ROWS,
        }
    }
}

impl GridSize {
    pub fn new(bricks_per_row: u32, rows: u32) -> Self {
        Self {
            bricks_per_row,
            rows,
        }
    }

    /// Total number of bricks in the grid, if it fits the brick counter
    pub fn checked_brick_count(&self) -> Option<i32> {
        self.bricks_per_row
            .checked_mul(self.rows)
            .and_then(|n| i32::try_from(n).ok())
    }

    /// Total number of bricks in the grid (saturating)
    pub fn brick_count(&self) -> i32 {
        self.checked_brick_count().unwrap_or(i32::MAX)
    }

    /// Parse `<bricks-per-row> <rows>` from process arguments (program name
    /// already stripped). Anything other than exactly two positive integers
    /// whose product fits the brick counter yields the default grid.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let [per_row, rows] = args.as_slice() else {
            return Self::default();
        };

        match (parse_positive(per_row.as_ref()), parse_positive(rows.as_ref())) {
            (Some(per_row), Some(rows)) => {
                let grid = Self::new(per_row, rows);
                if grid.checked_brick_count().is_some() {
                    grid
                } else {
                    log::warn!("Grid {}x{} is too large, using defaults", per_row, rows);
                    Self::default()
                }
            }
            _ => Self::default(),
        }
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
