//! Effect selection
//!
//! Maps a drawn effect id to a [`CollisionEffect`]. The only state is the
//! "double pending" flag, which bounds how deep double bricks can nest: a
//! double drawn while no double is pending may contain one more double, a
//! double drawn while one is pending never does. The flag is shared by every
//! brick built from one factory, so nesting alternates across the grid.

use rand::Rng;
use rand_pcg::Pcg32;

use super::effects::CollisionEffect;

pub const PUCK_KIND: u32 = 0;
pub const EXTRA_PADDLE_KIND: u32 = 1;
pub const CAMERA_KIND: u32 = 2;
pub const HEART_KIND: u32 = 3;
pub const DOUBLE_KIND: u32 = 4;

/// Draw range for the first half of an unrestricted double (may be double)
const DOUBLE_ALL_OPTIONS: u32 = 5;
/// Draw range covering only the four simple payload kinds
const SIMPLE_OPTIONS: u32 = 4;

/// Builds brick effects from drawn ids
#[derive(Debug, Clone)]
pub struct EffectFactory<R = Pcg32> {
    rng: R,
    double_pending: bool,
}

impl<R: Rng> EffectFactory<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            double_pending: false,
        }
    }

    /// Whether a double has been issued whose follow-up is still owed
    pub fn double_pending(&self) -> bool {
        self.double_pending
    }

    /// Build the effect for an id; ids outside the special range are basic
    pub fn build(&mut self, kind: u32) -> CollisionEffect {
        match kind {
            PUCK_KIND => CollisionEffect::PuckSpawn,
            EXTRA_PADDLE_KIND => CollisionEffect::ExtraPaddleSpawn,
            CAMERA_KIND => CollisionEffect::CameraFollow,
            HEART_KIND => CollisionEffect::HeartDrop,
            DOUBLE_KIND => self.build_double(),
            _ => CollisionEffect::Basic,
        }
    }

    /// Draw an id uniformly from `0..kinds` and build it
    pub fn build_random(&mut self, kinds: u32) -> CollisionEffect {
        let kind = self.rng.random_range(0..kinds.max(1));
        self.build(kind)
    }

    fn build_double(&mut self) -> CollisionEffect {
        if !self.double_pending {
            self.double_pending = true;
            let first = self.build_random(DOUBLE_ALL_OPTIONS);
            let second = self.build_random(SIMPLE_OPTIONS);
            return CollisionEffect::composite(first, second);
        }

        self.double_pending = false;
        let first = self.build_random(SIMPLE_OPTIONS);
        let second = self.build_random(SIMPLE_OPTIONS);
        CollisionEffect::composite(first, second)
    }
}
