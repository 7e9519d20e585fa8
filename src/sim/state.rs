//! Game objects and shared world state
//!
//! Everything an effect or collision handler may touch lives in [`World`]:
//! the object registry, the shared counters, the camera slot and the RNG.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::CollisionEffect;
use super::hud::LifeColor;
use super::rect::Rect;
use super::registry::ObjectRegistry;
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Stable object handle, unique for the lifetime of a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Identity tag used for collision filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Background,
    Wall,
    Brick,
    Ball,
    Puck,
    Paddle,
    ExtraPaddle,
    FallingHeart,
    Ui,
}

/// What an object is, plus any per-kind state
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Background,
    Wall,
    /// Destructible brick bound to one effect
    Brick { effect: CollisionEffect },
    /// The primary ball
    Ball { collisions: u32 },
    /// Secondary ball spawned by a puck brick
    Puck { collisions: u32 },
    /// The primary paddle; `life_pending` is raised when it catches a heart
    Paddle { life_pending: bool },
    /// Temporary paddle that expires after enough hits
    ExtraPaddle { hits: u32 },
    FallingHeart,
    /// One heart of the life display
    LifeHeart,
    /// Numeric part of the life display
    LifeText { value: i32, color: LifeColor },
}

impl ObjectKind {
    pub fn tag(&self) -> Tag {
        match self {
            ObjectKind::Background => Tag::Background,
            ObjectKind::Wall => Tag::Wall,
            ObjectKind::Brick { .. } => Tag::Brick,
            ObjectKind::Ball { .. } => Tag::Ball,
            ObjectKind::Puck { .. } => Tag::Puck,
            ObjectKind::Paddle { .. } => Tag::Paddle,
            ObjectKind::ExtraPaddle { .. } => Tag::ExtraPaddle,
            ObjectKind::FallingHeart => Tag::FallingHeart,
            ObjectKind::LifeHeart | ObjectKind::LifeText { .. } => Tag::Ui,
        }
    }

    /// Image the host draws for this kind (walls and text have none)
    pub fn sprite(&self) -> Option<&'static str> {
        match self {
            ObjectKind::Background => Some(BACKGROUND_IMAGE_PATH),
            ObjectKind::Brick { .. } => Some(BRICK_IMAGE_PATH),
            ObjectKind::Ball { .. } => Some(BALL_IMAGE_PATH),
            ObjectKind::Puck { .. } => Some(PUCK_IMAGE_PATH),
            ObjectKind::Paddle { .. } | ObjectKind::ExtraPaddle { .. } => Some(PADDLE_IMAGE_PATH),
            ObjectKind::FallingHeart | ObjectKind::LifeHeart => Some(HEART_IMAGE_PATH),
            ObjectKind::Wall | ObjectKind::LifeText { .. } => None,
        }
    }
}

/// A game object
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub rect: Rect,
    pub vel: Vec2,
}

impl GameObject {
    pub fn new(id: ObjectId, kind: ObjectKind, center: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            rect: Rect::new(center, size),
            vel: Vec2::ZERO,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.kind.tag()
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    /// Collision count for ball-like objects
    pub fn collisions(&self) -> Option<u32> {
        match self.kind {
            ObjectKind::Ball { collisions } | ObjectKind::Puck { collisions } => Some(collisions),
            _ => None,
        }
    }

    /// Whether this object accepts a collision with `other`
    pub fn should_collide_with(&self, other: &GameObject) -> bool {
        match self.kind {
            ObjectKind::FallingHeart => other.tag() == Tag::Paddle,
            ObjectKind::Background | ObjectKind::LifeHeart | ObjectKind::LifeText { .. } => false,
            _ => true,
        }
    }
}

/// Shared integer counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    value: i32,
}

impl Counter {
    pub fn new(value: i32) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn decrement(&mut self) {
        self.value -= 1;
    }

    pub fn reset(&mut self, value: i32) {
        self.value = value;
    }
}

/// Live extra paddles against their cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddlePopulation {
    alive: u32,
    cap: u32,
}

impl PaddlePopulation {
    pub fn new(cap: u32) -> Self {
        Self { alive: 0, cap }
    }

    #[inline]
    pub fn alive(&self) -> u32 {
        self.alive
    }

    /// Claim a slot. Returns false at the cap.
    pub fn try_acquire(&mut self) -> bool {
        if self.alive >= self.cap {
            return false;
        }
        self.alive += 1;
        true
    }

    pub fn release(&mut self) {
        self.alive = self.alive.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.alive = 0;
    }
}

/// Viewport transform tracking one object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Object the viewport follows
    pub target: ObjectId,
    /// Offset from the target's center
    pub offset: Vec2,
    /// World-space extent shown
    pub frame: Vec2,
    /// Screen extent the frame is mapped onto
    pub window: Vec2,
}

/// Something that happened during a frame, for the host to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RoundStarted { bricks: i32 },
    BrickDestroyed { brick: ObjectId, remaining: i32 },
    PucksSpawned { at: Vec2, count: u32 },
    PuckLost { puck: ObjectId },
    ExtraPaddleSpawned { paddle: ObjectId },
    ExtraPaddleExpired { paddle: ObjectId },
    CameraActivated { target: ObjectId },
    CameraDeactivated,
    HeartSpawned { heart: ObjectId, at: Vec2 },
    HeartCaught { heart: ObjectId },
    HeartLost { heart: ObjectId },
    LifeGained { lives: i32 },
    LifeLost { lives: i32 },
    RoundEnded { won: bool },
    Sound(SoundEffect),
}

/// Order-independent key for a pair of objects
pub(crate) fn pair_key(a: ObjectId, b: ObjectId) -> (ObjectId, ObjectId) {
    if a < b { (a, b) } else { (b, a) }
}

/// Shared state reachable from effects and collision handlers
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub objects: ObjectRegistry,
    /// Bricks still standing
    pub bricks_left: Counter,
    pub extra_paddles: PaddlePopulation,
    /// Active camera, if any
    pub camera: Option<Camera>,
    pub rng: Pcg32,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    /// Pairs overlapping at the end of the previous tick
    pub(crate) contacts: BTreeSet<(ObjectId, ObjectId)>,
}

impl World {
    pub fn new(tuning: Tuning, bricks: i32, seed: u64) -> Self {
        let cap = tuning.max_extra_paddles;
        Self {
            tuning,
            objects: ObjectRegistry::new(),
            bricks_left: Counter::new(bricks),
            extra_paddles: PaddlePopulation::new(cap),
            camera: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            contacts: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn window(&self) -> Vec2 {
        self.tuning.window
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Treat a pair as already overlapping, so its current overlap is not a
    /// fresh contact on the next tick
    pub(crate) fn mark_touching(&mut self, a: ObjectId, b: ObjectId) {
        self.contacts.insert(pair_key(a, b));
    }

    /// Forget every object and transient state, keeping counters
    pub fn clear_objects(&mut self) {
        self.objects.clear();
        self.contacts.clear();
        self.camera = None;
    }
}
