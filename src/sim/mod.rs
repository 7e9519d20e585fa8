//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by object ID)
//! - No rendering or platform dependencies beyond the input traits

pub mod collision;
pub mod effects;
pub mod factory;
pub mod hud;
pub mod rect;
pub mod registry;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, bounce, rect_collision};
pub use effects::{CollisionEffect, remove_brick};
pub use factory::EffectFactory;
pub use hud::{LifeColor, LifeDisplay};
pub use rect::Rect;
pub use registry::{Layer, ObjectRegistry};
pub use session::{Flow, GameSession};
pub use state::{
    Camera, Counter, GameEvent, GameObject, ObjectId, ObjectKind, PaddlePopulation, Tag, World,
};
pub use tick::tick;
