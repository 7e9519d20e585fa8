//! Life display
//!
//! A row of hearts in the bottom-left corner plus a numeric counter whose
//! color warns when lives run low. Both live on the UI layer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::Layer;
use super::state::{Counter, GameEvent, GameObject, ObjectId, ObjectKind, World};

/// Horizontal pitch of the hearts, also their distance from the bottom edge
const SLOT_SPACING: f32 = 30.0;
/// Extent of the numeric counter
const COUNTER_SIZE: f32 = 20.0;

/// Numeric counter color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeColor {
    Green,
    Yellow,
    Red,
}

impl LifeColor {
    pub fn for_lives(lives: i32) -> Self {
        match lives {
            2 => LifeColor::Yellow,
            1 => LifeColor::Red,
            _ => LifeColor::Green,
        }
    }
}

/// Hearts and number showing the remaining lives
#[derive(Debug, Clone)]
pub struct LifeDisplay {
    /// One slot per possible life
    hearts: Vec<Option<ObjectId>>,
    text: ObjectId,
    max_lives: i32,
}

impl LifeDisplay {
    pub fn new(world: &mut World, lives: i32) -> Self {
        let max_lives = world.tuning.max_lives;
        let mut display = Self {
            hearts: vec![None; max_lives.max(0) as usize],
            text: ObjectId(0),
            max_lives,
        };

        for slot in 0..lives.clamp(0, max_lives) {
            display.place_heart(world, slot);
        }

        let window = world.window();
        let id = world.objects.next_id();
        let top_left = Vec2::new(
            (lives + 1) as f32 * SLOT_SPACING,
            window.y - SLOT_SPACING,
        );
        let text = GameObject::new(
            id,
            ObjectKind::LifeText {
                value: lives,
                color: LifeColor::for_lives(lives),
            },
            top_left + Vec2::splat(COUNTER_SIZE * 0.5),
            Vec2::splat(COUNTER_SIZE),
        );
        world.objects.add(text, Layer::Ui);
        display.text = id;
        display
    }

    /// Hearts currently on screen
    pub fn hearts_shown(&self) -> usize {
        self.hearts.iter().filter(|h| h.is_some()).count()
    }

    /// Drop the heart for a life just lost; `lives` is the count after the loss
    pub fn remove_heart(&mut self, world: &mut World, lives: i32) {
        if let Some(slot) = usize::try_from(lives).ok().and_then(|i| self.hearts.get_mut(i)) {
            if let Some(id) = slot.take() {
                world.objects.remove(id, Layer::Ui);
            }
        }
        self.refresh_text(world, lives);
        world.emit(GameEvent::LifeLost { lives });
    }

    /// Grant a life unless already at the maximum. Returns whether it did.
    pub fn add_life(&mut self, world: &mut World, lives: &mut Counter) -> bool {
        if lives.value() >= self.max_lives {
            return false;
        }
        self.place_heart(world, lives.value());
        lives.increment();
        self.refresh_text(world, lives.value());
        log::info!("Extra life, now {}", lives.value());
        world.emit(GameEvent::LifeGained {
            lives: lives.value(),
        });
        true
    }

    fn place_heart(&mut self, world: &mut World, slot: i32) {
        let Some(entry) = usize::try_from(slot).ok().and_then(|i| self.hearts.get_mut(i)) else {
            return;
        };
        let size = Vec2::splat(world.tuning.heart_size);
        let top_left = Vec2::new(slot as f32 * SLOT_SPACING, world.window().y - SLOT_SPACING);
        let id = world.objects.next_id();
        let heart = GameObject::new(id, ObjectKind::LifeHeart, top_left + size * 0.5, size);
        world.objects.add(heart, Layer::Ui);
        *entry = Some(id);
    }

    fn refresh_text(&self, world: &mut World, lives: i32) {
        if let Some(text) = world.objects.get_mut(self.text) {
            text.kind = ObjectKind::LifeText {
                value: lives,
                color: LifeColor::for_lives(lives),
            };
        }
    }
}
