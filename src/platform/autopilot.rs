//! Demo autopilot
//!
//! Steers the paddle for headless runs: chase the most dangerous ball, or go
//! fetch a falling heart while nothing is threatening.

use glam::Vec2;

use super::{HeldKeys, Key};
use crate::sim::state::{ObjectId, Tag, World};

/// Seconds of ball motion to lead the target by
const LEAD_TIME: f32 = 0.1;

/// Picks held keys from the current world state
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Horizontal slack before the paddle reacts
    pub dead_zone: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { dead_zone: 8.0 }
    }
}

impl Autopilot {
    pub fn keys_for(&self, world: &World, paddle: ObjectId) -> HeldKeys {
        let mut keys = HeldKeys::new();
        let Some(paddle) = world.objects.get(paddle) else {
            return keys;
        };
        let Some(target) = self.target_x(world) else {
            return keys;
        };

        let dx = target - paddle.center().x;
        if dx < -self.dead_zone {
            keys.press(Key::Left);
        } else if dx > self.dead_zone {
            keys.press(Key::Right);
        }
        keys
    }

    fn target_x(&self, world: &World) -> Option<f32> {
        let half_height = world.window().y * 0.5;

        // Lowest ball that is still falling
        let threat = world
            .objects
            .iter()
            .map(|(_, o)| o)
            .filter(|o| matches!(o.tag(), Tag::Ball | Tag::Puck) && o.vel.y > 0.0)
            .max_by(|a, b| a.center().y.total_cmp(&b.center().y));

        let all_safe = threat.is_none_or(|ball| ball.center().y < half_height);
        if all_safe {
            let heart = world
                .objects
                .with_tag(Tag::FallingHeart)
                .max_by(|a, b| a.center().y.total_cmp(&b.center().y));
            if let Some(heart) = heart {
                return Some(heart.center().x);
            }
        }

        threat.map(|ball| lead(ball.center(), ball.vel).x)
    }
}

fn lead(pos: Vec2, vel: Vec2) -> Vec2 {
    pos + vel * LEAD_TIME
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::InputSource;
    use crate::sim::registry::Layer;
    use crate::sim::state::{GameObject, ObjectKind};
    use crate::tuning::Tuning;

    fn world_with_paddle() -> (World, ObjectId) {
        let mut world = World::new(Tuning::default(), 0, 3);
        let id = world.objects.next_id();
        let paddle = GameObject::new(
            id,
            ObjectKind::Paddle { life_pending: false },
            Vec2::new(350.0, 470.0),
            Vec2::new(100.0, 15.0),
        );
        world.objects.add(paddle, Layer::Default);
        (world, id)
    }

    #[test]
    fn test_chases_falling_ball() {
        let (mut world, paddle) = world_with_paddle();
        let id = world.objects.next_id();
        let ball = GameObject::new(id, ObjectKind::Ball { collisions: 0 }, Vec2::new(100.0, 400.0), Vec2::splat(20.0))
            .with_velocity(Vec2::new(-200.0, 200.0));
        world.objects.add(ball, Layer::Default);

        let keys = Autopilot::default().keys_for(&world, paddle);
        assert!(keys.is_key_held(Key::Left));
        assert!(!keys.is_key_held(Key::Right));
    }

    #[test]
    fn test_fetches_heart_when_safe() {
        let (mut world, paddle) = world_with_paddle();
        let id = world.objects.next_id();
        let ball = GameObject::new(id, ObjectKind::Ball { collisions: 0 }, Vec2::new(100.0, 100.0), Vec2::splat(20.0))
            .with_velocity(Vec2::new(-200.0, -200.0));
        world.objects.add(ball, Layer::Default);
        let id = world.objects.next_id();
        let heart = GameObject::new(id, ObjectKind::FallingHeart, Vec2::new(600.0, 200.0), Vec2::splat(20.0))
            .with_velocity(Vec2::new(0.0, 100.0));
        world.objects.add(heart, Layer::Default);

        let keys = Autopilot::default().keys_for(&world, paddle);
        assert!(keys.is_key_held(Key::Right));
    }

    #[test]
    fn test_idle_without_targets() {
        let (world, paddle) = world_with_paddle();
        let keys = Autopilot::default().keys_for(&world, paddle);
        assert_eq!(keys, HeldKeys::new());
    }
}
