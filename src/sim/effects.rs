//! Brick collision effects
//!
//! Every brick carries one [`CollisionEffect`]. All variants start with the
//! same base step, [`remove_brick`], and then add at most one payload. A
//! composite runs two effects back to back.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use super::registry::Layer;
use super::state::{Camera, GameEvent, GameObject, ObjectKind, Tag, World};
use crate::{direction_from_angle, window_center};

/// Behavior executed when something hits a brick
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionEffect {
    /// Remove the brick, nothing else
    Basic,
    /// Release pucks from the brick
    PuckSpawn,
    /// Add a temporary paddle in mid-field
    ExtraPaddleSpawn,
    /// Point the camera at the ball
    CameraFollow,
    /// Drop a heart that grants a life when caught
    HeartDrop,
    /// Run both effects, first then second
    Composite(Box<CollisionEffect>, Box<CollisionEffect>),
}

impl CollisionEffect {
    pub fn composite(first: CollisionEffect, second: CollisionEffect) -> Self {
        CollisionEffect::Composite(Box::new(first), Box::new(second))
    }

    /// Resolve a hit on `brick` by `collider`.
    ///
    /// Payloads fire even when the base removal was a no-op because the brick
    /// already went earlier in the same frame.
    pub fn apply(&self, brick: &GameObject, collider: &GameObject, world: &mut World) {
        match self {
            CollisionEffect::Basic => {
                remove_brick(brick, world);
            }
            CollisionEffect::PuckSpawn => {
                remove_brick(brick, world);
                spawn_pucks(brick.center(), world);
            }
            CollisionEffect::ExtraPaddleSpawn => {
                remove_brick(brick, world);
                spawn_extra_paddle(world);
            }
            CollisionEffect::CameraFollow => {
                remove_brick(brick, world);
                follow_ball(collider, world);
            }
            CollisionEffect::HeartDrop => {
                remove_brick(brick, world);
                drop_heart(brick.center(), world);
            }
            CollisionEffect::Composite(first, second) => {
                first.apply(brick, collider, world);
                second.apply(brick, collider, world);
            }
        }
    }

    /// Composite levels along the deepest branch (0 for a simple effect)
    pub fn depth(&self) -> u32 {
        match self {
            CollisionEffect::Composite(first, second) => 1 + first.depth().max(second.depth()),
            _ => 0,
        }
    }

    /// Number of composite nodes in the tree
    pub fn composite_count(&self) -> u32 {
        match self {
            CollisionEffect::Composite(first, second) => {
                1 + first.composite_count() + second.composite_count()
            }
            _ => 0,
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            CollisionEffect::Basic => "basic",
            CollisionEffect::PuckSpawn => "pucks",
            CollisionEffect::ExtraPaddleSpawn => "extra-paddle",
            CollisionEffect::CameraFollow => "camera",
            CollisionEffect::HeartDrop => "heart",
            CollisionEffect::Composite(..) => "double",
        }
    }
}

/// Base step shared by every effect: take the brick off the static layer and
/// count it. Returns whether this call removed it.
pub fn remove_brick(brick: &GameObject, world: &mut World) -> bool {
    if !world.objects.remove(brick.id, Layer::Static) {
        return false;
    }
    world.bricks_left.decrement();
    let remaining = world.bricks_left.value();
    log::debug!("Brick {:?} destroyed, {} left", brick.id, remaining);
    world.emit(GameEvent::BrickDestroyed {
        brick: brick.id,
        remaining,
    });
    true
}

fn spawn_pucks(at: Vec2, world: &mut World) {
    let size = Vec2::splat(world.tuning.puck_size());
    let speed = world.tuning.ball_speed;
    let count = world.tuning.puck_count;

    let mut spawned = Vec::with_capacity(count as usize);
    for _ in 0..count {
        // Half-turn below the horizon in screen space
        let angle = world.rng.random_range(0.0..PI);
        let id = world.objects.next_id();
        let puck = GameObject::new(id, ObjectKind::Puck { collisions: 0 }, at, size)
            .with_velocity(direction_from_angle(angle) * speed);
        world.objects.add(puck, Layer::Default);
        spawned.push(id);
    }

    // Siblings start stacked on one point; only a later re-overlap is a hit
    for (i, &a) in spawned.iter().enumerate() {
        for &b in &spawned[i + 1..] {
            world.mark_touching(a, b);
        }
    }
    world.emit(GameEvent::PucksSpawned { at, count });
}

fn spawn_extra_paddle(world: &mut World) {
    if !world.extra_paddles.try_acquire() {
        return;
    }
    let id = world.objects.next_id();
    let paddle = GameObject::new(
        id,
        ObjectKind::ExtraPaddle { hits: 0 },
        window_center(world.window()),
        world.tuning.paddle_size,
    );
    world.objects.add(paddle, Layer::Default);
    log::info!("Extra paddle {:?} spawned", id);
    world.emit(GameEvent::ExtraPaddleSpawned { paddle: id });
}

fn follow_ball(collider: &GameObject, world: &mut World) {
    if world.camera.is_some() || collider.tag() != Tag::Ball {
        return;
    }
    world.camera = Some(Camera {
        target: collider.id,
        offset: Vec2::ZERO,
        frame: world.tuning.camera_frame(),
        window: world.window(),
    });
    log::info!("Camera following {:?}", collider.id);
    world.emit(GameEvent::CameraActivated {
        target: collider.id,
    });
}

fn drop_heart(at: Vec2, world: &mut World) {
    let id = world.objects.next_id();
    let heart = GameObject::new(
        id,
        ObjectKind::FallingHeart,
        at,
        Vec2::splat(world.tuning.heart_size),
    )
    .with_velocity(Vec2::new(0.0, world.tuning.heart_fall_speed));
    world.objects.add(heart, Layer::Default);
    world.emit(GameEvent::HeartSpawned { heart: id, at });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    /// A world holding one brick (bound to `effect`) and one ball
    fn fixture(effect: CollisionEffect) -> (World, GameObject, GameObject) {
        let mut world = World::new(Tuning::default(), 1, 42);

        let id = world.objects.next_id();
        let brick = GameObject::new(
            id,
            ObjectKind::Brick { effect },
            Vec2::new(43.75, 27.5),
            Vec2::new(87.5, 15.0),
        );
        world.objects.add(brick.clone(), Layer::Static);

        let id = world.objects.next_id();
        let ball = GameObject::new(
            id,
            ObjectKind::Ball { collisions: 0 },
            Vec2::new(43.75, 45.0),
            Vec2::splat(20.0),
        );
        world.objects.add(ball.clone(), Layer::Default);

        (world, brick, ball)
    }

    fn effect_of(brick: &GameObject) -> CollisionEffect {
        match &brick.kind {
            ObjectKind::Brick { effect } => effect.clone(),
            _ => panic!("not a brick"),
        }
    }

    #[test]
    fn test_basic_removal_is_idempotent() {
        let (mut world, brick, ball) = fixture(CollisionEffect::Basic);
        let effect = effect_of(&brick);

        effect.apply(&brick, &ball, &mut world);
        effect.apply(&brick, &ball, &mut world);

        assert_eq!(world.bricks_left.value(), 0);
        assert!(!world.objects.contains(brick.id));
        let destroyed = world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn test_remove_brick_reports_outcome() {
        let (mut world, brick, _) = fixture(CollisionEffect::Basic);
        assert!(remove_brick(&brick, &mut world));
        assert!(!remove_brick(&brick, &mut world));
    }

    #[test]
    fn test_puck_spawn() {
        let (mut world, brick, ball) = fixture(CollisionEffect::PuckSpawn);
        effect_of(&brick).apply(&brick, &ball, &mut world);

        assert_eq!(world.bricks_left.value(), 0);
        let pucks: Vec<_> = world.objects.with_tag(Tag::Puck).collect();
        assert_eq!(pucks.len(), 2);
        for puck in pucks {
            assert_eq!(puck.center(), brick.center());
            assert!((puck.rect.size.x - 15.0).abs() < 1e-4);
            assert!((puck.vel.length() - 200.0).abs() < 1e-2);
            assert!(puck.vel.y >= 0.0);
        }
    }

    #[test]
    fn test_payload_fires_after_noop_removal() {
        let (mut world, brick, ball) = fixture(CollisionEffect::PuckSpawn);
        let effect = effect_of(&brick);
        effect.apply(&brick, &ball, &mut world);
        effect.apply(&brick, &ball, &mut world);

        assert_eq!(world.bricks_left.value(), 0);
        assert_eq!(world.objects.count_tag(Tag::Puck), 4);
    }

    #[test]
    fn test_extra_paddle_cap() {
        let (mut world, brick, ball) = fixture(CollisionEffect::ExtraPaddleSpawn);
        let effect = effect_of(&brick);

        effect.apply(&brick, &ball, &mut world);
        assert_eq!(world.extra_paddles.alive(), 1);
        assert_eq!(world.objects.count_tag(Tag::ExtraPaddle), 1);
        let paddle = world.objects.with_tag(Tag::ExtraPaddle).next().unwrap();
        assert_eq!(paddle.center(), Vec2::new(350.0, 250.0));

        // At the cap: no new paddle, no counter change
        let objects_before = world.objects.len();
        effect.apply(&brick, &ball, &mut world);
        assert_eq!(world.extra_paddles.alive(), 1);
        assert_eq!(world.objects.len(), objects_before);
    }

    #[test]
    fn test_camera_at_most_one() {
        let (mut world, brick, ball) = fixture(CollisionEffect::CameraFollow);
        let effect = effect_of(&brick);

        effect.apply(&brick, &ball, &mut world);
        effect.apply(&brick, &ball, &mut world);

        let camera = world.camera.expect("camera active");
        assert_eq!(camera.target, ball.id);
        assert!((camera.frame.x - 840.0).abs() < 1e-3);
        let activations = world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::CameraActivated { .. }))
            .count();
        assert_eq!(activations, 1);
    }

    #[test]
    fn test_camera_ignores_pucks() {
        let (mut world, brick, _) = fixture(CollisionEffect::CameraFollow);
        let puck = GameObject::new(
            world.objects.next_id(),
            ObjectKind::Puck { collisions: 0 },
            Vec2::ZERO,
            Vec2::splat(15.0),
        );
        effect_of(&brick).apply(&brick, &puck, &mut world);

        assert!(world.camera.is_none());
        assert_eq!(world.bricks_left.value(), 0);
    }

    #[test]
    fn test_heart_drop() {
        let (mut world, brick, ball) = fixture(CollisionEffect::HeartDrop);
        effect_of(&brick).apply(&brick, &ball, &mut world);

        let heart = world.objects.with_tag(Tag::FallingHeart).next().unwrap();
        assert_eq!(heart.center(), brick.center());
        assert_eq!(heart.vel, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_composite_runs_in_order() {
        let effect = CollisionEffect::composite(CollisionEffect::HeartDrop, CollisionEffect::PuckSpawn);
        let (mut world, brick, ball) = fixture(effect.clone());
        effect.apply(&brick, &ball, &mut world);

        let events = world.drain_events();
        assert!(matches!(events[0], GameEvent::BrickDestroyed { .. }));
        assert!(matches!(events[1], GameEvent::HeartSpawned { .. }));
        assert!(matches!(events[2], GameEvent::PucksSpawned { .. }));
        assert_eq!(events.len(), 3);
        assert_eq!(world.bricks_left.value(), 0);
    }

    #[test]
    fn test_depth_and_count() {
        let simple = CollisionEffect::Basic;
        assert_eq!(simple.depth(), 0);

        let nested = CollisionEffect::composite(
            CollisionEffect::composite(CollisionEffect::HeartDrop, CollisionEffect::PuckSpawn),
            CollisionEffect::CameraFollow,
        );
        assert_eq!(nested.depth(), 2);
        assert_eq!(nested.composite_count(), 2);
        assert_eq!(nested.label(), "double");
    }
}
