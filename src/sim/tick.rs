//! Fixed timestep engine tick
//!
//! Moves everything, culls what fell off the playfield, then finds new
//! overlaps and notifies both sides of each pair. Notifications use snapshots
//! taken at detection time, so a brick removed by an earlier pair in the same
//! frame is still notified by a later one; brick removal has to cope with that.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::{bounce, rect_collision};
use super::registry::Layer;
use super::state::{GameEvent, GameObject, ObjectId, ObjectKind, Tag, World, pair_key};
use crate::audio::SoundEffect;
use crate::platform::{InputSource, horizontal_axis};

/// A pair that started overlapping this frame
#[derive(Debug, Clone)]
struct Contact {
    a: GameObject,
    b: GameObject,
    /// Separation direction from `a`'s point of view
    normal: Vec2,
    penetration: f32,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &impl InputSource, dt: f32) {
    move_objects(world, input, dt);
    cull_offscreen(world);

    let contacts = detect_contacts(world);
    for contact in &contacts {
        on_collision(world, &contact.a, &contact.b, contact.normal, contact.penetration);
        on_collision(world, &contact.b, &contact.a, -contact.normal, contact.penetration);
    }
}

fn move_objects(world: &mut World, input: &impl InputSource, dt: f32) {
    let window = world.window();
    let paddle_vel = Vec2::new(horizontal_axis(input) * world.tuning.paddle_speed, 0.0);

    for object in world.objects.layer_mut(Layer::Default) {
        match object.kind {
            ObjectKind::Paddle { .. } | ObjectKind::ExtraPaddle { .. } => {
                object.vel = paddle_vel;
                object.rect.center += object.vel * dt;
                object.rect.clamp_x(window.x);
            }
            ObjectKind::Ball { .. } | ObjectKind::Puck { .. } | ObjectKind::FallingHeart => {
                object.rect.center += object.vel * dt;
            }
            _ => {}
        }
    }
}

/// Pucks and hearts vanish once past the bottom edge; the primary ball is
/// left for the session to judge.
fn cull_offscreen(world: &mut World) {
    let bottom = world.window().y;
    let gone: Vec<(ObjectId, Tag)> = world
        .objects
        .on_layer(Layer::Default)
        .filter(|o| matches!(o.tag(), Tag::Puck | Tag::FallingHeart))
        .filter(|o| o.center().y > bottom)
        .map(|o| (o.id, o.tag()))
        .collect();

    for (id, tag) in gone {
        if !world.objects.remove(id, Layer::Default) {
            continue;
        }
        match tag {
            Tag::Puck => world.emit(GameEvent::PuckLost { puck: id }),
            _ => world.emit(GameEvent::HeartLost { heart: id }),
        }
    }
}

/// Find pairs that overlap now but did not on the previous tick
fn detect_contacts(world: &mut World) -> Vec<Contact> {
    let movers: Vec<GameObject> = world.objects.on_layer(Layer::Default).cloned().collect();
    let statics: Vec<GameObject> = world.objects.on_layer(Layer::Static).cloned().collect();

    let mut overlapping = BTreeSet::new();
    let mut contacts = Vec::new();

    for (i, a) in movers.iter().enumerate() {
        for b in movers[i + 1..].iter().chain(statics.iter()) {
            if !(a.should_collide_with(b) && b.should_collide_with(a)) {
                continue;
            }
            let result = rect_collision(&a.rect, &b.rect);
            if !result.hit {
                continue;
            }

            let key = pair_key(a.id, b.id);
            overlapping.insert(key);
            if world.contacts.contains(&key) {
                continue;
            }
            contacts.push(Contact {
                a: a.clone(),
                b: b.clone(),
                normal: result.normal,
                penetration: result.penetration,
            });
        }
    }

    world.contacts = overlapping;
    contacts
}

/// Collision handler for `this` being hit by `other`
fn on_collision(world: &mut World, this: &GameObject, other: &GameObject, normal: Vec2, penetration: f32) {
    match &this.kind {
        ObjectKind::Ball { .. } | ObjectKind::Puck { .. } => {
            let Some(ball) = world.objects.get_mut(this.id) else {
                return;
            };
            ball.vel = bounce(ball.vel, normal);
            ball.rect.center += normal * penetration;
            if let ObjectKind::Ball { collisions } | ObjectKind::Puck { collisions } = &mut ball.kind {
                *collisions += 1;
            }
            world.emit(GameEvent::Sound(SoundEffect::BallHit));
        }
        ObjectKind::Paddle { .. } => {
            if other.tag() != Tag::FallingHeart {
                return;
            }
            if let Some(ObjectKind::Paddle { life_pending }) =
                world.objects.get_mut(this.id).map(|p| &mut p.kind)
            {
                *life_pending = true;
            }
        }
        ObjectKind::ExtraPaddle { .. } => {
            if other.tag() == Tag::Wall {
                return;
            }
            let max_hits = world.tuning.extra_paddle_max_hits;
            let expired = match world.objects.get_mut(this.id).map(|p| &mut p.kind) {
                Some(ObjectKind::ExtraPaddle { hits }) => {
                    *hits += 1;
                    *hits >= max_hits
                }
                _ => false,
            };
            if expired && world.objects.remove(this.id, Layer::Default) {
                world.extra_paddles.release();
                log::info!("Extra paddle {:?} expired", this.id);
                world.emit(GameEvent::ExtraPaddleExpired { paddle: this.id });
            }
        }
        ObjectKind::Brick { effect } => {
            log::debug!("Brick {:?} ({}) hit by {:?}", this.id, effect.label(), other.tag());
            effect.apply(this, other, world);
        }
        ObjectKind::FallingHeart => {
            if other.tag() == Tag::Paddle && world.objects.remove(this.id, Layer::Default) {
                world.emit(GameEvent::HeartCaught { heart: this.id });
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::{HeldKeys, Key};
    use crate::sim::effects::CollisionEffect;
    use crate::tuning::Tuning;

    fn spawn(world: &mut World, kind: ObjectKind, center: Vec2, size: Vec2, layer: Layer) -> ObjectId {
        let id = world.objects.next_id();
        world.objects.add(GameObject::new(id, kind, center, size), layer);
        id
    }

    fn set_vel(world: &mut World, id: ObjectId, vel: Vec2) {
        world.objects.get_mut(id).unwrap().vel = vel;
    }

    #[test]
    fn test_paddle_follows_keys_and_stays_inside() {
        let mut world = World::new(Tuning::default(), 0, 1);
        let paddle = spawn(
            &mut world,
            ObjectKind::Paddle { life_pending: false },
            Vec2::new(60.0, 470.0),
            Vec2::new(100.0, 15.0),
            Layer::Default,
        );

        let left = HeldKeys::new().with(Key::Left);
        for _ in 0..60 {
            tick(&mut world, &left, SIM_DT);
        }
        let p = world.objects.get(paddle).unwrap();
        assert_eq!(p.rect.min().x, 0.0);
        assert_eq!(p.center().y, 470.0);

        let right = HeldKeys::new().with(Key::Right);
        tick(&mut world, &right, SIM_DT);
        assert!((world.objects.get(paddle).unwrap().center().x - 55.0).abs() < 1e-3);
    }

    #[test]
    fn test_ball_bounces_off_wall() {
        let mut world = World::new(Tuning::default(), 0, 1);
        spawn(&mut world, ObjectKind::Wall, Vec2::new(5.0, 250.0), Vec2::new(10.0, 500.0), Layer::Static);
        let ball = spawn(
            &mut world,
            ObjectKind::Ball { collisions: 0 },
            Vec2::new(21.0, 250.0),
            Vec2::splat(20.0),
            Layer::Default,
        );
        set_vel(&mut world, ball, Vec2::new(-200.0, 0.0));

        tick(&mut world, &HeldKeys::new(), SIM_DT);

        let b = world.objects.get(ball).unwrap();
        assert!(b.vel.x > 0.0);
        assert_eq!(b.collisions(), Some(1));
        assert!(b.rect.min().x >= 10.0 - 1e-3);
        assert!(world.events.contains(&GameEvent::Sound(SoundEffect::BallHit)));
    }

    #[test]
    fn test_contact_notified_once_while_overlapping() {
        let mut world = World::new(Tuning::default(), 0, 1);
        // Paddle parked against the left wall keeps overlapping it
        spawn(&mut world, ObjectKind::Wall, Vec2::new(5.0, 250.0), Vec2::new(10.0, 500.0), Layer::Static);
        let extra = spawn(
            &mut world,
            ObjectKind::ExtraPaddle { hits: 0 },
            Vec2::new(50.0, 250.0),
            Vec2::new(100.0, 15.0),
            Layer::Default,
        );
        world.extra_paddles.try_acquire();

        for _ in 0..10 {
            tick(&mut world, &HeldKeys::new(), SIM_DT);
        }
        assert_eq!(world.contacts.len(), 1);
        // Walls never count toward expiry
        assert_eq!(world.objects.get(extra).unwrap().kind, ObjectKind::ExtraPaddle { hits: 0 });
    }

    #[test]
    fn test_extra_paddle_expires_after_hits() {
        let mut world = World::new(Tuning::default(), 0, 1);
        let extra = spawn(
            &mut world,
            ObjectKind::ExtraPaddle { hits: 0 },
            Vec2::new(350.0, 250.0),
            Vec2::new(100.0, 15.0),
            Layer::Default,
        );
        assert!(world.extra_paddles.try_acquire());

        for n in 1..=4 {
            // Drop a ball onto the paddle from just above
            let ball = spawn(
                &mut world,
                ObjectKind::Ball { collisions: 0 },
                Vec2::new(350.0, 233.0),
                Vec2::splat(20.0),
                Layer::Default,
            );
            set_vel(&mut world, ball, Vec2::new(0.0, 120.0));
            tick(&mut world, &HeldKeys::new(), SIM_DT);
            world.objects.remove(ball, Layer::Default);

            if n < 4 {
                assert_eq!(world.objects.get(extra).unwrap().kind, ObjectKind::ExtraPaddle { hits: n });
            }
        }

        assert!(!world.objects.contains(extra));
        assert_eq!(world.extra_paddles.alive(), 0);
        assert!(world.events.contains(&GameEvent::ExtraPaddleExpired { paddle: extra }));
    }

    #[test]
    fn test_simultaneous_hits_remove_brick_once() {
        let mut world = World::new(Tuning::default(), 1, 1);
        let brick = spawn(
            &mut world,
            ObjectKind::Brick { effect: CollisionEffect::Basic },
            Vec2::new(100.0, 50.0),
            Vec2::new(87.5, 15.0),
            Layer::Static,
        );
        // Two balls touching the brick from below in the same frame
        for x in [80.0, 120.0] {
            let ball = spawn(
                &mut world,
                ObjectKind::Ball { collisions: 0 },
                Vec2::new(x, 68.0),
                Vec2::splat(20.0),
                Layer::Default,
            );
            set_vel(&mut world, ball, Vec2::new(0.0, -120.0));
        }

        tick(&mut world, &HeldKeys::new(), SIM_DT);

        assert!(!world.objects.contains(brick));
        assert_eq!(world.bricks_left.value(), 0);
        for ball in world.objects.with_tag(Tag::Ball) {
            assert!(ball.vel.y > 0.0);
        }
    }

    #[test]
    fn test_fresh_pucks_keep_their_spread() {
        for seed in 0..64 {
            let mut world = World::new(Tuning::default(), 1, seed);
            let brick = spawn(
                &mut world,
                ObjectKind::Brick { effect: CollisionEffect::PuckSpawn },
                Vec2::new(350.0, 100.0),
                Vec2::new(87.5, 15.0),
                Layer::Static,
            );
            let brick = world.objects.get(brick).unwrap().clone();
            // Collider is not registered, so nothing else is near the pucks
            let ball = GameObject::new(
                ObjectId(999),
                ObjectKind::Ball { collisions: 0 },
                Vec2::new(350.0, 120.0),
                Vec2::splat(20.0),
            );
            CollisionEffect::PuckSpawn.apply(&brick, &ball, &mut world);

            tick(&mut world, &HeldKeys::new(), SIM_DT);

            let pucks: Vec<&GameObject> = world.objects.with_tag(Tag::Puck).collect();
            assert_eq!(pucks.len(), 2);
            for puck in pucks {
                assert!(puck.vel.y >= 0.0, "seed {}: puck heading up", seed);
                assert_eq!(puck.collisions(), Some(0), "seed {}", seed);
            }
            assert!(!world.events.contains(&GameEvent::Sound(SoundEffect::BallHit)));
        }
    }

    #[test]
    fn test_offscreen_puck_and_heart_removed() {
        let mut world = World::new(Tuning::default(), 0, 1);
        let puck = spawn(
            &mut world,
            ObjectKind::Puck { collisions: 0 },
            Vec2::new(300.0, 499.0),
            Vec2::splat(15.0),
            Layer::Default,
        );
        set_vel(&mut world, puck, Vec2::new(0.0, 200.0));
        let heart = spawn(
            &mut world,
            ObjectKind::FallingHeart,
            Vec2::new(100.0, 499.5),
            Vec2::splat(20.0),
            Layer::Default,
        );
        set_vel(&mut world, heart, Vec2::new(0.0, 100.0));

        tick(&mut world, &HeldKeys::new(), SIM_DT);

        assert!(!world.objects.contains(puck));
        assert!(!world.objects.contains(heart));
        assert!(world.events.contains(&GameEvent::PuckLost { puck }));
        assert!(world.events.contains(&GameEvent::HeartLost { heart }));
    }

    #[test]
    fn test_heart_caught_by_paddle() {
        let mut world = World::new(Tuning::default(), 0, 1);
        let paddle = spawn(
            &mut world,
            ObjectKind::Paddle { life_pending: false },
            Vec2::new(350.0, 470.0),
            Vec2::new(100.0, 15.0),
            Layer::Default,
        );
        let heart = spawn(
            &mut world,
            ObjectKind::FallingHeart,
            Vec2::new(350.0, 452.0),
            Vec2::splat(20.0),
            Layer::Default,
        );
        set_vel(&mut world, heart, Vec2::new(0.0, 100.0));

        tick(&mut world, &HeldKeys::new(), SIM_DT);

        assert!(!world.objects.contains(heart));
        assert_eq!(
            world.objects.get(paddle).unwrap().kind,
            ObjectKind::Paddle { life_pending: true }
        );
    }

    #[test]
    fn test_heart_passes_through_ball() {
        let mut world = World::new(Tuning::default(), 0, 1);
        let heart = spawn(
            &mut world,
            ObjectKind::FallingHeart,
            Vec2::new(200.0, 200.0),
            Vec2::splat(20.0),
            Layer::Default,
        );
        let ball = spawn(
            &mut world,
            ObjectKind::Ball { collisions: 0 },
            Vec2::new(205.0, 205.0),
            Vec2::splat(20.0),
            Layer::Default,
        );

        tick(&mut world, &HeldKeys::new(), SIM_DT);

        assert!(world.objects.contains(heart));
        assert_eq!(world.objects.get(ball).unwrap().collisions(), Some(0));
    }
}
