//! Game session orchestration
//!
//! Owns the round: builds the playfield, runs the engine tick, then applies
//! the per-frame rules in a fixed order (pending life, camera timeout, round
//! end).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::factory::EffectFactory;
use super::hud::LifeDisplay;
use super::rect::Rect;
use super::registry::Layer;
use super::state::{Counter, GameEvent, GameObject, ObjectId, ObjectKind, World};
use super::tick::tick;
use crate::consts::{LOSE_PROMPT, PLAY_AGAIN_PROMPT, WIN_PROMPT};
use crate::platform::{InputSource, Key, RoundDialog};
use crate::settings::GridSize;
use crate::tuning::Tuning;
use crate::window_center;

/// Whether the host should keep running frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The player declined another round
    Exit,
}

/// Handles to the objects a round is built around
struct Round {
    ball: ObjectId,
    paddle: ObjectId,
    life_display: LifeDisplay,
}

/// One game, across any number of rounds
pub struct GameSession {
    world: World,
    grid: GridSize,
    lives: Counter,
    life_display: LifeDisplay,
    ball: ObjectId,
    paddle: ObjectId,
    /// Ball collision count when the active camera was first observed
    camera_baseline: Option<u32>,
}

impl GameSession {
    pub fn new(grid: GridSize, tuning: Tuning, seed: u64) -> Self {
        let lives = Counter::new(tuning.initial_lives);
        let mut world = World::new(tuning, grid.brick_count(), seed);
        let round = build_round(&mut world, grid, lives.value());

        log::info!(
            "Session started: {}x{} bricks, seed {}",
            grid.bricks_per_row,
            grid.rows,
            seed
        );

        Self {
            world,
            grid,
            lives,
            life_display: round.life_display,
            ball: round.ball,
            paddle: round.paddle,
            camera_baseline: None,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn lives(&self) -> i32 {
        self.lives.value()
    }

    pub fn bricks_left(&self) -> i32 {
        self.world.bricks_left.value()
    }

    pub fn ball_id(&self) -> ObjectId {
        self.ball
    }

    pub fn paddle_id(&self) -> ObjectId {
        self.paddle
    }

    pub fn camera_active(&self) -> bool {
        self.world.camera.is_some()
    }

    /// Run one frame: engine tick, then the session rules
    pub fn update(
        &mut self,
        input: &impl InputSource,
        dialog: &mut impl RoundDialog,
        dt: f32,
    ) -> Flow {
        tick(&mut self.world, input, dt);
        self.grant_pending_life();
        self.check_camera();
        self.check_round_end(input, dialog)
    }

    fn ball_collisions(&self) -> Option<u32> {
        self.world.objects.get(self.ball).and_then(|b| b.collisions())
    }

    fn grant_pending_life(&mut self) {
        let pending = match self.world.objects.get_mut(self.paddle).map(|p| &mut p.kind) {
            Some(ObjectKind::Paddle { life_pending }) => std::mem::take(life_pending),
            _ => false,
        };
        if pending {
            self.life_display.add_life(&mut self.world, &mut self.lives);
        }
    }

    fn check_camera(&mut self) {
        if self.world.camera.is_none() {
            return;
        }
        let Some(count) = self.ball_collisions() else {
            return;
        };

        match self.camera_baseline {
            None => self.camera_baseline = Some(count),
            Some(baseline) => {
                if count >= baseline + self.world.tuning.camera_reset_collisions {
                    self.world.camera = None;
                    self.camera_baseline = None;
                    log::info!("Camera released after {} collisions", count - baseline);
                    self.world.emit(GameEvent::CameraDeactivated);
                }
            }
        }
    }

    fn check_round_end(&mut self, input: &impl InputSource, dialog: &mut impl RoundDialog) -> Flow {
        let bottom = self.world.window().y;
        let ball_out = self
            .world
            .objects
            .get(self.ball)
            .is_some_and(|b| b.center().y > bottom);

        let mut won = None;
        if ball_out {
            self.lives.decrement();
            self.life_display.remove_heart(&mut self.world, self.lives.value());
            if self.lives.value() <= 0 {
                won = Some(false);
            } else {
                log::info!("Ball lost, {} lives left", self.lives.value());
                self.serve_ball();
            }
        }
        if self.world.bricks_left.value() <= 0 || input.is_key_held(Key::Win) {
            won = Some(true);
        }

        let Some(won) = won else {
            return Flow::Continue;
        };

        log::info!("Round over: {}", if won { "won" } else { "lost" });
        self.world.emit(GameEvent::RoundEnded { won });
        let prompt = format!(
            "{}{}",
            if won { WIN_PROMPT } else { LOSE_PROMPT },
            PLAY_AGAIN_PROMPT
        );

        if dialog.ask_play_again(&prompt) {
            self.restart();
            Flow::Continue
        } else {
            log::info!("Player declined another round");
            Flow::Exit
        }
    }

    /// Put the ball back in the middle with a fresh diagonal heading
    fn serve_ball(&mut self) {
        let center = window_center(self.world.window());
        let vel = serve_velocity(&mut self.world.rng, self.world.tuning.ball_speed);
        if let Some(ball) = self.world.objects.get_mut(self.ball) {
            ball.rect.center = center;
            ball.vel = vel;
        }
    }

    /// Reset counters and rebuild the round
    fn restart(&mut self) {
        self.world.bricks_left.reset(self.grid.brick_count());
        self.lives.reset(self.world.tuning.initial_lives);
        self.world.extra_paddles.reset();
        self.camera_baseline = None;

        let round = build_round(&mut self.world, self.grid, self.lives.value());
        self.ball = round.ball;
        self.paddle = round.paddle;
        self.life_display = round.life_display;
    }
}

/// Diagonal velocity with each axis flipped on a coin toss
fn serve_velocity(rng: &mut impl Rng, speed: f32) -> Vec2 {
    let x = if rng.random_bool(0.5) { -speed } else { speed };
    let y = if rng.random_bool(0.5) { -speed } else { speed };
    Vec2::new(x, y)
}

fn build_round(world: &mut World, grid: GridSize, lives: i32) -> Round {
    world.clear_objects();

    create_background(world);
    create_walls(world);
    let ball = create_ball(world);
    let paddle = create_paddle(world);
    create_bricks(world, grid);
    let life_display = LifeDisplay::new(world, lives);

    let bricks = world.bricks_left.value();
    log::info!("Round ready with {} bricks", bricks);
    world.emit(GameEvent::RoundStarted { bricks });

    Round {
        ball,
        paddle,
        life_display,
    }
}

fn create_background(world: &mut World) {
    let window = world.window();
    let id = world.objects.next_id();
    let background = GameObject::new(id, ObjectKind::Background, window_center(window), window);
    world.objects.add(background, Layer::Background);
}

fn create_walls(world: &mut World) {
    let window = world.window();
    let width = world.tuning.wall_width;

    let walls = [
        // left, right, top
        Rect::from_top_left(Vec2::ZERO, Vec2::new(width, window.y)),
        Rect::from_top_left(Vec2::new(window.x - width, 0.0), Vec2::new(width, window.y)),
        Rect::from_top_left(Vec2::ZERO, Vec2::new(window.x, width)),
    ];
    for rect in walls {
        let id = world.objects.next_id();
        let wall = GameObject::new(id, ObjectKind::Wall, rect.center, rect.size);
        world.objects.add(wall, Layer::Static);
    }
}

fn create_ball(world: &mut World) -> ObjectId {
    let center = window_center(world.window());
    let size = Vec2::splat(world.tuning.ball_size);
    let vel = serve_velocity(&mut world.rng, world.tuning.ball_speed);
    let id = world.objects.next_id();
    let ball = GameObject::new(id, ObjectKind::Ball { collisions: 0 }, center, size).with_velocity(vel);
    world.objects.add(ball, Layer::Default);
    id
}

fn create_paddle(world: &mut World) -> ObjectId {
    let window = world.window();
    let center = Vec2::new(window.x * 0.5, window.y - world.tuning.paddle_bottom_gap);
    let id = world.objects.next_id();
    let paddle = GameObject::new(
        id,
        ObjectKind::Paddle { life_pending: false },
        center,
        world.tuning.paddle_size,
    );
    world.objects.add(paddle, Layer::Default);
    id
}

fn create_bricks(world: &mut World, grid: GridSize) {
    // One factory per round, so the double flag spans exactly this grid
    let mut factory = EffectFactory::new(Pcg32::seed_from_u64(world.rng.random()));

    let width = world.window().x / grid.bricks_per_row as f32;
    let height = world.tuning.brick_height;
    let pitch = height + world.tuning.brick_spacing();
    let kinds = world.tuning.effect_kinds;

    for row in 1..=grid.rows {
        for col in 0..grid.bricks_per_row {
            let effect = factory.build_random(kinds);
            let rect = Rect::from_top_left(
                Vec2::new(col as f32 * width, row as f32 * pitch),
                Vec2::new(width, height),
            );
            let id = world.objects.next_id();
            let brick = GameObject::new(id, ObjectKind::Brick { effect }, rect.center, rect.size);
            world.objects.add(brick, Layer::Static);
        }
    }
}
