//! Bricker entry point
//!
//! Runs the simulation headless at a fixed timestep. Paddles are driven by
//! the autopilot (or left idle), sounds go to the log, and the round-end
//! question is asked on the terminal.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use bricker::audio::{AudioManager, LogSink};
use bricker::consts::{SETTINGS_FILE, SIM_DT, WINDOW_TITLE};
use bricker::platform::{Autopilot, HeldKeys, RoundDialog};
use bricker::sim::{Flow, GameEvent, GameSession};
use bricker::{GridSize, Settings};

/// Maximum frame time to prevent spiral of death
const MAX_FRAME_TIME: f32 = 0.25;

/// Asks the play-again question on stdin/stdout
struct ConsoleDialog;

impl RoundDialog for ConsoleDialog {
    fn ask_play_again(&mut self, prompt: &str) -> bool {
        print!("{} [y/n] ", prompt);
        if let Err(e) = io::stdout().flush() {
            log::warn!("Could not show prompt: {}", e);
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) => false,
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                log::warn!("Could not read answer: {}", e);
                false
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("{} (headless) starting...", WINDOW_TITLE);

    let grid = GridSize::from_args(std::env::args().skip(1));
    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let seed = settings.seed.unwrap_or_else(rand::random);

    let mut session = GameSession::new(grid, settings.tuning.clone(), seed);
    let mut audio = AudioManager::from_settings(LogSink, &settings);
    let autopilot = settings.autopilot.then(Autopilot::default);
    let mut dialog = ConsoleDialog;

    let mut accumulator = 0.0;
    let mut last_time = Instant::now();

    loop {
        let now = Instant::now();
        let frame_time = (now - last_time).as_secs_f32().min(MAX_FRAME_TIME);
        last_time = now;
        accumulator += frame_time;

        while accumulator >= SIM_DT {
            let input = match &autopilot {
                Some(pilot) => pilot.keys_for(session.world(), session.paddle_id()),
                None => HeldKeys::new(),
            };

            let flow = session.update(&input, &mut dialog, SIM_DT);
            accumulator -= SIM_DT;

            for event in session.world_mut().drain_events() {
                match event {
                    GameEvent::Sound(effect) => audio.play(effect),
                    other => log::debug!("{:?}", other),
                }
            }

            if flow == Flow::Exit {
                log::info!("Goodbye");
                return;
            }

            // The dialog blocks; don't try to catch up on the time spent there
            if now.elapsed() > Duration::from_secs_f32(MAX_FRAME_TIME) {
                accumulator = 0.0;
                last_time = Instant::now();
            }
        }

        std::thread::sleep(Duration::from_secs_f32(SIM_DT));
    }
}
