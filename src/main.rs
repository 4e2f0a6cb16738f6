//! Block Breaker headless runner
//!
//! Plays a seeded session with a simple autopilot standing in for the
//! keyboard, logs what happens, and prints the final frame as JSON.
//!
//! Usage: `block-breaker [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
use block_breaker::{GamePhase, GameState, Snapshot, TickInput, Tuning, consts::TICKS_PER_SECOND, tick};

/// Give up after five simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u32 = 5 * 60 * TICKS_PER_SECOND;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Breaker (headless) starting...");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives the simulation directly
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse::<u64>()?,
        None => 42,
    };
    let tuning = match args.next() {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Tuning::default(),
    };

    let mut state = GameState::new(tuning, seed)?;
    let mut pilot = Autopilot::default();
    let mut snap = state.snapshot();

    for ticks in 1..=MAX_TICKS {
        let input = pilot.input(&snap);
        snap = tick(&mut state, &input);

        for event in &snap.events {
            log::debug!("{:?}", event);
        }
        if matches!(snap.phase, GamePhase::Over | GamePhase::Cleared) {
            log::info!("Round ended after {} ticks: {:?}", ticks, snap.phase);
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&snap)?);
    Ok(())
}

/// Follows the lowest falling ball and serves whenever play is stopped
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct Autopilot {
    /// Launch was pressed last tick (the key must be released before the next press)
    launch_held: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Autopilot {
    fn input(&mut self, snap: &Snapshot) -> TickInput {
        let launch = matches!(snap.phase, GamePhase::Idle | GamePhase::Serving) && !self.launch_held;
        self.launch_held = launch;

        let paddle_center = snap.paddle.x + snap.paddle.width / 2.0;
        let target = snap
            .balls
            .iter()
            .filter(|b| b.vel.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .or_else(|| snap.balls.first())
            .map(|b| b.pos.x);

        // Dead zone keeps the paddle from jittering around the target
        let dead_zone = snap.paddle.speed;
        let (left, right) = match target {
            Some(x) if x < paddle_center - dead_zone => (true, false),
            Some(x) if x > paddle_center + dead_zone => (false, true),
            _ => (false, false),
        };

        TickInput {
            left,
            right,
            launch,
        }
    }
}
