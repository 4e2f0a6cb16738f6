//! Simulation tick and session flow
//!
//! One call to `tick` is one frame. Outside of `Playing` the only thing a
//! tick does is wait for the launch input; while playing it runs, in order:
//! paddle, balls, pickups, effect timers, life check, clear check.

use serde::{Deserialize, Serialize};

use super::resolve;
use super::snapshot::Snapshot;
use super::state::{Ball, GameEvent, GamePhase, GameState};

/// Input for a single tick
///
/// `left`/`right` are held keys. `launch` must be edge-triggered by the
/// input layer (true for one tick per key press).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub launch: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Snapshot {
    state.events.clear();

    if state.phase.awaits_launch() {
        if input.launch {
            log::info!("{:?} -> Playing", state.phase);
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Launched);
        }
        return state.snapshot();
    }

    state.time_ticks += 1;

    let field_width = state.tuning.playfield_width;
    state.paddle.steer(input.left, input.right, field_width);

    resolve::resolve_balls(state);
    resolve::resolve_pickups(state);

    for effect in state.effects.tick(&mut state.balls, &mut state.paddle) {
        log::debug!("{:?} expired", effect);
        state.events.push(GameEvent::EffectExpired { effect });
    }

    check_ball_loss(state);
    check_clear(state);

    state.snapshot()
}

/// Lose a life once every ball is gone
fn check_ball_loss(state: &mut GameState) {
    if !state.balls.is_empty() {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives > 0 {
        let multiplier = state.effects.current_speed_multiplier();
        state.add_ball(Ball::served(&state.tuning, multiplier));
        state.phase = GamePhase::Serving;
        log::info!("Ball lost, {} lives left", state.lives);
    } else {
        let final_score = state.score;
        log::info!("Game over, final score {}", final_score);
        state.reset_round();
        state.phase = GamePhase::Over;
        state.events.push(GameEvent::GameOver { final_score });
    }
}

/// End the round when no block is left standing
fn check_clear(state: &mut GameState) {
    if !state.all_blocks_cleared() {
        return;
    }
    let final_score = state.score;
    log::info!("All blocks cleared, final score {}", final_score);
    state.reset_round();
    state.phase = GamePhase::Cleared;
    state.events.push(GameEvent::GameCleared { final_score });
}

impl GameState {
    /// Start the session over from scratch
    pub fn reset(&mut self) -> Snapshot {
        log::info!("Session reset (seed {})", self.seed);
        self.reset_round();
        self.phase = GamePhase::Idle;
        self.events.clear();
        self.snapshot()
    }
}
