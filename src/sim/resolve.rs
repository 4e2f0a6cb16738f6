//! Per-tick collision resolution
//!
//! Moves every ball and pickup one step and applies what they touch:
//! walls, the paddle, blocks, and the power-ups caught by the paddle.
//! Balls and pickups are walked from the last index to the first so that
//! removing one never skips or repeats another.

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::effects::TimedEffect;
use super::state::{Ball, GameEvent, GameState, Paddle, Pickup, PickupKind};

/// Send a ball back up, angled by where it struck the paddle
///
/// Left edge gives `-base_speed`, center gives 0, right edge `+base_speed`.
pub fn deflect_off_paddle(ball: &mut Ball, paddle: &Paddle) {
    ball.vel.y = -ball.vel.y.abs();
    let hit = paddle.hit_fraction(ball.pos.x);
    ball.vel.x = ball.base_speed * (hit - 0.5) * 2.0;
}

/// Advance all balls and resolve their contacts
pub fn resolve_balls(state: &mut GameState) {
    let field_width = state.tuning.playfield_width;
    let field_height = state.tuning.playfield_height;
    let paddle_rect = state.paddle.rect();

    for i in (0..state.balls.len()).rev() {
        let ball = &mut state.balls[i];
        ball.pos += ball.vel;

        // Side and top walls; the bottom is open
        if ball.pos.x + ball.radius > field_width || ball.pos.x - ball.radius < 0.0 {
            ball.vel.x = -ball.vel.x;
        }
        if ball.pos.y - ball.radius < 0.0 {
            ball.vel.y = -ball.vel.y;
        }

        if overlaps(ball.circle(), &paddle_rect) {
            deflect_off_paddle(ball, &state.paddle);
        }

        // First visible block in row-major order, at most one per tick
        let circle = ball.circle();
        let hit = state
            .blocks
            .iter()
            .position(|b| b.visible && overlaps(circle, &b.rect));
        if hit.is_some() {
            ball.vel.y = -ball.vel.y;
        }
        let lost = ball.pos.y + ball.radius > field_height;

        if let Some(index) = hit {
            destroy_block(state, index);
        }
        if lost && state.remove_ball(i).is_some() {
            state.events.push(GameEvent::BallLost);
        }
    }
}

/// Knock out a block, score it, and maybe drop a pickup
fn destroy_block(state: &mut GameState, index: usize) {
    if !state.strike_block(index) {
        return;
    }
    state.score = state.score.saturating_add(state.tuning.points_per_block);

    let block = &state.blocks[index];
    let (row, col, rect) = (block.row, block.col, block.rect);
    state.events.push(GameEvent::BlockDestroyed { row, col });
    log::debug!("Block ({}, {}) destroyed, score {}", row, col, state.score);

    if state.rng.random_bool(state.tuning.pickup_drop_chance) {
        let kind = PickupKind::ALL[state.rng.random_range(0..PickupKind::ALL.len())];
        let pickup = Pickup::below(&rect, kind, &state.tuning);
        state.add_pickup(pickup);
        state.events.push(GameEvent::PickupSpawned { kind });
        log::debug!("{:?} pickup dropped at ({}, {})", kind, row, col);
    }
}

/// Advance falling pickups, collecting or discarding them
pub fn resolve_pickups(state: &mut GameState) {
    let field_height = state.tuning.playfield_height;

    for i in (0..state.pickups.len()).rev() {
        let pickup = &mut state.pickups[i];
        pickup.pos.y += pickup.fall_speed;

        let kind = pickup.kind;
        let caught = overlaps(pickup.circle(), &state.paddle.rect());
        let missed = pickup.pos.y > field_height;

        if caught {
            if state.remove_pickup(i).is_some() {
                state.events.push(GameEvent::PickupCaught { kind });
                apply_pickup(state, kind);
            }
        } else if missed && state.remove_pickup(i).is_some() {
            state.events.push(GameEvent::PickupMissed { kind });
        }
    }
}

/// Grant a caught power-up
pub fn apply_pickup(state: &mut GameState, kind: PickupKind) {
    log::debug!("Caught {:?} pickup", kind);
    let effect = match kind {
        PickupKind::MultiBall => {
            spawn_extra_ball(state);
            return;
        }
        PickupKind::SpeedUp => TimedEffect::SpeedUp,
        PickupKind::PaddleExpand => TimedEffect::PaddleExpand,
    };
    state
        .effects
        .apply(effect, &mut state.balls, &mut state.paddle, &state.tuning);
}

/// Clone the first ball with a little velocity jitter
fn spawn_extra_ball(state: &mut GameState) {
    let Some(first) = state.balls.first().cloned() else {
        log::debug!("Multi-ball caught with no ball in play");
        return;
    };
    let jitter = Vec2::new(
        (state.rng.random::<f32>() - 0.5) * state.tuning.multi_ball_jitter_x,
        (state.rng.random::<f32>() - 0.5) * state.tuning.multi_ball_jitter_y,
    );
    state.add_ball(Ball::new(
        first.pos,
        first.vel + jitter,
        first.radius,
        first.base_speed,
    ));
}
