//! Timed power-up effects
//!
//! Two independent countdowns: ball speed and paddle width. Picking up an
//! effect that is already running only refreshes its countdown; the
//! multiplier is applied once when the effect starts and undone once when
//! the countdown reaches zero.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::tuning::Tuning;

/// Effects that run on a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimedEffect {
    SpeedUp,
    PaddleExpand,
}

/// Active power-up countdowns (ticks remaining, 0 = inactive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectTimers {
    pub speed_ticks: u32,
    /// Multiplier currently baked into ball velocities (1.0 when inactive)
    pub speed_multiplier: f32,
    pub expand_ticks: u32,
}

impl Default for EffectTimers {
    fn default() -> Self {
        Self {
            speed_ticks: 0,
            speed_multiplier: 1.0,
            expand_ticks: 0,
        }
    }
}

impl EffectTimers {
    pub fn is_active(&self, effect: TimedEffect) -> bool {
        match effect {
            TimedEffect::SpeedUp => self.speed_ticks > 0,
            TimedEffect::PaddleExpand => self.expand_ticks > 0,
        }
    }

    /// Multiplier a freshly served ball should carry
    pub fn current_speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Start an effect, or refresh its countdown if already running
    pub fn apply(
        &mut self,
        effect: TimedEffect,
        balls: &mut [Ball],
        paddle: &mut Paddle,
        tuning: &Tuning,
    ) {
        match effect {
            TimedEffect::SpeedUp => {
                if self.speed_ticks == 0 {
                    let multiplier = tuning.speed_up_multiplier;
                    for ball in balls.iter_mut() {
                        ball.vel *= multiplier;
                    }
                    self.speed_multiplier = multiplier;
                    log::debug!("Speed up x{} on {} balls", multiplier, balls.len());
                }
                self.speed_ticks = tuning.speed_up_duration;
            }
            TimedEffect::PaddleExpand => {
                if self.expand_ticks == 0 {
                    paddle.width = (paddle.base_width * tuning.paddle_expand_multiplier)
                        .min(tuning.playfield_width);
                    paddle.clamp_to(tuning.playfield_width);
                    log::debug!("Paddle expanded to {}", paddle.width);
                }
                self.expand_ticks = tuning.paddle_expand_duration;
            }
        }
    }

    /// Count down one tick and undo whatever expired
    ///
    /// Speed reversion divides the velocities of the balls alive right now,
    /// whether or not they were around when the boost started.
    pub fn tick(&mut self, balls: &mut [Ball], paddle: &mut Paddle) -> Vec<TimedEffect> {
        let mut expired = Vec::new();

        if self.speed_ticks > 0 {
            self.speed_ticks -= 1;
            if self.speed_ticks == 0 {
                for ball in balls.iter_mut() {
                    ball.vel /= self.speed_multiplier;
                }
                self.speed_multiplier = 1.0;
                expired.push(TimedEffect::SpeedUp);
            }
        }

        if self.expand_ticks > 0 {
            self.expand_ticks -= 1;
            if self.expand_ticks == 0 {
                paddle.width = paddle.base_width;
                expired.push(TimedEffect::PaddleExpand);
            }
        }

        expired
    }
}
