//! Game state and core simulation types
//!
//! A `GameState` is one self-contained session: paddle, balls, block grid,
//! falling pickups, effect timers, score, lives and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Rect};
use super::effects::{EffectTimers, TimedEffect};
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh session, waiting for the start input
    Idle,
    /// Ball lost, replacement waiting for the launch input
    Serving,
    /// Active gameplay
    Playing,
    /// All blocks destroyed; the session has been reset
    Cleared,
    /// Lives exhausted; the session has been reset
    Over,
}

impl GamePhase {
    /// True when the launch input starts play from this phase
    pub fn awaits_launch(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }

    /// Prompt the display layer shows for this phase
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            GamePhase::Idle => Some("Press SPACE to start"),
            GamePhase::Serving => Some("Press SPACE to launch the ball"),
            GamePhase::Playing => None,
            GamePhase::Cleared => Some("GAME CLEAR!\nPress SPACE to play again"),
            GamePhase::Over => Some("GAME OVER\nPress SPACE to play again"),
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal movement per tick
    pub speed: f32,
    /// Unexpanded width, restored when the expand effect ends
    pub base_width: f32,
}

impl Paddle {
    /// Paddle centered horizontally at its fixed height
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: (tuning.playfield_width - tuning.paddle_width) / 2.0,
            y: tuning.paddle_y(),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            base_width: tuning.paddle_width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Move by the held direction keys, then clamp inside the playfield
    pub fn steer(&mut self, left: bool, right: bool, field_width: f32) {
        if left {
            self.x -= self.speed;
        }
        if right {
            self.x += self.speed;
        }
        self.clamp_to(field_width);
    }

    /// Keep the paddle fully inside `[0, field_width]`
    pub fn clamp_to(&mut self, field_width: f32) {
        self.x = self.x.clamp(0.0, (field_width - self.width).max(0.0));
    }

    /// Normalized contact position: 0 = left edge, 1 = right edge
    #[inline]
    pub fn hit_fraction(&self, ball_x: f32) -> f32 {
        (ball_x - self.x) / self.width
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Nominal speed used for paddle deflection (never changes)
    pub base_speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, base_speed: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            base_speed,
        }
    }

    /// Ball at the serve position heading up and to the right
    pub fn served(tuning: &Tuning, speed_multiplier: f32) -> Self {
        let pos = Vec2::new(
            tuning.playfield_width / 2.0,
            tuning.playfield_height - tuning.ball_serve_offset,
        );
        let vel = Vec2::new(tuning.ball_speed, -tuning.ball_speed) * speed_multiplier;
        Self::new(pos, vel, tuning.ball_radius, tuning.ball_speed)
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A block in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    /// RGB color derived from the row
    pub color: u32,
    pub visible: bool,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    MultiBall,
    SpeedUp,
    PaddleExpand,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [
        PickupKind::MultiBall,
        PickupKind::SpeedUp,
        PickupKind::PaddleExpand,
    ];

    /// RGB color for rendering
    pub fn color(&self) -> u32 {
        match self {
            PickupKind::MultiBall => 0x1DD1A1,
            PickupKind::SpeedUp => 0xFF6348,
            PickupKind::PaddleExpand => 0xFFD32A,
        }
    }

    /// Glyph drawn on the pickup
    pub fn symbol(&self) -> char {
        match self {
            PickupKind::MultiBall => 'M',
            PickupKind::SpeedUp => 'S',
            PickupKind::PaddleExpand => 'W',
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Side length of the (square) pickup
    pub size: f32,
    /// Downward movement per tick
    pub fall_speed: f32,
}

impl Pickup {
    /// Pickup centered horizontally just below a destroyed block
    pub fn below(block: &Rect, kind: PickupKind, tuning: &Tuning) -> Self {
        Self {
            kind,
            pos: Vec2::new(block.center().x - tuning.pickup_size / 2.0, block.bottom()),
            size: tuning.pickup_size,
            fall_speed: tuning.pickup_fall_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Circle proxy used for the paddle catch test
    pub fn circle(&self) -> Circle {
        Circle::new(self.rect().center(), self.size / 2.0)
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched,
    BlockDestroyed { row: usize, col: usize },
    PickupSpawned { kind: PickupKind },
    PickupCaught { kind: PickupKind },
    PickupMissed { kind: PickupKind },
    EffectExpired { effect: TimedEffect },
    BallLost,
    LifeLost { lives_left: u8 },
    GameOver { final_score: u32 },
    GameCleared { final_score: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated balance and geometry
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// Playing ticks since the last reset
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    /// Row-major block grid
    pub blocks: Vec<Block>,
    pub pickups: Vec<Pickup>,
    pub effects: EffectTimers,
    /// Events raised during the current tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session; the tuning is validated here and nowhere else
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = Self::build(tuning, seed);
        log::info!(
            "New session: seed={}, grid={}x{}, lives={}",
            seed,
            state.tuning.block_rows,
            state.tuning.block_cols,
            state.lives
        );
        Ok(state)
    }

    /// Session with default tuning (always valid)
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self {
            paddle: Paddle::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            lives: 0,
            time_ticks: 0,
            balls: Vec::new(),
            blocks: Vec::new(),
            pickups: Vec::new(),
            effects: EffectTimers::default(),
            events: Vec::new(),
        };
        state.reset_round();
        state
    }

    /// Restore every entity, the score, lives and timers to their start values
    ///
    /// The phase is left alone so the caller can decide what the display shows.
    pub(crate) fn reset_round(&mut self) {
        self.score = 0;
        self.lives = self.tuning.initial_lives;
        self.time_ticks = 0;
        self.effects = EffectTimers::default();
        self.paddle = Paddle::new(&self.tuning);
        self.balls.clear();
        self.balls.push(Ball::served(&self.tuning, 1.0));
        self.pickups.clear();
        self.init_blocks();
    }

    /// Build the full, visible, row-major block grid
    fn init_blocks(&mut self) {
        let t = &self.tuning;
        let left = t.grid_offset_left();
        self.blocks.clear();
        for row in 0..t.block_rows {
            for col in 0..t.block_cols {
                self.blocks.push(Block {
                    row,
                    col,
                    rect: Rect::new(
                        left + col as f32 * (t.block_width + t.block_padding),
                        t.block_offset_top + row as f32 * (t.block_height + t.block_padding),
                        t.block_width,
                        t.block_height,
                    ),
                    color: t.row_color(row),
                    visible: true,
                });
            }
        }
    }

    pub fn add_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Remove a ball; `None` if the index is already gone
    pub fn remove_ball(&mut self, index: usize) -> Option<Ball> {
        (index < self.balls.len()).then(|| self.balls.remove(index))
    }

    pub fn add_pickup(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    /// Remove a pickup; `None` if the index is already gone
    pub fn remove_pickup(&mut self, index: usize) -> Option<Pickup> {
        (index < self.pickups.len()).then(|| self.pickups.remove(index))
    }

    /// Mark a block destroyed
    ///
    /// Returns true only on the visible-to-invisible transition, so a block
    /// can never be scored twice.
    pub fn strike_block(&mut self, index: usize) -> bool {
        match self.blocks.get_mut(index) {
            Some(block) if block.visible => {
                block.visible = false;
                true
            }
            _ => false,
        }
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn visible_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.visible).count()
    }

    /// Clear condition: no block left standing
    pub fn all_blocks_cleared(&self) -> bool {
        self.blocks.iter().all(|b| !b.visible)
    }
}
