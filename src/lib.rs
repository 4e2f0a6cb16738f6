//! Block Breaker - A paddle-and-blocks arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collisions, power-ups, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{GamePhase, GameState, Snapshot, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the playfield bottom to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED: f32 = 4.0;
    /// Distance from the playfield bottom to a served ball
    pub const BALL_SERVE_OFFSET: f32 = 50.0;

    /// Block grid defaults
    pub const BLOCK_ROWS: usize = 6;
    pub const BLOCK_COLS: usize = 10;
    pub const BLOCK_WIDTH: f32 = 70.0;
    pub const BLOCK_HEIGHT: f32 = 25.0;
    pub const BLOCK_PADDING: f32 = 5.0;
    pub const BLOCK_OFFSET_TOP: f32 = 60.0;

    /// Row colors, top to bottom
    pub const BLOCK_COLORS: [u32; 6] = [0xFF6B6B, 0xFECA57, 0x48DBFB, 0xFF9FF3, 0x54A0FF, 0x5F27CD];

    /// Scoring and lives
    pub const POINTS_PER_BLOCK: u32 = 10;
    pub const INITIAL_LIVES: u8 = 3;

    /// Pickup defaults
    pub const PICKUP_SIZE: f32 = 20.0;
    pub const PICKUP_FALL_SPEED: f32 = 2.0;
    pub const PICKUP_DROP_CHANCE: f64 = 0.2;

    /// Timed power-ups (durations in ticks)
    pub const SPEED_UP_MULTIPLIER: f32 = 1.5;
    pub const SPEED_UP_DURATION: u32 = 10 * TICKS_PER_SECOND;
    pub const PADDLE_EXPAND_MULTIPLIER: f32 = 1.5;
    pub const PADDLE_EXPAND_DURATION: u32 = 15 * TICKS_PER_SECOND;

    /// Multi-ball velocity jitter (full span, centered on zero)
    pub const MULTI_BALL_JITTER_X: f32 = 4.0;
    pub const MULTI_BALL_JITTER_Y: f32 = 2.0;
}
