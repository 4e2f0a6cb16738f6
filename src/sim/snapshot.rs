//! Read-only view of a session handed to renderers and displays

use serde::Serialize;

use super::effects::EffectTimers;
use super::state::{Ball, Block, GameEvent, GamePhase, GameState, Paddle, Pickup};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    /// Full grid; check `visible` before drawing
    pub blocks: Vec<Block>,
    pub pickups: Vec<Pickup>,
    pub effects: EffectTimers,
    /// What happened during the tick that produced this snapshot
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    /// Blocks still standing
    pub fn visible_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.visible)
    }

    /// Prompt for the status overlay, if the phase has one
    pub fn status_message(&self) -> Option<&'static str> {
        self.phase.status_message()
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            time_ticks: self.time_ticks,
            paddle: self.paddle.clone(),
            balls: self.balls.clone(),
            blocks: self.blocks.clone(),
            pickups: self.pickups.clone(),
            effects: self.effects.clone(),
            events: self.events.clone(),
        }
    }
}
