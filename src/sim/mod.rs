//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (row-major blocks, index-ordered balls/pickups)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod resolve;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, overlaps};
pub use effects::{EffectTimers, TimedEffect};
pub use snapshot::Snapshot;
pub use state::{Ball, Block, GameEvent, GamePhase, GameState, Paddle, Pickup, PickupKind};
pub use tick::{TickInput, tick};
