//! Data-driven game balance
//!
//! Every number the simulation uses comes from a `Tuning` value. Defaults
//! mirror `consts`; a JSON document can override any subset of fields.
//! A tuning is validated once, when a `GameState` is built, so the
//! simulation itself never has to handle bad geometry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("paddle width {paddle} does not fit a playfield {field} wide")]
    PaddleTooWide { paddle: f32, field: f32 },

    #[error("{what} lies outside the playfield")]
    OutOfBounds { what: &'static str },

    #[error("block grid needs at least one row and one column")]
    EmptyGrid,

    #[error("block grid ({width}x{height}) does not fit the playfield")]
    GridTooLarge { width: f32, height: f32 },

    #[error("need at least one block color")]
    NoBlockColors,

    #[error("drop chance must be within [0, 1], got {0}")]
    DropChance(f64),

    #[error("{field} duration must be at least one tick")]
    ZeroDuration { field: &'static str },

    #[error("initial lives must be at least 1")]
    NoLives,

    #[error("invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_bottom_offset: f32,

    pub ball_radius: f32,
    pub ball_speed: f32,
    pub ball_serve_offset: f32,

    pub block_rows: usize,
    pub block_cols: usize,
    pub block_width: f32,
    pub block_height: f32,
    pub block_padding: f32,
    pub block_offset_top: f32,
    /// RGB per row; rows beyond the list wrap around
    pub block_colors: Vec<u32>,

    pub points_per_block: u32,
    pub initial_lives: u8,

    pub pickup_size: f32,
    pub pickup_fall_speed: f32,
    pub pickup_drop_chance: f64,

    pub speed_up_multiplier: f32,
    pub speed_up_duration: u32,
    pub paddle_expand_multiplier: f32,
    pub paddle_expand_duration: u32,

    pub multi_ball_jitter_x: f32,
    pub multi_ball_jitter_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,
            ball_serve_offset: BALL_SERVE_OFFSET,

            block_rows: BLOCK_ROWS,
            block_cols: BLOCK_COLS,
            block_width: BLOCK_WIDTH,
            block_height: BLOCK_HEIGHT,
            block_padding: BLOCK_PADDING,
            block_offset_top: BLOCK_OFFSET_TOP,
            block_colors: BLOCK_COLORS.to_vec(),

            points_per_block: POINTS_PER_BLOCK,
            initial_lives: INITIAL_LIVES,

            pickup_size: PICKUP_SIZE,
            pickup_fall_speed: PICKUP_FALL_SPEED,
            pickup_drop_chance: PICKUP_DROP_CHANCE,

            speed_up_multiplier: SPEED_UP_MULTIPLIER,
            speed_up_duration: SPEED_UP_DURATION,
            paddle_expand_multiplier: PADDLE_EXPAND_MULTIPLIER,
            paddle_expand_duration: PADDLE_EXPAND_DURATION,

            multi_ball_jitter_x: MULTI_BALL_JITTER_X,
            multi_ball_jitter_y: MULTI_BALL_JITTER_Y,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Total width of the block grid including inner padding
    pub fn grid_width(&self) -> f32 {
        self.block_cols as f32 * (self.block_width + self.block_padding) - self.block_padding
    }

    /// Total height of the block grid including inner padding
    pub fn grid_height(&self) -> f32 {
        self.block_rows as f32 * (self.block_height + self.block_padding) - self.block_padding
    }

    /// Left edge of the grid (grid is centered horizontally)
    pub fn grid_offset_left(&self) -> f32 {
        (self.playfield_width - self.grid_width()) / 2.0
    }

    /// Paddle top edge
    pub fn paddle_y(&self) -> f32 {
        self.playfield_height - self.paddle_bottom_offset
    }

    /// Color for a block row
    pub fn row_color(&self, row: usize) -> u32 {
        self.block_colors[row % self.block_colors.len()]
    }

    /// Reject geometry and balance values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("block_width", self.block_width),
            ("block_height", self.block_height),
            ("pickup_size", self.pickup_size),
            ("pickup_fall_speed", self.pickup_fall_speed),
            ("speed_up_multiplier", self.speed_up_multiplier),
            ("paddle_expand_multiplier", self.paddle_expand_multiplier),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("block_padding", self.block_padding),
            ("block_offset_top", self.block_offset_top),
            ("multi_ball_jitter_x", self.multi_ball_jitter_x),
            ("multi_ball_jitter_y", self.multi_ball_jitter_y),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.paddle_width > self.playfield_width {
            return Err(TuningError::PaddleTooWide {
                paddle: self.paddle_width,
                field: self.playfield_width,
            });
        }
        let paddle_y = self.paddle_y();
        if paddle_y < 0.0 || paddle_y + self.paddle_height > self.playfield_height {
            return Err(TuningError::OutOfBounds { what: "paddle" });
        }

        let serve_y = self.playfield_height - self.ball_serve_offset;
        if serve_y - self.ball_radius < 0.0
            || serve_y + self.ball_radius > self.playfield_height
            || 2.0 * self.ball_radius > self.playfield_width
        {
            return Err(TuningError::OutOfBounds { what: "served ball" });
        }

        if self.block_rows == 0 || self.block_cols == 0 {
            return Err(TuningError::EmptyGrid);
        }
        let grid_width = self.grid_width();
        let grid_height = self.grid_height();
        if grid_width > self.playfield_width
            || self.block_offset_top + grid_height > paddle_y
        {
            return Err(TuningError::GridTooLarge {
                width: grid_width,
                height: grid_height,
            });
        }
        if self.block_colors.is_empty() {
            return Err(TuningError::NoBlockColors);
        }

        if self.pickup_size > self.block_width.min(self.playfield_width) {
            return Err(TuningError::OutOfBounds { what: "pickup" });
        }
        if !(0.0..=1.0).contains(&self.pickup_drop_chance) {
            return Err(TuningError::DropChance(self.pickup_drop_chance));
        }

        if self.speed_up_duration == 0 {
            return Err(TuningError::ZeroDuration { field: "speed_up" });
        }
        if self.paddle_expand_duration == 0 {
            return Err(TuningError::ZeroDuration {
                field: "paddle_expand",
            });
        }
        if self.initial_lives == 0 {
            return Err(TuningError::NoLives);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.grid_width(), 745.0);
        assert_eq!(tuning.grid_offset_left(), 27.5);
        assert_eq!(tuning.paddle_y(), 570.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "initial_lives": 5, "pickup_drop_chance": 1.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.initial_lives, 5);
        assert_eq!(tuning.pickup_drop_chance, 1.0);
        assert_eq!(tuning.block_rows, BLOCK_ROWS);
    }

    #[test]
    fn test_bad_json_is_rejected() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let tuning = Tuning {
            ball_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositive {
                field: "ball_radius",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning {
            paddle_speed: f32::NAN,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_grid_must_fit() {
        let tuning = Tuning {
            block_cols: 20,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GridTooLarge { .. })
        ));

        let tuning = Tuning {
            block_rows: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::EmptyGrid)));
    }

    #[test]
    fn test_paddle_must_fit() {
        let tuning = Tuning {
            paddle_width: 900.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::PaddleTooWide { .. })
        ));

        let tuning = Tuning {
            paddle_bottom_offset: 700.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::OutOfBounds { what: "paddle" })
        ));
    }

    #[test]
    fn test_balance_values_checked() {
        let tuning = Tuning {
            pickup_drop_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::DropChance(_))));

        let tuning = Tuning {
            speed_up_duration: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::ZeroDuration { .. })
        ));

        let tuning = Tuning {
            initial_lives: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::NoLives)));

        let tuning = Tuning {
            block_colors: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::NoBlockColors)));
    }

    #[test]
    fn test_row_colors_wrap() {
        let tuning = Tuning {
            block_colors: vec![0x111111, 0x222222],
            ..Default::default()
        };
        assert_eq!(tuning.row_color(0), 0x111111);
        assert_eq!(tuning.row_color(3), 0x222222);
    }
}
