//! Fixed game constants and the `GameConfig` value that carries them.

use crate::error::ConfigError;

pub const ARENA_WIDTH: usize = 12;
pub const ARENA_HEIGHT: usize = 20;
/// Milliseconds between automatic drops.
pub const DROP_INTERVAL_MS: f64 = 1000.0;
/// Canvas pixels per grid unit.
pub const CELL_SCALE: f64 = 20.0;

/// Cell colors indexed by cell value. Index 0 is the background and never drawn.
pub const PALETTE: [&str; 8] = [
    "#111111", "#FF0D72", "#0DC2FF", "#0DFF72", "#F538FF", "#FF8E0D", "#FFE138", "#3877FF",
];

pub const BACKGROUND: &str = "#111";

// Upper bound keeps the canvas at a sane size.
const MAX_DIMENSION: usize = 256;
// Widest catalog piece (I).
const MIN_WIDTH: usize = 4;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub drop_interval_ms: f64,
    pub cell_scale: f64,
    pub canvas_id: String,
    pub score_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            drop_interval_ms: DROP_INTERVAL_MS,
            cell_scale: CELL_SCALE,
            canvas_id: "tetris".to_string(),
            score_id: "score".to_string(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.width > MAX_DIMENSION {
            return Err(ConfigError::Width(self.width));
        }
        if self.height == 0 || self.height > MAX_DIMENSION {
            return Err(ConfigError::Height(self.height));
        }
        if !(self.drop_interval_ms > 0.0) {
            return Err(ConfigError::DropInterval(self.drop_interval_ms));
        }
        if !(self.cell_scale > 0.0) {
            return Err(ConfigError::CellScale(self.cell_scale));
        }
        Ok(())
    }

    /// Canvas size in pixels for this grid and scale.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            (self.width as f64 * self.cell_scale) as u32,
            (self.height as f64 * self.cell_scale) as u32,
        )
    }
}
